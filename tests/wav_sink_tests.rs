//! WAV sink tests: render into memory, read back with hound.

#![cfg(feature = "wav")]

use std::io::Cursor;

use cat_collar_alert::audio::{AlertPlayer, AudioSink, Frame, WaveformSynthesizer, WriteWait};
use cat_collar_alert::config::{AlertProfile, SinkConfig};
use cat_collar_alert::hal::WavSink;
use hound::{SampleFormat, WavReader};

#[test]
fn test_header_matches_sink_config() {
    let mut buf = Cursor::new(Vec::new());
    let sink = WavSink::initialize(&mut buf, &SinkConfig::with_sample_rate(22_050)).unwrap();
    sink.finalize().unwrap();

    buf.set_position(0);
    let reader = WavReader::new(buf).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 22_050);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, SampleFormat::Int);
    assert_eq!(reader.len(), 0);
}

#[test]
fn test_frames_are_interleaved() {
    let mut buf = Cursor::new(Vec::new());
    let mut sink = WavSink::initialize(&mut buf, &SinkConfig::with_sample_rate(8_000)).unwrap();

    sink.write_frame(Frame { left: 1, right: -1 }, WriteWait::Forever).unwrap();
    sink.write_frame(Frame::mono(i16::MAX), WriteWait::Millis(5)).unwrap();
    assert_eq!(sink.frames_written(), 2);
    sink.finalize().unwrap();

    buf.set_position(0);
    let mut reader = WavReader::new(buf).unwrap();
    let samples: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
    assert_eq!(samples, vec![1, -1, i16::MAX, i16::MAX]);
}

#[test]
fn test_rendered_alert_matches_synthesizer() {
    let profile = AlertProfile::new(1_000.0, 50, 8_000, 0.7).unwrap();
    let mut buf = Cursor::new(Vec::new());
    let sink = WavSink::initialize(&mut buf, &SinkConfig::with_sample_rate(8_000)).unwrap();

    let mut player = AlertPlayer::new(profile, sink, WriteWait::Forever).unwrap();
    let report = player.play().unwrap();
    assert_eq!(report.frames_written, 400);
    player.into_sink().finalize().unwrap();

    buf.set_position(0);
    let mut reader = WavReader::new(buf).unwrap();
    assert_eq!(reader.len(), 800);

    let samples: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
    let expected: Vec<i16> = WaveformSynthesizer::new(profile)
        .samples()
        .flat_map(|s| [s, s])
        .collect();
    assert_eq!(samples, expected);
}

#[test]
fn test_create_writes_file() {
    let path = std::env::temp_dir().join(format!("collar-alert-{}.wav", std::process::id()));
    let profile = AlertProfile::new(2_000.0, 10, 16_000, 0.5).unwrap();

    let sink = WavSink::create(&path, &SinkConfig::with_sample_rate(16_000)).unwrap();
    let mut player = AlertPlayer::new(profile, sink, WriteWait::Forever).unwrap();
    player.play().unwrap();
    player.into_sink().finalize().unwrap();

    let reader = WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().sample_rate, 16_000);
    assert_eq!(reader.duration(), 160);

    std::fs::remove_file(&path).unwrap();
}
