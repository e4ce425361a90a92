//! Waveform synthesizer tests

use cat_collar_alert::audio::{SynthesisState, WaveformSynthesizer, MAX_AMPLITUDE};
use cat_collar_alert::config::AlertProfile;

fn synth(freq: f32, duration_ms: u32, rate: u32, volume: f32) -> WaveformSynthesizer {
    WaveformSynthesizer::new(AlertProfile::new(freq, duration_ms, rate, volume).unwrap())
}

#[test]
fn test_sample_count_matches_profile() {
    let gen = synth(10_000.0, 2_000, 44_100, 0.7);
    assert_eq!(gen.total_samples(), 88_200);
    assert_eq!(gen.samples().len(), 88_200);
    assert_eq!(gen.samples().count(), 88_200);
}

#[test]
fn test_known_values() {
    // 1 kHz @ 8 kHz: 8 samples per cycle, 45 degree steps
    let gen = synth(1_000.0, 10, 8_000, 1.0);

    assert_eq!(gen.amplitude(0), 0);
    assert_eq!(gen.amplitude(2), 32_767);
    assert_eq!(gen.amplitude(4), 0);
    assert_eq!(gen.amplitude(6), -32_767);

    // round(0.5 * 32767 * sin(pi/4)) = round(11584.88)
    let half = synth(1_000.0, 10, 8_000, 0.5);
    assert_eq!(half.amplitude(1), 11_585);
    assert_eq!(half.amplitude(5), -11_585);
}

#[test]
fn test_amplitude_within_volume_bound() {
    for volume in [0.1f32, 0.33, 0.7, 0.999, 1.0] {
        let gen = synth(10_000.0, 2_000, 44_100, volume);
        let bound = volume as f64 * MAX_AMPLITUDE as f64;

        for (i, s) in gen.samples().enumerate() {
            assert!(
                (s as f64).abs() <= bound,
                "sample {} = {} exceeds {} at volume {}",
                i,
                s,
                bound,
                volume
            );
        }
    }
}

#[test]
fn test_zero_volume_is_silent() {
    let gen = synth(10_000.0, 2_000, 44_100, 0.0);
    assert!(gen.samples().all(|s| s == 0));
}

#[test]
fn test_full_volume_reaches_peaks_without_overflow() {
    let gen = synth(10_000.0, 2_000, 44_100, 1.0);

    let max = gen.samples().max().unwrap();
    let min = gen.samples().min().unwrap();

    assert_eq!(max, i16::MAX);
    assert_eq!(min, -i16::MAX);
}

#[test]
fn test_deterministic_and_restartable() {
    let gen = synth(10_000.0, 2_000, 44_100, 0.7);

    for i in [0u64, 1, 2, 441, 10_000, 88_199] {
        assert_eq!(gen.amplitude(i), gen.amplitude(i));
    }

    let first: Vec<i16> = gen.samples().collect();
    let second: Vec<i16> = gen.samples().collect();
    assert_eq!(first, second);

    let other = synth(10_000.0, 2_000, 44_100, 0.7);
    assert!(first.iter().enumerate().all(|(i, &s)| other.amplitude(i as u64) == s));
}

#[test]
fn test_tone_is_periodic() {
    // 10 kHz @ 44.1 kHz repeats every 441 samples (100 cycles)
    let gen = synth(10_000.0, 2_000, 44_100, 0.7);
    for i in 0..2_000u64 {
        assert_eq!(gen.amplitude(i), gen.amplitude(i + 441), "index {}", i);
    }
}

#[test]
fn test_synthesis_state_cursor() {
    let mut state = SynthesisState::new(3);
    assert_eq!(state.sample_index(), 0);
    assert_eq!(state.remaining(), 3);
    assert!(!state.is_complete());

    state.advance();
    state.advance();
    state.advance();
    assert!(state.is_complete());
    assert_eq!(state.sample_index(), 3);

    // Never moves past the end
    state.advance();
    assert_eq!(state.sample_index(), 3);
    assert_eq!(state.total_samples(), 3);
}

#[test]
fn test_samples_iterator_fused() {
    let gen = synth(1_000.0, 1, 8_000, 1.0);
    let mut samples = gen.samples();

    assert_eq!(samples.len(), 8);
    for _ in 0..8 {
        assert!(samples.next().is_some());
    }
    assert_eq!(samples.next(), None);
    assert_eq!(samples.next(), None);
    assert_eq!(samples.state().sample_index(), 8);
}
