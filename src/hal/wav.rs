//! WAV file audio sink.
//!
//! Renders the alert on the host: same player, same frames, written to a
//! 16-bit stereo PCM file instead of the DAC. Never blocks.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::audio::{AudioSink, Frame, WriteWait};
use crate::config::SinkConfig;
use crate::error::SinkError;

/// Status code used when hound reports a non-I/O failure.
const HOUND_ERROR: i32 = -1;

/// WAV writer implementing [`AudioSink`].
pub struct WavSink<W: Write + Seek> {
    writer: WavWriter<W>,
    config: SinkConfig,
    frames_written: u64,
}

impl WavSink<BufWriter<File>> {
    /// Create (or truncate) a WAV file at `path`.
    pub fn create<P: AsRef<Path>>(path: P, config: &SinkConfig) -> Result<Self, SinkError> {
        let writer =
            WavWriter::create(path, wav_spec(config)).map_err(|e| SinkError::Init(status(&e)))?;
        Ok(Self {
            writer,
            config: *config,
            frames_written: 0,
        })
    }
}

impl<W: Write + Seek> WavSink<W> {
    /// Write a WAV stream into `inner`.
    pub fn initialize(inner: W, config: &SinkConfig) -> Result<Self, SinkError> {
        let writer =
            WavWriter::new(inner, wav_spec(config)).map_err(|e| SinkError::Init(status(&e)))?;
        Ok(Self {
            writer,
            config: *config,
            frames_written: 0,
        })
    }

    /// Frames accepted so far.
    #[inline]
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Patch the header lengths and flush.
    pub fn finalize(self) -> Result<(), SinkError> {
        self.writer.finalize().map_err(|e| SinkError::Write(status(&e)))
    }
}

impl<W: Write + Seek> AudioSink for WavSink<W> {
    fn config(&self) -> &SinkConfig {
        &self.config
    }

    fn write_frame(&mut self, frame: Frame, _wait: WriteWait) -> Result<(), SinkError> {
        // Both channels go out in one flush
        let mut pair = self.writer.get_i16_writer(2);
        pair.write_sample(frame.left);
        pair.write_sample(frame.right);
        pair.flush().map_err(|e| SinkError::Write(status(&e)))?;

        self.frames_written += 1;
        Ok(())
    }
}

fn wav_spec(config: &SinkConfig) -> WavSpec {
    WavSpec {
        channels: config.channels.channels(),
        sample_rate: config.sample_rate_hz,
        bits_per_sample: config.bit_depth.bits(),
        sample_format: SampleFormat::Int,
    }
}

fn status(e: &hound::Error) -> i32 {
    match e {
        hound::Error::IoError(io) => io.raw_os_error().unwrap_or(HOUND_ERROR),
        _ => HOUND_ERROR,
    }
}
