//! Alert playback
//!
//! Drains one synthesis cursor into the sink. Synchronous: `play` returns
//! when the last frame is accepted or the first write fails.

use super::frame::Frame;
use super::sink::{AudioSink, WriteWait};
use super::synth::{SynthesisState, WaveformSynthesizer};
use crate::config::AlertProfile;
use crate::error::{ConfigError, PlaybackError};

/// Result of a completed playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackReport {
    /// Frames accepted by the sink (equals the profile's total samples).
    pub frames_written: u64,
}

/// Plays the alert profile through an owned sink.
///
/// # Example
///
/// ```ignore
/// let profile = AlertProfile::default();
/// let sink = I2sSink::initialize(i2s, bck, ws, dout, &SinkConfig::default())?;
/// let mut player = AlertPlayer::new(profile, sink, WriteWait::Forever)?;
/// player.play()?; // 88 200 frames, ~2 s
/// ```
pub struct AlertPlayer<S> {
    synth: WaveformSynthesizer,
    sink: S,
    wait: WriteWait,
}

impl<S: AudioSink> AlertPlayer<S> {
    /// Bind a profile to a sink.
    ///
    /// # Errors
    ///
    /// [`ConfigError::SampleRateMismatch`] if the sink was initialized at a
    /// different rate than the profile expects.
    pub fn new(profile: AlertProfile, sink: S, wait: WriteWait) -> Result<Self, ConfigError> {
        if sink.config().sample_rate_hz != profile.sample_rate_hz() {
            return Err(ConfigError::SampleRateMismatch);
        }

        Ok(Self {
            synth: WaveformSynthesizer::new(profile),
            sink,
            wait,
        })
    }

    /// Profile played on every alert.
    #[inline]
    pub fn profile(&self) -> &AlertProfile {
        self.synth.profile()
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Give the sink back.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Play the whole tone.
    ///
    /// Each sample is written as a mono frame (same value left and right).
    /// The first failed write ends playback: nothing after it is written
    /// and nothing is retried.
    pub fn play(&mut self) -> Result<PlaybackReport, PlaybackError> {
        let mut state = SynthesisState::for_profile(self.synth.profile());

        while !state.is_complete() {
            let sample = self.synth.amplitude(state.sample_index());

            self.sink
                .write_frame(Frame::mono(sample), self.wait)
                .map_err(|cause| PlaybackError {
                    frames_written: state.sample_index(),
                    cause,
                })?;

            state.advance();
        }

        Ok(PlaybackReport {
            frames_written: state.sample_index(),
        })
    }
}
