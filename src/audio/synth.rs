//! Alert tone synthesizer
//!
//! Exact sine per sample index, scaled by volume and quantized to i16.
//! No phase accumulator: every sample is computed from its index alone,
//! so any point of the tone can be recomputed and a playback can be
//! restarted from zero at no cost.

use core::f64::consts::TAU;

use super::frame::MAX_AMPLITUDE;
use crate::config::AlertProfile;

/// Sine tone generator for one [`AlertProfile`].
///
/// `amplitude(i) = round(volume * MAX_AMPLITUDE * sin(2π * f * i / rate))`
#[derive(Debug, Clone, Copy)]
pub struct WaveformSynthesizer {
    profile: AlertProfile,
    /// Largest magnitude allowed at this volume, `floor(volume * MAX_AMPLITUDE)`
    peak: f64,
}

impl WaveformSynthesizer {
    /// Create a synthesizer for a validated profile.
    pub fn new(profile: AlertProfile) -> Self {
        let peak = (profile.volume() as f64 * MAX_AMPLITUDE as f64).floor();
        Self { profile, peak }
    }

    /// The profile being synthesized.
    #[inline]
    pub fn profile(&self) -> &AlertProfile {
        &self.profile
    }

    /// Length of one playback in samples.
    #[inline]
    pub fn total_samples(&self) -> u64 {
        self.profile.total_samples()
    }

    /// Quantized amplitude at `index`.
    ///
    /// The phase is reduced to one cycle before `sin`, which keeps full
    /// `f64` precision late in long tones. Rounding is capped at the scaled
    /// peak so `|amplitude| <= volume * MAX_AMPLITUDE` always holds.
    #[inline]
    pub fn amplitude(&self, index: u64) -> i16 {
        let rate = self.profile.sample_rate_hz() as f64;
        let cycles = self.profile.frequency_hz() as f64 * index as f64 / rate;
        let phase = cycles.fract();

        let value = self.profile.volume() as f64 * MAX_AMPLITUDE as f64 * (TAU * phase).sin();

        value.round().clamp(-self.peak, self.peak) as i16
    }

    /// Lazy sequence of every sample in one playback.
    pub fn samples(&self) -> Samples {
        Samples {
            synth: *self,
            state: SynthesisState::new(self.total_samples()),
        }
    }
}

/// Playback cursor.
///
/// `total_samples` is fixed at creation. `sample_index` only moves forward
/// and stops at `total_samples`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisState {
    sample_index: u64,
    total_samples: u64,
}

impl SynthesisState {
    /// Fresh cursor at sample 0.
    pub fn new(total_samples: u64) -> Self {
        Self {
            sample_index: 0,
            total_samples,
        }
    }

    /// Cursor for one playback of `profile`.
    pub fn for_profile(profile: &AlertProfile) -> Self {
        Self::new(profile.total_samples())
    }

    #[inline]
    pub fn sample_index(&self) -> u64 {
        self.sample_index
    }

    #[inline]
    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }

    /// Samples not yet produced.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.total_samples - self.sample_index
    }

    /// True once every sample has been produced.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.sample_index >= self.total_samples
    }

    /// Move to the next sample. No-op once complete.
    #[inline]
    pub fn advance(&mut self) {
        if !self.is_complete() {
            self.sample_index += 1;
        }
    }
}

/// Iterator over the samples of one playback.
#[derive(Debug, Clone)]
pub struct Samples {
    synth: WaveformSynthesizer,
    state: SynthesisState,
}

impl Samples {
    /// Cursor position.
    pub fn state(&self) -> &SynthesisState {
        &self.state
    }
}

impl Iterator for Samples {
    type Item = i16;

    #[inline]
    fn next(&mut self) -> Option<i16> {
        if self.state.is_complete() {
            return None;
        }
        let sample = self.synth.amplitude(self.state.sample_index());
        self.state.advance();
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.state.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl ExactSizeIterator for Samples {}

impl core::iter::FusedIterator for Samples {}
