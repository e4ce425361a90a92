//! Module: config
//!
//! Purpose: Startup configuration for the collar alert.
//!
//! Architecture:
//! - Compile-time defaults (`DEFAULT_*`) taken from the collar hardware
//! - `AlertProfile` is validated on construction and immutable afterwards
//! - Peripheral setup is one explicit `SinkConfig`, owned by the sink
//! - No persistence: the collar boots into the same configuration every time

use crate::error::ConfigError;

/// Output sample rate (44.1 kHz).
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 44_100;

/// Alert tone length.
pub const DEFAULT_DURATION_MS: u32 = 2_000;

/// 10 kHz: audible to people, well inside a cat's hearing range
/// (45 Hz to 64 kHz) without being painful.
pub const DEFAULT_FREQUENCY_HZ: f32 = 10_000.0;

/// 70% of full scale.
pub const DEFAULT_VOLUME: f32 = 0.7;

/// Quiet interval after an alert before the trigger is sampled again.
pub const DEFAULT_REARM_DELAY_MS: u32 = 1_000;

/// Delay between trigger polls while armed.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 10;

/// Immutable description of the alert tone.
///
/// Only constructible through [`AlertProfile::new`], so every value in
/// circulation satisfies:
/// - `frequency_hz` finite and `0 < frequency_hz < sample_rate_hz / 2`
/// - `duration_ms > 0`, `sample_rate_hz > 0`
/// - `volume` in `[0.0, 1.0]`
/// - at least one sample per playback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertProfile {
    frequency_hz: f32,
    duration_ms: u32,
    sample_rate_hz: u32,
    volume: f32,
}

impl AlertProfile {
    /// Validate and build a profile.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, checked in the order
    /// rate, duration, frequency, Nyquist limit, volume, sample count.
    pub fn new(
        frequency_hz: f32,
        duration_ms: u32,
        sample_rate_hz: u32,
        volume: f32,
    ) -> Result<Self, ConfigError> {
        if sample_rate_hz == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        if duration_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if !frequency_hz.is_finite() || frequency_hz <= 0.0 {
            return Err(ConfigError::InvalidFrequency);
        }
        if frequency_hz as f64 >= sample_rate_hz as f64 / 2.0 {
            return Err(ConfigError::AboveNyquist);
        }
        if !(0.0..=1.0).contains(&volume) {
            // Also catches NaN: contains() is false for it
            return Err(ConfigError::VolumeOutOfRange);
        }

        let profile = Self {
            frequency_hz,
            duration_ms,
            sample_rate_hz,
            volume,
        };

        if profile.total_samples() == 0 {
            return Err(ConfigError::EmptyPlayback);
        }

        Ok(profile)
    }

    /// Tone frequency in Hz.
    #[inline]
    pub fn frequency_hz(&self) -> f32 {
        self.frequency_hz
    }

    /// Alert length in milliseconds.
    #[inline]
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Output sample rate in Hz.
    #[inline]
    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    /// Volume scale in `[0.0, 1.0]`.
    #[inline]
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Samples in one playback.
    ///
    /// `duration_ms * sample_rate_hz / 1000`, truncated. Computed in 64 bits
    /// so the product cannot overflow.
    #[inline]
    pub fn total_samples(&self) -> u64 {
        self.duration_ms as u64 * self.sample_rate_hz as u64 / 1000
    }
}

impl Default for AlertProfile {
    /// The collar's factory tone: 10 kHz, 2 s, 44.1 kHz, 70%.
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            duration_ms: DEFAULT_DURATION_MS,
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            volume: DEFAULT_VOLUME,
        }
    }
}

/// Input level that counts as a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveLevel {
    /// Triggered when the line reads low (pull-up wiring).
    Low,
    /// Triggered when the line reads high.
    High,
}

/// Trigger loop timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerTiming {
    /// Delay between polls while armed. Must stay well below the shortest
    /// trigger pulse or events are missed.
    pub poll_interval_ms: u32,
    /// Dead interval after each alert. The line is not sampled during it.
    pub rearm_delay_ms: u32,
    /// Level that fires the alert.
    pub active_level: ActiveLevel,
}

impl Default for TriggerTiming {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            rearm_delay_ms: DEFAULT_REARM_DELAY_MS,
            active_level: ActiveLevel::Low,
        }
    }
}

/// Sample word width on the audio bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    Bits16,
}

impl BitDepth {
    /// Width in bits.
    pub fn bits(self) -> u16 {
        match self {
            BitDepth::Bits16 => 16,
        }
    }
}

/// Channel layout on the audio bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// Left and right slots, left word first on the wire.
    Stereo,
}

impl ChannelLayout {
    /// Number of channels per frame.
    pub fn channels(self) -> u16 {
        match self {
            ChannelLayout::Stereo => 2,
        }
    }
}

/// Audio peripheral configuration.
///
/// Everything the I2S driver needs, in one place. Handed to the sink's
/// `initialize`; the sink keeps its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    pub sample_rate_hz: u32,
    pub bit_depth: BitDepth,
    pub channels: ChannelLayout,
    /// Number of DMA descriptors.
    pub dma_buffer_count: u32,
    /// Frames per DMA descriptor.
    pub dma_frames_per_buffer: u32,
}

impl SinkConfig {
    /// Default peripheral setup at the given sample rate.
    pub fn with_sample_rate(sample_rate_hz: u32) -> Self {
        Self {
            sample_rate_hz,
            ..Default::default()
        }
    }

    /// Total frames the peripheral can hold before `write_frame` blocks.
    #[inline]
    pub fn buffered_frames(&self) -> u32 {
        self.dma_buffer_count * self.dma_frames_per_buffer
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            bit_depth: BitDepth::Bits16,
            channels: ChannelLayout::Stereo,
            dma_buffer_count: 8,
            dma_frames_per_buffer: 64,
        }
    }
}

/// Collar wiring (ESP32-C3 + PCM5102).
///
/// PCM5102 strapping: FMT to GND (standard I2S), SCK to GND (internal
/// clock), DMP to 3V3, FLT to GND.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinConfig {
    /// Trigger input, internal pull-up, low = triggered.
    pub trigger_pin: u8,
    /// I2S bit clock to PCM5102 BCK.
    pub bck_pin: u8,
    /// I2S word select to PCM5102 LCK.
    pub ws_pin: u8,
    /// I2S data to PCM5102 DIN.
    pub data_pin: u8,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            trigger_pin: 10,
            bck_pin: 5,
            ws_pin: 6,
            data_pin: 7,
        }
    }
}
