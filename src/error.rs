//! Error types
//!
//! Startup errors (`ConfigError`, `SinkError::Init`) are fatal and keep the
//! trigger loop from starting. Write errors only abort the current alert.

use core::fmt;

/// Invalid alert configuration, rejected before any playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// C01: Sample rate is zero
    ZeroSampleRate,
    /// C02: Duration is zero
    ZeroDuration,
    /// C03: Frequency is zero, negative or not finite
    InvalidFrequency,
    /// C04: Frequency at or above half the sample rate
    AboveNyquist,
    /// C05: Volume outside [0.0, 1.0]
    VolumeOutOfRange,
    /// C06: Duration and rate produce no samples
    EmptyPlayback,
    /// C07: Sink runs at a different rate than the profile
    SampleRateMismatch,
}

impl ConfigError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ZeroSampleRate => "C01",
            Self::ZeroDuration => "C02",
            Self::InvalidFrequency => "C03",
            Self::AboveNyquist => "C04",
            Self::VolumeOutOfRange => "C05",
            Self::EmptyPlayback => "C06",
            Self::SampleRateMismatch => "C07",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::ZeroSampleRate => "sample rate must be positive",
            Self::ZeroDuration => "duration must be positive",
            Self::InvalidFrequency => "frequency must be positive and finite",
            Self::AboveNyquist => "frequency at or above Nyquist limit",
            Self::VolumeOutOfRange => "volume outside 0.0..=1.0",
            Self::EmptyPlayback => "profile yields no samples",
            Self::SampleRateMismatch => "sink sample rate differs from profile",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for ConfigError {}

/// Audio peripheral failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// Peripheral could not be configured. Carries the driver status code.
    Init(i32),
    /// Frame was not accepted. Carries the driver status code.
    Write(i32),
    /// Bounded wait expired before the frame was accepted.
    Timeout,
}

impl SinkError {
    /// True for failures raised while bringing the peripheral up.
    pub fn is_init(&self) -> bool {
        matches!(self, SinkError::Init(_))
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Init(code) => write!(f, "S01: sink init failed ({})", code),
            SinkError::Write(code) => write!(f, "S02: frame write failed ({})", code),
            SinkError::Timeout => f.write_str("S03: frame write timed out"),
        }
    }
}

impl std::error::Error for SinkError {}

/// Playback aborted by a sink write failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackError {
    /// Frames accepted by the sink before the failure. Also the index of
    /// the frame that failed.
    pub frames_written: u64,
    /// The write failure.
    pub cause: SinkError,
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "playback aborted at frame {}: {}", self.frames_written, self.cause)
    }
}

impl std::error::Error for PlaybackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

/// Fatal startup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupError {
    Config(ConfigError),
    Sink(SinkError),
}

impl From<ConfigError> for StartupError {
    fn from(e: ConfigError) -> Self {
        StartupError::Config(e)
    }
}

impl From<SinkError> for StartupError {
    fn from(e: SinkError) -> Self {
        StartupError::Sink(e)
    }
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Config(e) => write!(f, "configuration error: {}", e),
            StartupError::Sink(e) => write!(f, "audio sink error: {}", e),
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StartupError::Config(e) => Some(e),
            StartupError::Sink(e) => Some(e),
        }
    }
}
