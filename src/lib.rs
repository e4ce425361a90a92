//! # CatCollar
//!
//! Triggered audio alert for a battery-powered collar (ESP32-C3 + PCM5102).
//!
//! ## Architecture
//!
//! One thread, one loop, no locks:
//! - [`TriggerController`] polls the trigger line while armed
//! - On a trigger it calls [`AlertPlayer::play`], which blocks until the
//!   whole tone has been written to the [`AudioSink`]
//! - The sink's blocking write paces synthesis to the DAC (no underrun)
//! - After the alert the line is ignored for the re-arm delay
//!
//! Everything except `hal::i2s` and the firmware entry point builds and
//! tests on the host.

pub mod audio;
pub mod config;
pub mod error;
pub mod fault;
pub mod hal;
pub mod log_globals;
pub mod logging;
pub mod serial_log;
pub mod startup;
pub mod trigger;

pub use audio::{AlertPlayer, AudioSink, Frame, PlaybackReport, WaveformSynthesizer, WriteWait};
pub use config::{AlertProfile, SinkConfig, TriggerTiming};
pub use error::{ConfigError, PlaybackError, SinkError, StartupError};
pub use fault::{FaultCode, FaultState};
pub use log_globals::STATUS_LOG;
pub use startup::{start, AlertSettings};
pub use trigger::{Diagnostics, StepOutcome, TriggerController, TriggerState};
