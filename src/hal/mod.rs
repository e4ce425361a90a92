//! Hardware Abstraction Layer for the collar.
//!
//! Thin wrappers around the peripherals. The alert logic stays in
//! `audio` and `trigger`; HAL is just I/O.

pub mod gpio;
#[cfg(target_os = "espidf")]
pub mod i2s;
#[cfg(feature = "wav")]
pub mod wav;

#[cfg(target_os = "espidf")]
pub use i2s::I2sSink;
#[cfg(feature = "wav")]
pub use wav::WavSink;
