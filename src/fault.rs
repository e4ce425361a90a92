//! Alert fault record.
//!
//! # Philosophy
//!
//! > A garbled alert is worse than silence.
//! > If a frame cannot be written, stop the tone.
//!
//! The controller does not crash on a sink failure. It records the fault
//! here, goes quiet, and re-arms. The record is atomic so a diagnostics
//! task can read it while the loop runs.

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

use crate::error::SinkError;

/// Why the last alert was cut short.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FaultCode {
    /// No fault (normal operation).
    None = 0,

    /// The sink rejected a frame.
    SinkWrite = 1,

    /// A bounded sink write timed out.
    SinkTimeout = 2,

    /// The sink reported an init failure mid-stream (peripheral reset).
    SinkLost = 3,
}

impl FaultCode {
    /// Convert from raw u8 value.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => FaultCode::SinkWrite,
            2 => FaultCode::SinkTimeout,
            3 => FaultCode::SinkLost,
            _ => FaultCode::None,
        }
    }
}

impl From<SinkError> for FaultCode {
    fn from(e: SinkError) -> Self {
        match e {
            SinkError::Write(_) => FaultCode::SinkWrite,
            SinkError::Timeout => FaultCode::SinkTimeout,
            SinkError::Init(_) => FaultCode::SinkLost,
        }
    }
}

/// Thread-safe fault state.
///
/// Set by the trigger loop when a playback aborts, cleared when the next
/// playback completes. `count` is never cleared.
pub struct FaultState {
    active: AtomicBool,

    code: AtomicU8,

    /// Frame index at which the aborted playback stopped (saturated).
    frame: AtomicU32,

    /// Total aborted playbacks since boot.
    count: AtomicU32,
}

impl FaultState {
    /// Create new fault state (no fault).
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
            code: AtomicU8::new(0),
            frame: AtomicU32::new(0),
            count: AtomicU32::new(0),
        }
    }

    /// Record an aborted playback.
    #[inline]
    pub fn set(&self, code: FaultCode, frame: u64) {
        let frame = u32::try_from(frame).unwrap_or(u32::MAX);
        self.code.store(code as u8, Ordering::Release);
        self.frame.store(frame, Ordering::Release);
        self.count.fetch_add(1, Ordering::Relaxed);
        self.active.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Fault code (only meaningful if `is_active()` is true).
    #[inline]
    pub fn code(&self) -> FaultCode {
        FaultCode::from_u8(self.code.load(Ordering::Acquire))
    }

    /// Frame index of the last abort.
    #[inline]
    pub fn frame(&self) -> u32 {
        self.frame.load(Ordering::Acquire)
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }

    /// Clear the active flag. The counter is kept.
    #[inline]
    pub fn clear(&self) {
        self.active.store(false, Ordering::Release);
    }

    /// Get a snapshot of the current fault state.
    #[inline]
    pub fn snapshot(&self) -> FaultSnapshot {
        FaultSnapshot {
            active: self.is_active(),
            code: self.code(),
            frame: self.frame(),
            count: self.count(),
        }
    }
}

impl Default for FaultState {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of fault state at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaultSnapshot {
    pub active: bool,
    pub code: FaultCode,
    pub frame: u32,
    pub count: u32,
}
