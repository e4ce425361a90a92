//! Host fakes for the collar hardware.
//!
//! All fakes share one virtual clock in nanoseconds: the sink advances it
//! by one sample period per accepted frame (the DAC draining its buffer),
//! the delay advances it by the requested time, and the trigger pin reads
//! its level from it.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cat_collar_alert::audio::{AudioSink, Frame, WriteWait};
use cat_collar_alert::config::SinkConfig;
use cat_collar_alert::error::SinkError;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin};

/// Shared virtual time.
#[derive(Clone, Default)]
pub struct VirtualClock(Rc<Cell<u64>>);

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ns(&self) -> u64 {
        self.0.get()
    }

    pub fn advance_ns(&self, ns: u64) {
        self.0.set(self.0.get() + ns);
    }
}

/// Sink that records every frame.
pub struct RecordingSink {
    pub config: SinkConfig,
    pub frames: Vec<Frame>,
    pub calls: u64,
    pub waits: Vec<WriteWait>,
    /// 1-based call number that fails.
    pub fail_on_call: Option<u64>,
    pub error: SinkError,
    clock: Option<VirtualClock>,
}

impl RecordingSink {
    pub fn new(sample_rate_hz: u32) -> Self {
        Self {
            config: SinkConfig::with_sample_rate(sample_rate_hz),
            frames: Vec::new(),
            calls: 0,
            waits: Vec::new(),
            fail_on_call: None,
            error: SinkError::Write(-1),
            clock: None,
        }
    }

    pub fn failing_on(sample_rate_hz: u32, call: u64) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::new(sample_rate_hz)
        }
    }

    pub fn with_clock(mut self, clock: VirtualClock) -> Self {
        self.clock = Some(clock);
        self
    }
}

impl AudioSink for RecordingSink {
    fn config(&self) -> &SinkConfig {
        &self.config
    }

    fn write_frame(&mut self, frame: Frame, wait: WriteWait) -> Result<(), SinkError> {
        self.calls += 1;
        self.waits.push(wait);

        if self.fail_on_call == Some(self.calls) {
            return Err(self.error);
        }

        self.frames.push(frame);
        if let Some(clock) = &self.clock {
            clock.advance_ns(1_000_000_000 / self.config.sample_rate_hz as u64);
        }
        Ok(())
    }
}

/// Delay that only moves virtual time.
pub struct FakeDelay {
    clock: VirtualClock,
    pub delays_ms: Rc<RefCell<Vec<u32>>>,
}

impl FakeDelay {
    pub fn new(clock: VirtualClock) -> Self {
        Self {
            clock,
            delays_ms: Rc::default(),
        }
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.advance_ns(ns as u64);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.borrow_mut().push(ms);
        self.clock.advance_ns(ms as u64 * 1_000_000);
    }
}

#[derive(Debug)]
pub struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Trigger line driven by a function of virtual time.
///
/// `level(now_ns)` returns `Some(high)` or `None` for a read error.
pub struct ScriptedPin {
    clock: VirtualClock,
    level: Box<dyn Fn(u64) -> Option<bool>>,
    pub reads: Rc<Cell<u32>>,
}

impl ScriptedPin {
    pub fn new(clock: VirtualClock, level: impl Fn(u64) -> Option<bool> + 'static) -> Self {
        Self {
            clock,
            level: Box::new(level),
            reads: Rc::default(),
        }
    }

    /// Low (triggered) while `now < until_ns`, high afterwards.
    pub fn low_until(clock: VirtualClock, until_ns: u64) -> Self {
        Self::new(clock, move |now| Some(now >= until_ns))
    }

    /// Never triggered.
    pub fn idle(clock: VirtualClock) -> Self {
        Self::new(clock, |_| Some(true))
    }

    fn read(&mut self) -> Result<bool, PinFault> {
        self.reads.set(self.reads.get() + 1);
        (self.level)(self.clock.now_ns()).ok_or(PinFault)
    }
}

impl ErrorType for ScriptedPin {
    type Error = PinFault;
}

impl InputPin for ScriptedPin {
    fn is_high(&mut self) -> Result<bool, PinFault> {
        self.read()
    }

    fn is_low(&mut self) -> Result<bool, PinFault> {
        self.read().map(|high| !high)
    }
}

/// Clock for log timestamps in tests.
pub fn zero_clock() -> i64 {
    0
}
