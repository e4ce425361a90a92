//! Trigger controller finite state machine.
//!
//! Polls the trigger line, plays the alert once per qualifying sample,
//! then stays deaf for the re-arm delay. Hardware comes in through the
//! `embedded-hal` traits, so the whole loop runs on the host in tests.
//!
//! # States
//!
//! ```text
//!            line active                 play() returns
//!  ARMED ───────────────▶ (PLAYING) ───────────────────▶ QUIET
//!    ▲                                                     │
//!    └──────────────────── re-arm delay ───────────────────┘
//! ```
//!
//! PLAYING is not stored: it is the duration of the `play()` call. The
//! line is not sampled while playing or quiet, so a trigger in either
//! window is dropped, not queued.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, InputPin};

use crate::audio::{AlertPlayer, AudioSink, PlaybackReport};
use crate::config::TriggerTiming;
use crate::error::PlaybackError;
use crate::fault::FaultState;
use crate::hal::gpio::is_asserted;
use crate::logging::LogStream;
use crate::{rt_debug, rt_error, rt_info, rt_warn};

/// Stored controller state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerState {
    /// Polling the trigger line.
    Armed,
    /// Alert just ended; waiting out the re-arm delay.
    Quiet,
}

/// What one `step()` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Armed, line inactive, waited one poll interval.
    Idle,
    /// Alert played to the end.
    Played(PlaybackReport),
    /// Alert cut short by a sink failure.
    Aborted(PlaybackError),
    /// Re-arm delay elapsed, back to armed.
    Rearmed,
}

/// Where the controller reports.
#[derive(Clone, Copy)]
pub struct Diagnostics<'a> {
    pub log: &'a LogStream,
    pub fault: &'a FaultState,
    /// Microseconds since boot, for log timestamps.
    pub clock: fn() -> i64,
}

/// Trigger-to-alert controller.
///
/// # Example
///
/// ```ignore
/// let mut controller = TriggerController::new(player, trigger_pin, FreeRtos, timing, diag);
/// controller.run(); // never returns
/// ```
pub struct TriggerController<'a, S, P, D> {
    player: AlertPlayer<S>,
    trigger: P,
    delay: D,
    timing: TriggerTiming,
    state: TriggerState,
    diag: Diagnostics<'a>,

    // Set while the trigger line keeps failing to read, so only the first
    // failure of a run is logged.
    read_failing: bool,

    alerts_played: u32,
    alerts_aborted: u32,
}

impl<'a, S, P, D> TriggerController<'a, S, P, D>
where
    S: AudioSink,
    P: InputPin,
    D: DelayNs,
{
    /// Create a controller in the armed state.
    pub fn new(
        player: AlertPlayer<S>,
        trigger: P,
        delay: D,
        timing: TriggerTiming,
        diag: Diagnostics<'a>,
    ) -> Self {
        Self {
            player,
            trigger,
            delay,
            timing,
            state: TriggerState::Armed,
            diag,
            read_failing: false,
            alerts_played: 0,
            alerts_aborted: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> TriggerState {
        self.state
    }

    #[inline]
    pub fn timing(&self) -> &TriggerTiming {
        &self.timing
    }

    #[inline]
    pub fn player(&self) -> &AlertPlayer<S> {
        &self.player
    }

    /// Alerts that played to the end.
    #[inline]
    pub fn alerts_played(&self) -> u32 {
        self.alerts_played
    }

    /// Alerts aborted by a sink failure.
    #[inline]
    pub fn alerts_aborted(&self) -> u32 {
        self.alerts_aborted
    }

    /// Run one iteration of the control loop.
    pub fn step(&mut self) -> StepOutcome {
        match self.state {
            TriggerState::Armed => {
                if self.poll_trigger() {
                    let outcome = self.fire();
                    self.state = TriggerState::Quiet;
                    outcome
                } else {
                    self.delay.delay_ms(self.timing.poll_interval_ms);
                    StepOutcome::Idle
                }
            }
            TriggerState::Quiet => {
                self.delay.delay_ms(self.timing.rearm_delay_ms);
                self.state = TriggerState::Armed;
                rt_debug!(self.diag.log, self.now(), "Re-armed");
                StepOutcome::Rearmed
            }
        }
    }

    /// Run the control loop forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    /// Sample the line once. A read error counts as "not triggered".
    fn poll_trigger(&mut self) -> bool {
        match is_asserted(&mut self.trigger, self.timing.active_level) {
            Ok(asserted) => {
                self.read_failing = false;
                asserted
            }
            Err(e) => {
                if !self.read_failing {
                    rt_warn!(self.diag.log, self.now(), "Trigger read failed: {:?}", e.kind());
                    self.read_failing = true;
                }
                false
            }
        }
    }

    /// Play the alert to completion or first failure.
    fn fire(&mut self) -> StepOutcome {
        rt_info!(self.diag.log, self.now(), "Trigger detected!");
        rt_info!(self.diag.log, self.now(), "ALERT: Playing alert sound");

        match self.player.play() {
            Ok(report) => {
                self.alerts_played = self.alerts_played.wrapping_add(1);
                self.diag.fault.clear();
                rt_info!(
                    self.diag.log,
                    self.now(),
                    "Alert sound complete ({} frames)",
                    report.frames_written
                );
                StepOutcome::Played(report)
            }
            Err(e) => {
                self.alerts_aborted = self.alerts_aborted.wrapping_add(1);
                self.diag.fault.set(e.cause.into(), e.frames_written);
                rt_error!(self.diag.log, self.now(), "Alert aborted: {}", e);
                StepOutcome::Aborted(e)
            }
        }
    }

    #[inline]
    fn now(&self) -> i64 {
        (self.diag.clock)()
    }
}
