//! Startup sequence.
//!
//! Order matters: the profile is validated before the peripheral is
//! touched, and the loop is only built once both succeeded. Any failure
//! here is fatal; the caller must not enter the trigger loop.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

use crate::audio::{AlertPlayer, AudioSink, WriteWait};
use crate::config::{
    AlertProfile, PinConfig, SinkConfig, TriggerTiming, DEFAULT_DURATION_MS, DEFAULT_FREQUENCY_HZ,
    DEFAULT_SAMPLE_RATE_HZ, DEFAULT_VOLUME,
};
use crate::error::{SinkError, StartupError};
use crate::trigger::{Diagnostics, TriggerController};
use crate::{rt_error, rt_info};

/// Raw startup parameters, before validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertSettings {
    pub frequency_hz: f32,
    pub duration_ms: u32,
    pub sample_rate_hz: u32,
    pub volume: f32,
    /// Maximum wait per frame write.
    pub write_wait: WriteWait,
    pub timing: TriggerTiming,
    /// Peripheral setup. Its sample rate must equal `sample_rate_hz`.
    pub sink: SinkConfig,
    /// Board wiring, reported at startup.
    pub pins: PinConfig,
}

impl AlertSettings {
    /// Validate the tone parameters.
    pub fn profile(&self) -> Result<AlertProfile, StartupError> {
        AlertProfile::new(self.frequency_hz, self.duration_ms, self.sample_rate_hz, self.volume)
            .map_err(StartupError::from)
    }
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            duration_ms: DEFAULT_DURATION_MS,
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            volume: DEFAULT_VOLUME,
            write_wait: WriteWait::Forever,
            timing: TriggerTiming::default(),
            sink: SinkConfig::with_sample_rate(DEFAULT_SAMPLE_RATE_HZ),
            pins: PinConfig::default(),
        }
    }
}

/// Validate, bring up the sink, and assemble the controller.
///
/// `init_sink` is only called once the profile is known to be valid.
///
/// # Errors
///
/// - [`StartupError::Config`] for an invalid profile or a sink/profile
///   sample rate mismatch
/// - [`StartupError::Sink`] if `init_sink` fails
pub fn start<'a, S, P, D, F>(
    settings: &AlertSettings,
    init_sink: F,
    trigger: P,
    delay: D,
    diag: Diagnostics<'a>,
) -> Result<TriggerController<'a, S, P, D>, StartupError>
where
    S: AudioSink,
    P: InputPin,
    D: DelayNs,
    F: FnOnce(&SinkConfig) -> Result<S, SinkError>,
{
    rt_info!(diag.log, (diag.clock)(), "Initializing cat collar alert system...");

    let result = assemble(settings, init_sink, trigger, delay, diag);

    match &result {
        Ok(controller) => {
            let p = controller.player().profile();
            rt_info!(
                diag.log,
                (diag.clock)(),
                "Alert: {} Hz, {} ms @ {} Hz, volume {:.2}",
                p.frequency_hz(),
                p.duration_ms(),
                p.sample_rate_hz(),
                p.volume()
            );
            rt_info!(
                diag.log,
                (diag.clock)(),
                "System ready. Waiting for trigger on GPIO{}...",
                settings.pins.trigger_pin
            );
        }
        Err(e) => {
            rt_error!(diag.log, (diag.clock)(), "Startup failed: {}", e);
        }
    }

    result
}

fn assemble<'a, S, P, D, F>(
    settings: &AlertSettings,
    init_sink: F,
    trigger: P,
    delay: D,
    diag: Diagnostics<'a>,
) -> Result<TriggerController<'a, S, P, D>, StartupError>
where
    S: AudioSink,
    P: InputPin,
    D: DelayNs,
    F: FnOnce(&SinkConfig) -> Result<S, SinkError>,
{
    let profile = settings.profile()?;

    let pins = &settings.pins;
    rt_info!(
        diag.log,
        (diag.clock)(),
        "Initializing I2S for PCM5102 (BCK=GPIO{}, LCK=GPIO{}, DIN=GPIO{})...",
        pins.bck_pin,
        pins.ws_pin,
        pins.data_pin
    );
    let sink = init_sink(&settings.sink)?;
    rt_info!(diag.log, (diag.clock)(), "I2S initialized successfully");

    let player = AlertPlayer::new(profile, sink, settings.write_wait)?;

    Ok(TriggerController::new(player, trigger, delay, settings.timing, diag))
}
