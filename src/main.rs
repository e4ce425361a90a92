//! CatCollar - firmware entry point
//!
//! On the ESP32-C3:
//! 1. Start the serial log drain
//! 2. Configure the trigger pin (pull-up) and the I2S sink
//! 3. Enter the trigger loop, forever
//!
//! Any startup failure leaves the collar in an inert idle loop: no sound,
//! no polling, log output only.
//!
//! On the host the same alert is rendered to a WAV file instead.

#[cfg(target_os = "espidf")]
fn main() {
    firmware::main()
}

#[cfg(target_os = "espidf")]
mod firmware {
    use esp_idf_svc::hal::delay::FreeRtos;
    use esp_idf_svc::hal::peripherals::Peripherals;

    use cat_collar_alert::hal::gpio::trigger_input;
    use cat_collar_alert::hal::I2sSink;
    use cat_collar_alert::{rt_error, rt_info, serial_log, start, AlertSettings, Diagnostics};
    use cat_collar_alert::{FaultState, SinkConfig, STATUS_LOG};

    static ALERT_FAULT: FaultState = FaultState::new();

    fn timestamp_us() -> i64 {
        // SAFETY: esp_timer_get_time is always safe to call
        unsafe { esp_idf_svc::sys::esp_timer_get_time() }
    }

    pub fn main() {
        // Initialize ESP-IDF
        esp_idf_svc::sys::link_patches();

        let drain = std::thread::Builder::new()
            .name("serial-log".into())
            .stack_size(4096)
            .spawn(|| serial_log::drain_task(&STATUS_LOG, std::io::stdout(), timestamp_us));
        if drain.is_err() {
            // No drain: the ring fills and drops, the alert still works
            println!("serial log task failed to start");
        }

        rt_info!(STATUS_LOG, timestamp_us(), "{}", env!("VERSION_STRING"));

        let peripherals = match Peripherals::take() {
            Ok(p) => p,
            Err(e) => {
                rt_error!(STATUS_LOG, timestamp_us(), "Peripherals unavailable: {}", e);
                halt();
            }
        };
        let pins = peripherals.pins;

        // GPIO10: motion/ping sensor, LOW = triggered
        let trigger = match trigger_input(pins.gpio10) {
            Ok(pin) => pin,
            Err(e) => {
                rt_error!(STATUS_LOG, timestamp_us(), "Trigger pin setup failed: {}", e);
                halt();
            }
        };

        let settings = AlertSettings::default();
        let diag = Diagnostics {
            log: &STATUS_LOG,
            fault: &ALERT_FAULT,
            clock: timestamp_us,
        };

        // GPIO5 -> BCK, GPIO6 -> LCK, GPIO7 -> DIN
        let i2s = peripherals.i2s0;
        let init_sink = |cfg: &SinkConfig| {
            I2sSink::initialize(i2s, pins.gpio5, pins.gpio6, pins.gpio7, cfg)
        };

        match start(&settings, init_sink, trigger, FreeRtos, diag) {
            Ok(mut controller) => controller.run(),
            Err(_) => halt(), // already logged by start()
        }
    }

    /// Safe inert state after a fatal startup error.
    fn halt() -> ! {
        loop {
            FreeRtos::delay_ms(1000);
        }
    }
}

#[cfg(all(not(target_os = "espidf"), feature = "wav"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    host::render()
}

#[cfg(all(not(target_os = "espidf"), feature = "wav"))]
mod host {
    use std::env;
    use std::sync::OnceLock;
    use std::time::Instant;

    use cat_collar_alert::hal::WavSink;
    use cat_collar_alert::{rt_error, rt_info, serial_log, AlertPlayer, AlertSettings, STATUS_LOG};

    fn timestamp_us() -> i64 {
        static START: OnceLock<Instant> = OnceLock::new();
        START.get_or_init(Instant::now).elapsed().as_micros() as i64
    }

    /// Render one alert to the WAV path given as first argument.
    pub fn render() -> Result<(), Box<dyn std::error::Error>> {
        let path = env::args().nth(1).unwrap_or_else(|| "alert.wav".to_string());
        let settings = AlertSettings::default();

        let result = render_to(&path, &settings);
        if let Err(e) = &result {
            rt_error!(STATUS_LOG, timestamp_us(), "Render failed: {}", e);
        }

        serial_log::drain_to(&STATUS_LOG, &mut std::io::stderr())?;
        result
    }

    fn render_to(path: &str, settings: &AlertSettings) -> Result<(), Box<dyn std::error::Error>> {
        let profile = settings.profile()?;
        let sink = WavSink::create(path, &settings.sink)?;
        let mut player = AlertPlayer::new(profile, sink, settings.write_wait)?;

        rt_info!(STATUS_LOG, timestamp_us(), "ALERT: Rendering alert sound to {}", path);
        let report = player.play()?;
        player.into_sink().finalize()?;
        rt_info!(
            STATUS_LOG,
            timestamp_us(),
            "Alert sound complete ({} frames)",
            report.frames_written
        );
        Ok(())
    }
}

#[cfg(all(not(target_os = "espidf"), not(feature = "wav")))]
fn main() {
    eprintln!(
        "The collar firmware targets ESP-IDF. \
         Rebuild with `--features wav` to render the alert on the host."
    );
}
