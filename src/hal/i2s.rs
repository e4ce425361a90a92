//! I2S audio sink for the PCM5102 DAC.
//!
//! ESP32 is I2S controller (master), TX only, Philips standard format,
//! 16-bit stereo. The PCM5102 generates its own system clock from BCK,
//! so no MCLK pin is routed.

use esp_idf_svc::hal::delay::{TickType, BLOCK};
use esp_idf_svc::hal::gpio::{AnyIOPin, InputPin, OutputPin};
use esp_idf_svc::hal::i2s::config::{
    Config, DataBitWidth, Role, SlotMode, StdClkConfig, StdConfig, StdGpioConfig, StdSlotConfig,
};
use esp_idf_svc::hal::i2s::{I2s, I2sDriver, I2sTx};
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::sys::{EspError, ESP_ERR_TIMEOUT};

use crate::audio::{AudioSink, Frame, WriteWait};
use crate::config::{BitDepth, SinkConfig};
use crate::error::SinkError;

/// I2S + DMA output.
pub struct I2sSink<'d> {
    driver: I2sDriver<'d, I2sTx>,
    config: SinkConfig,
}

impl<'d> I2sSink<'d> {
    /// Install the I2S driver and enable TX.
    ///
    /// # Errors
    ///
    /// [`SinkError::Init`] with the ESP-IDF status code if the driver cannot
    /// be installed or started.
    pub fn initialize<I2S: I2s>(
        i2s: impl Peripheral<P = I2S> + 'd,
        bck: impl Peripheral<P = impl InputPin + OutputPin> + 'd,
        ws: impl Peripheral<P = impl InputPin + OutputPin> + 'd,
        dout: impl Peripheral<P = impl OutputPin> + 'd,
        config: &SinkConfig,
    ) -> Result<Self, SinkError> {
        let data_width = match config.bit_depth {
            BitDepth::Bits16 => DataBitWidth::Bits16,
        };

        // 8 x 64 frames by default: ~11.6 ms of audio @ 44.1 kHz
        let channel = Config::default()
            .role(Role::Controller)
            .dma_buffer_count(config.dma_buffer_count)
            .frames_per_buffer(config.dma_frames_per_buffer)
            .auto_clear(true);

        let std_config = StdConfig::new(
            channel,
            StdClkConfig::from_sample_rate_hz(config.sample_rate_hz),
            StdSlotConfig::philips_slot_default(data_width, SlotMode::Stereo),
            StdGpioConfig::default(),
        );

        let mut driver =
            I2sDriver::new_std_tx(i2s, &std_config, bck, dout, Option::<AnyIOPin>::None, ws)
                .map_err(init_error)?;
        driver.tx_enable().map_err(init_error)?;

        Ok(Self {
            driver,
            config: *config,
        })
    }
}

impl AudioSink for I2sSink<'_> {
    fn config(&self) -> &SinkConfig {
        &self.config
    }

    fn write_frame(&mut self, frame: Frame, wait: WriteWait) -> Result<(), SinkError> {
        let ticks = match wait {
            WriteWait::Forever => BLOCK,
            WriteWait::Millis(ms) => TickType::new_millis(ms as u64).ticks(),
        };

        // A timed-out write may have queued only part of the 4 bytes
        match self.driver.write_all(&frame.to_le_bytes(), ticks) {
            Ok(()) => Ok(()),
            Err(e) if e.code() == ESP_ERR_TIMEOUT as i32 => {
                self.realign()?;
                Err(SinkError::Timeout)
            }
            Err(e) => Err(write_error(e)),
        }
    }
}

impl I2sSink<'_> {
    /// Restart the TX channel. Re-enabling resets the DMA queue, so the
    /// next write starts on a left-channel word.
    fn realign(&mut self) -> Result<(), SinkError> {
        self.driver.tx_disable().map_err(write_error)?;
        self.driver.tx_enable().map_err(write_error)
    }
}

fn init_error(e: EspError) -> SinkError {
    SinkError::Init(e.code())
}

fn write_error(e: EspError) -> SinkError {
    SinkError::Write(e.code())
}
