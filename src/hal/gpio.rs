//! GPIO HAL for the trigger input.

use embedded_hal::digital::InputPin;

use crate::config::ActiveLevel;

#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::gpio as idf;

/// Sample `pin` once and compare against the active level.
#[inline]
pub fn is_asserted<P: InputPin>(pin: &mut P, level: ActiveLevel) -> Result<bool, P::Error> {
    match level {
        ActiveLevel::Low => pin.is_low(),
        ActiveLevel::High => pin.is_high(),
    }
}

/// Configure the trigger pin as an input with the internal pull-up.
///
/// The pull-up keeps the line high (inactive) when the sensor is
/// disconnected; the sensor pulls it low to trigger.
#[cfg(target_os = "espidf")]
pub fn trigger_input<'d, T>(
    pin: impl esp_idf_svc::hal::peripheral::Peripheral<P = T> + 'd,
) -> Result<idf::PinDriver<'d, T, idf::Input>, esp_idf_svc::sys::EspError>
where
    T: idf::InputPin + idf::OutputPin,
{
    use idf::{PinDriver, Pull};

    let mut driver = PinDriver::input(pin)?;
    driver.set_pull(Pull::Up)?;
    Ok(driver)
}
