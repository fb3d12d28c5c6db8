//! Mote board handle
//!
//! [`Mote`] owns the pin driver and the in-memory device model. Callers
//! configure channels and set pixels, which only touches memory, then
//! call [`Mote::show`] to push the whole buffer out over GPIO.

use motephat_core::config::PinConfigError;
use motephat_core::{Channel, Device, MotePins, Pixel, Result};
use motephat_hal::{PinDriver, PinMode};
use motephat_protocol::frame_symbols;

use crate::bus::Bus;
use crate::selector::ChannelSelector;

/// A connected Mote board
///
/// Every GPIO operation goes through the owned driver, so `&mut self`
/// on [`Mote::show`] is the only synchronisation there is.
pub struct Mote<D: PinDriver> {
    driver: D,
    device: Device,
    pins: MotePins,
    bus: Bus,
    selector: ChannelSelector,
}

impl<D: PinDriver> Mote<D> {
    /// Initialise GPIO and create a board handle
    ///
    /// Runs the driver's one-time setup, then puts the data, clock and
    /// four select lines into output mode. Pin numbers are BCM GPIOs and
    /// go through [`PinDriver::gpio_to_pin`] first.
    pub fn new(driver: D, pins: MotePins) -> core::result::Result<Self, PinConfigError> {
        pins.validate()?;
        Ok(Self::init(driver, pins))
    }

    /// Create a board handle using the Mote pHAT wiring
    pub fn with_default_pins(driver: D) -> Self {
        Self::init(driver, MotePins::MOTE_PHAT)
    }

    fn init(mut driver: D, pins: MotePins) -> Self {
        driver.setup();

        let data = driver.gpio_to_pin(pins.data);
        let clock = driver.gpio_to_pin(pins.clock);
        let mut select = [0u8; motephat_core::NUM_CHANNELS];
        for (out, &gpio) in select.iter_mut().zip(pins.channels.iter()) {
            *out = driver.gpio_to_pin(gpio);
        }

        driver.pin_mode(data, PinMode::Output);
        driver.pin_mode(clock, PinMode::Output);
        for &pin in select.iter() {
            driver.pin_mode(pin, PinMode::Output);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Mote GPIO ready: data={} clock={} select={}", data, clock, select);

        Self {
            driver,
            device: Device::new(),
            pins,
            bus: Bus::new(data, clock),
            selector: ChannelSelector::new(select),
        }
    }

    /// Configure a channel
    ///
    /// # Arguments
    /// - `channel`: 1, 2, 3 or 4, matching the numbers on the board
    /// - `pixel_count`: number of pixels on the stick, at most 16
    /// - `gamma_correction`: recorded with the channel; pixels are still
    ///   sent exactly as stored
    ///
    /// Any earlier configuration and pixel data for the channel is lost.
    pub fn configure_channel(
        &mut self,
        channel: u8,
        pixel_count: usize,
        gamma_correction: bool,
    ) -> Result<()> {
        self.device
            .configure_channel(channel, pixel_count, gamma_correction)?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Configured channel {}: {} pixels, gamma={}",
            channel,
            pixel_count,
            gamma_correction
        );

        Ok(())
    }

    /// Set the RGB colour of a single pixel
    ///
    /// # Arguments
    /// - `channel`: 1, 2, 3 or 4
    /// - `index`: pixel index, from 0 up
    /// - `red`, `green`, `blue`: 0-255; only the low 8 bits are kept
    pub fn set_pixel(
        &mut self,
        channel: u8,
        index: usize,
        red: i32,
        green: i32,
        blue: i32,
    ) -> Result<()> {
        self.device.set_pixel(channel, index, red, green, blue)
    }

    /// Read back a single pixel as stored
    pub fn pixel(&self, channel: u8, index: usize) -> Result<Pixel> {
        self.device.pixel(channel, index)
    }

    /// Set every pixel on one channel
    pub fn set_channel(&mut self, channel: u8, red: i32, green: i32, blue: i32) -> Result<()> {
        self.device.set_channel(channel, red, green, blue)
    }

    /// Set every pixel on every configured channel
    pub fn set_all(&mut self, red: i32, green: i32, blue: i32) {
        self.device.set_all(red, green, blue);
    }

    /// Turn off every pixel on one channel
    pub fn clear_channel(&mut self, channel: u8) -> Result<()> {
        self.device.clear_channel(channel)
    }

    /// Turn off every pixel on every configured channel
    pub fn clear(&mut self) {
        self.device.clear();
    }

    /// Number of pixels configured on a channel
    pub fn pixel_count(&self, channel: u8) -> Result<usize> {
        self.device.pixel_count(channel)
    }

    /// Gamma flag a channel was configured with
    pub fn is_gamma_corrected(&self, channel: u8) -> Result<bool> {
        self.device.is_gamma_corrected(channel)
    }

    /// Look up a channel; `Ok(None)` if valid but unconfigured
    pub fn channel(&self, channel: u8) -> Result<Option<&Channel>> {
        self.device.channel(channel)
    }

    /// The in-memory device model
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Pin assignment in BCM numbering
    pub fn pins(&self) -> MotePins {
        self.pins
    }

    /// Send the pixel buffer to the hardware
    ///
    /// Channels go out in order 1 to 4. Each configured channel is
    /// selected, then gets a start marker, one word per stored pixel and
    /// an end marker. Unconfigured channels produce no GPIO activity at all.
    pub fn show(&mut self) {
        for (number, channel) in self.device.channels() {
            let Some(channel) = channel else {
                #[cfg(feature = "defmt")]
                defmt::trace!("Skipping unconfigured channel {}", number);
                continue;
            };

            self.selector.select(&mut self.driver, number as usize - 1);
            let pixels = channel.pixels().iter().copied();
            self.bus.write_symbols(&mut self.driver, frame_symbols(pixels));

            #[cfg(feature = "defmt")]
            defmt::trace!("Wrote channel {}: {} pixels", number, channel.len());
        }
    }

    /// Borrow the pin driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutably borrow the pin driver
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Consume the handle and give back the pin driver
    pub fn release(self) -> D {
        self.driver
    }
}
