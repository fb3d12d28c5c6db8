//! GPIO pin driver abstraction
//!
//! Provides the trait the Mote protocol layer drives. Implementations
//! handle the actual hardware access for the specific board.

/// Logic level on a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Check if this is the high level
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// Check if this is the low level
    pub const fn is_low(self) -> bool {
        matches!(self, Level::Low)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Digital input
    Input,
    /// Digital output
    Output,
}

/// Raw GPIO primitives
///
/// Pins are addressed by the driver's own numbering scheme; callers
/// that hold logical (BCM) GPIO numbers translate them first with
/// [`PinDriver::gpio_to_pin`].
///
/// All primitives are infallible and blocking. A driver that can fail
/// must decide for itself how to surface that (log, latch, panic).
pub trait PinDriver {
    /// One-time initialisation of the GPIO subsystem
    ///
    /// Called once before any other primitive.
    fn setup(&mut self);

    /// Set the direction of a pin
    fn pin_mode(&mut self, pin: u8, mode: PinMode);

    /// Drive an output pin to the given level
    fn digital_write(&mut self, pin: u8, level: Level);

    /// Translate a logical GPIO number into this driver's pin number
    ///
    /// The default is the identity mapping.
    fn gpio_to_pin(&self, gpio: u8) -> u8 {
        gpio
    }
}

impl<D: PinDriver + ?Sized> PinDriver for &mut D {
    fn setup(&mut self) {
        (**self).setup();
    }

    fn pin_mode(&mut self, pin: u8, mode: PinMode) {
        (**self).pin_mode(pin, mode);
    }

    fn digital_write(&mut self, pin: u8, level: Level) {
        (**self).digital_write(pin, level);
    }

    fn gpio_to_pin(&self, gpio: u8) -> u8 {
        (**self).gpio_to_pin(gpio)
    }
}
