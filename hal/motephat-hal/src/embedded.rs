//! `embedded-hal` adapter
//!
//! Exposes a fixed set of `embedded-hal` 1.0 output pins, each keyed by
//! its GPIO number, as a [`PinDriver`]. This lets any platform HAL
//! (Linux cdev, RP2040, STM32, ...) drive the Mote board.

use embedded_hal::digital::{OutputPin, PinState};
use heapless::Vec;

use crate::gpio::{Level, PinDriver, PinMode};

/// Error when registering a pin with the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterError {
    /// A pin with this GPIO number is already registered
    AlreadyRegistered,
    /// Adapter capacity exhausted
    Full,
}

/// [`PinDriver`] backed by `embedded-hal` output pins
///
/// The pins are already configured as outputs by the platform HAL, so
/// [`PinDriver::setup`] and [`PinDriver::pin_mode`] only record state.
/// Writes to unregistered pins and pin-level errors are dropped and
/// counted; see [`EmbeddedHalPins::dropped_writes`].
pub struct EmbeddedHalPins<P, const N: usize> {
    pins: Vec<(u8, P), N>,
    initialised: bool,
    dropped: u32,
}

impl<P: OutputPin, const N: usize> Default for EmbeddedHalPins<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: OutputPin, const N: usize> EmbeddedHalPins<P, N> {
    /// Create an empty adapter
    pub fn new() -> Self {
        Self {
            pins: Vec::new(),
            initialised: false,
            dropped: 0,
        }
    }

    /// Register an output pin under its GPIO number
    pub fn add(&mut self, gpio: u8, pin: P) -> Result<(), RegisterError> {
        if self.pins.iter().any(|(n, _)| *n == gpio) {
            return Err(RegisterError::AlreadyRegistered);
        }
        self.pins
            .push((gpio, pin))
            .map_err(|_| RegisterError::Full)
    }

    /// Check if [`PinDriver::setup`] has run
    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    /// Number of writes that did not reach a pin
    pub fn dropped_writes(&self) -> u32 {
        self.dropped
    }

    fn pin_mut(&mut self, gpio: u8) -> Option<&mut P> {
        self.pins
            .iter_mut()
            .find(|(n, _)| *n == gpio)
            .map(|(_, p)| p)
    }
}

impl<P: OutputPin, const N: usize> PinDriver for EmbeddedHalPins<P, N> {
    fn setup(&mut self) {
        self.initialised = true;
    }

    fn pin_mode(&mut self, pin: u8, mode: PinMode) {
        // Output-typed pins cannot change direction
        if mode != PinMode::Output || self.pin_mut(pin).is_none() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }

    fn digital_write(&mut self, pin: u8, level: Level) {
        let ok = match self.pin_mut(pin) {
            Some(p) => p.set_state(PinState::from(level.is_high())).is_ok(),
            None => false,
        };
        if !ok {
            self.dropped = self.dropped.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;

    /// Mock output pin sharing its level with the test
    struct MockPin<'a> {
        high: &'a Cell<bool>,
    }

    impl embedded_hal::digital::ErrorType for MockPin<'_> {
        type Error = Infallible;
    }

    impl OutputPin for MockPin<'_> {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high.set(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high.set(true);
            Ok(())
        }
    }

    #[test]
    fn test_write_reaches_pin() {
        let dat = Cell::new(false);
        let clk = Cell::new(false);
        let mut pins: EmbeddedHalPins<MockPin, 2> = EmbeddedHalPins::new();
        pins.add(10, MockPin { high: &dat }).unwrap();
        pins.add(11, MockPin { high: &clk }).unwrap();

        pins.setup();
        assert!(pins.is_initialised());

        pins.digital_write(11, Level::High);
        assert!(clk.get());
        assert!(!dat.get());

        pins.digital_write(11, Level::Low);
        assert!(!clk.get());
        assert_eq!(pins.dropped_writes(), 0);
    }

    #[test]
    fn test_unknown_pin_is_counted() {
        let dat = Cell::new(false);
        let mut pins: EmbeddedHalPins<MockPin, 1> = EmbeddedHalPins::new();
        pins.add(10, MockPin { high: &dat }).unwrap();

        pins.digital_write(3, Level::High);
        pins.pin_mode(3, PinMode::Output);
        pins.pin_mode(10, PinMode::Input);
        assert_eq!(pins.dropped_writes(), 3);

        pins.pin_mode(10, PinMode::Output);
        assert_eq!(pins.dropped_writes(), 3);
    }

    #[test]
    fn test_register_errors() {
        let a = Cell::new(false);
        let b = Cell::new(false);
        let c = Cell::new(false);
        let mut pins: EmbeddedHalPins<MockPin, 2> = EmbeddedHalPins::new();

        pins.add(8, MockPin { high: &a }).unwrap();
        assert_eq!(
            pins.add(8, MockPin { high: &b }),
            Err(RegisterError::AlreadyRegistered)
        );
        pins.add(7, MockPin { high: &b }).unwrap();
        assert_eq!(pins.add(25, MockPin { high: &c }), Err(RegisterError::Full));
    }
}
