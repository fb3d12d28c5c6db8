//! Recording pin driver
//!
//! Host-side [`PinDriver`] that keeps every primitive call in order.
//! Tests use it in place of real GPIO to check exact line sequences.

use crate::gpio::{Level, PinDriver, PinMode};

/// One recorded primitive call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinCall {
    /// `setup()`
    Setup,
    /// `pin_mode(pin, mode)`
    Mode { pin: u8, mode: PinMode },
    /// `digital_write(pin, level)`
    Write { pin: u8, level: Level },
}

/// [`PinDriver`] that records calls instead of touching hardware
#[derive(Debug, Clone, Default)]
pub struct RecordingDriver {
    calls: Vec<PinCall>,
    numbering: Option<fn(u8) -> u8>,
}

impl RecordingDriver {
    /// Create an empty recorder with identity pin numbering
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder that translates GPIO numbers with `numbering`
    pub fn with_numbering(numbering: fn(u8) -> u8) -> Self {
        Self {
            calls: Vec::new(),
            numbering: Some(numbering),
        }
    }

    /// All calls recorded so far
    pub fn calls(&self) -> &[PinCall] {
        &self.calls
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Only the `digital_write` calls, as `(pin, level)`
    pub fn writes(&self) -> Vec<(u8, Level)> {
        self.calls
            .iter()
            .filter_map(|call| match *call {
                PinCall::Write { pin, level } => Some((pin, level)),
                _ => None,
            })
            .collect()
    }

    /// Last level written to `pin`, if any
    pub fn level(&self, pin: u8) -> Option<Level> {
        self.calls.iter().rev().find_map(|call| match *call {
            PinCall::Write { pin: p, level } if p == pin => Some(level),
            _ => None,
        })
    }

    /// Mode last set on `pin`, if any
    pub fn mode(&self, pin: u8) -> Option<PinMode> {
        self.calls.iter().rev().find_map(|call| match *call {
            PinCall::Mode { pin: p, mode } if p == pin => Some(mode),
            _ => None,
        })
    }

    /// Sample the data line at every rising edge of the clock line
    ///
    /// Both lines start low. This is what a shift register on the other
    /// end of the wire would latch.
    pub fn sample_rising_edges(&self, data: u8, clock: u8) -> Vec<Level> {
        let mut data_level = Level::Low;
        let mut clock_level = Level::Low;
        let mut bits = Vec::new();

        for (pin, level) in self.writes() {
            if pin == data {
                data_level = level;
            } else if pin == clock {
                if clock_level.is_low() && level.is_high() {
                    bits.push(data_level);
                }
                clock_level = level;
            }
        }

        bits
    }
}

impl PinDriver for RecordingDriver {
    fn setup(&mut self) {
        self.calls.push(PinCall::Setup);
    }

    fn pin_mode(&mut self, pin: u8, mode: PinMode) {
        self.calls.push(PinCall::Mode { pin, mode });
    }

    fn digital_write(&mut self, pin: u8, level: Level) {
        self.calls.push(PinCall::Write { pin, level });
    }

    fn gpio_to_pin(&self, gpio: u8) -> u8 {
        match self.numbering {
            Some(f) => f(gpio),
            None => gpio,
        }
    }
}
