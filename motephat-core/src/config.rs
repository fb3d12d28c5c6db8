//! Pin assignment configuration
//!
//! All pin numbers are BCM GPIO numbers. The driver translates them to
//! its own numbering through `PinDriver::gpio_to_pin` before use.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::NUM_CHANNELS;

/// Shared data line on the Mote pHAT
pub const DEFAULT_DATA_PIN: u8 = 10;

/// Shared clock line on the Mote pHAT
pub const DEFAULT_CLOCK_PIN: u8 = 11;

/// Channel select lines on the Mote pHAT, channel 1 first
pub const DEFAULT_CHANNEL_PINS: [u8; NUM_CHANNELS] = [8, 7, 25, 24];

/// Pins used to talk to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotePins {
    /// Data line (shared by all channels)
    pub data: u8,
    /// Clock line (shared by all channels)
    pub clock: u8,
    /// Select line per channel, active-low, channel 1 first
    pub channels: [u8; NUM_CHANNELS],
}

impl Default for MotePins {
    fn default() -> Self {
        Self::MOTE_PHAT
    }
}

/// Error when validating a pin assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinConfigError {
    /// The same GPIO is assigned to two lines
    DuplicatePin(u8),
}

impl core::fmt::Display for PinConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PinConfigError::DuplicatePin(pin) => write!(f, "GPIO {} is assigned twice", pin),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PinConfigError {}

impl MotePins {
    /// Wiring of the Pimoroni Mote pHAT
    pub const MOTE_PHAT: MotePins = MotePins {
        data: DEFAULT_DATA_PIN,
        clock: DEFAULT_CLOCK_PIN,
        channels: DEFAULT_CHANNEL_PINS,
    };

    /// Every pin, data and clock first
    pub fn all(&self) -> [u8; NUM_CHANNELS + 2] {
        let mut pins = [self.data, self.clock, 0, 0, 0, 0];
        pins[2..].copy_from_slice(&self.channels);
        pins
    }

    /// Check that no GPIO is used twice
    pub fn validate(&self) -> Result<(), PinConfigError> {
        let pins = self.all();
        for (i, pin) in pins.iter().enumerate() {
            if pins[i + 1..].contains(pin) {
                return Err(PinConfigError::DuplicatePin(*pin));
            }
        }
        Ok(())
    }
}
