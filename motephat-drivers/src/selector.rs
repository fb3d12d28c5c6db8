//! Channel select lines
//!
//! Each channel connector has its own select line. The selected channel
//! is driven low, the other three high. Selection is written out in
//! full before every channel frame; nothing relies on what the lines
//! held before.

use motephat_core::NUM_CHANNELS;
use motephat_hal::{Level, PinDriver};

/// The four active-low select lines, in driver pin numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelSelector {
    pins: [u8; NUM_CHANNELS],
}

impl ChannelSelector {
    /// Create a selector on already-translated driver pins, channel 1 first
    pub const fn new(pins: [u8; NUM_CHANNELS]) -> Self {
        Self { pins }
    }

    /// Make `slot` (0-based) the active channel
    ///
    /// Writes all four lines in slot order.
    pub fn select<D: PinDriver>(&self, driver: &mut D, slot: usize) {
        for (i, &pin) in self.pins.iter().enumerate() {
            let level = if i == slot { Level::Low } else { Level::High };
            driver.digital_write(pin, level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motephat_hal::RecordingDriver;

    const PINS: [u8; NUM_CHANNELS] = [8, 7, 25, 24];

    #[test]
    fn test_select_drives_only_one_low() {
        let selector = ChannelSelector::new(PINS);
        for slot in 0..NUM_CHANNELS {
            let mut driver = RecordingDriver::new();
            selector.select(&mut driver, slot);

            let writes = driver.writes();
            assert_eq!(writes.len(), NUM_CHANNELS);
            for (i, (pin, level)) in writes.into_iter().enumerate() {
                assert_eq!(pin, PINS[i]);
                assert_eq!(level == Level::Low, i == slot);
            }
        }
    }

    #[test]
    fn test_reselect_rewrites_every_line() {
        let selector = ChannelSelector::new(PINS);
        let mut driver = RecordingDriver::new();
        selector.select(&mut driver, 2);
        selector.select(&mut driver, 2);
        assert_eq!(driver.writes().len(), 2 * NUM_CHANNELS);
    }
}
