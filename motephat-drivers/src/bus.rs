//! Bit-banged data/clock line
//!
//! Every channel shares one data line and one clock line. The pixels
//! latch the data line on the rising clock edge, so each bit is: set
//! data, raise clock, lower clock.

use motephat_hal::{Level, PinDriver};
use motephat_protocol::Symbol;

/// Shared data/clock pair, in driver pin numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bus {
    data: u8,
    clock: u8,
}

impl Bus {
    /// Create a bus on already-translated driver pins
    pub const fn new(data: u8, clock: u8) -> Self {
        Self { data, clock }
    }

    /// Send `pulses` clock pulses with the data line held low
    pub fn pulse<D: PinDriver>(&self, driver: &mut D, pulses: usize) {
        driver.digital_write(self.data, Level::Low);
        for _ in 0..pulses {
            self.clock(driver);
        }
    }

    /// Clock out one byte, MSB first
    pub fn write_byte<D: PinDriver>(&self, driver: &mut D, byte: u8) {
        for bit in (0..8).rev() {
            driver.digital_write(self.data, Level::from(byte & (1 << bit) != 0));
            self.clock(driver);
        }
    }

    /// Drive one protocol symbol
    pub fn write_symbol<D: PinDriver>(&self, driver: &mut D, symbol: Symbol) {
        match symbol {
            Symbol::Pulses(n) => self.pulse(driver, n),
            Symbol::Byte(b) => self.write_byte(driver, b),
        }
    }

    /// Drive a sequence of protocol symbols
    pub fn write_symbols<D, I>(&self, driver: &mut D, symbols: I)
    where
        D: PinDriver,
        I: IntoIterator<Item = Symbol>,
    {
        for symbol in symbols {
            self.write_symbol(driver, symbol);
        }
    }

    fn clock<D: PinDriver>(&self, driver: &mut D) {
        driver.digital_write(self.clock, Level::High);
        driver.digital_write(self.clock, Level::Low);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motephat_hal::RecordingDriver;

    const DAT: u8 = 10;
    const CLK: u8 = 11;

    #[test]
    fn test_pulse_sets_data_low_once() {
        let bus = Bus::new(DAT, CLK);
        let mut driver = RecordingDriver::new();
        bus.pulse(&mut driver, 3);

        let writes = driver.writes();
        assert_eq!(writes.len(), 1 + 3 * 2);
        assert_eq!(writes[0], (DAT, Level::Low));
        for pair in writes[1..].chunks(2) {
            assert_eq!(pair, &[(CLK, Level::High), (CLK, Level::Low)]);
        }
    }

    #[test]
    fn test_write_byte_sequence() {
        let bus = Bus::new(DAT, CLK);
        let mut driver = RecordingDriver::new();
        bus.write_byte(&mut driver, 0b1000_0001);

        let writes = driver.writes();
        assert_eq!(writes.len(), 8 * 3);
        let data: Vec<Level> = writes.chunks(3).map(|w| w[0].1).collect();
        assert_eq!(
            data,
            vec![
                Level::High,
                Level::Low,
                Level::Low,
                Level::Low,
                Level::Low,
                Level::Low,
                Level::Low,
                Level::High,
            ]
        );
        for step in writes.chunks(3) {
            assert_eq!(step[0].0, DAT);
            assert_eq!(step[1], (CLK, Level::High));
            assert_eq!(step[2], (CLK, Level::Low));
        }
    }

    #[test]
    fn test_symbols_match_protocol_bits() {
        let bus = Bus::new(DAT, CLK);
        let mut driver = RecordingDriver::new();
        let symbols = [Symbol::Pulses(4), Symbol::Byte(0xA5), Symbol::Pulses(2)];
        bus.write_symbols(&mut driver, symbols);

        let latched: Vec<bool> = driver
            .sample_rising_edges(DAT, CLK)
            .into_iter()
            .map(bool::from)
            .collect();
        let expected: Vec<bool> = symbols.iter().flat_map(|s| s.bits()).collect();
        assert_eq!(latched, expected);
    }
}
