//! Frame encoding for the Mote pHAT.
//!
//! Frame format, per channel:
//! - START: 32 clock pulses with data held low
//! - PIXEL (4 bytes each): `0b111_bbbbb` brightness header, blue, green, red
//! - END: 36 clock pulses with data held low
//!
//! Each byte goes out MSB first, one bit per clock pulse.

use core::iter;

use motephat_core::Pixel;

/// Fixed global brightness sent in every pixel header (0-31)
pub const BRIGHTNESS: u8 = 15;

/// Largest value the 5-bit brightness field can hold
pub const MAX_BRIGHTNESS: u8 = 0b1_1111;

/// Top three bits of every pixel header byte
pub const HEADER_MARKER: u8 = 0b1110_0000;

/// Clock pulses in the start-of-frame marker
pub const START_OF_FRAME_PULSES: usize = 32;

/// Clock pulses in the end-of-frame marker
pub const END_OF_FRAME_PULSES: usize = 36;

/// Bytes per pixel on the wire
pub const WORD_SIZE: usize = 4;

/// Build a pixel header byte
///
/// Brightness is truncated to its low 5 bits.
pub const fn header_byte(brightness: u8) -> u8 {
    HEADER_MARKER | (brightness & MAX_BRIGHTNESS)
}

/// Encode one pixel as its 4-byte wire word
pub const fn encode_pixel(pixel: Pixel, brightness: u8) -> [u8; WORD_SIZE] {
    [header_byte(brightness), pixel.blue, pixel.green, pixel.red]
}

/// One step of a channel frame, as the line driver sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Symbol {
    /// `n` clock pulses with the data line held low
    Pulses(usize),
    /// One byte clocked out MSB first
    Byte(u8),
}

impl Symbol {
    /// Data-line level latched at each rising clock edge
    pub fn bits(self) -> SymbolBits {
        SymbolBits {
            symbol: self,
            pos: 0,
        }
    }

    /// Number of clock pulses this symbol produces
    pub const fn clock_pulses(self) -> usize {
        match self {
            Symbol::Pulses(n) => n,
            Symbol::Byte(_) => 8,
        }
    }
}

/// Iterator over the bits of a [`Symbol`]
#[derive(Debug, Clone)]
pub struct SymbolBits {
    symbol: Symbol,
    pos: usize,
}

impl Iterator for SymbolBits {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.pos >= self.symbol.clock_pulses() {
            return None;
        }
        let bit = match self.symbol {
            Symbol::Pulses(_) => false,
            Symbol::Byte(b) => b & (0x80 >> self.pos) != 0,
        };
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.symbol.clock_pulses() - self.pos;
        (left, Some(left))
    }
}

impl ExactSizeIterator for SymbolBits {}

/// Symbols for a complete channel frame
///
/// Start marker, then each pixel's word in order, then end marker.
/// Pixels are sent as given; gamma is the caller's concern.
pub fn frame_symbols<I>(pixels: I) -> impl Iterator<Item = Symbol>
where
    I: IntoIterator<Item = Pixel>,
{
    iter::once(Symbol::Pulses(START_OF_FRAME_PULSES))
        .chain(
            pixels
                .into_iter()
                .flat_map(|p| encode_pixel(p, BRIGHTNESS).into_iter().map(Symbol::Byte)),
        )
        .chain(iter::once(Symbol::Pulses(END_OF_FRAME_PULSES)))
}

/// Bits latched by the board for a complete channel frame
pub fn frame_bits<I>(pixels: I) -> impl Iterator<Item = bool>
where
    I: IntoIterator<Item = Pixel>,
{
    frame_symbols(pixels).flat_map(Symbol::bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_byte() {
        assert_eq!(header_byte(BRIGHTNESS), 0xEF);
        assert_eq!(header_byte(0), 0xE0);
        assert_eq!(header_byte(31), 0xFF);
        // Only 5 bits of brightness survive
        assert_eq!(header_byte(0xFF), 0xFF);
        assert_eq!(header_byte(32), 0xE0);
    }

    #[test]
    fn test_encode_pixel_byte_order() {
        let word = encode_pixel(Pixel::new(0x11, 0x22, 0x33), BRIGHTNESS);
        assert_eq!(word, [0xEF, 0x33, 0x22, 0x11]);

        let red = encode_pixel(Pixel::new(255, 0, 0), BRIGHTNESS);
        assert_eq!(red, [0xE0 | BRIGHTNESS, 0x00, 0x00, 0xFF]);
    }

    #[test]
    fn test_byte_bits_msb_first() {
        let bits: heapless::Vec<bool, 8> = Symbol::Byte(0b1010_0001).bits().collect();
        assert_eq!(
            bits.as_slice(),
            &[true, false, true, false, false, false, false, true]
        );
    }

    #[test]
    fn test_pulse_bits_are_low() {
        let bits = Symbol::Pulses(START_OF_FRAME_PULSES).bits();
        assert_eq!(bits.len(), 32);
        assert!(Symbol::Pulses(END_OF_FRAME_PULSES).bits().all(|b| !b));
    }

    #[test]
    fn test_frame_symbols_layout() {
        let pixels = [Pixel::new(1, 2, 3), Pixel::new(4, 5, 6)];
        let symbols: heapless::Vec<Symbol, 16> = frame_symbols(pixels).collect();

        assert_eq!(
            symbols.as_slice(),
            &[
                Symbol::Pulses(32),
                Symbol::Byte(0xEF),
                Symbol::Byte(3),
                Symbol::Byte(2),
                Symbol::Byte(1),
                Symbol::Byte(0xEF),
                Symbol::Byte(6),
                Symbol::Byte(5),
                Symbol::Byte(4),
                Symbol::Pulses(36),
            ]
        );
    }

    #[test]
    fn test_empty_frame_is_markers_only() {
        let symbols: heapless::Vec<Symbol, 2> = frame_symbols([Pixel::OFF; 0]).collect();
        assert_eq!(symbols.as_slice(), &[Symbol::Pulses(32), Symbol::Pulses(36)]);
        assert_eq!(frame_bits([Pixel::OFF; 0]).count(), 68);
    }

    #[test]
    fn test_frame_bit_count() {
        let pixels = [Pixel::OFF; 16];
        assert_eq!(frame_bits(pixels).count(), 32 + 16 * 32 + 36);
    }
}
