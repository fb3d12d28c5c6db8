//! Frame decoding
//!
//! [`FrameParser`] plays the part of the pixel chain: it takes the
//! data-line level latched at each rising clock edge and reassembles
//! the channel frame. Used to check recorded GPIO traces and to pretty
//! print them in dry runs.

use heapless::Vec;
use motephat_core::{Pixel, NUM_PIXELS_PER_CHANNEL};

use crate::frame::{
    END_OF_FRAME_PULSES, HEADER_MARKER, MAX_BRIGHTNESS, START_OF_FRAME_PULSES, WORD_SIZE,
};

/// Errors that can occur during frame parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Pixel word without the `0b111` header marker
    UnexpectedHeader,
    /// More pixel words than a channel can hold
    TooManyPixels,
    /// Frame ended before its end marker was complete
    Incomplete,
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FrameError::UnexpectedHeader => f.write_str("pixel word without header marker"),
            FrameError::TooManyPixels => f.write_str("more than 16 pixel words in frame"),
            FrameError::Incomplete => f.write_str("frame is incomplete"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FrameError {}

/// Decode one wire word into its brightness and pixel
pub fn decode_word(word: [u8; WORD_SIZE]) -> Result<(u8, Pixel), FrameError> {
    if word[0] & HEADER_MARKER != HEADER_MARKER {
        return Err(FrameError::UnexpectedHeader);
    }
    let [header, blue, green, red] = word;
    Ok((header & MAX_BRIGHTNESS, Pixel::new(red, green, blue)))
}

/// A complete frame reassembled from the wire
///
/// Only [`FrameParser`] builds these, so every word carries a valid
/// header marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParsedFrame {
    words: Vec<[u8; WORD_SIZE], NUM_PIXELS_PER_CHANNEL>,
}

impl ParsedFrame {
    /// Raw pixel words in transmission order
    pub fn words(&self) -> &[[u8; WORD_SIZE]] {
        &self.words
    }

    /// Number of pixel words in the frame
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the frame carried no pixels
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Decoded pixels in transmission order
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.words
            .iter()
            .map(|&[_, blue, green, red]| Pixel::new(red, green, blue))
    }

    /// Brightness of each pixel in transmission order
    pub fn brightness(&self) -> impl Iterator<Item = u8> + '_ {
        self.words.iter().map(|w| w[0] & MAX_BRIGHTNESS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Counting low bits of the start marker
    WaitingForStart,
    /// Between or inside pixel words
    ReadingWord,
    /// Counting low bits of the end marker
    ReadingEnd,
}

/// State machine for parsing latched bits into frames
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    /// Consecutive low bits in the current marker
    zeros: usize,
    /// Bits of the word being assembled, MSB first
    word: u32,
    word_bits: usize,
    frame: ParsedFrame,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForStart,
            zeros: 0,
            word: 0,
            word_bits: 0,
            frame: ParsedFrame::default(),
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Check if the parser is between frames
    pub fn is_idle(&self) -> bool {
        self.state == ParseState::WaitingForStart && self.zeros == 0
    }

    /// Feed a single latched bit to the parser
    ///
    /// Returns `Ok(Some(frame))` when the end marker completes,
    /// `Ok(None)` when more bits are needed, or `Err` on parse error.
    pub fn feed(&mut self, bit: bool) -> Result<Option<ParsedFrame>, FrameError> {
        match self.state {
            ParseState::WaitingForStart => {
                if bit {
                    // Not a marker; keep looking
                    self.zeros = 0;
                } else {
                    self.zeros += 1;
                    if self.zeros == START_OF_FRAME_PULSES {
                        self.zeros = 0;
                        self.state = ParseState::ReadingWord;
                    }
                }
                Ok(None)
            }
            ParseState::ReadingWord => {
                if self.word_bits == 0 && !bit {
                    // Pixel words start with a 1, so this is the end marker
                    self.zeros = 1;
                    self.state = ParseState::ReadingEnd;
                    return Ok(None);
                }

                self.word = (self.word << 1) | bit as u32;
                self.word_bits += 1;
                if self.word_bits < WORD_SIZE * 8 {
                    return Ok(None);
                }

                let word = self.word.to_be_bytes();
                self.word = 0;
                self.word_bits = 0;

                if let Err(e) = decode_word(word) {
                    self.reset();
                    return Err(e);
                }
                if self.frame.words.push(word).is_err() {
                    self.reset();
                    return Err(FrameError::TooManyPixels);
                }
                Ok(None)
            }
            ParseState::ReadingEnd => {
                if bit {
                    self.reset();
                    return Err(FrameError::Incomplete);
                }
                self.zeros += 1;
                if self.zeros < END_OF_FRAME_PULSES {
                    return Ok(None);
                }

                let frame = core::mem::take(&mut self.frame);
                self.reset();
                Ok(Some(frame))
            }
        }
    }

    /// Feed multiple bits to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bits after a complete frame are not consumed.
    pub fn feed_bits<I>(&mut self, bits: I) -> Result<Option<ParsedFrame>, FrameError>
    where
        I: IntoIterator<Item = bool>,
    {
        for bit in bits {
            if let Some(frame) = self.feed(bit)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }

    /// Signal that no more bits will arrive for this frame
    ///
    /// Fails with [`FrameError::Incomplete`] if a frame was started but
    /// not finished.
    pub fn finish(&mut self) -> Result<(), FrameError> {
        let mid_frame = self.state != ParseState::WaitingForStart;
        self.reset();
        if mid_frame {
            Err(FrameError::Incomplete)
        } else {
            Ok(())
        }
    }
}
