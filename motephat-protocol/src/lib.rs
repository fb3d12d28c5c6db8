//! Mote pHAT Wire Protocol
//!
//! The Mote board chains APA102-style pixels behind a per-channel
//! select line. With the channel's select line held low, a frame is
//! shifted in MSB first on the shared data/clock pair:
//!
//! ```text
//! ┌───────────┬────────────────────────────────┬───────────┐
//! │ START     │ PIXEL × n (n ≤ 16)             │ END       │
//! │ 32 × 0    │ 111bbbbb  BLUE  GREEN  RED     │ 36 × 0    │
//! └───────────┴────────────────────────────────┴───────────┘
//! ```
//!
//! `bbbbb` is the 5-bit global brightness. Data is latched on the rising
//! edge of the clock.
//!
//! This crate is pure: it turns pixels into [`Symbol`]s and bits, and
//! parses bits back into frames. Driving GPIO lives in
//! `motephat-drivers`.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod parser;

pub use frame::{
    encode_pixel, frame_bits, frame_symbols, header_byte, Symbol, BRIGHTNESS,
    END_OF_FRAME_PULSES, HEADER_MARKER, MAX_BRIGHTNESS, START_OF_FRAME_PULSES, WORD_SIZE,
};
pub use parser::{decode_word, FrameError, FrameParser, ParsedFrame};
