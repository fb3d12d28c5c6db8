//! Mote pHAT driver
//!
//! Drives the board over any [`motephat_hal::PinDriver`]:
//!
//! - [`bus`] - bit-banged data/clock line (markers and MSB-first bytes)
//! - [`selector`] - active-low channel select lines
//! - [`mote`] - the [`Mote`] handle: configure channels, set pixels, show
//!
//! ```
//! use motephat_drivers::Mote;
//! use motephat_hal::RecordingDriver;
//!
//! let mut mote = Mote::with_default_pins(RecordingDriver::new());
//! mote.configure_channel(1, 16, false).unwrap();
//! mote.set_pixel(1, 0, 255, 0, 0).unwrap();
//! mote.show();
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod mote;
pub mod selector;

pub use bus::Bus;
pub use mote::Mote;
pub use selector::ChannelSelector;

// Re-export the model so callers only need this crate
pub use motephat_core::{
    Channel, MoteError, MotePins, Pixel, NUM_CHANNELS, NUM_PIXELS_PER_CHANNEL,
};
