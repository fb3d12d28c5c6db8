//! Board-agnostic core of the Mote pHAT driver
//!
//! This crate holds everything that does not touch GPIO:
//!
//! - Device model: four channel slots of up to sixteen RGB pixels
//! - Validation errors for channel and pixel access
//! - Pin assignment configuration
//! - Gamma correction lookup table

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod gamma;
pub mod model;

pub use config::{MotePins, PinConfigError};
pub use error::{MoteError, Result};
pub use model::{Channel, Device, Pixel, NUM_CHANNELS, NUM_PIXELS_PER_CHANNEL};
