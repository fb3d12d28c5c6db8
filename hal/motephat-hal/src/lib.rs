//! Mote pHAT Hardware Abstraction Layer
//!
//! The protocol layer never touches hardware directly. It drives the
//! board through a [`PinDriver`]: four primitives modelled on the classic
//! wiringPi surface (setup, pin mode, digital write, pin numbering).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  motephat-drivers (Mote, show)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  motephat-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  recording    │
//! │ output pins   │       │  (host tests) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`gpio`] - [`PinDriver`] trait, [`Level`], [`PinMode`]
//! - [`pins`] - Raspberry Pi header numbering (BCM <-> physical)
//! - [`embedded`] - adapter over `embedded-hal` 1.0 output pins
//! - `recording` - call-recording driver (feature `std`)

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod embedded;
pub mod gpio;
pub mod pins;
#[cfg(any(test, feature = "std"))]
pub mod recording;

// Re-export key types at crate root for convenience
pub use embedded::EmbeddedHalPins;
pub use gpio::{Level, PinDriver, PinMode};
#[cfg(any(test, feature = "std"))]
pub use recording::{PinCall, RecordingDriver};
