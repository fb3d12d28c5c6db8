//! Pin assignment file
//!
//! ```toml
//! [pins]
//! data = "gpio10"
//! clock = "gpio11"
//! channels = ["gpio8", "gpio7", "gpio25", "gpio24"]
//! ```
//!
//! Pins use BCM numbering, with or without the `gpio` prefix.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use motephat_core::{MotePins, NUM_CHANNELS};
use motephat_hal::pins::parse_pin;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PinFile {
    pins: PinSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PinSection {
    data: String,
    clock: String,
    channels: [String; NUM_CHANNELS],
}

fn pin(name: &str, value: &str) -> Result<u8> {
    parse_pin(value).ok_or_else(|| anyhow!("invalid {} pin {:?}", name, value))
}

/// Parse a pin assignment from TOML text
pub fn parse(text: &str) -> Result<MotePins> {
    let file: PinFile = toml::from_str(text).context("malformed pin file")?;

    let mut channels = [0u8; NUM_CHANNELS];
    for (i, value) in file.pins.channels.iter().enumerate() {
        channels[i] = pin(&format!("channel {}", i + 1), value)?;
    }

    let pins = MotePins {
        data: pin("data", &file.pins.data)?,
        clock: pin("clock", &file.pins.clock)?,
        channels,
    };
    pins.validate()?;
    Ok(pins)
}

/// Load a pin assignment file
pub fn load(path: &Path) -> Result<MotePins> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse(&text).with_context(|| format!("in {}", path.display()))
}
