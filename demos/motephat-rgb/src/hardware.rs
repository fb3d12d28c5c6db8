//! Linux GPIO character device backend
//!
//! Requests the six Mote lines from a gpiochip as outputs and wraps
//! them in an [`EmbeddedHalPins`] adapter.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::CdevPin;
use log::info;
use motephat_core::MotePins;
use motephat_hal::EmbeddedHalPins;

/// Data, clock and four select lines
pub type MoteLines = EmbeddedHalPins<CdevPin, 6>;

const CONSUMER: &str = "motephat";

/// Open the Mote lines on `chip_path`
///
/// Select lines start high so no channel is selected until the first
/// frame goes out.
pub fn open(chip_path: &Path, pins: &MotePins) -> Result<MoteLines> {
    let mut chip = Chip::new(chip_path)
        .with_context(|| format!("failed to open {}", chip_path.display()))?;

    let mut lines = MoteLines::new();
    for gpio in pins.all() {
        let initial = u8::from(pins.channels.contains(&gpio));
        let handle = chip
            .get_line(u32::from(gpio))
            .and_then(|line| line.request(LineRequestFlags::OUTPUT, initial, CONSUMER))
            .with_context(|| format!("failed to request GPIO {}", gpio))?;
        let pin = CdevPin::new(handle).with_context(|| format!("GPIO {}", gpio))?;
        lines
            .add(gpio, pin)
            .map_err(|e| anyhow!("GPIO {}: {:?}", gpio, e))?;
    }

    info!("Opened {} lines on {}", pins.all().len(), chip_path.display());
    Ok(lines)
}
