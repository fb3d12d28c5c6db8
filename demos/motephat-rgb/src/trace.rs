//! Dry-run trace decoding
//!
//! Replays a recorded GPIO trace the way the board would see it and
//! logs one line per channel frame.

use anyhow::{bail, Result};
use log::{debug, info};
use motephat_core::MotePins;
use motephat_hal::{Level, RecordingDriver};
use motephat_protocol::{FrameParser, ParsedFrame};

/// A decoded channel frame and the channel it was sent to
#[derive(Debug)]
pub struct ChannelFrame {
    /// 1-based channel number
    pub channel: u8,
    pub frame: ParsedFrame,
}

/// Decode every channel frame in a recorded trace
///
/// `pins` must be in the recorder's numbering.
pub fn decode(driver: &RecordingDriver, pins: &MotePins) -> Result<Vec<ChannelFrame>> {
    let mut frames = Vec::new();
    let mut parser = FrameParser::new();
    let mut channel: Option<u8> = None;
    let mut data = Level::Low;
    let mut clock = Level::Low;

    for (pin, level) in driver.writes() {
        if let Some(slot) = pins.channels.iter().position(|&p| p == pin) {
            if level.is_low() {
                parser.finish()?;
                channel = Some(slot as u8 + 1);
            }
        } else if pin == pins.data {
            data = level;
        } else if pin == pins.clock {
            let rising = clock.is_low() && level.is_high();
            clock = level;
            if !rising {
                continue;
            }
            let Some(number) = channel else {
                bail!("clock pulse with no channel selected");
            };
            if let Some(frame) = parser.feed(data.is_high())? {
                frames.push(ChannelFrame {
                    channel: number,
                    frame,
                });
            }
        } else {
            debug!("ignoring write to pin {}", pin);
        }
    }

    parser.finish()?;
    Ok(frames)
}

/// Log a summary of each decoded frame
pub fn report(frames: &[ChannelFrame]) {
    for ChannelFrame { channel, frame } in frames {
        match frame.pixels().next() {
            Some(first) => info!(
                "channel {}: {} pixels, first #{:02x}{:02x}{:02x}",
                channel,
                frame.len(),
                first.red,
                first.green,
                first.blue
            ),
            None => info!("channel {}: empty frame", channel),
        }
    }
}
