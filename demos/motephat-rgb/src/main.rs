//! Static RGB colour for a Mote pHAT
//!
//! Configures all four channels with sixteen pixels and sets every pixel
//! to the colour given on the command line.
//!
//! ```bash
//! # On a Raspberry Pi
//! motephat-rgb 255 255 255
//!
//! # Anywhere: decode the GPIO trace instead of driving hardware
//! RUST_LOG=info motephat-rgb --dry-run 255 0 0
//! ```

mod config;
#[cfg(feature = "hardware")]
mod hardware;
mod trace;

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use motephat_core::{MotePins, Pixel, NUM_CHANNELS, NUM_PIXELS_PER_CHANNEL};
use motephat_drivers::Mote;
use motephat_hal::{PinDriver, RecordingDriver};

/// Set every Mote pixel to one colour
#[derive(Parser, Debug)]
#[command(name = "motephat-rgb")]
#[command(version)]
#[command(about = "Set every pixel on a Mote pHAT to one RGB colour")]
struct Cli {
    /// Amount of red, 0-255 (other values wrap)
    #[arg(allow_negative_numbers = true)]
    red: i32,

    /// Amount of green, 0-255 (other values wrap)
    #[arg(allow_negative_numbers = true)]
    green: i32,

    /// Amount of blue, 0-255 (other values wrap)
    #[arg(allow_negative_numbers = true)]
    blue: i32,

    /// Pin assignment file (TOML); defaults to the Mote pHAT wiring
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pixels configured on each channel
    #[arg(long, default_value_t = NUM_PIXELS_PER_CHANNEL)]
    pixels: usize,

    /// Gamma-correct the colour before sending it
    #[arg(long)]
    gamma: bool,

    /// Pause between filling each channel, in milliseconds
    #[arg(long, default_value_t = 10)]
    delay_ms: u64,

    /// Decode and log the GPIO trace instead of driving hardware
    #[arg(long)]
    dry_run: bool,

    /// GPIO character device
    #[cfg(feature = "hardware")]
    #[arg(long, default_value = "/dev/gpiochip0")]
    chip: PathBuf,
}

/// Configure every channel, fill it, then push the buffer out
fn paint<D: PinDriver>(mote: &mut Mote<D>, cli: &Cli) -> Result<()> {
    for channel in 1..=NUM_CHANNELS as u8 {
        mote.configure_channel(channel, cli.pixels, cli.gamma)
            .with_context(|| format!("configuring channel {}", channel))?;
    }

    info!("r: {}, g: {}, b: {}", cli.red, cli.green, cli.blue);

    let mut colour = Pixel::from_masked(cli.red, cli.green, cli.blue);
    if cli.gamma {
        colour = colour.gamma_corrected();
        info!(
            "gamma corrected: r: {}, g: {}, b: {}",
            colour.red, colour.green, colour.blue
        );
    }

    for channel in 1..=NUM_CHANNELS as u8 {
        mote.set_channel(
            channel,
            colour.red as i32,
            colour.green as i32,
            colour.blue as i32,
        )?;
        thread::sleep(Duration::from_millis(cli.delay_ms));
    }

    mote.show();
    Ok(())
}

fn dry_run(cli: &Cli, pins: MotePins) -> Result<()> {
    let mut mote = Mote::new(RecordingDriver::new(), pins)?;
    paint(&mut mote, cli)?;

    let frames = trace::decode(mote.driver(), &pins)?;
    trace::report(&frames);
    Ok(())
}

#[cfg(feature = "hardware")]
fn run(cli: &Cli, pins: MotePins) -> Result<()> {
    if cli.dry_run {
        return dry_run(cli, pins);
    }

    let lines = hardware::open(&cli.chip, &pins)?;
    let mut mote = Mote::new(lines, pins)?;
    paint(&mut mote, cli)?;

    let dropped = mote.driver().dropped_writes();
    if dropped > 0 {
        warn!("{} GPIO writes failed", dropped);
    }
    Ok(())
}

#[cfg(not(feature = "hardware"))]
fn run(cli: &Cli, pins: MotePins) -> Result<()> {
    if !cli.dry_run {
        warn!("built without the `hardware` feature; doing a dry run");
    }
    dry_run(cli, pins)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let pins = match &cli.config {
        Some(path) => config::load(path)?,
        None => MotePins::default(),
    };

    run(&cli, pins)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["motephat-rgb"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_args() {
        let cli = cli(&["255", "-1", "300"]);
        assert_eq!((cli.red, cli.green, cli.blue), (255, -1, 300));
        assert_eq!(cli.pixels, 16);
        assert_eq!(cli.delay_ms, 10);
        assert!(!cli.gamma);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_missing_colour_is_an_error() {
        assert!(Cli::try_parse_from(["motephat-rgb", "1", "2"]).is_err());
    }

    #[test]
    fn test_paint_fills_every_channel() {
        let cli = cli(&["--delay-ms", "0", "255", "256", "-1"]);
        let mut mote = Mote::with_default_pins(RecordingDriver::new());
        paint(&mut mote, &cli).unwrap();

        for channel in 1..=4 {
            assert_eq!(mote.pixel_count(channel), Ok(16));
            assert_eq!(mote.pixel(channel, 15), Ok(Pixel::new(255, 0, 255)));
        }

        let frames = trace::decode(mote.driver(), &MotePins::MOTE_PHAT).unwrap();
        assert_eq!(frames.len(), 4);
        assert!(frames
            .iter()
            .all(|f| f.frame.pixels().all(|p| p == Pixel::new(255, 0, 255))));
    }

    #[test]
    fn test_paint_with_gamma() {
        let cli = cli(&["--gamma", "--delay-ms", "0", "128", "0", "255"]);
        let mut mote = Mote::with_default_pins(RecordingDriver::new());
        paint(&mut mote, &cli).unwrap();

        let expected = Pixel::new(128, 0, 255).gamma_corrected();
        assert_eq!(mote.is_gamma_corrected(1), Ok(true));
        assert_eq!(mote.pixel(1, 0), Ok(expected));

        let frames = trace::decode(mote.driver(), &MotePins::MOTE_PHAT).unwrap();
        assert!(frames.iter().all(|f| f.frame.pixels().all(|p| p == expected)));
    }

    #[test]
    fn test_paint_rejects_too_many_pixels() {
        let cli = cli(&["--pixels", "17", "--delay-ms", "0", "0", "0", "0"]);
        let mut mote = Mote::with_default_pins(RecordingDriver::new());
        assert!(paint(&mut mote, &cli).is_err());
    }
}
