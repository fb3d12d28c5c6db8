//! In-memory device model
//!
//! A Mote board has four channel connectors, numbered 1-4 on the PCB.
//! Each connector takes a stick of up to sixteen pixels. Channels that
//! were never configured are `None` and produce no GPIO activity at all
//! when the buffer is shown; a channel configured with zero pixels is a
//! different thing and still gets framed.

use heapless::Vec;

use crate::error::{MoteError, Result};
use crate::gamma;

/// Number of channel connectors on the board
pub const NUM_CHANNELS: usize = 4;

/// Maximum addressable pixels on a single channel
pub const NUM_PIXELS_PER_CHANNEL: usize = 16;

/// A single RGB pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pixel {
    /// Red component, sent last on the wire
    pub red: u8,
    /// Green component
    pub green: u8,
    /// Blue component, sent first after the header byte
    pub blue: u8,
}

impl Pixel {
    /// All components off
    pub const OFF: Pixel = Pixel::new(0, 0, 0);

    /// Create a pixel from 8-bit components
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Build a pixel from arbitrary integers, keeping the low 8 bits
    ///
    /// Out-of-range values wrap rather than saturate: 256 -> 0, -1 -> 255.
    pub const fn from_masked(red: i32, green: i32, blue: i32) -> Self {
        Self {
            red: (red & 0xFF) as u8,
            green: (green & 0xFF) as u8,
            blue: (blue & 0xFF) as u8,
        }
    }

    /// Pixel with every component passed through the gamma table
    ///
    /// Nothing applies this implicitly. Callers that want perceptually
    /// even colours correct the pixel before storing it.
    pub const fn gamma_corrected(self) -> Self {
        Self {
            red: gamma::correct(self.red),
            green: gamma::correct(self.green),
            blue: gamma::correct(self.blue),
        }
    }
}

impl From<(u8, u8, u8)> for Pixel {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

/// One configured channel: pixel buffer plus gamma flag
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel {
    pixels: Vec<Pixel, NUM_PIXELS_PER_CHANNEL>,
    gamma_correction: bool,
}

impl Channel {
    /// Create a channel of `pixel_count` pixels, all off
    pub fn new(pixel_count: usize, gamma_correction: bool) -> Result<Self> {
        let mut pixels = Vec::new();
        pixels
            .resize(pixel_count, Pixel::OFF)
            .map_err(|_| MoteError::TooManyPixels)?;

        Ok(Self {
            pixels,
            gamma_correction,
        })
    }

    /// Stored pixel values, in index order
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Number of pixels on this channel
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Check if the channel was configured with zero pixels
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Gamma flag given at configuration
    ///
    /// Recorded for callers; pixels always go out exactly as stored.
    pub fn gamma_correction(&self) -> bool {
        self.gamma_correction
    }

    /// Read one pixel
    pub fn get(&self, index: usize) -> Result<Pixel> {
        self.pixels
            .get(index)
            .copied()
            .ok_or(MoteError::IndexOutOfRange)
    }

    /// Overwrite one pixel
    pub fn set(&mut self, index: usize, pixel: Pixel) -> Result<()> {
        let slot = self
            .pixels
            .get_mut(index)
            .ok_or(MoteError::IndexOutOfRange)?;
        *slot = pixel;
        Ok(())
    }

    /// Overwrite every pixel
    pub fn fill(&mut self, pixel: Pixel) {
        self.pixels.iter_mut().for_each(|p| *p = pixel);
    }
}

/// Map a 1-based channel number to its slot index
fn slot(channel: u8) -> Result<usize> {
    match channel {
        1..=4 => Ok(channel as usize - 1),
        _ => Err(MoteError::InvalidChannel),
    }
}

/// The four channel slots of a Mote board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Device {
    channels: [Option<Channel>; NUM_CHANNELS],
}

impl Device {
    /// Create a device with every channel unconfigured
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a channel, discarding any previous pixel data
    ///
    /// # Arguments
    /// - `channel`: 1, 2, 3 or 4, matching the numbers on the board
    /// - `pixel_count`: number of pixels on the stick, at most 16
    /// - `gamma_correction`: flag kept with the channel; it does not alter
    ///   stored or transmitted values (see [`Pixel::gamma_corrected`])
    pub fn configure_channel(
        &mut self,
        channel: u8,
        pixel_count: usize,
        gamma_correction: bool,
    ) -> Result<()> {
        let slot = slot(channel)?;
        self.channels[slot] = Some(Channel::new(pixel_count, gamma_correction)?);
        Ok(())
    }

    /// Set the colour of a single pixel
    ///
    /// Components keep their low 8 bits only; see [`Pixel::from_masked`].
    pub fn set_pixel(
        &mut self,
        channel: u8,
        index: usize,
        red: i32,
        green: i32,
        blue: i32,
    ) -> Result<()> {
        self.configured_mut(channel)?
            .set(index, Pixel::from_masked(red, green, blue))
    }

    /// Read a single pixel as stored
    pub fn pixel(&self, channel: u8, index: usize) -> Result<Pixel> {
        self.configured(channel)?.get(index)
    }

    /// Set every pixel of one channel
    pub fn set_channel(&mut self, channel: u8, red: i32, green: i32, blue: i32) -> Result<()> {
        self.configured_mut(channel)?
            .fill(Pixel::from_masked(red, green, blue));
        Ok(())
    }

    /// Set every pixel of every configured channel
    pub fn set_all(&mut self, red: i32, green: i32, blue: i32) {
        let pixel = Pixel::from_masked(red, green, blue);
        for channel in self.channels.iter_mut().flatten() {
            channel.fill(pixel);
        }
    }

    /// Turn off every pixel of one channel, keeping its configuration
    pub fn clear_channel(&mut self, channel: u8) -> Result<()> {
        self.configured_mut(channel)?.fill(Pixel::OFF);
        Ok(())
    }

    /// Turn off every pixel of every configured channel
    pub fn clear(&mut self) {
        self.set_all(0, 0, 0);
    }

    /// Number of pixels configured on a channel
    pub fn pixel_count(&self, channel: u8) -> Result<usize> {
        Ok(self.configured(channel)?.len())
    }

    /// Gamma flag a channel was configured with
    pub fn is_gamma_corrected(&self, channel: u8) -> Result<bool> {
        Ok(self.configured(channel)?.gamma_correction())
    }

    /// Look up a channel slot
    ///
    /// `Ok(None)` means the channel number is valid but unconfigured.
    pub fn channel(&self, channel: u8) -> Result<Option<&Channel>> {
        Ok(self.channels[slot(channel)?].as_ref())
    }

    /// All slots in transmission order, with their 1-based numbers
    pub fn channels(&self) -> impl Iterator<Item = (u8, Option<&Channel>)> + '_ {
        self.channels
            .iter()
            .enumerate()
            .map(|(slot, channel)| (slot as u8 + 1, channel.as_ref()))
    }

    fn configured(&self, channel: u8) -> Result<&Channel> {
        self.channels[slot(channel)?]
            .as_ref()
            .ok_or(MoteError::ChannelNotConfigured)
    }

    fn configured_mut(&mut self, channel: u8) -> Result<&mut Channel> {
        self.channels[slot(channel)?]
            .as_mut()
            .ok_or(MoteError::ChannelNotConfigured)
    }
}
