//! Validation errors

use core::fmt;

/// Errors returned by channel and pixel operations
///
/// All of these are caller mistakes: nothing is retried and nothing is
/// mutated when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoteError {
    /// Channel number outside 1-4
    InvalidChannel,
    /// More than 16 pixels requested for a channel
    TooManyPixels,
    /// Channel has never been configured
    ChannelNotConfigured,
    /// Pixel index past the configured length
    IndexOutOfRange,
}

/// Result alias for Mote operations
pub type Result<T> = core::result::Result<T, MoteError>;

impl fmt::Display for MoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoteError::InvalidChannel => f.write_str("channel index must be between 1 and 4"),
            MoteError::TooManyPixels => f.write_str("number of pixels can not be more than 16"),
            MoteError::ChannelNotConfigured => f.write_str("channel has not been configured"),
            MoteError::IndexOutOfRange => {
                f.write_str("pixel index is past the end of the channel")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MoteError {}
