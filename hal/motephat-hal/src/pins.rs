//! Raspberry Pi header pin numbering
//!
//! The Mote pHAT sits on the 40-pin header. Its wiring is documented in
//! BCM GPIO numbers; some GPIO libraries address pins by their physical
//! position on the connector instead.

/// Number of BCM GPIO lines broken out on the 40-pin header
pub const BCM_GPIO_COUNT: usize = 28;

/// Physical header pin for each BCM GPIO, indexed by GPIO number
const BCM_TO_PHYSICAL: [u8; BCM_GPIO_COUNT] = [
    27, 28, 3, 5, 7, 29, 31, 26, 24, 21, // GPIO 0-9
    19, 23, 32, 33, 8, 10, 36, 11, 12, 35, // GPIO 10-19
    38, 40, 15, 16, 18, 22, 37, 13, // GPIO 20-27
];

/// Map a BCM GPIO number to its physical header pin
///
/// Returns `None` for GPIOs not broken out on the header.
pub fn bcm_to_physical(gpio: u8) -> Option<u8> {
    BCM_TO_PHYSICAL.get(gpio as usize).copied()
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio10" / "GPIO10" -> 10
/// - "10" -> 10
///
/// Only GPIOs present on the header are accepted.
pub fn parse_pin(s: &str) -> Option<u8> {
    let s = s.trim();

    let digits = match s.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("gpio") => &s[4..],
        _ => s,
    };

    let gpio: u8 = digits.parse().ok()?;
    if (gpio as usize) < BCM_GPIO_COUNT {
        Some(gpio)
    } else {
        None
    }
}
