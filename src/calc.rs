//! Frequency-to-register-value calculation
//!
//! The MS5351M's output registers take a 16-bit value derived from the
//! requested frequency. The exact derivation is device-specific, so it sits
//! behind [`RegisterCalculator`]: the driver asks the calculator for a
//! register value and never does frequency math itself. Replacing the
//! default with a datasheet-accurate formula requires no driver changes.
//!
//! This module is testable on the host.

use crate::types::Frequency;

/// Strategy converting a requested output frequency into the 16-bit value
/// written to that channel's output register
pub trait RegisterCalculator {
    /// Compute the register value for a requested frequency
    fn register_value(&self, frequency: Frequency) -> u16;
}

/// Whole-megahertz truncation, clamped to the 16-bit register range
///
/// `register_value(f) == min(floor(f_hz / 1_000_000), 65_535)`. This is a
/// placeholder derivation kept until the chip's real divider math is
/// confirmed; it is NOT datasheet-accurate, and frequencies below 1 MHz all
/// collapse to a register value of zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MhzTruncate;

impl RegisterCalculator for MhzTruncate {
    fn register_value(&self, frequency: Frequency) -> u16 {
        u16::try_from(frequency.as_mhz()).unwrap_or(u16::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_megahertz_values() {
        let calc = MhzTruncate;
        assert_eq!(calc.register_value(Frequency::from_hz(50_000_000)), 50);
        assert_eq!(calc.register_value(Frequency::from_hz(27_000_000)), 27);
        assert_eq!(calc.register_value(Frequency::from_mhz(200)), 200);
    }

    #[test]
    fn sub_megahertz_truncates_to_zero() {
        let calc = MhzTruncate;
        assert_eq!(calc.register_value(Frequency::from_hz(999_999)), 0);
        assert_eq!(calc.register_value(Frequency::ZERO), 0);
    }

    #[test]
    fn fractional_megahertz_truncates_down() {
        let calc = MhzTruncate;
        assert_eq!(calc.register_value(Frequency::from_hz(12_345_678)), 12);
        assert_eq!(calc.register_value(Frequency::from_hz(1_999_999)), 1);
    }

    #[test]
    fn clamps_to_register_range() {
        let calc = MhzTruncate;
        // 65_535 MHz is the largest representable value
        assert_eq!(calc.register_value(Frequency::from_mhz(65_535)), 65_535);
        assert_eq!(calc.register_value(Frequency::from_mhz(65_536)), 65_535);
        assert_eq!(calc.register_value(Frequency::from_mhz(1_000_000)), 65_535);
    }
}
