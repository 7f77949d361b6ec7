//! Shared types for the clock generator driver
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;

/// Output frequency in Hertz
///
/// Unbounded non-negative frequency; the chip's realizable range depends
/// on the register calculation in use. Zero means "not yet configured /
/// disabled" and is the state of every channel before bring-up.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u64);

impl Frequency {
    /// Unconfigured / disabled channel marker
    pub const ZERO: Self = Self(0);

    /// Create a frequency from Hz
    #[must_use]
    pub const fn from_hz(hz: u64) -> Self {
        Self(hz)
    }

    /// Create a frequency from kHz
    #[must_use]
    pub const fn from_khz(khz: u64) -> Self {
        Self(khz.saturating_mul(1_000))
    }

    /// Create a frequency from MHz
    #[must_use]
    pub const fn from_mhz(mhz: u64) -> Self {
        Self(mhz.saturating_mul(1_000_000))
    }

    /// Get the frequency in Hz
    #[must_use]
    pub const fn as_hz(self) -> u64 {
        self.0
    }

    /// Get the frequency in whole kHz (truncated)
    #[must_use]
    pub const fn as_khz(self) -> u64 {
        self.0 / 1_000
    }

    /// Get the frequency in whole MHz (truncated)
    #[must_use]
    pub const fn as_mhz(self) -> u64 {
        self.0 / 1_000_000
    }

    /// Whether this channel has ever been programmed
    #[must_use]
    pub const fn is_configured(self) -> bool {
        self.0 != 0
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({} Hz)", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Frequency {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} Hz", self.0);
    }
}

/// Clock output channel identifier
///
/// The device has exactly three outputs. Each maps to a pair of
/// consecutive registers starting at the profile's output base address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputChannel {
    /// CLK0 output
    Clk0,
    /// CLK1 output
    Clk1,
    /// CLK2 output
    Clk2,
}

impl OutputChannel {
    /// Number of output channels on the device
    pub const COUNT: usize = 3;

    /// All channels in register order (bring-up programs them in this order)
    pub const ALL: [Self; Self::COUNT] = [Self::Clk0, Self::Clk1, Self::Clk2];

    /// Get the channel index (0, 1, or 2)
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Clk0 => 0,
            Self::Clk1 => 1,
            Self::Clk2 => 2,
        }
    }

    /// Convert a raw index to a channel, `None` if outside {0, 1, 2}
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Clk0),
            1 => Some(Self::Clk1),
            2 => Some(Self::Clk2),
            _ => None,
        }
    }

    /// Register offset of this channel from the output base address
    ///
    /// Each output owns a two-byte register pair, so offsets step by 2.
    #[must_use]
    pub const fn register_offset(self) -> u8 {
        match self {
            Self::Clk0 => 0,
            Self::Clk1 => 2,
            Self::Clk2 => 4,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for OutputChannel {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Clk0 => defmt::write!(f, "CLK0"),
            Self::Clk1 => defmt::write!(f, "CLK1"),
            Self::Clk2 => defmt::write!(f, "CLK2"),
        }
    }
}

/// Two-wire bus device address (7-bit)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlaveAddress(u8);

impl SlaveAddress {
    /// MS5351M clock generator factory address
    pub const MS5351M: Self = Self(0x60);

    /// Create from a 7-bit address (upper bit masked off)
    #[must_use]
    pub const fn new(addr: u8) -> Self {
        Self(addr & 0x7F)
    }

    /// Get the 7-bit address
    #[must_use]
    pub const fn addr(self) -> u8 {
        self.0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for SlaveAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "0x{:02X}", self.0);
    }
}
