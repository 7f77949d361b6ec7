//! Device constants and configuration
//!
//! All register addresses, timing parameters, and bring-up defaults for the
//! MS5351M are centralized here as named constants. Drivers receive them
//! through [`DeviceProfile`] rather than reading compiled-in literals, so a
//! simulated or revised device layout can be tested without touching driver
//! code.

use crate::types::{Frequency, OutputChannel, SlaveAddress};

/// MS5351M factory bus address
pub const MS5351M_I2C_ADDR: SlaveAddress = SlaveAddress::MS5351M;

/// Reset register address
// TODO: confirm the reset register and trigger value against the MS5351M
// datasheet; both are carried over from bring-up notes, not verified silicon
// behavior.
pub const RESET_REGISTER: u8 = 0x00;

/// Value written to the reset register to trigger a device reset
pub const RESET_VALUE: u16 = 0x01;

/// Base address of the output frequency registers (CLK0 at base,
/// CLK1 at base + 2, CLK2 at base + 4)
pub const OUTPUT_REGISTER_BASE: u8 = 0x10;

/// Recovery time after each register write in milliseconds
pub const SETTLE_DELAY_MS: u32 = 10;

/// Frequencies programmed during bring-up, indexed by channel
pub const DEFAULT_OUTPUT_FREQUENCIES: [Frequency; OutputChannel::COUNT] = [
    Frequency::from_mhz(50),
    Frequency::from_mhz(100),
    Frequency::from_mhz(200),
];

/// I2C bus frequency for the demo firmware
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// Everything device-specific the driver needs, in one injectable bundle
///
/// [`DeviceProfile::MS5351M`] is the stock layout; tests and simulated
/// variants construct their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceProfile {
    /// Reset register address
    pub reset_register: u8,
    /// Value that triggers a reset when written to the reset register
    pub reset_value: u16,
    /// Base address of the per-channel output registers
    pub output_base: u8,
    /// Delay honored after every register write, in milliseconds
    pub settle_delay_ms: u32,
    /// Frequencies programmed to channels 0..=2 during bring-up
    pub default_frequencies: [Frequency; OutputChannel::COUNT],
}

impl DeviceProfile {
    /// Stock MS5351M register layout and timing
    pub const MS5351M: Self = Self {
        reset_register: RESET_REGISTER,
        reset_value: RESET_VALUE,
        output_base: OUTPUT_REGISTER_BASE,
        settle_delay_ms: SETTLE_DELAY_MS,
        default_frequencies: DEFAULT_OUTPUT_FREQUENCIES,
    };

    /// Register address holding the given channel's output value
    #[must_use]
    pub const fn output_register(&self, channel: OutputChannel) -> u8 {
        self.output_base + channel.register_offset()
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::MS5351M
    }
}

/// Pin assignments for the demo board
pub mod pins {
    //! GPIO pin assignments used by the demo firmware

    /// Status LED
    pub const LED_STATUS: &str = "PA5";

    /// I2C1 SCL (clock generator)
    pub const I2C1_SCL: &str = "PB8";

    /// I2C1 SDA (clock generator)
    pub const I2C1_SDA: &str = "PB9";
}
