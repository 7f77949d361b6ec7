//! MS5351M Clock Generator Driver
//!
//! Programs the three outputs of an MS5351M clock generator over a two-wire
//! bus and tracks the frequency requested for each output.
//!
//! The driver is write-only: the device is configured through addressed
//! register writes and never read back, so the in-memory frequency table is
//! the only record of what was programmed. Every mutation funnels through a
//! single register-write primitive (3-byte payload, then a settle delay),
//! which is also the seam a fake transport hooks in tests.

use crate::calc::{MhzTruncate, RegisterCalculator};
use crate::config::DeviceProfile;
use crate::types::{Frequency, OutputChannel, SlaveAddress};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

/// Driver error
///
/// `E` is the transport's error type, carried unchanged inside the wrapping
/// variants; the driver never retries or substitutes fallback values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// Channel index outside {0, 1, 2}; nothing was written
    InvalidChannel(u8),
    /// A bus write failed during bring-up; the driver is unusable and
    /// writes already issued to the device are left in effect
    DeviceInit(E),
    /// A bus write failed in [`Ms5351m::set_frequency`]; the recorded
    /// frequency is unchanged and the call may be retried
    RegisterWrite(E),
}

impl<E> Error<E> {
    /// The underlying transport error, if this error wraps one
    pub fn transport_error(&self) -> Option<&E> {
        match self {
            Self::DeviceInit(e) | Self::RegisterWrite(e) => Some(e),
            Self::InvalidChannel(_) => None,
        }
    }
}

#[cfg(feature = "embedded")]
impl<E: defmt::Format> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::InvalidChannel(index) => defmt::write!(f, "invalid channel {}", index),
            Self::DeviceInit(e) => defmt::write!(f, "bring-up write failed: {}", e),
            Self::RegisterWrite(e) => defmt::write!(f, "register write failed: {}", e),
        }
    }
}

/// Serialize a register write as it crosses the bus: the register address
/// followed by the 16-bit value, low byte first
#[must_use]
pub const fn register_payload(register: u8, value: u16) -> [u8; 3] {
    [register, (value & 0xFF) as u8, (value >> 8) as u8]
}

/// MS5351M driver over async bus and delay implementations
///
/// Constructed drivers are always fully brought up: construction runs the
/// reset/default-programming sequence and fails outright if any write is
/// rejected, so a half-initialized driver value cannot exist.
///
/// All operations take `&mut self`. To share one device between tasks, put
/// the driver behind a mutex (e.g. `embassy_sync::mutex::Mutex`) so the
/// compute/write/record sequence of each call stays atomic.
pub struct Ms5351m<I2C, D, C = MhzTruncate> {
    bus: I2C,
    delay: D,
    address: SlaveAddress,
    profile: DeviceProfile,
    calc: C,
    outputs: [Frequency; OutputChannel::COUNT],
}

impl<I2C, D> Ms5351m<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create and bring up a driver at the factory address with the stock
    /// register layout
    pub async fn new(bus: I2C, delay: D) -> Result<Self, Error<I2C::Error>> {
        Self::with_config(bus, delay, SlaveAddress::MS5351M, DeviceProfile::MS5351M).await
    }

    /// Create and bring up a driver with an explicit address and profile
    pub async fn with_config(
        bus: I2C,
        delay: D,
        address: SlaveAddress,
        profile: DeviceProfile,
    ) -> Result<Self, Error<I2C::Error>> {
        Self::with_calculator(bus, delay, address, profile, MhzTruncate).await
    }
}

impl<I2C, D, C> Ms5351m<I2C, D, C>
where
    I2C: I2c,
    D: DelayNs,
    C: RegisterCalculator,
{
    /// Create and bring up a driver with a custom register calculator
    ///
    /// Bring-up issues one reset write, then programs the profile's default
    /// frequencies to channels 0, 1 and 2 in that order. If any write fails
    /// the constructor returns [`Error::DeviceInit`]; writes that already
    /// reached the device are not rolled back.
    pub async fn with_calculator(
        bus: I2C,
        delay: D,
        address: SlaveAddress,
        profile: DeviceProfile,
        calc: C,
    ) -> Result<Self, Error<I2C::Error>> {
        let mut driver = Self {
            bus,
            delay,
            address,
            profile,
            calc,
            outputs: [Frequency::ZERO; OutputChannel::COUNT],
        };
        driver.bring_up().await?;
        Ok(driver)
    }

    /// Reset the device and program the default output frequencies
    async fn bring_up(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_register(self.profile.reset_register, self.profile.reset_value)
            .await
            .map_err(Error::DeviceInit)?;

        for channel in OutputChannel::ALL {
            let frequency = self.profile.default_frequencies[channel.index()];
            self.program(channel, frequency).await.map_err(Error::DeviceInit)?;
        }

        Ok(())
    }

    /// Set the output frequency of a channel
    ///
    /// On success the table records `frequency` exactly as requested. The
    /// value actually written to the device is the calculator's 16-bit
    /// quantization (preview it with [`Self::register_value`]), so the
    /// recorded frequency and the device-realizable one can differ.
    pub async fn set_frequency(
        &mut self,
        channel: OutputChannel,
        frequency: Frequency,
    ) -> Result<(), Error<I2C::Error>> {
        self.program(channel, frequency).await.map_err(Error::RegisterWrite)
    }

    /// Set the output frequency of a channel given a raw index
    ///
    /// Indices outside {0, 1, 2} fail with [`Error::InvalidChannel`] before
    /// any bus activity.
    pub async fn set_frequency_by_index(
        &mut self,
        index: u8,
        frequency: Frequency,
    ) -> Result<(), Error<I2C::Error>> {
        let channel = OutputChannel::from_index(index).ok_or(Error::InvalidChannel(index))?;
        self.set_frequency(channel, frequency).await
    }

    /// Write one output register, recording the frequency only if the
    /// transport accepted the write
    async fn program(&mut self, channel: OutputChannel, frequency: Frequency) -> Result<(), I2C::Error> {
        let value = self.calc.register_value(frequency);
        let register = self.profile.output_register(channel);
        self.write_register(register, value).await?;
        self.outputs[channel.index()] = frequency;
        Ok(())
    }

    /// Issue one register write and honor the settle delay
    ///
    /// A failed write returns immediately; the delay applies only to writes
    /// that completed.
    async fn write_register(&mut self, register: u8, value: u16) -> Result<(), I2C::Error> {
        let payload = register_payload(register, value);
        self.bus.write(self.address.addr(), &payload).await?;
        self.delay.delay_ms(self.profile.settle_delay_ms).await;
        Ok(())
    }

    /// Last successfully requested frequency for a channel
    ///
    /// Zero until the channel is first programmed (bring-up programs all
    /// three).
    #[must_use]
    pub const fn frequency(&self, channel: OutputChannel) -> Frequency {
        self.outputs[channel.index()]
    }

    /// Last successfully requested frequency of every channel
    #[must_use]
    pub const fn frequencies(&self) -> [Frequency; OutputChannel::COUNT] {
        self.outputs
    }

    /// Register value the calculator derives for a frequency
    ///
    /// Pure preview: no bus traffic, no state change. Useful for comparing
    /// the recorded (requested) frequency against what the device was
    /// actually given.
    #[must_use]
    pub fn register_value(&self, frequency: Frequency) -> u16 {
        self.calc.register_value(frequency)
    }

    /// Bus address this driver talks to
    #[must_use]
    pub const fn address(&self) -> SlaveAddress {
        self.address
    }

    /// Device profile this driver was constructed with
    #[must_use]
    pub const fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// Destroy the driver and release the bus and delay
    #[must_use]
    pub fn release(self) -> (I2C, D) {
        (self.bus, self.delay)
    }
}

pub mod blocking {
    //! Blocking variant of the driver
    //!
    //! Same semantics as [`super::Ms5351m`] over the blocking `embedded-hal`
    //! traits, for HALs without async support.

    use super::{register_payload, Error};
    use crate::calc::{MhzTruncate, RegisterCalculator};
    use crate::config::DeviceProfile;
    use crate::types::{Frequency, OutputChannel, SlaveAddress};
    use embedded_hal::delay::DelayNs;
    use embedded_hal::i2c::I2c;

    /// MS5351M driver over blocking bus and delay implementations
    pub struct Ms5351m<I2C, D, C = MhzTruncate> {
        bus: I2C,
        delay: D,
        address: SlaveAddress,
        profile: DeviceProfile,
        calc: C,
        outputs: [Frequency; OutputChannel::COUNT],
    }

    impl<I2C, D> Ms5351m<I2C, D>
    where
        I2C: I2c,
        D: DelayNs,
    {
        /// Create and bring up a driver at the factory address with the
        /// stock register layout
        pub fn new(bus: I2C, delay: D) -> Result<Self, Error<I2C::Error>> {
            Self::with_config(bus, delay, SlaveAddress::MS5351M, DeviceProfile::MS5351M)
        }

        /// Create and bring up a driver with an explicit address and profile
        pub fn with_config(
            bus: I2C,
            delay: D,
            address: SlaveAddress,
            profile: DeviceProfile,
        ) -> Result<Self, Error<I2C::Error>> {
            Self::with_calculator(bus, delay, address, profile, MhzTruncate)
        }
    }

    impl<I2C, D, C> Ms5351m<I2C, D, C>
    where
        I2C: I2c,
        D: DelayNs,
        C: RegisterCalculator,
    {
        /// Create and bring up a driver with a custom register calculator
        ///
        /// Same bring-up contract as the async driver: reset write, three
        /// default programs in channel order, [`Error::DeviceInit`] on the
        /// first failure, no rollback.
        pub fn with_calculator(
            bus: I2C,
            delay: D,
            address: SlaveAddress,
            profile: DeviceProfile,
            calc: C,
        ) -> Result<Self, Error<I2C::Error>> {
            let mut driver = Self {
                bus,
                delay,
                address,
                profile,
                calc,
                outputs: [Frequency::ZERO; OutputChannel::COUNT],
            };
            driver.bring_up()?;
            Ok(driver)
        }

        fn bring_up(&mut self) -> Result<(), Error<I2C::Error>> {
            self.write_register(self.profile.reset_register, self.profile.reset_value)
                .map_err(Error::DeviceInit)?;

            for channel in OutputChannel::ALL {
                let frequency = self.profile.default_frequencies[channel.index()];
                self.program(channel, frequency).map_err(Error::DeviceInit)?;
            }

            Ok(())
        }

        /// Set the output frequency of a channel
        ///
        /// Records the requested frequency on success; the device receives
        /// the calculator's quantized value.
        pub fn set_frequency(
            &mut self,
            channel: OutputChannel,
            frequency: Frequency,
        ) -> Result<(), Error<I2C::Error>> {
            self.program(channel, frequency).map_err(Error::RegisterWrite)
        }

        /// Set the output frequency of a channel given a raw index
        pub fn set_frequency_by_index(
            &mut self,
            index: u8,
            frequency: Frequency,
        ) -> Result<(), Error<I2C::Error>> {
            let channel = OutputChannel::from_index(index).ok_or(Error::InvalidChannel(index))?;
            self.set_frequency(channel, frequency)
        }

        fn program(&mut self, channel: OutputChannel, frequency: Frequency) -> Result<(), I2C::Error> {
            let value = self.calc.register_value(frequency);
            let register = self.profile.output_register(channel);
            self.write_register(register, value)?;
            self.outputs[channel.index()] = frequency;
            Ok(())
        }

        fn write_register(&mut self, register: u8, value: u16) -> Result<(), I2C::Error> {
            let payload = register_payload(register, value);
            self.bus.write(self.address.addr(), &payload)?;
            self.delay.delay_ms(self.profile.settle_delay_ms);
            Ok(())
        }

        /// Last successfully requested frequency for a channel
        #[must_use]
        pub const fn frequency(&self, channel: OutputChannel) -> Frequency {
            self.outputs[channel.index()]
        }

        /// Last successfully requested frequency of every channel
        #[must_use]
        pub const fn frequencies(&self) -> [Frequency; OutputChannel::COUNT] {
            self.outputs
        }

        /// Register value the calculator derives for a frequency
        #[must_use]
        pub fn register_value(&self, frequency: Frequency) -> u16 {
            self.calc.register_value(frequency)
        }

        /// Bus address this driver talks to
        #[must_use]
        pub const fn address(&self) -> SlaveAddress {
            self.address
        }

        /// Device profile this driver was constructed with
        #[must_use]
        pub const fn profile(&self) -> &DeviceProfile {
            &self.profile
        }

        /// Destroy the driver and release the bus and delay
        #[must_use]
        pub fn release(self) -> (I2C, D) {
            (self.bus, self.delay)
        }
    }
}
