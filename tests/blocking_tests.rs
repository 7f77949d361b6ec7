//! Blocking Driver Tests
//!
//! Confirms the blocking driver matches the async driver's contract: same
//! bring-up sequence, same payloads, same failure semantics.
//! Run with: cargo test --test blocking_tests

use embedded_hal::i2c::Operation;
use ms5351m::config::DeviceProfile;
use ms5351m::drivers::ms5351m::blocking::Ms5351m;
use ms5351m::drivers::ms5351m::Error;
use ms5351m::types::{Frequency, OutputChannel, SlaveAddress};

// =============================================================================
// Test Doubles
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BusFault;

impl embedded_hal::i2c::Error for BusFault {
    fn kind(&self) -> embedded_hal::i2c::ErrorKind {
        embedded_hal::i2c::ErrorKind::Other
    }
}

/// Blocking fake bus; records attempts, optionally rejects one (1-based)
#[derive(Default)]
struct RecordingBus {
    writes: Vec<(u8, Vec<u8>)>,
    fail_on: Option<usize>,
}

impl RecordingBus {
    fn new() -> Self {
        Self::default()
    }

    fn failing_on(attempt: usize) -> Self {
        Self {
            writes: Vec::new(),
            fail_on: Some(attempt),
        }
    }
}

impl embedded_hal::i2c::ErrorType for RecordingBus {
    type Error = BusFault;
}

impl embedded_hal::i2c::I2c for RecordingBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for op in operations.iter() {
            match op {
                Operation::Write(bytes) => {
                    self.writes.push((address, bytes.to_vec()));
                    if self.fail_on == Some(self.writes.len()) {
                        return Err(BusFault);
                    }
                }
                Operation::Read(_) => panic!("driver must never read from the bus"),
            }
        }
        Ok(())
    }
}

#[derive(Default)]
struct RecordingDelay {
    delays_ms: Vec<u32>,
}

impl embedded_hal::delay::DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays_ms.push(ns / 1_000_000);
    }

    fn delay_us(&mut self, us: u32) {
        self.delays_ms.push(us / 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
    }
}

// =============================================================================
// Contract Parity Tests
// =============================================================================

#[test]
fn bring_up_writes_reset_then_defaults() {
    let mut bus = RecordingBus::new();
    let mut delay = RecordingDelay::default();

    let driver = Ms5351m::new(&mut bus, &mut delay).unwrap();
    assert_eq!(
        driver.frequencies(),
        [
            Frequency::from_mhz(50),
            Frequency::from_mhz(100),
            Frequency::from_mhz(200),
        ]
    );
    drop(driver);

    assert_eq!(bus.writes.len(), 4);
    assert_eq!(bus.writes[0], (0x60, vec![0x00, 0x01, 0x00]));
    assert_eq!(bus.writes[1], (0x60, vec![0x10, 50, 0x00]));
    assert_eq!(bus.writes[2], (0x60, vec![0x12, 100, 0x00]));
    assert_eq!(bus.writes[3], (0x60, vec![0x14, 200, 0x00]));
    assert_eq!(delay.delays_ms, vec![10, 10, 10, 10]);
}

#[test]
fn bring_up_failure_surfaces_fault_and_stops() {
    let mut bus = RecordingBus::failing_on(3);
    let mut delay = RecordingDelay::default();

    let result = Ms5351m::new(&mut bus, &mut delay);

    assert_eq!(result.err(), Some(Error::DeviceInit(BusFault)));
    assert_eq!(bus.writes.len(), 3);
    assert_eq!(delay.delays_ms, vec![10, 10]);
}

#[test]
fn set_frequency_encodes_value_little_endian() {
    let mut bus = RecordingBus::new();
    let mut delay = RecordingDelay::default();

    let mut driver = Ms5351m::new(&mut bus, &mut delay).unwrap();
    // 300 MHz -> register value 300 = 0x012C
    driver.set_frequency(OutputChannel::Clk0, Frequency::from_mhz(300)).unwrap();
    drop(driver);

    assert_eq!(bus.writes[4], (0x60, vec![0x10, 0x2C, 0x01]));
}

#[test]
fn failed_write_keeps_previous_frequency() {
    let mut bus = RecordingBus::failing_on(5);
    let mut delay = RecordingDelay::default();

    let mut driver = Ms5351m::new(&mut bus, &mut delay).unwrap();
    let result = driver.set_frequency(OutputChannel::Clk2, Frequency::from_mhz(30));

    assert_eq!(result, Err(Error::RegisterWrite(BusFault)));
    assert_eq!(driver.frequency(OutputChannel::Clk2), Frequency::from_mhz(200));
    drop(driver);

    assert_eq!(bus.writes.len(), 5);
    assert_eq!(delay.delays_ms, vec![10, 10, 10, 10]);
}

#[test]
fn invalid_index_rejected_without_bus_traffic() {
    let mut bus = RecordingBus::new();
    let mut delay = RecordingDelay::default();

    let mut driver = Ms5351m::new(&mut bus, &mut delay).unwrap();
    let result = driver.set_frequency_by_index(3, Frequency::from_mhz(10));
    assert_eq!(result, Err(Error::InvalidChannel(3)));
    drop(driver);

    assert_eq!(bus.writes.len(), 4);
}

#[test]
fn set_frequency_last_write_wins() {
    let mut bus = RecordingBus::new();
    let mut delay = RecordingDelay::default();

    let mut driver = Ms5351m::new(&mut bus, &mut delay).unwrap();
    driver.set_frequency(OutputChannel::Clk0, Frequency::from_mhz(10)).unwrap();
    driver.set_frequency(OutputChannel::Clk0, Frequency::from_mhz(20)).unwrap();

    assert_eq!(driver.frequency(OutputChannel::Clk0), Frequency::from_mhz(20));
}

#[test]
fn custom_profile_drives_layout() {
    let profile = DeviceProfile {
        output_base: 0x40,
        ..DeviceProfile::MS5351M
    };
    let mut bus = RecordingBus::new();
    let mut delay = RecordingDelay::default();

    let driver = Ms5351m::with_config(&mut bus, &mut delay, SlaveAddress::MS5351M, profile).unwrap();
    drop(driver);

    assert_eq!(bus.writes[1].1[0], 0x40);
    assert_eq!(bus.writes[2].1[0], 0x42);
    assert_eq!(bus.writes[3].1[0], 0x44);
}

#[test]
fn release_returns_bus_and_delay() {
    let mut outer_bus = RecordingBus::new();
    let mut outer_delay = RecordingDelay::default();

    let driver = Ms5351m::new(&mut outer_bus, &mut outer_delay).unwrap();
    let (bus, delay) = driver.release();

    assert_eq!(bus.writes.len(), 4);
    assert_eq!(delay.delays_ms.len(), 4);
}
