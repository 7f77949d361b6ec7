//! I2C Bus Utilities
//!
//! Bring-up diagnostics for the embassy-stm32 async I2C peripheral. The
//! MS5351M driver talks `embedded-hal-async` traits and needs none of this;
//! the demo firmware uses it to confirm the device answers before handing
//! the bus to the driver.

use crate::types::SlaveAddress;
use embassy_stm32::i2c::I2c;
use embassy_stm32::mode::Async;

/// Probe the 7-bit address range and collect devices that acknowledge
///
/// Reserved addresses below 0x08 and above 0x77 are skipped. At most 16
/// responders are recorded.
pub async fn scan(bus: &mut I2c<'_, Async>) -> heapless::Vec<SlaveAddress, 16> {
    let mut devices = heapless::Vec::new();

    for addr in 0x08..0x78 {
        let mut buf = [0u8; 1];
        if bus.read(addr, &mut buf).await.is_ok() {
            let _ = devices.push(SlaveAddress::new(addr));
        }
    }

    devices
}
