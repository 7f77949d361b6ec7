//! Hardware Abstraction Layer
//!
//! Board-level helpers over STM32G474 peripherals for the demo firmware.
//! The driver layer never depends on anything here; it talks to hardware
//! through `embedded-hal-async` traits only.

pub mod i2c;
