//! Peripheral Drivers
//!
//! High-level drivers for external ICs, generic over `embedded-hal` bus
//! traits so any transport (or a test fake) can sit underneath.

pub mod ms5351m;
