//! MS5351M Clock Generator Driver Library
//!
//! Driver for the MS5351M three-output I2C clock generator, plus the board
//! support needed to run it on an STM32G474 under embassy. The device is
//! write-only: it is configured through addressed register writes and never
//! read back, so the driver keeps the authoritative record of what each
//! output was asked to produce.
//!
//! # Architecture
//!
//! The crate is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │        Demo firmware: bus scan, bring-up, retuning           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     DRIVER LAYER                             │
//! │  Ms5351m (async + blocking)  │  RegisterCalculator strategy  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   TRANSPORT TRAITS                           │
//! │        embedded-hal / embedded-hal-async I2C + delay         │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Type-driven design**: Custom types enforce invariants at compile time
//! - **Transport-agnostic core**: The driver binds to `embedded-hal` traits,
//!   never to a concrete HAL, so host tests run against fake buses
//! - **Explicit error handling**: All fallible operations return `Result`
//! - **No silent recovery**: Transport errors surface unchanged; the driver
//!   never retries or substitutes fallback values

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// Board-level helpers over STM32G474 peripherals for the demo firmware.
#[cfg(feature = "embedded")]
pub mod hal;

/// Peripheral Drivers
///
/// High-level drivers for external ICs (MS5351M).
pub mod drivers;

/// Register Value Calculation
///
/// Strategies for deriving device register values from frequencies.
pub mod calc;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::calc::{MhzTruncate, RegisterCalculator};
    pub use crate::config::*;
    pub use crate::drivers::ms5351m::{Error as Ms5351mError, Ms5351m};
    pub use crate::types::*;

    // Common traits
    pub use embedded_hal::digital::OutputPin;
    pub use embedded_hal_async::i2c::I2c;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
