//! Register-level driver for the ISL29125 RGB light sensor.
//!
//! This crate provides a `no_std` I2C driver for the Renesas (Intersil)
//! ISL29125 digital RGB colour light sensor, built on the `embedded-hal` 1.0
//! I2C traits.
//!
//! # Architecture
//!
//! The crate is split into three layers:
//!
//! - **[`registers`]**: a static table of [`RegisterDescriptor`]s (name,
//!   address, width, access) checked at compile time, plus bit-field masks
//!   and device constants.
//! - **`driver`** (crate-private): bus primitives that turn one register
//!   access into exactly one I2C transaction and decode little-endian bytes.
//! - **[`Isl29125`]** (public): named register access
//!   ([`read_channel`](Isl29125::read_channel),
//!   [`write_config`](Isl29125::write_config)) and typed helpers for colour
//!   reads, configuration, thresholds and status.
//!
//! # Quick start
//!
//! ```no_run
//! use isl29125::{Isl29125, DEFAULT_ADDRESS};
//!
//! # fn example(i2c: impl embedded_hal::i2c::I2c) -> Result<(), ()> {
//! let mut sensor = Isl29125::new(i2c, DEFAULT_ADDRESS);
//! sensor.init().map_err(|_| ())?;
//!
//! let (red, green, blue) = sensor.read_colors().map_err(|_| ())?;
//! let red_again = sensor.read_channel("red").map_err(|_| ())?;
//! # let _ = (red, green, blue, red_again);
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **`async`**: enables [`Isl29125Async`] for `embedded-hal-async` buses.
//! - **`defmt`**: [`defmt::Format`] implementations on public types and
//!   per-transaction trace logging.

#![cfg_attr(not(test), no_std)]

#[cfg(feature = "async")]
pub use asynch::Isl29125Async;
pub use config::{
    counts_to_lux, AdcResolution, Config1, InterruptChannel, InterruptConfig, IrCompensation,
    OperationMode, Persistence, SensingRange, Status,
};
pub use error::Isl29125Error;
pub use registers::{
    lookup, Access, Channel, RegisterDescriptor, DEFAULT_ADDRESS, ISL29125_DEVICE_ID,
    REGISTER_MAP,
};
pub use sensor::Isl29125;

#[cfg(feature = "async")]
mod asynch;
pub mod config;
mod driver;
mod error;
pub mod registers;
mod sensor;

#[cfg(test)]
mod fake_bus;
