//! Flight-controller core library.
//!
//! The low-level layer every control loop in the vehicle depends on:
//! register reads over the shared I2C bus, numeric conditioning of raw
//! values, and the battery thresholds that decide when the motors must
//! be disarmed. Everything here is synchronous and owned by a single
//! control loop; no module spawns tasks or takes locks.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod bus;
pub mod config;
pub mod error;
pub mod math;
pub mod safety;
pub mod scheduler;
pub mod sensors;
pub mod text;

pub use error::{BusError, ConfigError, Error, Result};
