//! Peripheral decoders built on the register protocol in [`crate::bus`].
//!
//! Each decoder turns raw register bytes into physical units; the
//! sampling tasks here feed those values into the safety evaluator.

pub mod battery;
pub mod ina226;

pub use battery::BatteryMonitor;
pub use ina226::{Ina226, PowerReading};
