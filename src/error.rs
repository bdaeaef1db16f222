//! Unified error types for the flight-controller core.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! control loop's error handling uniform. All variants are `Copy` so they
//! can be handed to event sinks and logged without allocation.
//!
//! Threshold-breach disarming is *not* an error and never appears here; it
//! is reported through [`BatteryState`](crate::safety::BatteryState).

use core::fmt;

use crate::bus::BusDevice;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the core funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A register read over the two-wire bus failed.
    Bus(BusError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// A device answered at the configured address but reported an
    /// unexpected identity register.
    UnexpectedDevice { device: BusDevice, id: u16 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "bus: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::UnexpectedDevice { device, id } => {
                write!(f, "device {device}: unexpected id 0x{id:04X}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Bus errors
// ---------------------------------------------------------------------------

/// Classified failure of a register read.
///
/// None of these are fatal: a failed read yields no fresh sample for the
/// cycle and the caller decides whether to try again next cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// Zero length, empty buffer, or a length above the bus transfer limit.
    /// A caller bug; no bus transaction was attempted.
    InvalidArgument,
    /// The register-address phase was not acknowledged.
    AddressingFailure,
    /// The device returned fewer bytes than requested.
    IncompleteRead,
}

impl BusError {
    /// Whether re-issuing the same request on a later cycle can succeed.
    pub const fn is_retriable(self) -> bool {
        !matches!(self, Self::InvalidArgument)
    }
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::AddressingFailure => write!(f, "addressing failure"),
            Self::IncompleteRead => write!(f, "incomplete read"),
        }
    }
}

impl From<BusError> for Error {
    fn from(e: BusError) -> Self {
        Self::Bus(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed deserialisation.
    Corrupted,
    /// A config field failed range or ordering validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
