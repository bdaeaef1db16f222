//! Outbound events.
//!
//! Emitted by the sampling tasks through the
//! [`EventSink`](super::ports::EventSink) port. A telemetry adapter maps
//! them onto ground-station messages; the log adapter prints them.

use crate::bus::BusDevice;
use crate::error::BusError;
use crate::safety::{DisarmReason, VoltageTier};

/// Structured events emitted by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightEvent {
    /// A threshold breach forced the motors off.
    Disarmed(DisarmReason),

    /// The voltage notification tier changed.
    TierChanged { from: VoltageTier, to: VoltageTier },

    /// A sensor read failed; the previous reading is now stale.
    SensorReadFailed { device: BusDevice, error: BusError },
}
