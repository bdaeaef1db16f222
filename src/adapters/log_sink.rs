//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing each [`FlightEvent`] as one line
//! through the `log` facade (serial console in flight, test output on
//! the host). A telemetry adapter would implement the same trait.

use log::{error, info, warn};

use crate::app::events::FlightEvent;
use crate::app::ports::EventSink;
use crate::safety::VoltageTier;

/// Adapter that logs every [`FlightEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink {
    emitted: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events logged so far.
    pub fn emitted(&self) -> u32 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &FlightEvent) {
        self.emitted = self.emitted.wrapping_add(1);
        match event {
            FlightEvent::Disarmed(reason) => {
                error!("DISARM | {}", reason);
            }
            FlightEvent::TierChanged { from, to } => {
                if *to >= VoltageTier::Critical {
                    error!("BATTERY | {} -> {}", from, to);
                } else if to > from {
                    warn!("BATTERY | {} -> {}", from, to);
                } else {
                    info!("BATTERY | {} -> {}", from, to);
                }
            }
            FlightEvent::SensorReadFailed { device, error } => {
                warn!("SENSOR | {} read failed: {}", device, error);
            }
        }
    }
}
