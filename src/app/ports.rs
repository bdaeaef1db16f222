//! Port traits between the core and the outside world.

/// Receives [`FlightEvent`](super::events::FlightEvent)s. Adapters decide
/// where they go (serial log, MAVLink STATUSTEXT, LED pattern).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::FlightEvent);
}
