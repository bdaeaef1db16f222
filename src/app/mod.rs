//! Application boundary: the events the core emits and the ports they go
//! out through. Adapters on the other side (serial log, telemetry link)
//! implement [`ports::EventSink`], keeping this crate free of I/O.

pub mod events;
pub mod ports;
