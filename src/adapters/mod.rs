//! Driven adapters that implement the [`crate::app::ports`] traits.

pub mod log_sink;
