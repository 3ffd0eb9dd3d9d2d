//! `tidewatch-producer` library crate.
//!
//! Exposes the periodic producer so the API server can embed it and
//! integration tests can drive individual ticks. The standalone binary
//! entrypoint lives in `main.rs`.

pub mod config;
pub mod producer;

pub use config::ProducerConfig;
pub use producer::{Producer, TickOutcome};
