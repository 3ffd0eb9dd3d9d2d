//! Tidewatch domain logic.
//!
//! Everything in this crate is pure (no I/O, no locks): the measurement
//! record and its legal range, the threshold classification engine, the
//! localized severity labels and the pluggable measurement generator.

pub mod classification;
pub mod error;
pub mod generator;
pub mod labels;
pub mod record;
pub mod types;
