//! Tidewatch API server library.
//!
//! Exposes the building blocks (config, state, reader, rendering, error
//! handling, routes) so integration tests and the binary entrypoint can both
//! access them.

pub mod config;
pub mod error;
pub mod reader;
pub mod render;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
