use std::sync::Arc;

use tidewatch_store::{DurableMedium, SnapshotStore};

use crate::config::ServerConfig;
use crate::reader::StatusReader;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (locale, refresh cadence, read source).
    pub config: Arc<ServerConfig>,
    /// In-memory snapshot store, shared with the embedded producer.
    pub store: Arc<SnapshotStore>,
    /// Per-request status reader.
    pub reader: Arc<StatusReader>,
}

impl AppState {
    /// Wire the reader to `store` and `medium` according to `config`.
    pub fn new(
        config: ServerConfig,
        store: Arc<SnapshotStore>,
        medium: Arc<dyn DurableMedium>,
    ) -> Self {
        let reader = StatusReader::new(&config, Arc::clone(&store), medium);
        Self {
            config: Arc::new(config),
            store,
            reader: Arc::new(reader),
        }
    }
}
