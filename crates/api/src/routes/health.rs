use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use tidewatch_core::types::Timestamp;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when a status record can be read, `degraded` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the status reader currently succeeds.
    pub status_readable: bool,
    /// Last in-process publish. `null` before the first tick or when the
    /// producer runs out of process.
    pub last_publish: Option<Timestamp>,
    pub sequence: Option<u64>,
}

/// GET /health -- returns service health and the snapshot recency marker.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let status_readable = state.reader.read_status().await.is_ok();
    let snapshot = state.store.read().await;

    Json(HealthResponse {
        status: if status_readable { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        status_readable,
        last_publish: snapshot.map(|s| s.published_at),
        sequence: snapshot.map(|s| s.sequence),
    })
}

/// Mount health check routes (root level, not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
