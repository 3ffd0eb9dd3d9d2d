pub mod health;
pub mod status;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /status        GET   classified status as JSON
/// ```
///
/// Every other verb on these paths is answered with 405.
pub fn api_routes() -> Router<AppState> {
    Router::new().route(
        "/status",
        get(status::status_json).fallback(status::method_not_supported),
    )
}
