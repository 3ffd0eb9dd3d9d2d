use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::{AppError, AppResult};
use crate::render::{render_status_page, StatusView};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET / -- auto-refreshing HTML status page.
async fn status_page(State(state): State<AppState>) -> AppResult<Html<String>> {
    let report = state.reader.read_status().await?;
    Ok(Html(render_status_page(
        &report,
        state.config.locale,
        state.config.refresh_secs(),
    )))
}

/// GET /api/v1/status -- the same report as JSON.
pub async fn status_json(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<StatusView>>> {
    let report = state.reader.read_status().await?;
    Ok(Json(DataResponse {
        data: StatusView::new(&report, state.config.locale, state.config.refresh_secs()),
    }))
}

/// Any non-read verb on a status endpoint.
pub async fn method_not_supported() -> AppError {
    AppError::MethodNotSupported
}

/// Mount the status page at the root path.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(status_page).fallback(method_not_supported))
}
