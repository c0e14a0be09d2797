use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde_json::json;

use super::AppState;

/// `GET /health` -- liveness plus the configured notifier, if any.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "notifier": state.notifier.as_ref().map(|n| n.name().to_owned()),
    }))
}
