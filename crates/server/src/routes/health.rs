use axum::{extract::State, response::Json as ResponseJson, routing::get, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> ResponseJson<HealthResponse> {
    let runtime = state.runtime();
    ResponseJson(HealthResponse {
        status: "ok",
        version: runtime.version(),
        uptime_secs: runtime.uptime().as_secs(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
