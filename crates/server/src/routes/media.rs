use axum::{response::Json as ResponseJson, routing::post, Json, Router};
use media_processing::{BatchReport, DuplicateDetector, MediaCandidate, MediaRecord};
use serde::Deserialize;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DuplicateCheckRequest {
    #[serde(default)]
    pub existing: Vec<MediaRecord>,
    pub candidates: Vec<MediaCandidate>,
}

/// POST /api/media/duplicates
pub async fn check_duplicates(Json(request): Json<DuplicateCheckRequest>) -> ResponseJson<BatchReport> {
    let mut detector = DuplicateDetector::with_records(&request.existing);
    let report = detector.check_batch(&request.candidates);
    tracing::debug!(
        candidates = request.candidates.len(),
        duplicates = report.duplicates.len(),
        "checked media batch"
    );
    ResponseJson(report)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/media/duplicates", post(check_duplicates))
}
