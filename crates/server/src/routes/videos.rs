use axum::{
    extract::Query,
    response::Json as ResponseJson,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use video_core::{EmbedDescriptor, VideoReference, VideoResolver, FALLBACK_MESSAGE};

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub reference: Option<VideoReference>,
    pub embed: Option<EmbedDescriptor>,
    pub error: Option<String>,
}

/// GET /api/videos/resolve?url=...
pub async fn resolve_video(
    Query(query): Query<ResolveQuery>,
) -> Result<ResponseJson<ResolveResponse>, ApiError> {
    let url = query
        .url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing url query parameter".to_string()))?;

    let Some(reference) = VideoResolver::resolve(&url) else {
        return Ok(ResponseJson(ResolveResponse {
            reference: None,
            embed: None,
            error: Some(FALLBACK_MESSAGE.to_string()),
        }));
    };

    let (embed, error) = match EmbedDescriptor::for_reference(&reference) {
        Ok(embed) => (Some(embed), None),
        Err(e) => (None, Some(e.to_string())),
    };

    Ok(ResponseJson(ResolveResponse {
        reference: Some(reference),
        embed,
        error,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/videos/resolve", get(resolve_video))
}
