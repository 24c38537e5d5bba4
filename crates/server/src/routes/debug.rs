//! Operability endpoint for checking how a video URL or id is interpreted

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Json as ResponseJson, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use video_core::embeds::{youtube_thumbnail_url, EmbedDescriptor, YouTubeThumbnailQuality};
use video_core::{VideoReference, VideoResolver};

use crate::{error::ApiError, state::AppState};

const OEMBED_CACHE_CONTROL: &str = "public, max-age=3600";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugQuery {
    pub url: Option<String>,
    pub video_id: Option<String>,
}

/// Resolution report for `?url=`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlReport {
    pub original_url: String,
    pub video_info: Option<VideoReference>,
    pub title: Option<String>,
    pub embed_url: Option<String>,
}

/// oEmbed report for `?videoId=`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoIdReport {
    pub video_id: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub thumbnail_url: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// GET /api/debug/video?url=... or ?videoId=...
///
/// `url` wins when both are given.
pub async fn debug_video(
    State(state): State<AppState>,
    Query(query): Query<DebugQuery>,
) -> Result<Response, ApiError> {
    if let Some(url) = non_blank(query.url) {
        return Ok(ResponseJson(report_url(&state, url).await).into_response());
    }
    if let Some(video_id) = non_blank(query.video_id) {
        let video_id = video_id.trim();
        if !VideoResolver::is_youtube_id(video_id) {
            return Err(ApiError::BadRequest(format!(
                "Invalid YouTube video id: {video_id}"
            )));
        }
        return Ok(report_video_id(&state, video_id.to_string()).await);
    }
    Err(ApiError::BadRequest(
        "Provide either a url or a videoId query parameter".to_string(),
    ))
}

async fn report_url(state: &AppState, original_url: String) -> UrlReport {
    let video_info = VideoResolver::resolve(&original_url);

    let (title, embed_url) = match &video_info {
        Some(video) => {
            let metadata = state.metadata().enrich(video).await;
            let embed_url = EmbedDescriptor::for_reference(video)
                .ok()
                .map(|embed| embed.embed_url);
            (metadata.title, embed_url)
        }
        None => {
            tracing::debug!(url = %original_url, "debug lookup did not resolve");
            (None, None)
        }
    };

    UrlReport {
        original_url,
        video_info,
        title,
        embed_url,
    }
}

async fn report_video_id(state: &AppState, video_id: String) -> Response {
    let computed_thumbnail = youtube_thumbnail_url(&video_id, YouTubeThumbnailQuality::High);

    match state.metadata().youtube_oembed(&video_id).await {
        Ok(oembed) => {
            let report = VideoIdReport {
                thumbnail_url: oembed.thumbnail_url.unwrap_or(computed_thumbnail),
                title: Some(oembed.title),
                author: oembed.author_name,
                video_id,
            };
            (
                [(header::CACHE_CONTROL, OEMBED_CACHE_CONTROL)],
                ResponseJson(report),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!(video_id = %video_id, error = %e, "oEmbed lookup failed");
            ResponseJson(VideoIdReport {
                video_id,
                title: None,
                author: None,
                thumbnail_url: computed_thumbnail,
            })
            .into_response()
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/debug/video", get(debug_video))
}

#[cfg(test)]
mod tests {
    use crate::state::MockMetadataLookup;
    use crate::test_support::{app, get, json_body};
    use axum::http::{header, StatusCode};
    use metadata_client::{MetadataError, VideoMetadata, YouTubeOEmbed};
    use serde_json::json;
    use video_core::VideoPlatform;

    #[tokio::test]
    async fn test_debug_youtube_url() {
        let mut metadata = MockMetadataLookup::new();
        metadata
            .expect_enrich()
            .withf(|video| video.platform() == VideoPlatform::YouTube && video.id() == "dQw4w9WgXcQ")
            .times(1)
            .returning(|_| VideoMetadata {
                title: Some("Never Gonna Give You Up".to_string()),
                ..Default::default()
            });

        let response = get(
            app(metadata),
            "/api/debug/video?url=https%3A%2F%2Fyoutu.be%2FdQw4w9WgXcQ",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(
            body,
            json!({
                "originalUrl": "https://youtu.be/dQw4w9WgXcQ",
                "videoInfo": {"platform": "youtube", "id": "dQw4w9WgXcQ"},
                "title": "Never Gonna Give You Up",
                "embedUrl": "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=0&rel=0&modestbranding=1",
            })
        );
    }

    #[tokio::test]
    async fn test_debug_unrecognized_url() {
        let mut metadata = MockMetadataLookup::new();
        metadata.expect_enrich().never();

        let response = get(app(metadata), "/api/debug/video?url=https%3A%2F%2Fexample.com%2F").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["originalUrl"], "https://example.com/");
        assert!(body["videoInfo"].is_null());
        assert!(body["title"].is_null());
        assert!(body["embedUrl"].is_null());
    }

    #[tokio::test]
    async fn test_debug_linkedin_has_no_embed() {
        let mut metadata = MockMetadataLookup::new();
        metadata
            .expect_enrich()
            .returning(|_| VideoMetadata::default());

        let response = get(
            app(metadata),
            "/api/debug/video?url=https%3A%2F%2Fwww.linkedin.com%2Ffeed%2Fupdate%2Furn%3Ali%3Aactivity%3A7001234567890123456",
        )
        .await;

        let body = json_body(response).await;
        assert_eq!(body["videoInfo"]["platform"], "linkedin");
        assert_eq!(body["videoInfo"]["id"], "7001234567890123456");
        assert!(body["embedUrl"].is_null());
    }

    #[tokio::test]
    async fn test_debug_video_id_success_is_cacheable() {
        let mut metadata = MockMetadataLookup::new();
        metadata
            .expect_youtube_oembed()
            .withf(|id| id == "dQw4w9WgXcQ")
            .returning(|_| {
                Ok(YouTubeOEmbed {
                    title: "Never Gonna Give You Up".to_string(),
                    author_name: Some("Rick Astley".to_string()),
                    author_url: None,
                    thumbnail_url: Some("https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg".to_string()),
                })
            });

        let response = get(app(metadata), "/api/debug/video?videoId=dQw4w9WgXcQ").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "public, max-age=3600"
        );

        let body = json_body(response).await;
        assert_eq!(
            body,
            json!({
                "videoId": "dQw4w9WgXcQ",
                "title": "Never Gonna Give You Up",
                "author": "Rick Astley",
                "thumbnailUrl": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg",
            })
        );
    }

    #[tokio::test]
    async fn test_debug_video_id_failure_degrades() {
        let mut metadata = MockMetadataLookup::new();
        metadata.expect_youtube_oembed().returning(|_| {
            Err(MetadataError::Status {
                status: 404,
                url: "https://www.youtube.com/oembed".to_string(),
            })
        });

        let response = get(app(metadata), "/api/debug/video?videoId=aaaaaaaaaaa").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());

        let body = json_body(response).await;
        assert_eq!(body["videoId"], "aaaaaaaaaaa");
        assert!(body["title"].is_null());
        assert!(body["author"].is_null());
        assert_eq!(
            body["thumbnailUrl"],
            "https://img.youtube.com/vi/aaaaaaaaaaa/hqdefault.jpg"
        );
    }

    #[tokio::test]
    async fn test_debug_video_id_shape_checked() {
        for id in ["short", "dQw4w9WgXcQ%26format%3Dxml", "%2E%2E%2Fadmin%2Fxx"] {
            let mut metadata = MockMetadataLookup::new();
            metadata.expect_youtube_oembed().never();

            let uri = format!("/api/debug/video?videoId={id}");
            let response = get(app(metadata), &uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{id}");
        }
    }

    #[tokio::test]
    async fn test_debug_url_wins_over_video_id() {
        let mut metadata = MockMetadataLookup::new();
        metadata.expect_youtube_oembed().never();
        metadata
            .expect_enrich()
            .returning(|_| VideoMetadata::default());

        let response = get(
            app(metadata),
            "/api/debug/video?url=https%3A%2F%2Fvimeo.com%2F76979871&videoId=dQw4w9WgXcQ",
        )
        .await;

        let body = json_body(response).await;
        assert_eq!(body["videoInfo"]["platform"], "vimeo");
        assert_eq!(body["videoInfo"]["id"], "76979871");
    }

    #[tokio::test]
    async fn test_debug_requires_a_parameter() {
        for uri in ["/api/debug/video", "/api/debug/video?url=%20%20"] {
            let response = get(app(MockMetadataLookup::new()), uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let body = json_body(response).await;
            assert!(body["error"].as_str().unwrap().contains("videoId"));
        }
    }
}
