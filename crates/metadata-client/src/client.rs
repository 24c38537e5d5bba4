//! HTTP client for metadata lookups
//!
//! Both lookups are plain unauthenticated GETs. There is no retry, batching
//! or deduplication: each call is one attempt bounded by the client timeout.

use reqwest::{Client as ReqwestClient, Response as ReqwestResponse};
use serde::de::DeserializeOwned;
use std::time::Duration;
use video_core::{VideoPlatform, VideoReference};

use crate::types::{VideoMetadata, VimeoVideo, YouTubeOEmbed};
use crate::{MetadataError, Result};

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for the metadata client
#[derive(Debug, Clone)]
pub struct MetadataClientConfig {
    /// YouTube oEmbed endpoint
    pub youtube_oembed_url: String,
    /// Vimeo simple API base URL (without the `/video/<id>.json` suffix)
    pub vimeo_api_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for MetadataClientConfig {
    fn default() -> Self {
        Self {
            youtube_oembed_url: "https://www.youtube.com/oembed".to_string(),
            vimeo_api_url: "https://vimeo.com/api/v2".to_string(),
            timeout: Duration::from_secs(10),
            user_agent: format!("Showcase/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl MetadataClientConfig {
    /// Create a new config with default endpoints
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the YouTube oEmbed endpoint
    pub fn with_youtube_oembed_url(mut self, url: impl Into<String>) -> Self {
        self.youtube_oembed_url = url.into();
        self
    }

    /// Set the Vimeo API base URL
    pub fn with_vimeo_api_url(mut self, url: impl Into<String>) -> Self {
        self.vimeo_api_url = url.into();
        self
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

// =============================================================================
// Client Implementation
// =============================================================================

/// Client for YouTube and Vimeo metadata
///
/// # Examples
/// ```
/// use metadata_client::{MetadataClient, MetadataClientConfig};
/// use video_core::VideoResolver;
///
/// async fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let client = MetadataClient::new(MetadataClientConfig::default())?;
///
///     if let Some(video) = VideoResolver::resolve("https://vimeo.com/76979871") {
///         let metadata = client.enrich(&video).await;
///         println!("title: {:?}", metadata.title);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MetadataClient {
    client: ReqwestClient,
    config: MetadataClientConfig,
}

impl MetadataClient {
    /// Create a new metadata client
    pub fn new(config: MetadataClientConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// Get the configuration
    pub fn config(&self) -> &MetadataClientConfig {
        &self.config
    }

    /// Fetch the oEmbed document for a YouTube video id
    pub async fn youtube_oembed(&self, video_id: &str) -> Result<YouTubeOEmbed> {
        let watch_url = format!("https://www.youtube.com/watch?v={video_id}");
        let response = self
            .client
            .get(&self.config.youtube_oembed_url)
            .query(&[("url", watch_url.as_str()), ("format", "json")])
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Fetch the Vimeo simple API entry for a video id
    pub async fn vimeo_video(&self, video_id: &str) -> Result<VimeoVideo> {
        let url = format!(
            "{}/video/{}.json",
            self.config.vimeo_api_url.trim_end_matches('/'),
            video_id
        );
        let response = self.client.get(&url).send().await?;
        let videos: Vec<VimeoVideo> = Self::decode(response).await?;
        videos
            .into_iter()
            .next()
            .ok_or(MetadataError::Empty(url))
    }

    /// Look up metadata for a resolved video
    pub async fn lookup(&self, video: &VideoReference) -> Result<VideoMetadata> {
        match video.platform() {
            VideoPlatform::YouTube => self.youtube_oembed(video.id()).await.map(Into::into),
            VideoPlatform::Vimeo => self.vimeo_video(video.id()).await.map(Into::into),
            platform @ VideoPlatform::LinkedIn => Err(MetadataError::Unsupported(platform)),
        }
    }

    /// Look up metadata, degrading to what can be computed offline on failure
    ///
    /// Never fails. Missing fields from the lookup are filled from
    /// [`VideoMetadata::fallback`].
    pub async fn enrich(&self, video: &VideoReference) -> VideoMetadata {
        let fallback = VideoMetadata::fallback(video);
        match self.lookup(video).await {
            Ok(mut metadata) => {
                if metadata.thumbnail_url.is_none() {
                    metadata.thumbnail_url = fallback.thumbnail_url;
                }
                metadata
            }
            Err(MetadataError::Unsupported(_)) => fallback,
            Err(err) => {
                tracing::warn!(video = %video, error = %err, "metadata lookup failed");
                fallback
            }
        }
    }

    async fn decode<T: DeserializeOwned>(response: ReqwestResponse) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
