//! Shared handler state

use app_state::RuntimeInfo;
use async_trait::async_trait;
use metadata_client::{MetadataClient, VideoMetadata, YouTubeOEmbed};
use std::sync::Arc;
use video_core::VideoReference;

/// Metadata lookups used by the routes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    /// Best-effort metadata; never fails
    async fn enrich(&self, video: &VideoReference) -> VideoMetadata;

    /// Raw YouTube oEmbed lookup
    async fn youtube_oembed(&self, video_id: &str) -> metadata_client::Result<YouTubeOEmbed>;
}

#[async_trait]
impl MetadataLookup for MetadataClient {
    async fn enrich(&self, video: &VideoReference) -> VideoMetadata {
        MetadataClient::enrich(self, video).await
    }

    async fn youtube_oembed(&self, video_id: &str) -> metadata_client::Result<YouTubeOEmbed> {
        MetadataClient::youtube_oembed(self, video_id).await
    }
}

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    metadata: Arc<dyn MetadataLookup>,
    runtime: Arc<RuntimeInfo>,
}

impl AppState {
    /// Create the handler state
    pub fn new(metadata: Arc<dyn MetadataLookup>, runtime: Arc<RuntimeInfo>) -> Self {
        Self { metadata, runtime }
    }

    /// Metadata lookups
    pub fn metadata(&self) -> &dyn MetadataLookup {
        self.metadata.as_ref()
    }

    /// Process runtime info
    pub fn runtime(&self) -> &RuntimeInfo {
        &self.runtime
    }
}
