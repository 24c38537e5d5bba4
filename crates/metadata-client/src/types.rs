//! Metadata payloads
//!
//! Response shapes of the YouTube oEmbed and Vimeo simple API endpoints, and
//! the platform-neutral [`VideoMetadata`] they are folded into.

use serde::{Deserialize, Serialize};
use video_core::embeds::{youtube_thumbnail_url, YouTubeThumbnailQuality};
use video_core::{VideoPlatform, VideoReference};

/// YouTube oEmbed response (only the fields we use)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YouTubeOEmbed {
    /// Video title
    pub title: String,
    /// Channel name
    #[serde(default)]
    pub author_name: Option<String>,
    /// Channel URL
    #[serde(default)]
    pub author_url: Option<String>,
    /// Thumbnail URL
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// One entry of the Vimeo `video/<id>.json` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VimeoVideo {
    /// Numeric video id
    pub id: u64,
    /// Video title
    pub title: String,
    /// Uploader display name
    #[serde(default)]
    pub user_name: Option<String>,
    /// Large thumbnail URL
    #[serde(default)]
    pub thumbnail_large: Option<String>,
    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<u64>,
}

/// Best-effort metadata for a video
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    /// Video title
    pub title: Option<String>,
    /// Author or channel name
    pub author: Option<String>,
    /// Thumbnail URL
    pub thumbnail_url: Option<String>,
    /// Duration in seconds
    pub duration_secs: Option<u64>,
}

impl VideoMetadata {
    /// Metadata computable without any network call
    pub fn fallback(video: &VideoReference) -> Self {
        let thumbnail_url = match video.platform() {
            VideoPlatform::YouTube => Some(youtube_thumbnail_url(
                video.id(),
                YouTubeThumbnailQuality::High,
            )),
            VideoPlatform::Vimeo | VideoPlatform::LinkedIn => None,
        };
        Self {
            thumbnail_url,
            ..Default::default()
        }
    }

    /// Check if a lookup contributed anything beyond the fallback
    pub fn has_title(&self) -> bool {
        self.title.is_some()
    }
}

impl From<YouTubeOEmbed> for VideoMetadata {
    fn from(oembed: YouTubeOEmbed) -> Self {
        Self {
            title: Some(oembed.title),
            author: oembed.author_name,
            thumbnail_url: oembed.thumbnail_url,
            duration_secs: None,
        }
    }
}

impl From<VimeoVideo> for VideoMetadata {
    fn from(video: VimeoVideo) -> Self {
        Self {
            title: Some(video.title),
            author: video.user_name,
            thumbnail_url: video.thumbnail_large,
            duration_secs: video.duration,
        }
    }
}
