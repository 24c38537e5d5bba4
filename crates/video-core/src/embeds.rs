//! Embeddable player and thumbnail URLs
//!
//! This module turns a resolved [`VideoReference`] into the URLs the rendering
//! layer needs: an iframe-loadable player URL and, for YouTube, a direct
//! thumbnail image URL.

use crate::reference::{VideoPlatform, VideoReference, VideoResolver};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while building embed URLs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbedError {
    /// No video reference was supplied
    #[error("Missing video reference")]
    MissingReference,

    /// The platform was recognized but has no iframe player
    #[error("No embeddable player for platform: {0}")]
    UnsupportedPlaybackPlatform(VideoPlatform),
}

/// Result type for embed operations
pub type Result<T> = std::result::Result<T, EmbedError>;

/// YouTube thumbnail quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YouTubeThumbnailQuality {
    /// Default quality (120x90)
    Default,
    /// Medium quality (320x180)
    Medium,
    /// High quality (480x360)
    #[default]
    High,
    /// Standard definition (640x480)
    StandardDef,
    /// Max resolution (1280x720)
    MaxRes,
}

impl YouTubeThumbnailQuality {
    /// Get the filename for this quality
    pub fn filename(&self) -> &'static str {
        match self {
            YouTubeThumbnailQuality::Default => "default.jpg",
            YouTubeThumbnailQuality::Medium => "mqdefault.jpg",
            YouTubeThumbnailQuality::High => "hqdefault.jpg",
            YouTubeThumbnailQuality::StandardDef => "sddefault.jpg",
            YouTubeThumbnailQuality::MaxRes => "maxresdefault.jpg",
        }
    }
}

/// YouTube player URL for a video id
pub fn youtube_embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}?autoplay=0&rel=0&modestbranding=1")
}

/// Vimeo player URL for a video id
pub fn vimeo_embed_url(video_id: &str) -> String {
    format!("https://player.vimeo.com/video/{video_id}?color=ffffff&title=0&byline=0&portrait=0")
}

/// YouTube thumbnail URL for a video id at the given quality
pub fn youtube_thumbnail_url(video_id: &str, quality: YouTubeThumbnailQuality) -> String {
    format!("https://img.youtube.com/vi/{}/{}", video_id, quality.filename())
}

/// Derived playback URLs for a video
///
/// Never persisted; recompute it from the stored raw URL when needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedDescriptor {
    /// Iframe-loadable player URL
    pub embed_url: String,
    /// Direct thumbnail image URL, when it can be computed without a lookup
    pub thumbnail_url: Option<String>,
}

impl EmbedDescriptor {
    /// Build the descriptor for a resolved reference
    ///
    /// # Examples
    /// ```
    /// use video_core::{EmbedDescriptor, VideoPlatform, VideoReference};
    ///
    /// let video = VideoReference::new(VideoPlatform::Vimeo, "76979871").unwrap();
    /// let embed = EmbedDescriptor::for_reference(&video).unwrap();
    /// assert!(embed.embed_url.starts_with("https://player.vimeo.com/video/76979871"));
    /// assert!(embed.thumbnail_url.is_none());
    /// ```
    pub fn for_reference(video: &VideoReference) -> Result<Self> {
        let id = video.id();
        match video.platform() {
            VideoPlatform::YouTube => Ok(Self {
                embed_url: youtube_embed_url(id),
                thumbnail_url: Some(youtube_thumbnail_url(id, YouTubeThumbnailQuality::High)),
            }),
            VideoPlatform::Vimeo => Ok(Self {
                embed_url: vimeo_embed_url(id),
                thumbnail_url: None,
            }),
            platform @ VideoPlatform::LinkedIn => {
                Err(EmbedError::UnsupportedPlaybackPlatform(platform))
            }
        }
    }

    /// Build the descriptor for a reference that may be absent
    pub fn for_optional(video: Option<&VideoReference>) -> Result<Self> {
        video
            .ok_or(EmbedError::MissingReference)
            .and_then(Self::for_reference)
    }

    /// Resolve a raw URL and build its descriptor in one step
    ///
    /// Returns `None` when the URL is not recognized at all.
    pub fn from_url(url: &str) -> Option<Result<Self>> {
        VideoResolver::resolve(url).map(|video| Self::for_reference(&video))
    }
}
