//! Video metadata lookups
//!
//! This crate fetches optional enrichment (titles, authors, thumbnails) for
//! resolved videos from the platforms' public, unauthenticated endpoints.
//! Lookups are single best-effort attempts; callers that only need playback
//! never depend on them.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod types;

pub use client::{MetadataClient, MetadataClientConfig};
pub use types::{VideoMetadata, VimeoVideo, YouTubeOEmbed};

use video_core::VideoPlatform;

/// Result type for metadata operations
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Error types for metadata lookups
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// Network error
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Unexpected status {status} from {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Malformed JSON body
    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The endpoint answered without any metadata
    #[error("No metadata returned for {0}")]
    Empty(String),

    /// No lookup exists for this platform
    #[error("No metadata lookup for platform: {0}")]
    Unsupported(VideoPlatform),
}

impl MetadataError {
    /// Check if the error is a 404 from the platform
    pub fn is_not_found(&self) -> bool {
        matches!(self, MetadataError::Status { status: 404, .. })
    }
}
