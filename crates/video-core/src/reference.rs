//! Video URL recognition
//!
//! This module classifies raw, untrusted strings (form fields, stored project
//! and behind-the-scenes media records, debug query parameters) as references
//! to a supported video platform. Every caller goes through [`VideoResolver`];
//! there is no other place in the workspace that pattern-matches video URLs.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Supported video platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoPlatform {
    /// YouTube (youtube.com, youtu.be)
    YouTube,
    /// Vimeo (vimeo.com, player.vimeo.com)
    Vimeo,
    /// LinkedIn activity posts
    LinkedIn,
}

impl VideoPlatform {
    /// Get the platform tag as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoPlatform::YouTube => "youtube",
            VideoPlatform::Vimeo => "vimeo",
            VideoPlatform::LinkedIn => "linkedin",
        }
    }

    /// Whether an iframe player exists for this platform
    pub fn supports_playback(&self) -> bool {
        !matches!(self, VideoPlatform::LinkedIn)
    }
}

impl fmt::Display for VideoPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when constructing a reference without an id
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("video id must not be empty")]
pub struct EmptyVideoId;

/// A normalized `(platform, id)` pair
///
/// Values only exist for URLs that matched a recognized pattern, or that were
/// built through [`VideoReference::new`] with a non-empty id. Deserialization
/// applies the same check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawVideoReference")]
pub struct VideoReference {
    platform: VideoPlatform,
    id: String,
}

#[derive(Deserialize)]
struct RawVideoReference {
    platform: VideoPlatform,
    id: String,
}

impl TryFrom<RawVideoReference> for VideoReference {
    type Error = EmptyVideoId;

    fn try_from(raw: RawVideoReference) -> Result<Self, Self::Error> {
        VideoReference::new(raw.platform, raw.id)
    }
}

impl VideoReference {
    /// Create a reference from a platform and an already-extracted id
    pub fn new(platform: VideoPlatform, id: impl Into<String>) -> Result<Self, EmptyVideoId> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(EmptyVideoId);
        }
        Ok(Self { platform, id })
    }

    /// Get the platform
    pub fn platform(&self) -> VideoPlatform {
        self.platform
    }

    /// Get the platform-specific id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the public page URL for this video
    pub fn canonical_url(&self) -> String {
        match self.platform {
            VideoPlatform::YouTube => format!("https://www.youtube.com/watch?v={}", self.id),
            VideoPlatform::Vimeo => format!("https://vimeo.com/{}", self.id),
            VideoPlatform::LinkedIn => {
                format!("https://www.linkedin.com/feed/update/urn:li:activity:{}", self.id)
            }
        }
    }
}

impl fmt::Display for VideoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.platform, self.id)
    }
}

// Id terminators follow the documented URL shapes. `#` is accepted everywhere
// so fragment timestamps (`#t=42`) do not defeat recognition.
const YOUTUBE_WATCH: &str = r"youtube\.com/watch\?(?:[^#\s]*&)?v=([A-Za-z0-9_-]{11})(?:[&#\s]|$)";
const YOUTUBE_EMBED: &str = r"youtube\.com/(?:embed|shorts|live)/([A-Za-z0-9_-]{11})(?:[?#/]|$)";
const YOUTUBE_SHORT: &str = r"youtu\.be/([A-Za-z0-9_-]{11})(?:[?#/]|$)";
const YOUTUBE_CANONICAL: &str = r#"(?:youtube\.com/(?:[^/\s]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})(?:["&?/#\s]|$)"#;

const VIMEO: &str =
    r"vimeo\.com/(?:channels/[^/\s]+/|groups/[^/\s]+/videos/|album/\d+/video/|video/)?(\d+)(?:[/?#\s]|$)";

const LINKEDIN_ACTIVITY: &str =
    r"linkedin\.com/(?:posts|feed/update)/(?:urn:li:activity:)?(\d+)(?:[/?#\s]|$)";
const LINKEDIN_POST_SLUG: &str = r"linkedin\.com/posts/[^\s?#]*?activity-(\d+)";

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|pattern| Regex::new(pattern).unwrap())
        .collect()
}

fn youtube_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        compile(&[YOUTUBE_WATCH, YOUTUBE_EMBED, YOUTUBE_SHORT, YOUTUBE_CANONICAL])
    })
}

fn vimeo_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| compile(&[VIMEO]))
}

fn linkedin_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| compile(&[LINKEDIN_ACTIVITY, LINKEDIN_POST_SLUG]))
}

/// First capture of the first pattern that matches
fn first_capture<'a>(patterns: &[Regex], input: &'a str) -> Option<&'a str> {
    patterns
        .iter()
        .find_map(|re| re.captures(input).and_then(|caps| caps.get(1)))
        .map(|m| m.as_str())
}

/// Resolver for raw video URLs
///
/// Resolution never fails loudly: anything that cannot be classified yields
/// `None`.
///
/// # Examples
/// ```
/// use video_core::{VideoPlatform, VideoResolver};
///
/// let video = VideoResolver::resolve("https://youtu.be/dQw4w9WgXcQ").unwrap();
/// assert_eq!(video.platform(), VideoPlatform::YouTube);
/// assert_eq!(video.id(), "dQw4w9WgXcQ");
///
/// assert!(VideoResolver::resolve("https://example.com/video.mp4").is_none());
/// ```
pub struct VideoResolver;

impl VideoResolver {
    /// Classify a URL by domain substring only, without extracting an id
    pub fn detect(url: &str) -> Option<VideoPlatform> {
        if Self::is_youtube_url(url) {
            Some(VideoPlatform::YouTube)
        } else if Self::is_vimeo_url(url) {
            Some(VideoPlatform::Vimeo)
        } else if Self::is_linkedin_url(url) {
            Some(VideoPlatform::LinkedIn)
        } else {
            None
        }
    }

    /// Check if URL mentions a YouTube domain
    pub fn is_youtube_url(url: &str) -> bool {
        url.contains("youtube.com") || url.contains("youtu.be")
    }

    /// Check if a bare string has the shape of a YouTube video id
    pub fn is_youtube_id(id: &str) -> bool {
        id.len() == 11
            && id
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
    }

    /// Check if URL mentions the Vimeo domain
    pub fn is_vimeo_url(url: &str) -> bool {
        url.contains("vimeo.com")
    }

    /// Check if URL mentions the LinkedIn domain
    pub fn is_linkedin_url(url: &str) -> bool {
        url.contains("linkedin.com")
    }

    /// Resolve a raw string into a video reference
    ///
    /// The first platform whose domain appears in the input decides the
    /// branch. If that branch finds no id, the input is not recognized.
    pub fn resolve(url: &str) -> Option<VideoReference> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }

        let platform = Self::detect(url)?;
        let id = match platform {
            VideoPlatform::YouTube => first_capture(youtube_patterns(), url),
            VideoPlatform::Vimeo => first_capture(vimeo_patterns(), url),
            VideoPlatform::LinkedIn => first_capture(linkedin_patterns(), url),
        };

        match id {
            Some(id) => {
                tracing::debug!(%platform, id, "resolved video url");
                VideoReference::new(platform, id).ok()
            }
            None => {
                tracing::debug!(%platform, url, "video url has no recognizable id");
                None
            }
        }
    }

    /// Resolve an input that may be absent
    pub fn resolve_optional(url: Option<&str>) -> Option<VideoReference> {
        url.and_then(Self::resolve)
    }
}
