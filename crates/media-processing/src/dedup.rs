//! Duplicate media detection
//!
//! Uploads and linked media are compared against the existing library (and
//! against each other within one upload batch) by, in priority order:
//! - identical content hash
//! - the same resolved video (two URL spellings of one YouTube/Vimeo video)
//! - the same normalized URL
//! - the same normalized file name

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use url::Url;
use video_core::{VideoReference, VideoResolver};

/// Errors that can occur during duplicate detection
#[derive(Debug, Error)]
pub enum DedupError {
    /// IO error while hashing a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored hash is not a SHA-256 hex digest
    #[error("Invalid content hash: {0}")]
    InvalidHash(String),
}

/// Result type for dedup operations
pub type Result<T> = std::result::Result<T, DedupError>;

/// SHA-256 digest of media bytes, lower-case hex
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentHash(String);

impl ContentHash {
    /// Hash a byte slice
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        Self(format!("{:x}", digest))
    }

    /// Hash a file on disk
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Parse a stored hex digest
    pub fn parse(hex: &str) -> Result<Self> {
        let hex = hex.trim().to_ascii_lowercase();
        if hex.len() != 64 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DedupError::InvalidHash(hex));
        }
        Ok(Self(hex))
    }

    /// Get the hex digest
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContentHash {
    type Error = DedupError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ContentHash> for String {
    fn from(hash: ContentHash) -> Self {
        hash.0
    }
}

/// Normalize a media URL for comparison
///
/// Scheme, `www.`, fragment and trailing slash are ignored; host case is
/// folded; path and query are kept as-is. Returns `None` for input that is
/// not a URL even after assuming `https://`.
pub fn normalize_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let parsed = Url::parse(raw)
        .ok()
        .filter(|url| url.has_host())
        .or_else(|| Url::parse(&format!("https://{raw}")).ok())?;

    let host = parsed.host_str()?;
    if !host.contains('.') {
        return None;
    }
    let host = host.strip_prefix("www.").unwrap_or(host);

    let mut normalized = String::from(host);
    if let Some(port) = parsed.port() {
        normalized.push_str(&format!(":{port}"));
    }
    normalized.push_str(parsed.path().trim_end_matches('/'));
    if let Some(query) = parsed.query().filter(|q| !q.is_empty()) {
        normalized.push('?');
        normalized.push_str(query);
    }
    Some(normalized)
}

/// Normalize a file name for comparison
///
/// Directory components are dropped and case is folded.
pub fn normalize_filename(raw: &str) -> Option<String> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or(raw).trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_lowercase())
    }
}

/// A media item already in the library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    /// Record id in the datastore
    pub id: String,
    /// Source or storage URL
    #[serde(default)]
    pub url: Option<String>,
    /// Original file name
    #[serde(default)]
    pub filename: Option<String>,
    /// Content hash of the stored bytes
    #[serde(default)]
    pub content_hash: Option<ContentHash>,
}

/// A media item about to be added
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaCandidate {
    /// Source URL, for linked media
    #[serde(default)]
    pub url: Option<String>,
    /// File name, for uploads
    #[serde(default)]
    pub filename: Option<String>,
    /// Content hash, for uploads
    #[serde(default)]
    pub content_hash: Option<ContentHash>,
}

impl MediaCandidate {
    /// Candidate for linked media
    pub fn link(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Candidate for an uploaded file
    pub fn upload(filename: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            filename: Some(filename.into()),
            content_hash: Some(ContentHash::from_bytes(bytes)),
            ..Default::default()
        }
    }
}

/// Why two items are considered duplicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DuplicateReason {
    /// Identical bytes
    ContentHash,
    /// Both URLs resolve to the same video
    SameVideo,
    /// Same normalized URL
    Url,
    /// Same normalized file name
    Filename,
}

/// What a candidate duplicates
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "ref", rename_all = "camelCase")]
pub enum MatchTarget {
    /// An existing library record, by id
    Existing(String),
    /// An earlier candidate of the same batch, by index
    Batch(usize),
}

/// A detected duplicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateMatch {
    /// The item duplicated
    pub target: MatchTarget,
    /// Strongest reason found
    pub reason: DuplicateReason,
}

/// Result of checking an upload batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Indexes of candidates that are new
    pub unique: Vec<usize>,
    /// Candidates that duplicate something, by index
    pub duplicates: Vec<(usize, DuplicateMatch)>,
}

impl BatchReport {
    /// Check if nothing in the batch was a duplicate
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty()
    }
}

/// Comparison keys derived from one item
#[derive(Debug, Default)]
struct Keys {
    hash: Option<ContentHash>,
    video: Option<VideoReference>,
    url: Option<String>,
    filename: Option<String>,
}

impl Keys {
    fn derive(url: Option<&str>, filename: Option<&str>, hash: Option<&ContentHash>) -> Self {
        Self {
            hash: hash.cloned(),
            video: VideoResolver::resolve_optional(url),
            url: url.and_then(normalize_url),
            filename: filename.and_then(normalize_filename),
        }
    }
}

/// Index of known media used to detect duplicates
#[derive(Debug, Default)]
pub struct DuplicateDetector {
    by_hash: HashMap<ContentHash, MatchTarget>,
    by_video: HashMap<VideoReference, MatchTarget>,
    by_url: HashMap<String, MatchTarget>,
    by_filename: HashMap<String, MatchTarget>,
    indexed: usize,
}

impl DuplicateDetector {
    /// Create an empty detector
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector over existing records
    pub fn with_records<'a>(records: impl IntoIterator<Item = &'a MediaRecord>) -> Self {
        let mut detector = Self::new();
        for record in records {
            detector.insert(record);
        }
        detector
    }

    /// Add an existing record to the index
    pub fn insert(&mut self, record: &MediaRecord) {
        let keys = Keys::derive(
            record.url.as_deref(),
            record.filename.as_deref(),
            record.content_hash.as_ref(),
        );
        self.index(keys, MatchTarget::Existing(record.id.clone()));
    }

    /// Number of records and batch items added to the index
    ///
    /// Items whose keys were all claimed by an earlier item, or that have no
    /// keys at all, still count.
    pub fn len(&self) -> usize {
        self.indexed
    }

    /// Check if nothing is indexed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the strongest duplicate of a candidate
    pub fn find_duplicate(&self, candidate: &MediaCandidate) -> Option<DuplicateMatch> {
        let keys = Keys::derive(
            candidate.url.as_deref(),
            candidate.filename.as_deref(),
            candidate.content_hash.as_ref(),
        );
        self.lookup(&keys)
    }

    /// Check a batch of candidates against the index and each other
    ///
    /// Unique candidates are indexed as [`MatchTarget::Batch`] entries, so
    /// later candidates in the same batch are compared against them.
    pub fn check_batch(&mut self, candidates: &[MediaCandidate]) -> BatchReport {
        let mut report = BatchReport::default();
        for (index, candidate) in candidates.iter().enumerate() {
            let keys = Keys::derive(
                candidate.url.as_deref(),
                candidate.filename.as_deref(),
                candidate.content_hash.as_ref(),
            );
            match self.lookup(&keys) {
                Some(duplicate) => {
                    tracing::debug!(index, ?duplicate, "duplicate media in batch");
                    report.duplicates.push((index, duplicate));
                }
                None => {
                    self.index(keys, MatchTarget::Batch(index));
                    report.unique.push(index);
                }
            }
        }
        report
    }

    fn lookup(&self, keys: &Keys) -> Option<DuplicateMatch> {
        let found = |target: Option<&MatchTarget>, reason| {
            target.map(|target| DuplicateMatch {
                target: target.clone(),
                reason,
            })
        };

        keys.hash
            .as_ref()
            .and_then(|hash| found(self.by_hash.get(hash), DuplicateReason::ContentHash))
            .or_else(|| {
                keys.video
                    .as_ref()
                    .and_then(|video| found(self.by_video.get(video), DuplicateReason::SameVideo))
            })
            .or_else(|| {
                keys.url
                    .as_ref()
                    .and_then(|url| found(self.by_url.get(url), DuplicateReason::Url))
            })
            .or_else(|| {
                keys.filename
                    .as_ref()
                    .and_then(|name| found(self.by_filename.get(name), DuplicateReason::Filename))
            })
    }

    // First writer wins so matches point at the oldest item.
    fn index(&mut self, keys: Keys, target: MatchTarget) {
        self.indexed += 1;
        if let Some(hash) = keys.hash {
            self.by_hash.entry(hash).or_insert_with(|| target.clone());
        }
        if let Some(video) = keys.video {
            self.by_video.entry(video).or_insert_with(|| target.clone());
        }
        if let Some(url) = keys.url {
            self.by_url.entry(url).or_insert_with(|| target.clone());
        }
        if let Some(filename) = keys.filename {
            self.by_filename.entry(filename).or_insert(target);
        }
    }
}
