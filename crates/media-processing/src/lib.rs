//! Media processing for Showcase
//!
//! This crate handles checks applied to uploaded and linked media before it
//! is attached to a project or behind-the-scenes record, starting with
//! duplicate detection.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dedup;

pub use dedup::{
    normalize_filename, normalize_url, BatchReport, ContentHash, DedupError, DuplicateDetector,
    DuplicateMatch, DuplicateReason, MatchTarget, MediaCandidate, MediaRecord,
};
