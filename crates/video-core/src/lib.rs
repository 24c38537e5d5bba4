//! Video recognition and embedding for Showcase
//!
//! This crate resolves raw video URLs into `(platform, id)` pairs, derives
//! player and thumbnail URLs from them, and models the player's
//! loading/loaded/errored lifecycle.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod embeds;
pub mod player;
pub mod reference;

pub use embeds::{EmbedDescriptor, EmbedError, YouTubeThumbnailQuality};
pub use player::{PlayerError, PlayerState, PlayerView, VideoPlayer, FALLBACK_MESSAGE};
pub use reference::{EmptyVideoId, VideoPlatform, VideoReference, VideoResolver};
