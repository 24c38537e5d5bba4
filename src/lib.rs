//! Showcase
//!
//! Umbrella crate for the portfolio backend libraries. Integration tests in
//! `tests/` exercise the crates together through these re-exports.

pub use app_state;
pub use media_processing;
pub use metadata_client;
pub use video_core;
