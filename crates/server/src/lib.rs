//! HTTP service for Showcase
//!
//! Exposes the video resolver, the operability debug endpoint, identity
//! webhooks and media duplicate checks over JSON.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use state::{AppState, MetadataLookup};

use axum::Router;
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn router(state: AppState) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
