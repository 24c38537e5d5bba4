use axum::Router;

use crate::state::AppState;

pub mod debug;
pub mod health;
pub mod identity;
pub mod media;
pub mod videos;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest(
            "/api",
            Router::new()
                .merge(debug::router())
                .merge(videos::router())
                .merge(identity::router())
                .merge(media::router()),
        )
}
