//! Identity provider webhooks
//!
//! User create/update events carry the provider's public-metadata bag. It is
//! validated into a [`RoleSet`] here, before anything else sees it.

use app_state::RoleSet;
use axum::{response::Json as ResponseJson, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::ApiError, state::AppState};

const USER_EVENTS: &[&str] = &["user.created", "user.updated"];

#[derive(Debug, Deserialize)]
pub struct IdentityEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: IdentityUser,
}

#[derive(Debug, Deserialize)]
pub struct IdentityUser {
    pub id: String,
    #[serde(default)]
    pub public_metadata: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
    pub user_id: String,
    pub roles: RoleSet,
}

/// POST /api/webhooks/identity
pub async fn identity_webhook(
    Json(event): Json<IdentityEvent>,
) -> Result<ResponseJson<IdentityResponse>, ApiError> {
    if !USER_EVENTS.contains(&event.event_type.as_str()) {
        return Err(ApiError::BadRequest(format!(
            "Unsupported event type: {}",
            event.event_type
        )));
    }

    let roles = RoleSet::from_public_metadata(&event.data.public_metadata)?;
    if roles.is_legacy() {
        tracing::info!(user_id = %event.data.id, "user carries legacy role metadata");
    }

    Ok(ResponseJson(IdentityResponse {
        user_id: event.data.id,
        roles,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/webhooks/identity", post(identity_webhook))
}
