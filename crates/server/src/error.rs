//! Handler errors and their HTTP mapping

use app_state::RoleError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors returned by route handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request input
    #[error("{0}")]
    BadRequest(String),

    /// Identity metadata failed validation
    #[error(transparent)]
    Roles(#[from] RoleError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Roles(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(%status, error = %self, "request rejected");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
