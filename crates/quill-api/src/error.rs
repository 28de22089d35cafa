//! API error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use quill_blog::BlogError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The route requires a logged-in caller.
    #[error("login required")]
    Unauthorized,

    /// The post id in the path is not a valid identifier.
    #[error("invalid post id")]
    InvalidPostId,

    /// Blog core error.
    #[error(transparent)]
    Blog(#[from] BlogError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, errors) = match &self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                vec!["You must be logged in to do that".to_string()],
            ),
            ApiError::InvalidPostId => (
                StatusCode::NOT_FOUND,
                vec!["Post not found".to_string()],
            ),
            ApiError::Blog(err) => {
                if let BlogError::Storage(detail) | BlogError::Crypto(detail) = err {
                    tracing::error!(error = %detail, "blog core fault");
                }
                let status = StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, err.user_messages())
            }
        };

        (status, Json(ErrorResponse { errors })).into_response()
    }
}

/// Error response body.
///
/// Always a list: validation surfaces every accumulated message
/// together, other errors carry a single entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// User-facing error messages.
    pub errors: Vec<String>,
}
