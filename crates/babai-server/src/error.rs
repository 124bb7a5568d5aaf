//! Error types for the game API layer.
//!
//! [`ApiError`] unifies handler failure modes into a single enum that
//! converts into an Axum HTTP response. Note that economy outcomes
//! (insufficient balance, already owned) are *not* errors here: those
//! are normal gameplay results returned as structured 200 responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use babai_state::StateError;
use babai_store::StoreError;

/// Errors that can occur in the game API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request payload was invalid.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The operation does not apply in the current game state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Persisting the save blob failed.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StateError> for ApiError {
    fn from(e: StateError) -> Self {
        match e {
            StateError::UnknownQuest(_) | StateError::UnknownFriend(_) => {
                Self::NotFound(e.to_string())
            }
            StateError::QuestNotReady { .. }
            | StateError::QuestAlreadyClaimed(_)
            | StateError::FriendExists(_)
            | StateError::OwnName
            | StateError::EmptyGroup => Self::Conflict(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Self::Storage(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
