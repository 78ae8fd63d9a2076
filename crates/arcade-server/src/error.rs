//! Error types for the Arcade HTTP layer.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Every
//! error body has the shape `{"error": <message>, "status": <code>}`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use arcade_core::GameError;

/// Message returned for faults whose details must not leak to clients.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Errors that can occur in the Arcade API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A game rule rejected the action.
    #[error(transparent)]
    Game(#[from] GameError),

    /// The request body could not be extracted as JSON.
    #[error("invalid request body: {0}")]
    Body(#[from] JsonRejection),

    /// The request body was JSON but not of the expected shape.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A session ID could not be parsed from the request path.
    #[error("invalid session id: {0}")]
    InvalidSessionId(String),

    /// The `x-api-key` header was missing or wrong.
    #[error("forbidden")]
    Forbidden,

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Game(GameError::InsufficientBalance { .. }) => {
                (StatusCode::BAD_REQUEST, "Insufficient balance".to_owned())
            }
            Self::Game(e @ GameError::SessionNotFound(_)) => (StatusCode::NOT_FOUND, e.to_string()),
            Self::Game(e @ GameError::NothingSaved(_)) => (StatusCode::CONFLICT, e.to_string()),
            Self::Game(GameError::CreditOverflow) | Self::Internal(_) => {
                tracing::error!(error = %self, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_owned(),
                )
            }
            Self::Body(rejection) => (rejection.status(), rejection.body_text()),
            Self::InvalidInput(msg) | Self::InvalidSessionId(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            Self::Forbidden => (StatusCode::FORBIDDEN, "Forbidden".to_owned()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
