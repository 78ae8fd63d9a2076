//! API-key gating middleware.
//!
//! When an API key is configured every request must carry it in the
//! `x-api-key` header; anything else is answered with `403 Forbidden`
//! before it reaches a handler or the static file service.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Reject requests whose `x-api-key` header does not match the configured key.
///
/// # Errors
///
/// Returns [`ApiError::Forbidden`] when a key is configured and the header
/// is missing, not valid ASCII, or different.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.api_key.as_deref() else {
        return Ok(next.run(request).await);
    };

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if provided == Some(expected) {
        Ok(next.run(request).await)
    } else {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            key_present = provided.is_some(),
            "rejected request without a valid API key"
        );
        Err(ApiError::Forbidden)
    }
}
