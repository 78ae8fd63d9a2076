//! Axum router construction for the Arcade API.
//!
//! Assembles all routes into a single [`Router`] with API-key gating,
//! static asset hosting, CORS, request tracing, and panic recovery.

use std::any::Any;
use std::sync::Arc;

use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the Arcade server.
///
/// The router includes:
/// - `GET /config` -- game presentation config
/// - `GET /api-docs` -- HTML endpoint reference
/// - `POST /api/sessions` -- start a session
/// - `GET /api/sessions/{id}` -- session state
/// - `POST /api/sessions/{id}/reset|bet|input|save|load` -- session actions
/// - `GET /static/*` -- files from the configured static directory
///
/// Layers, outermost first: panic recovery, request tracing, CORS, then
/// API-key gating in front of every route and the static files.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        // Configuration and docs
        .route("/config", get(handlers::get_config))
        .route("/api-docs", get(handlers::api_docs))
        // Session lifecycle
        .route("/api/sessions", post(handlers::start_session))
        .route("/api/sessions/{id}", get(handlers::get_state))
        .route("/api/sessions/{id}/reset", post(handlers::reset_session))
        .route("/api/sessions/{id}/save", post(handlers::save_session))
        .route("/api/sessions/{id}/load", post(handlers::load_session))
        // Game actions
        .route("/api/sessions/{id}/bet", post(handlers::place_bet))
        .route("/api/sessions/{id}/input", post(handlers::process_input))
        // Assets
        .nest_service("/static", static_files)
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth::require_api_key,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Turn a handler panic into a generic 500 without exposing its payload.
#[allow(clippy::needless_pass_by_value)] // signature fixed by `CatchPanicLayer::custom`
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    tracing::error!(panic = detail, "handler panicked");
    ApiError::Internal("handler panicked".to_owned()).into_response()
}
