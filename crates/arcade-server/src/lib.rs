//! HTTP API server for the Arcade game backend.
//!
//! This crate exposes the game engine from `arcade-core` over Axum:
//!
//! - **Session endpoints** under `/api/sessions` for start, state, reset,
//!   bet, input, save, and load
//! - **`GET /config`** passing the game presentation document through
//!   unmodified
//! - **`GET /api-docs`** HTML endpoint reference
//! - **`/static`** asset hosting for the browser game
//!
//! # Architecture
//!
//! Handlers share one [`AppState`] holding the engine behind a
//! [`tokio::sync::RwLock`]. Each action holds the lock for exactly one
//! engine call, so actions on the same session never interleave. Sessions
//! are keyed by ID, so players never see each other's state.
//!
//! Every route sits behind the `x-api-key` check when a key is
//! configured.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{start_server, ServerError};
pub use state::{AppState, StateError};
