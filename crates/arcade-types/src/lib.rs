//! Shared type definitions for the Arcade game backend.
//!
//! This crate is the single source of truth for the data that crosses the
//! wire between the server and the browser game client. Types flow to
//! `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for session identifiers
//! - [`enums`] -- Player input enumerations
//! - [`structs`] -- Session, position, and round history

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::Direction;
pub use ids::SessionId;
pub use structs::{History, HistoryEntry, Position, Session};
