//! Error types for the arcade-core crate.
//!
//! Every core operation validates before it mutates, so an `Err` from any
//! of them means the session was left exactly as it was.

use arcade_types::SessionId;

/// Errors that can occur during session operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The bet is larger than the credits available.
    #[error("insufficient balance: bet of {requested} exceeds balance of {available}")]
    InsufficientBalance {
        /// The amount the caller tried to bet.
        requested: u64,
        /// The balance at the time of the attempt.
        available: u64,
    },

    /// No session is registered under the given ID.
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    /// Load was requested for a session that has never been saved.
    #[error("session {0} has no saved game")]
    NothingSaved(SessionId),

    /// Crediting a payout would exceed the representable balance.
    #[error("credit overflow while settling a round")]
    CreditOverflow,
}
