//! Session state machine and wager resolution for the Arcade backend.
//!
//! This crate owns every rule of the game: balance bookkeeping, bet
//! validation, the coin-flip payout, round history, and player movement.
//! It has no knowledge of HTTP; the server crate drives it through
//! [`Arcade`].
//!
//! # Modules
//!
//! - [`arcade`] -- [`Arcade`]: session lifecycle (start, reset, save,
//!   load) and the per-session actions.
//! - [`store`] -- Keyed storage of live sessions and saved snapshots.
//! - [`wager`] -- Bet validation and escrow.
//! - [`movement`] -- Directional input applied to the player position.
//! - [`resolver`] -- Round settlement and payout.
//! - [`history`] -- Append-only round history.
//! - [`outcome`] -- [`OutcomeSource`] trait with random and scripted
//!   implementations.
//! - [`config`] -- Configuration loading from `arcade-config.yaml`.
//!
//! # Round lifecycle
//!
//! ```text
//! place_bet ──> balance -= bet, current_bet = bet
//! process_input ──> draw outcome ──> settle ──> move ──> apply
//!                                                         ├──> current_bet = 0
//!                                                         └──> history += 1
//! ```
//!
//! [`OutcomeSource`]: outcome::OutcomeSource

pub mod arcade;
pub mod config;
pub mod error;
pub mod history;
pub mod movement;
pub mod outcome;
pub mod resolver;
pub mod store;
pub mod wager;

pub use arcade::Arcade;
pub use config::{ArcadeConfig, ConfigError, RulesConfig, ServerSection};
pub use error::GameError;
pub use outcome::{OutcomeSource, RandomOutcomeSource, RoundOutcome, ScriptedOutcomeSource};
pub use resolver::Settlement;
