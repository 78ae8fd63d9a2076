//! Core game structs: the session, its position, and the round history.
//!
//! All structs serialize with camelCase keys, which is the shape the
//! browser game client reads (`currentBet`, `lastWin`, `playerPosition`,
//! `newBalance`). Credit amounts are whole credits held in `u64`, so a
//! negative balance cannot be represented at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Direction;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A 2D integer coordinate on the play field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Horizontal coordinate.
    #[ts(type = "number")]
    pub x: i64,
    /// Vertical coordinate.
    #[ts(type = "number")]
    pub y: i64,
}

impl Position {
    /// The origin, `(0, 0)`.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Return the position one step in `direction`.
    ///
    /// Saturates at the edges of the `i64` range instead of wrapping.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        Self {
            x: self.x.saturating_add(direction.dx()),
            y: self.y,
        }
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Immutable record of one resolved round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct HistoryEntry {
    /// Credits that were at risk in the round.
    #[ts(type = "number")]
    pub bet: u64,
    /// Credits paid out (zero on a loss).
    #[ts(type = "number")]
    pub win: u64,
    /// Balance immediately after the payout was applied.
    #[ts(type = "number")]
    pub new_balance: u64,
    /// When the round was recorded.
    pub timestamp: DateTime<Utc>,
}

/// Chronological, append-only sequence of [`HistoryEntry`] values.
///
/// Entries are never removed or edited once pushed. Serializes as a plain
/// JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct History(Vec<HistoryEntry>);

impl History {
    /// Create an empty history.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an entry at the end.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.0.push(entry);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.0
    }

    /// The most recently appended entry.
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.0.last()
    }

    /// Number of recorded rounds.
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no round has been recorded yet.
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The full mutable game state of one player.
///
/// `Session` owns all of its data, so `clone()` is a deep copy: a saved
/// snapshot shares nothing with the live session it was taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Session {
    /// Available credits.
    #[ts(type = "number")]
    pub balance: u64,
    /// Credits escrowed for the pending round (zero when none).
    #[ts(type = "number")]
    pub current_bet: u64,
    /// Payout of the most recently resolved round (zero on a loss).
    #[ts(type = "number")]
    pub last_win: u64,
    /// Every resolved round, oldest first.
    pub history: History,
    /// Progression score.
    #[ts(type = "number")]
    pub score: u64,
    /// Progression level.
    pub level: u32,
    /// Current player coordinate.
    pub player_position: Position,
}

impl Session {
    /// Create a fresh session with the given starting balance and level.
    ///
    /// Everything else starts at zero, empty, or the origin.
    pub const fn new(balance: u64, level: u32) -> Self {
        Self {
            balance,
            current_bet: 0,
            last_win: 0,
            history: History::new(),
            score: 0,
            level,
            player_position: Position::ORIGIN,
        }
    }

    /// Whether a bet is escrowed and waiting for a round to resolve.
    pub const fn has_pending_bet(&self) -> bool {
        self.current_bet > 0
    }
}
