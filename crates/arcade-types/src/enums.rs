//! Enumeration types for the Arcade game backend.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A directional move submitted by the player.
///
/// Only horizontal movement is defined. Input strings that do not name a
/// known direction are not an error: [`Direction::parse`] returns `None`
/// and the move is skipped while the round still resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Direction {
    /// Step one cell towards negative `x`.
    Left,
    /// Step one cell towards positive `x`.
    Right,
}

impl Direction {
    /// Parse a raw client input value. Matching is exact and case-sensitive.
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    /// Horizontal delta applied to the player position.
    pub const fn dx(self) -> i64 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}
