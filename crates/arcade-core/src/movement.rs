//! Player position tracking.

use arcade_types::{Direction, Session};

/// Move the player one step in `direction`.
///
/// `None` stands for any input that did not name a known direction; it is
/// ignored rather than rejected so the round still resolves.
pub const fn process_movement(session: &mut Session, direction: Option<Direction>) {
    if let Some(direction) = direction {
        session.player_position = session.player_position.step(direction);
    }
}
