//! Bet placement.
//!
//! A bet is escrowed the moment it is placed: the amount leaves the
//! balance immediately and sits in `current_bet` until a round resolves.

use arcade_types::Session;
use tracing::warn;

use crate::error::GameError;

/// Escrow `amount` credits from the session balance.
///
/// A bet already pending is replaced and its escrow is forfeited, not
/// refunded. The forfeit is logged.
///
/// # Errors
///
/// Returns [`GameError::InsufficientBalance`] when `amount` exceeds the
/// balance. The session is untouched in that case.
pub fn place_bet(session: &mut Session, amount: u64) -> Result<(), GameError> {
    let remaining =
        session
            .balance
            .checked_sub(amount)
            .ok_or(GameError::InsufficientBalance {
                requested: amount,
                available: session.balance,
            })?;

    if session.has_pending_bet() {
        warn!(
            forfeited = session.current_bet,
            replacement = amount,
            "pending bet replaced before the round resolved"
        );
    }

    session.current_bet = amount;
    session.balance = remaining;
    Ok(())
}
