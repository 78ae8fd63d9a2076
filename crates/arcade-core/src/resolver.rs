//! Round resolution: turns the escrowed bet and a drawn outcome into a
//! payout, credits it, and records the round.
//!
//! Resolution is split in two so that callers can validate before they
//! touch the session. [`settle`] is pure and may fail; [`apply`] cannot
//! fail and performs every write.

use arcade_types::{HistoryEntry, Session};

use crate::error::GameError;
use crate::history;
use crate::outcome::RoundOutcome;

/// The computed result of one round, not yet applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// Whether the round was won.
    pub outcome: RoundOutcome,
    /// Credits that were at risk.
    pub bet: u64,
    /// Credits paid out (zero on a loss).
    pub payout: u64,
    /// Balance after the payout.
    pub new_balance: u64,
}

/// Compute the result of resolving the session's pending bet.
///
/// A win pays `bet * payout_multiplier`; a loss pays nothing and the
/// escrowed bet stays gone.
///
/// # Errors
///
/// Returns [`GameError::CreditOverflow`] if the payout or the credited
/// balance does not fit in a `u64`.
pub fn settle(
    session: &Session,
    outcome: RoundOutcome,
    payout_multiplier: u64,
) -> Result<Settlement, GameError> {
    let bet = session.current_bet;
    let payout = match outcome {
        RoundOutcome::Win => bet
            .checked_mul(payout_multiplier)
            .ok_or(GameError::CreditOverflow)?,
        RoundOutcome::Loss => 0,
    };
    let new_balance = session
        .balance
        .checked_add(payout)
        .ok_or(GameError::CreditOverflow)?;

    Ok(Settlement {
        outcome,
        bet,
        payout,
        new_balance,
    })
}

/// Write a settlement into the session and append it to the history.
///
/// Clears the pending bet regardless of outcome.
pub fn apply(session: &mut Session, settlement: &Settlement) -> HistoryEntry {
    session.balance = settlement.new_balance;
    session.last_win = settlement.payout;
    session.current_bet = 0;
    history::record(
        &mut session.history,
        settlement.bet,
        settlement.payout,
        settlement.new_balance,
    )
}

/// [`settle`] then [`apply`].
///
/// # Errors
///
/// Same as [`settle`]; the session is untouched on error.
pub fn resolve_round(
    session: &mut Session,
    outcome: RoundOutcome,
    payout_multiplier: u64,
) -> Result<Settlement, GameError> {
    let settlement = settle(session, outcome, payout_multiplier)?;
    apply(session, &settlement);
    Ok(settlement)
}
