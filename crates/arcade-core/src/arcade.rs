//! The game service: session lifecycle plus the per-session actions.
//!
//! [`Arcade`] owns the [`SessionStore`], the rules, and the outcome source.
//! Every action takes the [`SessionId`] it applies to, so two players
//! never observe each other's state. Actions are synchronous and run to
//! completion; callers that share an `Arcade` across tasks serialize
//! access with a lock.

use arcade_types::{Direction, Session, SessionId};
use tracing::{debug, info};

use crate::config::RulesConfig;
use crate::error::GameError;
use crate::movement;
use crate::outcome::OutcomeSource;
use crate::resolver::{self, Settlement};
use crate::store::SessionStore;

/// Session lifecycle and game actions over a keyed store.
#[derive(Debug)]
pub struct Arcade {
    rules: RulesConfig,
    store: SessionStore,
    outcomes: Box<dyn OutcomeSource>,
}

impl Arcade {
    /// Create an empty arcade with the given rules and outcome source.
    pub fn new(rules: RulesConfig, outcomes: Box<dyn OutcomeSource>) -> Self {
        Self {
            store: SessionStore::new(rules.max_sessions),
            rules,
            outcomes,
        }
    }

    /// The rules fresh sessions are built from.
    pub const fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Number of sessions currently held.
    pub fn session_count(&self) -> usize {
        self.store.len()
    }

    /// Start a new session with default values and return its ID.
    pub fn start(&mut self) -> (SessionId, &Session) {
        let (id, session) = self.store.create(self.rules.fresh_session());
        info!(session_id = %id, balance = session.balance, "session started");
        (id, session)
    }

    /// Reinitialize a session to default values. The saved game is kept.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionNotFound`] for an unknown ID.
    pub fn reset(&mut self, id: SessionId) -> Result<&Session, GameError> {
        let session = self.store.replace(id, self.rules.fresh_session())?;
        info!(session_id = %id, "session reset");
        Ok(session)
    }

    /// Escrow a bet of `amount` credits.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionNotFound`] for an unknown ID, or
    /// [`GameError::InsufficientBalance`] if `amount` exceeds the balance.
    pub fn place_bet(&mut self, id: SessionId, amount: u64) -> Result<&Session, GameError> {
        let session = self.store.get_mut(id)?;
        crate::wager::place_bet(session, amount)?;
        debug!(session_id = %id, amount, balance = session.balance, "bet placed");
        Ok(&*session)
    }

    /// Apply a move and resolve one round against the pending bet.
    ///
    /// The move and the payout are committed together: if settling fails
    /// neither is applied.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionNotFound`] for an unknown ID, or
    /// [`GameError::CreditOverflow`] if the payout cannot be credited.
    pub fn process_input(
        &mut self,
        id: SessionId,
        direction: Option<Direction>,
    ) -> Result<(&Session, Settlement), GameError> {
        let session = self.store.get_mut(id)?;
        let outcome = self.outcomes.draw();
        let settlement = resolver::settle(session, outcome, self.rules.payout_multiplier)?;

        movement::process_movement(session, direction);
        resolver::apply(session, &settlement);

        debug!(
            session_id = %id,
            ?direction,
            ?outcome,
            bet = settlement.bet,
            payout = settlement.payout,
            balance = settlement.new_balance,
            "round resolved"
        );
        Ok((&*session, settlement))
    }

    /// Read-only view of a session.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionNotFound`] for an unknown ID.
    pub fn state(&self, id: SessionId) -> Result<&Session, GameError> {
        self.store.get(id)
    }

    /// Snapshot the live session, replacing any earlier save.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionNotFound`] for an unknown ID.
    pub fn save(&mut self, id: SessionId) -> Result<(), GameError> {
        self.store.save(id)?;
        info!(session_id = %id, "session saved");
        Ok(())
    }

    /// Restore the live session from its saved snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionNotFound`] for an unknown ID, or
    /// [`GameError::NothingSaved`] if the session was never saved. The
    /// live session is unchanged on error.
    pub fn load(&mut self, id: SessionId) -> Result<&Session, GameError> {
        let snapshot = self
            .store
            .saved(id)?
            .cloned()
            .ok_or(GameError::NothingSaved(id))?;
        let session = self.store.replace(id, snapshot)?;
        info!(session_id = %id, "session loaded");
        Ok(session)
    }
}
