//! Keyed storage for live sessions and their saved snapshots.
//!
//! Each [`SessionId`] owns exactly one live [`Session`] and at most one
//! saved snapshot. Snapshots are owned clones, so nothing the live
//! session does afterwards can reach the saved copy.
//!
//! The store holds at most `max_sessions` slots. Creating one more evicts
//! the oldest; `SessionId` is UUID v7, so key order is creation order.

use std::collections::BTreeMap;

use arcade_types::{Session, SessionId};
use tracing::info;

use crate::error::GameError;

#[derive(Debug, Clone)]
struct SessionSlot {
    live: Session,
    saved: Option<Session>,
}

/// All sessions known to the process.
#[derive(Debug)]
pub struct SessionStore {
    slots: BTreeMap<SessionId, SessionSlot>,
    max_sessions: usize,
}

impl SessionStore {
    /// Create an empty store holding at most `max_sessions` sessions
    /// (never fewer than one).
    pub fn new(max_sessions: usize) -> Self {
        Self {
            slots: BTreeMap::new(),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Register `session` under a freshly generated ID, evicting the oldest
    /// sessions first if the store is full.
    pub fn create(&mut self, session: Session) -> (SessionId, &Session) {
        while self.slots.len() >= self.max_sessions {
            let Some((evicted, _)) = self.slots.pop_first() else {
                break;
            };
            info!(session_id = %evicted, "session evicted, store at capacity");
        }

        let id = SessionId::new();
        let slot = self.slots.entry(id).or_insert(SessionSlot {
            live: session,
            saved: None,
        });
        (id, &slot.live)
    }

    /// The live session for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionNotFound`] for an unknown ID.
    pub fn get(&self, id: SessionId) -> Result<&Session, GameError> {
        self.slots
            .get(&id)
            .map(|slot| &slot.live)
            .ok_or(GameError::SessionNotFound(id))
    }

    /// Mutable access to the live session for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionNotFound`] for an unknown ID.
    pub fn get_mut(&mut self, id: SessionId) -> Result<&mut Session, GameError> {
        self.slots
            .get_mut(&id)
            .map(|slot| &mut slot.live)
            .ok_or(GameError::SessionNotFound(id))
    }

    /// Overwrite the live session wholesale. The saved snapshot is kept.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionNotFound`] for an unknown ID.
    pub fn replace(&mut self, id: SessionId, session: Session) -> Result<&Session, GameError> {
        let live = self.get_mut(id)?;
        *live = session;
        Ok(&*live)
    }

    /// Copy the live session into the saved slot, replacing any earlier save.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionNotFound`] for an unknown ID.
    pub fn save(&mut self, id: SessionId) -> Result<(), GameError> {
        let slot = self
            .slots
            .get_mut(&id)
            .ok_or(GameError::SessionNotFound(id))?;
        slot.saved = Some(slot.live.clone());
        Ok(())
    }

    /// The saved snapshot for `id`, if one was ever taken.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionNotFound`] for an unknown ID.
    pub fn saved(&self, id: SessionId) -> Result<Option<&Session>, GameError> {
        self.slots
            .get(&id)
            .map(|slot| slot.saved.as_ref())
            .ok_or(GameError::SessionNotFound(id))
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: SessionId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Number of registered sessions.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no session is registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
