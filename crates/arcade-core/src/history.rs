//! Round history ledger.
//!
//! Append-only: the resolver hands each settled round to [`record`], which
//! stamps it with the current time and pushes it onto the session's
//! [`History`]. Entries are never modified or removed.

use chrono::Utc;

use arcade_types::{History, HistoryEntry};

/// Append one resolved round and return the stored entry.
pub fn record(history: &mut History, bet: u64, win: u64, new_balance: u64) -> HistoryEntry {
    let entry = HistoryEntry {
        bet,
        win,
        new_balance,
        timestamp: Utc::now(),
    };
    history.push(entry.clone());
    entry
}
