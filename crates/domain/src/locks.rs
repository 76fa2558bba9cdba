//! Per-match serialization of roster mutations.
//!
//! Every check-then-act sequence on a match's roster (capacity checks,
//! duplicate checks, state transitions) runs while holding that match's lock,
//! so two concurrent approvals cannot both observe a free slot.
//!
//! The registry lives in process memory: it serializes requests handled by
//! one service instance only. Running several API replicas against the same
//! database is not supported.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

type Entries = Arc<Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>>;

/// Registry of one async mutex per match id.
///
/// An entry exists only while some task holds or waits for that match's lock.
/// Assumes a single service instance per database.
#[derive(Debug, Default)]
pub struct MatchLocks {
    entries: Entries,
}

/// Exclusive access to one match's roster. Releasing it drops the registry
/// entry once no other task is waiting on the same match.
#[derive(Debug)]
pub struct MatchGuard {
    guard: Option<OwnedMutexGuard<()>>,
    entries: Entries,
    match_id: Uuid,
}

impl MatchLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `match_id`'s roster.
    pub async fn lock(&self, match_id: Uuid) -> MatchGuard {
        let entry = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(entries.entry(match_id).or_default())
        };
        let guard = entry.lock_owned().await;

        MatchGuard {
            guard: Some(guard),
            entries: Arc::clone(&self.entries),
            match_id,
        }
    }

    /// Number of matches with a registered lock.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for MatchGuard {
    fn drop(&mut self) {
        // The map stays locked while the mutex is released, so no new waiter
        // can clone the entry between the release and the count check.
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        drop(self.guard.take());

        let idle = entries
            .get(&self.match_id)
            .is_some_and(|entry| Arc::strong_count(entry) == 1);
        if idle {
            entries.remove(&self.match_id);
        }
    }
}
