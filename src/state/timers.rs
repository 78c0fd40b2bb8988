use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tokio::task::AbortHandle;

/// Grace window between marking a record completed and sweeping it out.
/// Toggling back within the window keeps the record.
pub const REMOVAL_DELAY: Duration = Duration::from_millis(800);

/// Pending completion sweeps, keyed by record identifier.
///
/// Completing a record schedules a one-shot sweep; any mutation of the same
/// record before the deadline must cancel it, so the abort handle is retained
/// here instead of fired and forgotten.
#[derive(Debug)]
pub struct RemovalTimers<K> {
    pending: HashMap<K, AbortHandle>,
}

impl<K: Eq + Hash> RemovalTimers<K> {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }

    /// Track a running sweep for `key`, aborting any earlier one for the same key.
    pub fn track(&mut self, key: K, handle: AbortHandle) {
        if let Some(old) = self.pending.insert(key, handle) {
            old.abort();
        }
    }

    /// Cancel the pending sweep for `key`, if any.
    pub fn cancel(&mut self, key: &K) {
        if let Some(handle) = self.pending.remove(key) {
            handle.abort();
        }
    }

    /// Drop the bookkeeping entry once a sweep has fired on its own.
    pub fn clear(&mut self, key: &K) {
        self.pending.remove(key);
    }
}

impl<K: Eq + Hash> Default for RemovalTimers<K> {
    fn default() -> Self {
        Self::new()
    }
}
