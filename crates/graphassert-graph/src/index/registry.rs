//! Live build state of property indexes.

use std::collections::HashMap;
use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::Duration;

use graphassert_core::{IndexId, IndexState};

use crate::store::{GraphError, GraphResult};

/// Shared, non-transactional record of index build states.
///
/// Populator threads publish state changes here and every change wakes all
/// waiters. A transaction reading from the registry sees the current state,
/// not the state as of its snapshot.
#[derive(Debug, Default)]
pub struct IndexRegistry {
    states: Mutex<HashMap<IndexId, IndexState>>,
    changed: Condvar,
}

impl IndexRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> GraphResult<MutexGuard<'_, HashMap<IndexId, IndexState>>> {
        self.states
            .lock()
            .map_err(|e| GraphError::Internal(format!("index registry lock poisoned: {e}")))
    }

    /// Current state of an index, or `None` if no build was ever started.
    pub fn state(&self, id: IndexId) -> GraphResult<Option<IndexState>> {
        Ok(self.lock()?.get(&id).cloned())
    }

    /// Record a new state and wake every waiter.
    pub fn set(&self, id: IndexId, state: IndexState) -> GraphResult<()> {
        self.lock()?.insert(id, state);
        self.changed.notify_all();
        Ok(())
    }

    /// Block until the index leaves the populating state or `timeout` passes.
    ///
    /// An index with no recorded state counts as populating. Returns the
    /// state observed last.
    pub fn wait_while_populating(
        &self,
        id: IndexId,
        timeout: Duration,
    ) -> GraphResult<Option<IndexState>> {
        let guard = self.lock()?;
        let (guard, _) = self
            .changed
            .wait_timeout_while(guard, timeout, |states| {
                matches!(states.get(&id), None | Some(IndexState::Populating))
            })
            .map_err(|e| GraphError::Internal(format!("index registry wait failed: {e}")))?;
        Ok(guard.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    use super::*;

    #[test]
    fn wait_returns_after_timeout() {
        let registry = IndexRegistry::new();
        registry.set(IndexId::new(1), IndexState::Populating).expect("set");

        let start = Instant::now();
        let state = registry
            .wait_while_populating(IndexId::new(1), Duration::from_millis(20))
            .expect("wait");
        assert_eq!(state, Some(IndexState::Populating));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn wait_wakes_on_change() {
        let registry = Arc::new(IndexRegistry::new());
        registry.set(IndexId::new(1), IndexState::Populating).expect("set");

        let publisher = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(10));
                registry.set(IndexId::new(1), IndexState::Online).expect("set");
            })
        };

        let state = registry
            .wait_while_populating(IndexId::new(1), Duration::from_secs(10))
            .expect("wait");
        assert_eq!(state, Some(IndexState::Online));
        publisher.join().expect("publisher panicked");
    }
}
