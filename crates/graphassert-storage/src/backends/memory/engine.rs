//! In-memory engine implementation.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::thread::{self, ThreadId};

use tracing::debug;

use super::transaction::MemoryTransaction;
use crate::engine::{StorageEngine, StorageError, StorageResult};

/// A single ordered table.
pub(super) type Table = BTreeMap<Vec<u8>, Vec<u8>>;

/// The table directory. Tables are shared until a writer modifies them.
pub(super) type Tables = BTreeMap<String, Arc<Table>>;

/// An in-memory storage engine with snapshot reads and serialized writes.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    /// The most recently committed state.
    committed: RwLock<Tables>,

    /// Held by the open write transaction, if any.
    writer: Mutex<()>,

    /// Thread holding `writer`. Another write from that thread would block
    /// on itself.
    owner: Mutex<Option<ThreadId>>,

    /// Number of write transactions committed so far.
    commits: AtomicU64,
}

impl MemoryEngine {
    /// Create an empty engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of write transactions committed so far.
    #[must_use]
    pub fn commit_count(&self) -> u64 {
        self.commits.load(Ordering::Relaxed)
    }

    /// Copy the committed table directory.
    fn snapshot(&self) -> StorageResult<Tables> {
        self.committed
            .read()
            .map(|tables| tables.clone())
            .map_err(|e| StorageError::lock_poisoned(format!("committed state: {e}")))
    }

    fn owner(&self) -> MutexGuard<'_, Option<ThreadId>> {
        self.owner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Forget the writing thread. Called when its transaction ends.
    pub(super) fn release_writer(&self) {
        *self.owner() = None;
    }

    /// Make `tables` the committed state.
    pub(super) fn publish(&self, tables: Tables) -> StorageResult<()> {
        let mut committed = self
            .committed
            .write()
            .map_err(|e| StorageError::lock_poisoned(format!("committed state: {e}")))?;
        *committed = tables;
        let seq = self.commits.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(commit = seq, tables = committed.len(), "memory engine commit");
        Ok(())
    }
}

impl StorageEngine for MemoryEngine {
    type Transaction<'a> = MemoryTransaction<'a>;

    fn begin_read(&self) -> Result<Self::Transaction<'_>, StorageError> {
        Ok(MemoryTransaction::read(self.snapshot()?))
    }

    fn begin_write(&self) -> Result<Self::Transaction<'_>, StorageError> {
        let current = thread::current().id();
        if *self.owner() == Some(current) {
            return Err(StorageError::Transaction(
                "a write transaction is already open on this thread".to_owned(),
            ));
        }
        let guard = self.writer.lock().map_err(|e| {
            StorageError::Transaction(format!("failed to acquire writer lock: {e}"))
        })?;
        // Snapshot after taking the lock so the writer sees every earlier commit.
        let tables = self.snapshot()?;
        *self.owner() = Some(current);
        Ok(MemoryTransaction::write(self, guard, tables))
    }
}
