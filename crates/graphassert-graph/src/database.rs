//! The graph database handle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use graphassert_core::{IndexDefinition, IndexState};
use graphassert_storage::backends::MemoryEngine;
use graphassert_storage::StorageEngine;
use tracing::debug;

use crate::config::DatabaseConfig;
use crate::index::{spawn_populator, IndexRegistry};
use crate::store::{GraphResult, IdGenerator};
use crate::transaction::GraphTransaction;

/// An embedded graph database over a storage engine.
///
/// The database hands out [`GraphTransaction`]s, which borrow it. Index
/// builds run on background threads that share the engine, so the engine
/// type must be `'static`.
///
/// # Example
///
/// ```
/// use graphassert_graph::GraphDatabase;
///
/// let db = GraphDatabase::in_memory();
///
/// let mut tx = db.begin_tx().unwrap();
/// let node = tx.create_node().unwrap().with_label("Person");
/// tx.put_node(&node).unwrap();
/// tx.success();
/// tx.close().unwrap();
///
/// let tx = db.begin_tx().unwrap();
/// assert!(tx.get_node(node.id).unwrap().has_label(&"Person".into()));
/// ```
pub struct GraphDatabase<E: StorageEngine + 'static> {
    engine: Arc<E>,
    ids: IdGenerator,
    indexes: Arc<IndexRegistry>,
    stats: StatsCounters,
    next_tx_id: AtomicU64,
    config: DatabaseConfig,
}

impl GraphDatabase<MemoryEngine> {
    /// Create an empty database backed by a [`MemoryEngine`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryEngine::new())
    }

    /// Create an empty in-memory database with the given configuration.
    #[must_use]
    pub fn in_memory_with_config(config: DatabaseConfig) -> Self {
        Self::with_config(MemoryEngine::new(), config)
    }
}

impl<E: StorageEngine + 'static> GraphDatabase<E> {
    /// Create a database over `engine` with the default configuration.
    ///
    /// The engine is assumed to be empty.
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, DatabaseConfig::default())
    }

    /// Create a database over `engine`.
    pub fn with_config(engine: E, config: DatabaseConfig) -> Self {
        Self {
            engine: Arc::new(engine),
            ids: IdGenerator::new(),
            indexes: Arc::new(IndexRegistry::new()),
            stats: StatsCounters::default(),
            next_tx_id: AtomicU64::new(1),
            config,
        }
    }

    /// Begin a transaction.
    ///
    /// The transaction reads from a snapshot taken now and becomes a write
    /// transaction on its first write. It must be closed with
    /// [`GraphTransaction::close`] to commit; dropping it rolls back.
    pub fn begin_tx(&self) -> GraphResult<GraphTransaction<'_, E>> {
        let storage = self.engine.as_ref().begin_read()?;
        let tx_id = self.next_tx_id.fetch_add(1, Ordering::Relaxed);
        self.stats.begun.fetch_add(1, Ordering::Relaxed);
        debug!(tx_id, "transaction begun");
        Ok(GraphTransaction::new(self, tx_id, storage))
    }

    /// Block until `index` finishes building or `timeout` passes.
    ///
    /// Returns the state observed last, which is still
    /// [`IndexState::Populating`] if the timeout passed first. An index that
    /// was never committed is reported as populating until the timeout.
    pub fn await_index_online(
        &self,
        index: &IndexDefinition,
        timeout: Duration,
    ) -> GraphResult<IndexState> {
        let state = self.indexes.wait_while_populating(index.id, timeout)?;
        Ok(state.unwrap_or(IndexState::Populating))
    }

    /// Snapshot of the transaction counters.
    #[must_use]
    pub fn stats(&self) -> TransactionStats {
        TransactionStats {
            begun: self.stats.begun.load(Ordering::Relaxed),
            committed: self.stats.committed.load(Ordering::Relaxed),
            rolled_back: self.stats.rolled_back.load(Ordering::Relaxed),
        }
    }

    /// The configuration this database was created with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    pub(crate) fn engine(&self) -> &E {
        self.engine.as_ref()
    }

    pub(crate) const fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    pub(crate) fn index_registry(&self) -> &IndexRegistry {
        &self.indexes
    }

    pub(crate) fn record_close(&self, committed: bool) {
        let counter = if committed { &self.stats.committed } else { &self.stats.rolled_back };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Start building indexes whose definitions were just committed.
    pub(crate) fn start_population(&self, indexes: Vec<IndexDefinition>) -> GraphResult<()> {
        for index in indexes {
            spawn_populator(
                Arc::clone(&self.engine),
                Arc::clone(&self.indexes),
                index,
                self.config.population_delay,
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct StatsCounters {
    begun: AtomicU64,
    committed: AtomicU64,
    rolled_back: AtomicU64,
}

/// Transaction counters of a [`GraphDatabase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransactionStats {
    /// Transactions begun.
    pub begun: u64,
    /// Transactions closed with a commit.
    pub committed: u64,
    /// Transactions closed with a rollback, explicitly or by drop.
    pub rolled_back: u64,
}

impl TransactionStats {
    /// Transactions closed either way.
    #[must_use]
    pub const fn closed(&self) -> u64 {
        self.committed + self.rolled_back
    }

    /// Transactions begun but not yet closed.
    #[must_use]
    pub const fn open(&self) -> u64 {
        self.begun.saturating_sub(self.closed())
    }
}
