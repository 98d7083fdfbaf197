//! Graph transactions.

use graphassert_core::{
    ConstraintDefinition, IndexDefinition, IndexState, Label, Node, NodeId, Value,
};
use graphassert_storage::{StorageEngine, Transaction};
use tracing::{debug, warn};

use crate::database::GraphDatabase;
use crate::index::PropertyIndex;
use crate::store::{GraphError, GraphResult, NodeStore, Rows, SchemaStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Undecided,
    Success,
    Failure,
}

/// A transaction against a [`GraphDatabase`].
///
/// A transaction starts as a read transaction over a snapshot of the
/// committed state. The first write upgrades it to a write transaction,
/// which waits for any other writer to finish and refreshes the snapshot.
///
/// # Commit and Rollback
///
/// Mark the transaction with [`success`](Self::success) and then
/// [`close`](Self::close) it to commit. Closing an unmarked transaction, or
/// one marked with [`failure`](Self::failure), rolls it back. Dropping a
/// transaction without closing it rolls it back.
///
/// # Lazy Results
///
/// Queries return [`Rows`] that borrow the transaction. They must be
/// consumed before the transaction is closed:
///
/// ```compile_fail
/// use graphassert_graph::GraphDatabase;
///
/// let db = GraphDatabase::in_memory();
/// let tx = db.begin_tx().unwrap();
/// let rows = tx.find_nodes_by_label(&"Person".into()).unwrap();
/// tx.close().unwrap();
/// let _ = rows.count();
/// ```
pub struct GraphTransaction<'db, E: StorageEngine + 'static> {
    db: &'db GraphDatabase<E>,
    tx_id: u64,
    storage: Option<E::Transaction<'db>>,
    writable: bool,
    outcome: Outcome,
    pending_indexes: Vec<IndexDefinition>,
}

impl<'db, E: StorageEngine + 'static> GraphTransaction<'db, E> {
    pub(crate) fn new(
        db: &'db GraphDatabase<E>,
        tx_id: u64,
        storage: E::Transaction<'db>,
    ) -> Self {
        Self {
            db,
            tx_id,
            storage: Some(storage),
            writable: false,
            outcome: Outcome::Undecided,
            pending_indexes: Vec::new(),
        }
    }

    /// Transaction ID, unique within the database.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.tx_id
    }

    /// Returns `true` once the transaction has written.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.writable
    }

    /// Mark the transaction to commit on close.
    ///
    /// Has no effect once [`failure`](Self::failure) has been called.
    pub fn success(&mut self) {
        if self.outcome != Outcome::Failure {
            self.outcome = Outcome::Success;
        }
    }

    /// Mark the transaction to roll back on close, whatever else happens.
    pub fn failure(&mut self) {
        self.outcome = Outcome::Failure;
    }

    /// Close the transaction: commit if marked successful, otherwise roll back.
    ///
    /// Indexes created by a committed transaction start building in the
    /// background before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit or rollback fails. The transaction is
    /// released either way.
    pub fn close(mut self) -> GraphResult<()> {
        let commit = self.outcome == Outcome::Success;
        let pending = std::mem::take(&mut self.pending_indexes);
        self.finish(commit)?;
        if commit && !pending.is_empty() {
            self.db.start_population(pending)?;
        }
        Ok(())
    }

    fn finish(&mut self, commit: bool) -> GraphResult<()> {
        let Some(storage) = self.storage.take() else {
            return Ok(());
        };
        let result = if commit { storage.commit() } else { storage.rollback() };
        let committed = commit && result.is_ok();
        self.db.record_close(committed);
        debug!(tx_id = self.tx_id, committed, "transaction closed");
        result.map_err(GraphError::from)
    }

    fn storage(&self) -> GraphResult<&E::Transaction<'db>> {
        self.storage.as_ref().ok_or_else(closed)
    }

    /// Writable storage, upgrading from the read snapshot on first use.
    fn storage_mut(&mut self) -> GraphResult<&mut E::Transaction<'db>> {
        if !self.writable {
            let db = self.db;
            let write = db.engine().begin_write()?;
            if let Some(read) = self.storage.replace(write) {
                read.rollback()?;
            }
            self.writable = true;
            debug!(tx_id = self.tx_id, "transaction upgraded to write");
        }
        self.storage.as_mut().ok_or_else(closed)
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    /// Create and store a new node with no labels or properties.
    pub fn create_node(&mut self) -> GraphResult<Node> {
        let node = Node::new(self.db.ids().next_node_id());
        self.put_node(&node)?;
        Ok(node)
    }

    /// Store a node, replacing any previous version with the same ID.
    ///
    /// Label and property indexes are updated to match.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ConstraintViolation`] if another node already
    /// holds a value this node must hold uniquely.
    pub fn put_node(&mut self, node: &Node) -> GraphResult<()> {
        let tx = self.storage_mut()?;
        check_uniqueness(&*tx, node)?;
        let indexes = SchemaStore::all_indexes(&*tx)?;
        let old = NodeStore::put(tx, node)?;
        PropertyIndex::update(tx, &indexes, old.as_ref(), Some(node))
    }

    /// Get a node by ID.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if the node doesn't exist.
    pub fn get_node(&self, id: NodeId) -> GraphResult<Node> {
        NodeStore::get_or_error(self.storage()?, id)
    }

    /// Delete a node. Returns `false` if it didn't exist.
    pub fn delete_node(&mut self, id: NodeId) -> GraphResult<bool> {
        let tx = self.storage_mut()?;
        let indexes = SchemaStore::all_indexes(&*tx)?;
        let Some(old) = NodeStore::delete(tx, id)? else {
            return Ok(false);
        };
        PropertyIndex::update(tx, &indexes, Some(&old), None)?;
        Ok(true)
    }

    /// Lazily find every node carrying `label`.
    pub fn find_nodes_by_label(&self, label: &Label) -> GraphResult<Rows<'_, NodeId>> {
        NodeStore::find_by_label(self.storage()?, label)
    }

    /// Lazily find the nodes carrying `label` whose property `key` equals
    /// `value`.
    ///
    /// Uses an online index on `label` and `key` when there is one, and
    /// scans the label otherwise.
    pub fn find_nodes_by_label_and_property(
        &self,
        label: &Label,
        key: &str,
        value: &Value,
    ) -> GraphResult<Rows<'_, NodeId>> {
        let tx = self.storage()?;
        for index in SchemaStore::indexes_for_label(tx, label)? {
            let index = index?;
            if index.covers(label, key) && self.index_state(&index)?.is_online() {
                return PropertyIndex::lookup(tx, index.id, value);
            }
        }
        NodeStore::find_by_label_and_property(tx, label, key, value)
    }

    /// Lazily find the nodes whose property indexed by `index` equals `value`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::IndexNotOnline`] unless the index has finished
    /// building.
    pub fn find_nodes_by_index(
        &self,
        index: &IndexDefinition,
        value: &Value,
    ) -> GraphResult<Rows<'_, NodeId>> {
        let state = self.index_state(index)?;
        if !state.is_online() {
            return Err(GraphError::IndexNotOnline { index: index.clone(), state });
        }
        PropertyIndex::lookup(self.storage()?, index.id, value)
    }

    /// The property keys of a node, in ascending order.
    pub fn property_keys(&self, id: NodeId) -> GraphResult<Rows<'_, String>> {
        let node = self.get_node(id)?;
        let mut keys: Vec<String> = node.property_keys().map(str::to_owned).collect();
        keys.sort_unstable();
        Ok(Rows::from_vec(keys))
    }

    // ========================================================================
    // Schema
    // ========================================================================

    /// Define an index on `property` of nodes carrying `label`.
    ///
    /// The index starts building once this transaction commits; until the
    /// build finishes its state is [`IndexState::Populating`].
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::IndexAlreadyExists`] if the label and property
    /// are already indexed.
    pub fn create_index(
        &mut self,
        label: impl Into<Label>,
        property: impl Into<String>,
    ) -> GraphResult<IndexDefinition> {
        let (label, property) = (label.into(), property.into());
        let db = self.db;
        let tx = self.storage_mut()?;

        if SchemaStore::all_indexes(&*tx)?.iter().any(|i| i.covers(&label, &property)) {
            return Err(GraphError::IndexAlreadyExists { label, property });
        }

        let index = IndexDefinition::new(db.ids().next_index_id(), label, property);
        SchemaStore::put_index(tx, &index)?;
        debug!(tx_id = self.tx_id, index = %index, "index defined");
        self.pending_indexes.push(index.clone());
        Ok(index)
    }

    /// Lazily list the indexes on `label`.
    pub fn indexes(&self, label: &Label) -> GraphResult<Rows<'_, IndexDefinition>> {
        SchemaStore::indexes_for_label(self.storage()?, label)
    }

    /// Lazily list every index.
    pub fn all_indexes(&self) -> GraphResult<Rows<'_, IndexDefinition>> {
        SchemaStore::indexes(self.storage()?)
    }

    /// Current build state of an index.
    ///
    /// The state is read live, not from this transaction's snapshot, so a
    /// transaction held open observes a build finishing.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::IndexNotFound`] if the index is unknown.
    pub fn index_state(&self, index: &IndexDefinition) -> GraphResult<IndexState> {
        if let Some(state) = self.db.index_registry().state(index.id)? {
            return Ok(state);
        }
        // Defined but not yet handed to a populator: created in this
        // transaction, or committed moments ago.
        if SchemaStore::get_index(self.storage()?, index.id)?.is_some() {
            return Ok(IndexState::Populating);
        }
        Err(GraphError::IndexNotFound(index.clone()))
    }

    /// Require `property` to be unique among nodes carrying `label`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ConstraintAlreadyExists`] for a duplicate
    /// definition and [`GraphError::ConstraintViolation`] if existing nodes
    /// already share a value.
    pub fn create_uniqueness_constraint(
        &mut self,
        label: impl Into<Label>,
        property: impl Into<String>,
    ) -> GraphResult<ConstraintDefinition> {
        let (label, property) = (label.into(), property.into());
        let db = self.db;
        let tx = self.storage_mut()?;

        let exists = SchemaStore::all_constraints(&*tx)?
            .iter()
            .any(|c| c.label == label && c.property == property);
        if exists {
            return Err(GraphError::ConstraintAlreadyExists { label, property });
        }

        let mut seen: Vec<(Value, NodeId)> = Vec::new();
        for node in NodeStore::nodes_with_label(&*tx, &label)? {
            let Some(value) = node.get_property(&property) else {
                continue;
            };
            if let Some((_, first)) = seen.iter().find(|(v, _)| v == value) {
                return Err(GraphError::ConstraintViolation(format!(
                    "{first} and {} share label `{label}` and property `{property}` = {value}",
                    node.id
                )));
            }
            seen.push((value.clone(), node.id));
        }

        let constraint =
            ConstraintDefinition::uniqueness(db.ids().next_constraint_id(), label, property);
        SchemaStore::put_constraint(tx, &constraint)?;
        debug!(tx_id = self.tx_id, constraint = %constraint, "constraint defined");
        Ok(constraint)
    }

    /// Lazily list the constraints on `label`.
    pub fn constraints(&self, label: &Label) -> GraphResult<Rows<'_, ConstraintDefinition>> {
        SchemaStore::constraints_for_label(self.storage()?, label)
    }

    /// Lazily list every constraint.
    pub fn all_constraints(&self) -> GraphResult<Rows<'_, ConstraintDefinition>> {
        SchemaStore::constraints(self.storage()?)
    }
}

impl<E: StorageEngine + 'static> Drop for GraphTransaction<'_, E> {
    fn drop(&mut self) {
        if let Err(e) = self.finish(false) {
            warn!(tx_id = self.tx_id, error = %e, "rollback on drop failed");
        }
    }
}

fn closed() -> GraphError {
    GraphError::Internal("transaction is closed".to_owned())
}

/// Reject `node` if it would share a uniquely constrained value with
/// another node.
fn check_uniqueness<T: Transaction>(tx: &T, node: &Node) -> GraphResult<()> {
    for constraint in SchemaStore::all_constraints(tx)? {
        if !node.has_label(&constraint.label) {
            continue;
        }
        let Some(value) = node.get_property(&constraint.property) else {
            continue;
        };
        let clash = NodeStore::nodes_with_label(tx, &constraint.label)?.into_iter().find(|other| {
            other.id != node.id && other.get_property(&constraint.property) == Some(value)
        });
        if let Some(other) = clash {
            return Err(GraphError::ConstraintViolation(format!(
                "{} already has label `{}` and property `{}` = {value}",
                other.id, constraint.label, constraint.property
            )));
        }
    }
    Ok(())
}
