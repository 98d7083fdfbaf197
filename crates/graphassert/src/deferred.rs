//! Deferred query results.
//!
//! A [`Deferred`] holds a query against the store but does not run it until
//! an assertion asks for the results. Each materialization runs the query
//! in its own transaction and copies the lazy rows into an owned `Vec`
//! before that transaction closes.

use graphassert_core::{ConstraintDefinition, IndexDefinition, Label, NodeId, Value};
use graphassert_graph::{GraphDatabase, GraphResult, GraphTransaction, Rows};
use graphassert_storage::StorageEngine;

use crate::error::Result;
use crate::scope::{in_transaction, TxOutcome};

/// Anything that can yield an owned collection at assertion time.
pub trait Materialize {
    /// Element type of the collection.
    type Item;

    /// Produce the collection.
    fn collection(&self) -> Result<Vec<Self::Item>>;
}

impl<T: Clone> Materialize for [T] {
    type Item = T;

    fn collection(&self) -> Result<Vec<T>> {
        Ok(self.to_vec())
    }
}

impl<T: Clone> Materialize for Vec<T> {
    type Item = T;

    fn collection(&self) -> Result<Vec<T>> {
        Ok(self.clone())
    }
}

type Producer<'db, E, T> =
    Box<dyn for<'t> Fn(&'t GraphTransaction<'db, E>) -> GraphResult<Rows<'t, T>> + 'db>;

/// A query whose results are read only when asked for.
///
/// # Example
///
/// ```
/// use graphassert::collection::contains_only;
/// use graphassert::deferred::find_nodes_by_label;
/// use graphassert::{assert_that, in_transaction, GraphDatabase, TxOutcome};
///
/// let db = GraphDatabase::in_memory();
/// let people = find_nodes_by_label(&db, "Person");
///
/// let alice = in_transaction(&db, TxOutcome::Commit, |tx| {
///     let node = tx.create_node()?.with_label("Person");
///     tx.put_node(&node)?;
///     Ok(node.id)
/// })
/// .unwrap();
///
/// // The query runs here, after the node was committed.
/// assert_that(&people, &contains_only([alice]));
/// ```
pub struct Deferred<'db, E: StorageEngine + 'static, T> {
    db: &'db GraphDatabase<E>,
    producer: Producer<'db, E, T>,
}

impl<'db, E: StorageEngine + 'static, T> Deferred<'db, E, T> {
    /// Defer `producer` until the results are needed.
    ///
    /// `producer` is called once per materialization with a transaction
    /// that stays open until every row has been read.
    pub fn new<F>(db: &'db GraphDatabase<E>, producer: F) -> Self
    where
        F: for<'t> Fn(&'t GraphTransaction<'db, E>) -> GraphResult<Rows<'t, T>> + 'db,
    {
        Self { db, producer: Box::new(producer) }
    }

    /// Run the query in a fresh transaction and collect every row.
    ///
    /// # Errors
    ///
    /// Returns the store error raised by the query or by any row. The
    /// transaction has been closed by then.
    pub fn collection(&self) -> Result<Vec<T>> {
        in_transaction(self.db, TxOutcome::Rollback, |tx| {
            let rows = (self.producer)(&*tx)?;
            Ok(rows.collect::<GraphResult<Vec<T>>>()?)
        })
    }
}

impl<E: StorageEngine + 'static, T> Materialize for Deferred<'_, E, T> {
    type Item = T;

    fn collection(&self) -> Result<Vec<T>> {
        Deferred::collection(self)
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Nodes carrying `label` whose property `key` equals `value`.
pub fn find_nodes_by_label_and_property<E: StorageEngine + 'static>(
    db: &GraphDatabase<E>,
    label: impl Into<Label>,
    key: impl Into<String>,
    value: impl Into<Value>,
) -> Deferred<'_, E, NodeId> {
    let (label, key, value) = (label.into(), key.into(), value.into());
    Deferred::new(db, move |tx| tx.find_nodes_by_label_and_property(&label, &key, &value))
}

/// Nodes carrying `label`.
pub fn find_nodes_by_label<E: StorageEngine + 'static>(
    db: &GraphDatabase<E>,
    label: impl Into<Label>,
) -> Deferred<'_, E, NodeId> {
    let label = label.into();
    Deferred::new(db, move |tx| tx.find_nodes_by_label(&label))
}

/// Nodes whose property covered by `index` equals `value`.
///
/// Materializing fails unless the index is online by then.
pub fn find_nodes_by_index<'db, E: StorageEngine + 'static>(
    db: &'db GraphDatabase<E>,
    index: &IndexDefinition,
    value: impl Into<Value>,
) -> Deferred<'db, E, NodeId> {
    let (index, value) = (index.clone(), value.into());
    Deferred::new(db, move |tx| tx.find_nodes_by_index(&index, &value))
}

/// Indexes defined on `label`.
pub fn get_indexes<E: StorageEngine + 'static>(
    db: &GraphDatabase<E>,
    label: impl Into<Label>,
) -> Deferred<'_, E, IndexDefinition> {
    let label = label.into();
    Deferred::new(db, move |tx| tx.indexes(&label))
}

/// Property keys of `node`.
pub fn get_property_keys<E: StorageEngine + 'static>(
    db: &GraphDatabase<E>,
    node: NodeId,
) -> Deferred<'_, E, String> {
    Deferred::new(db, move |tx| tx.property_keys(node))
}

/// Constraints defined on `label`.
pub fn get_constraints<E: StorageEngine + 'static>(
    db: &GraphDatabase<E>,
    label: impl Into<Label>,
) -> Deferred<'_, E, ConstraintDefinition> {
    let label = label.into();
    Deferred::new(db, move |tx| tx.constraints(&label))
}

/// Every constraint in the database.
pub fn get_all_constraints<E: StorageEngine + 'static>(
    db: &GraphDatabase<E>,
) -> Deferred<'_, E, ConstraintDefinition> {
    Deferred::new(db, |tx| tx.all_constraints())
}
