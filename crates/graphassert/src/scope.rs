//! Transaction scoping.
//!
//! [`in_transaction`] is the building block every other part of the crate
//! uses to touch the store: it opens a transaction, runs a body, and closes
//! the transaction on every exit path before handing back the body's result.

use graphassert_graph::{GraphDatabase, GraphTransaction};
use graphassert_storage::StorageEngine;
use tracing::warn;

use crate::error::Result;

/// What happens to a scoped transaction when its body succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxOutcome {
    /// Mark the transaction successful so closing commits it.
    Commit,
    /// Leave the transaction unmarked so closing rolls it back.
    Rollback,
}

/// Run `body` inside a transaction that is closed before this returns.
///
/// The transaction is opened before `body` runs and closed exactly once
/// afterwards. It commits only if `outcome` is [`TxOutcome::Commit`] and
/// `body` returned `Ok`; otherwise it rolls back. If `body` panics the
/// transaction is rolled back while unwinding.
///
/// Scopes may nest. An inner scope reads the last commit. It cannot write
/// while an outer scope on the same thread holds the writer: the write fails
/// with a store error.
///
/// # Errors
///
/// Returns the error from `body` if it failed (a failure to close is then
/// only logged), otherwise the error from closing, if any.
///
/// # Example
///
/// ```
/// use graphassert::{in_transaction, GraphDatabase, TxOutcome};
///
/// let db = GraphDatabase::in_memory();
/// let node = in_transaction(&db, TxOutcome::Commit, |tx| {
///     let node = tx.create_node()?.with_label("Person");
///     tx.put_node(&node)?;
///     Ok(node)
/// })
/// .unwrap();
///
/// let labels = in_transaction(&db, TxOutcome::Rollback, |tx| Ok(tx.get_node(node.id)?.labels))
///     .unwrap();
/// assert_eq!(labels.len(), 1);
/// assert_eq!(db.stats().open(), 0);
/// ```
pub fn in_transaction<'db, E, R, F>(
    db: &'db GraphDatabase<E>,
    outcome: TxOutcome,
    body: F,
) -> Result<R>
where
    E: StorageEngine + 'static,
    F: FnOnce(&mut GraphTransaction<'db, E>) -> Result<R>,
{
    let mut tx = db.begin_tx()?;
    let result = body(&mut tx);
    if result.is_ok() && outcome == TxOutcome::Commit {
        tx.success();
    }
    let closed = tx.close();

    match (result, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e.into()),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            warn!(error = %close_err, "closing transaction failed after the body failed");
            Err(e)
        }
    }
}
