//! Waiting for index builds.

use graphassert_core::{IndexDefinition, IndexState, Label};
use graphassert_graph::GraphDatabase;
use graphassert_storage::StorageEngine;
use tracing::debug;

use crate::error::{Error, Result};
use crate::poll::{poll_until, PollConfig, Readiness};
use crate::scope::{in_transaction, TxOutcome};

impl From<IndexState> for Readiness {
    fn from(state: IndexState) -> Self {
        match state {
            IndexState::Online => Self::Ready,
            IndexState::Populating => Self::Pending,
            IndexState::Failed(reason) => Self::Failed(reason),
        }
    }
}

/// Block until `index` is online.
///
/// The state is checked inside one read transaction that stays open for the
/// whole wait and is closed before this returns.
///
/// # Errors
///
/// Returns [`Error::Timeout`] if the index is still populating after
/// `config.timeout`, [`Error::IndexFailed`] if the build failed, and
/// [`Error::Graph`] if the store does not know the index.
pub fn await_online<E: StorageEngine + 'static>(
    db: &GraphDatabase<E>,
    index: &IndexDefinition,
    config: &PollConfig,
) -> Result<()> {
    let readiness = in_transaction(db, TxOutcome::Rollback, |tx| {
        poll_until(config, || Ok(tx.index_state(index)?.into()))
    })?;

    match readiness {
        Readiness::Ready => Ok(()),
        Readiness::Pending => Err(Error::Timeout { index: index.clone(), timeout: config.timeout }),
        Readiness::Failed(reason) => Err(Error::IndexFailed { index: index.clone(), reason }),
    }
}

/// Define an index and wait, with the default [`PollConfig`], until it is
/// online.
///
/// # Example
///
/// ```
/// use graphassert::collection::contains_only;
/// use graphassert::deferred::find_nodes_by_index;
/// use graphassert::index::create_index;
/// use graphassert::{assert_that, in_transaction, GraphDatabase, TxOutcome};
///
/// let db = GraphDatabase::in_memory();
/// let alice = in_transaction(&db, TxOutcome::Commit, |tx| {
///     let node = tx.create_node()?.with_label("Person").with_property("name", "Alice");
///     tx.put_node(&node)?;
///     Ok(node.id)
/// })
/// .unwrap();
///
/// let index = create_index(&db, "Person", "name").unwrap();
/// assert_that(&find_nodes_by_index(&db, &index, "Alice"), &contains_only([alice]));
/// ```
///
/// # Errors
///
/// Returns the store error if the index cannot be defined, otherwise the
/// errors of [`await_online`].
pub fn create_index<E: StorageEngine + 'static>(
    db: &GraphDatabase<E>,
    label: impl Into<Label>,
    property: impl Into<String>,
) -> Result<IndexDefinition> {
    create_index_with(db, label, property, &PollConfig::default())
}

/// Define an index and wait until it is online, polling as `config` says.
///
/// The definition is committed before the wait starts.
///
/// # Errors
///
/// See [`create_index`].
pub fn create_index_with<E: StorageEngine + 'static>(
    db: &GraphDatabase<E>,
    label: impl Into<Label>,
    property: impl Into<String>,
    config: &PollConfig,
) -> Result<IndexDefinition> {
    let index = in_transaction(db, TxOutcome::Commit, |tx| Ok(tx.create_index(label, property)?))?;
    debug!(index = %index, "waiting for index");
    await_online(db, &index, config)?;
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_state_readiness() {
        assert_eq!(Readiness::from(IndexState::Online), Readiness::Ready);
        assert_eq!(Readiness::from(IndexState::Populating), Readiness::Pending);
        assert_eq!(
            Readiness::from(IndexState::Failed("disk full".into())),
            Readiness::Failed("disk full".into())
        );
    }
}
