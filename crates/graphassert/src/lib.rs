//! # graphassert
//!
//! Assertions about the state of a `graphassert` graph store that manage
//! their own transactions.
//!
//! Every check runs inside a transaction that is opened for that check and
//! closed before the check returns, on success, on failure and on panic.
//! Query results are read lazily at assertion time, and index builds can be
//! awaited with a bounded poll.
//!
//! # Example
//!
//! ```
//! use graphassert::collection::{contains_only, is_empty};
//! use graphassert::deferred::{find_nodes_by_index, find_nodes_by_label};
//! use graphassert::index::create_index;
//! use graphassert::node::{has_label, has_property};
//! use graphassert::{assert_that, in_transaction, in_tx, GraphDatabase, TxOutcome};
//!
//! let db = GraphDatabase::in_memory();
//! let people = find_nodes_by_label(&db, "Person");
//! assert_that(&people, &is_empty());
//!
//! let alice = in_transaction(&db, TxOutcome::Commit, |tx| {
//!     let node = tx.create_node()?.with_label("Person").with_property("name", "Alice");
//!     tx.put_node(&node)?;
//!     Ok(node.id)
//! })
//! .unwrap();
//!
//! assert_that(&people, &contains_only([alice]));
//! assert_that(&alice, &in_tx(&db, has_label("Person")));
//! assert_that(&alice, &in_tx(&db, has_property("name").with_value("Alice")));
//!
//! let index = create_index(&db, "Person", "name").unwrap();
//! assert_that(&find_nodes_by_index(&db, &index, "Alice"), &contains_only([alice]));
//!
//! assert_eq!(db.stats().open(), 0);
//! ```
//!
//! # Modules
//!
//! - [`scope`] - Scoped transactions ([`in_transaction`])
//! - [`matcher`] - Predicates and the transactional wrapper ([`in_tx`])
//! - [`deferred`] - Lazily evaluated query results ([`Deferred`])
//! - [`collection`] - Set comparisons: exact, contains, empty
//! - [`poll`] - Bounded polling ([`poll_until`])
//! - [`index`] - Waiting for index builds
//! - [`node`] - Node and graph predicates

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod collection;
pub mod deferred;
pub mod error;
pub mod index;
pub mod matcher;
pub mod node;
pub mod poll;
pub mod scope;

pub use deferred::{Deferred, Materialize};
pub use error::{Error, Result};
pub use matcher::{assert_that, check, in_tx, InTx, MatchResult, Matcher, TxMatcher};
pub use poll::{poll_until, PollConfig, Readiness};
pub use scope::{in_transaction, TxOutcome};

pub use graphassert_core::{
    ConstraintDefinition, IndexDefinition, IndexState, Label, Node, NodeId, Value,
};
pub use graphassert_graph::{
    DatabaseConfig, GraphDatabase, GraphError, GraphResult, GraphTransaction, Rows,
};
pub use graphassert_storage::backends::MemoryEngine;
