//! `graphassert` Graph
//!
//! This crate provides a small embedded graph store: nodes with labels and
//! properties, property indexes built in the background, and uniqueness
//! constraints, all behind snapshot transactions.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use graphassert_core::{IndexState, Value};
//! use graphassert_graph::GraphDatabase;
//!
//! let db = GraphDatabase::in_memory();
//!
//! let mut tx = db.begin_tx().unwrap();
//! let alice = tx.create_node().unwrap().with_label("Person").with_property("name", "Alice");
//! tx.put_node(&alice).unwrap();
//! let index = tx.create_index("Person", "name").unwrap();
//! tx.success();
//! tx.close().unwrap();
//!
//! let state = db.await_index_online(&index, Duration::from_secs(10)).unwrap();
//! assert_eq!(state, IndexState::Online);
//!
//! let tx = db.begin_tx().unwrap();
//! let found: Vec<_> = tx
//!     .find_nodes_by_index(&index, &Value::from("Alice"))
//!     .unwrap()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(found, vec![alice.id]);
//! ```
//!
//! # Modules
//!
//! - [`store`] - Node and schema storage, lazy [`Rows`]
//! - [`index`] - Property index maintenance and build state

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

mod config;
mod database;
pub mod index;
pub mod store;
mod transaction;

pub use config::DatabaseConfig;
pub use database::{GraphDatabase, TransactionStats};
pub use store::{GraphError, GraphResult, Rows};
pub use transaction::GraphTransaction;
