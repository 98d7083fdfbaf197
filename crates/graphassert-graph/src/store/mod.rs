//! Node and schema storage operations.
//!
//! This module provides the storage-level operations behind
//! [`GraphTransaction`](crate::GraphTransaction). Every operation takes a
//! storage transaction, so callers decide the atomicity boundary.
//!
//! # Overview
//!
//! - [`NodeStore`] - Create, read, update, delete nodes and the label index
//! - [`SchemaStore`] - Index and constraint definitions
//! - [`IdGenerator`] - Monotonic ID generation
//! - [`Rows`] - Lazy result sequences bound to a transaction
//!
//! # Tables
//!
//! - `nodes` - Node records keyed by node ID
//! - `labels` - Label index for node lookups by label
//! - `property_index` - Entries of every property index
//! - `schema_indexes` - Index definitions
//! - `schema_constraints` - Constraint definitions

mod error;
mod id_gen;
mod node;
mod rows;
mod schema;

pub use error::{GraphError, GraphResult};
pub use id_gen::IdGenerator;
pub use node::{NodeStore, TABLE_LABELS, TABLE_NODES};
pub(crate) use rows::KeyIds;
pub use rows::Rows;
pub use schema::{SchemaStore, TABLE_SCHEMA_CONSTRAINTS, TABLE_SCHEMA_INDEXES};
