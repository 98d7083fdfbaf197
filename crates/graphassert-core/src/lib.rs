//! `graphassert` Core
//!
//! This crate provides the shared types used by the graph store and the
//! assertion layer built on top of it.
//!
//! # Overview
//!
//! - **Identifiers**: [`NodeId`], [`IndexId`] and [`ConstraintId`]
//! - **Graph primitives**: [`Node`] with [`Label`]s and [`Value`] properties
//! - **Schema**: [`IndexDefinition`], [`IndexState`] and [`ConstraintDefinition`]
//!
//! # Example
//!
//! ```
//! use graphassert_core::{Label, Node, NodeId, Value};
//!
//! let alice = Node::new(NodeId::new(1))
//!     .with_label("Person")
//!     .with_property("name", "Alice")
//!     .with_property("age", 30i64);
//!
//! assert!(alice.has_label(&Label::new("Person")));
//! assert_eq!(alice.get_property("name"), Some(&Value::String("Alice".into())));
//! assert_eq!(alice.id.to_string(), "Node[1]");
//! ```
//!
//! # Modules
//!
//! - [`types`] - Node, label, value and identifier types
//! - [`schema`] - Index and constraint definitions
//! - [`encoding`] - Storage key layout and the binary codec
//! - [`error`] - Error types ([`CoreError`])

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod encoding;
pub mod error;
pub mod schema;
pub mod types;

pub use error::CoreError;
pub use schema::{
    ConstraintDefinition, ConstraintId, ConstraintKind, IndexDefinition, IndexId, IndexState,
};
pub use types::{Label, Node, NodeId, Value};
