//! Schema definitions: property indexes and constraints.
//!
//! Index and constraint definitions are transactional: they are written to
//! storage by the transaction that creates them and become visible to other
//! transactions on commit. The [`IndexState`] of an index is not: it
//! is tracked live by the store while the index is built in the background.
//!
//! # Example
//!
//! ```
//! use graphassert_core::{IndexDefinition, IndexId, IndexState, Label};
//!
//! let index = IndexDefinition::new(IndexId::new(1), "Person", "name");
//! assert_eq!(index.to_string(), ":Person(name)");
//! assert!(index.covers(&Label::new("Person"), "name"));
//! assert!(!IndexState::Populating.is_online());
//! ```

mod constraint;
mod index;

pub use constraint::{ConstraintDefinition, ConstraintId, ConstraintKind};
pub use index::{IndexDefinition, IndexId, IndexState};
