//! Error types for graph operations.

use graphassert_core::{CoreError, IndexDefinition, IndexState, Label, NodeId};
use graphassert_storage::StorageError;
use thiserror::Error;

/// Errors that can occur in graph store operations.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A node was not found.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// An index on the same label and property already exists.
    #[error("an index on :{label}({property}) already exists")]
    IndexAlreadyExists {
        /// The indexed label.
        label: Label,
        /// The indexed property.
        property: String,
    },

    /// The index is unknown to the store.
    #[error("index not found: {0}")]
    IndexNotFound(IndexDefinition),

    /// The index exists but cannot serve queries in its current state.
    #[error("index {index} is not online ({state})")]
    IndexNotOnline {
        /// The index that was queried.
        index: IndexDefinition,
        /// Its state at the time of the query.
        state: IndexState,
    },

    /// A uniqueness constraint on the same label and property already exists.
    #[error("a constraint on :{label}({property}) already exists")]
    ConstraintAlreadyExists {
        /// The constrained label.
        label: Label,
        /// The constrained property.
        property: String,
    },

    /// A write would break a constraint.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// An encoding or decoding error occurred.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A storage backend error occurred.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CoreError> for GraphError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Encoding(msg) => Self::Encoding(msg),
            CoreError::Validation(msg) => Self::Internal(msg),
        }
    }
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
