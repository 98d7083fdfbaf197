//! Error types for `graphassert`.
//!
//! A failed expectation is not an error: it is reported as
//! [`MatchResult::Mismatch`](crate::MatchResult::Mismatch). The [`enum@Error`]
//! type covers faults: the store failing while a transaction is open, and an
//! index that never came online.

use std::time::Duration;

use graphassert_core::IndexDefinition;
use graphassert_graph::GraphError;
use thiserror::Error;

/// Errors raised while evaluating an assertion.
#[derive(Debug, Error)]
pub enum Error {
    /// The store failed. The transaction involved has been closed.
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    /// An index did not come online before the poll timeout.
    #[error("index {index} did not come online within {timeout:?}")]
    Timeout {
        /// The index waited for.
        index: IndexDefinition,
        /// How long the poller waited.
        timeout: Duration,
    },

    /// The store reported that building an index failed.
    #[error("index {index} failed to build: {reason}")]
    IndexFailed {
        /// The index waited for.
        index: IndexDefinition,
        /// The failure reported by the store.
        reason: String,
    },
}

impl Error {
    /// Returns `true` if this is a poll timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if the store itself raised this error.
    #[must_use]
    pub const fn is_store_error(&self) -> bool {
        matches!(self, Self::Graph(_))
    }
}

/// Result type for assertion operations.
pub type Result<T> = std::result::Result<T, Error>;
