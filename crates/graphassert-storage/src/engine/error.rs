//! Storage error types.

use thiserror::Error;

/// Errors that can occur in a storage engine.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A write was attempted on a read-only transaction.
    #[error("cannot write in read-only transaction")]
    ReadOnly,

    /// A transaction could not be started, committed or rolled back.
    #[error("transaction error: {0}")]
    Transaction(String),

    /// An internal lock was poisoned (a thread panicked while holding it).
    #[error("internal lock poisoned: {0}")]
    LockPoisoned(String),

    /// A range was requested with its start after its end.
    #[error("invalid range: {0}")]
    InvalidRange(String),
}

impl StorageError {
    /// Create a lock poisoned error.
    #[must_use]
    pub fn lock_poisoned(msg: impl Into<String>) -> Self {
        Self::LockPoisoned(msg.into())
    }
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
