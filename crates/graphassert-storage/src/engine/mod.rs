//! Storage engine traits and abstractions.
//!
//! - [`StorageEngine`] - Main entry point for creating transactions
//! - [`Transaction`] - Transaction with get/put/delete/range operations
//! - [`Cursor`] - Ordered iteration over key-value pairs
//!
//! All operations return [`StorageResult<T>`]. See [`StorageError`] for the
//! possible error variants.

mod error;
mod traits;

pub use error::{StorageError, StorageResult};
pub use traits::{prefix_end, Cursor, CursorResult, KeyValue, StorageEngine, Transaction};
