//! `graphassert` Storage
//!
//! This crate provides the storage engine abstraction and the in-memory
//! backend used by the graph store.
//!
//! # Core Traits
//!
//! - [`StorageEngine`] - The main entry point for storage operations
//! - [`Transaction`] - Transactional read/write access to named tables
//! - [`Cursor`] - Ordered iteration over a key range
//!
//! # Error Handling
//!
//! All storage operations return [`StorageResult<T>`], an alias for
//! `Result<T, StorageError>`.
//!
//! # Example
//!
//! ```
//! use graphassert_storage::backends::MemoryEngine;
//! use graphassert_storage::{StorageEngine, Transaction};
//!
//! let engine = MemoryEngine::new();
//!
//! let mut tx = engine.begin_write().unwrap();
//! tx.put("users", b"user:1", b"Alice").unwrap();
//! tx.commit().unwrap();
//!
//! let tx = engine.begin_read().unwrap();
//! assert_eq!(tx.get("users", b"user:1").unwrap(), Some(b"Alice".to_vec()));
//! ```

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod backends;
pub mod engine;

pub use engine::{
    prefix_end, Cursor, CursorResult, KeyValue, StorageEngine, StorageError, StorageResult,
    Transaction,
};
