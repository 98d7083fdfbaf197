//! In-memory storage backend.
//!
//! [`MemoryEngine`] keeps every table as an ordered map shared behind an
//! [`Arc`](std::sync::Arc). A transaction takes a copy of the table directory
//! when it begins; tables are cloned lazily on first write (copy-on-write),
//! so read transactions are cheap and always see the snapshot they started
//! with.
//!
//! # Concurrency
//!
//! - Any number of read transactions can be open at once, alongside a writer.
//! - Write transactions are serialized by a writer lock held until commit or
//!   rollback.
//! - Commit publishes the writer's tables atomically; transactions that began
//!   earlier keep their snapshot.
//!
//! # Example
//!
//! ```
//! use graphassert_storage::backends::MemoryEngine;
//! use graphassert_storage::{StorageEngine, Transaction};
//!
//! let engine = MemoryEngine::new();
//! let before = engine.begin_read().unwrap();
//!
//! let mut tx = engine.begin_write().unwrap();
//! tx.put("t", b"k", b"v").unwrap();
//! tx.commit().unwrap();
//!
//! assert_eq!(before.get("t", b"k").unwrap(), None);
//! assert!(engine.begin_read().unwrap().get("t", b"k").unwrap().is_some());
//! ```

mod engine;
mod transaction;

pub use engine::MemoryEngine;
pub use transaction::{MemoryCursor, MemoryTransaction};
