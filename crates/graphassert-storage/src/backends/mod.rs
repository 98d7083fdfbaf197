//! Storage backend implementations.
//!
//! - [`memory`] - In-memory snapshot engine

pub mod memory;

pub use memory::{MemoryCursor, MemoryEngine, MemoryTransaction};
