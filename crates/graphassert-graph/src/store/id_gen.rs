//! ID generation for nodes and schema objects.

use std::sync::atomic::{AtomicU64, Ordering};

use graphassert_core::{ConstraintId, IndexId, NodeId};

/// A monotonic ID generator.
///
/// Generates unique, monotonically increasing IDs. The generator is thread-safe
/// and can be shared across threads. IDs start from 1 (0 is reserved for "no ID").
///
/// IDs handed out to a transaction that later rolls back are not reused.
///
/// # Example
///
/// ```
/// use graphassert_graph::store::IdGenerator;
///
/// let gen = IdGenerator::new();
/// let id1 = gen.next_node_id();
/// let id2 = gen.next_node_id();
/// assert!(id1 < id2);
/// ```
#[derive(Debug)]
pub struct IdGenerator {
    next_node_id: AtomicU64,
    next_index_id: AtomicU64,
    next_constraint_id: AtomicU64,
}

impl IdGenerator {
    /// Create a new ID generator starting from 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_node_id: AtomicU64::new(1),
            next_index_id: AtomicU64::new(1),
            next_constraint_id: AtomicU64::new(1),
        }
    }

    /// Generate the next node ID.
    pub fn next_node_id(&self) -> NodeId {
        NodeId::new(self.next_node_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Generate the next index ID.
    pub fn next_index_id(&self) -> IndexId {
        IndexId::new(self.next_index_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Generate the next constraint ID.
    pub fn next_constraint_id(&self) -> ConstraintId {
        ConstraintId::new(self.next_constraint_id.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_are_independent() {
        let gen = IdGenerator::new();
        assert_eq!(gen.next_node_id(), NodeId::new(1));
        assert_eq!(gen.next_node_id(), NodeId::new(2));
        assert_eq!(gen.next_index_id(), IndexId::new(1));
        assert_eq!(gen.next_constraint_id(), ConstraintId::new(1));
    }
}
