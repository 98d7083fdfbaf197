//! Node storage operations.
//!
//! This module provides CRUD operations for nodes and keeps the label index
//! in step with the stored labels.

use graphassert_core::encoding::keys::{
    encode_label_index_key, encode_label_index_prefix, encode_node_key,
};
use graphassert_core::encoding::{Decoder, Encoder};
use graphassert_core::{Label, Node, NodeId, Value};
use graphassert_storage::Transaction;

use super::error::{GraphError, GraphResult};
use super::rows::{KeyIds, Rows};

/// Table name for node records.
pub const TABLE_NODES: &str = "nodes";

/// Table name for the label index.
pub const TABLE_LABELS: &str = "labels";

/// Node storage operations.
///
/// `NodeStore` provides transactional CRUD operations for graph nodes. All
/// operations work within a storage transaction; property index maintenance
/// and constraint checks are layered on top by
/// [`GraphTransaction`](crate::GraphTransaction).
pub struct NodeStore;

impl NodeStore {
    /// Get a node by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the node cannot be decoded.
    pub fn get<T: Transaction>(tx: &T, id: NodeId) -> GraphResult<Option<Node>> {
        let key = encode_node_key(id);
        match tx.get(TABLE_NODES, &key)? {
            Some(value) => Ok(Some(Node::decode(&value)?)),
            None => Ok(None),
        }
    }

    /// Get a node by ID, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if the node doesn't exist.
    pub fn get_or_error<T: Transaction>(tx: &T, id: NodeId) -> GraphResult<Node> {
        Self::get(tx, id)?.ok_or(GraphError::NodeNotFound(id))
    }

    /// Store a node, replacing any previous version.
    ///
    /// Label index entries are added for new labels and removed for labels
    /// the node no longer carries.
    ///
    /// # Returns
    ///
    /// The previously stored version of the node, if any.
    pub fn put<T: Transaction>(tx: &mut T, node: &Node) -> GraphResult<Option<Node>> {
        let key = encode_node_key(node.id);
        let old = match tx.get(TABLE_NODES, &key)? {
            Some(value) => Some(Node::decode(&value)?),
            None => None,
        };

        if let Some(old) = &old {
            for label in old.labels.iter().filter(|l| !node.has_label(l)) {
                tx.delete(TABLE_LABELS, &encode_label_index_key(label, node.id)?)?;
            }
        }

        tx.put(TABLE_NODES, &key, &node.encode()?)?;

        for label in &node.labels {
            tx.put(TABLE_LABELS, &encode_label_index_key(label, node.id)?, &[])?;
        }

        Ok(old)
    }

    /// Delete a node by ID, along with its label index entries.
    ///
    /// # Returns
    ///
    /// The deleted node, or `None` if it didn't exist.
    pub fn delete<T: Transaction>(tx: &mut T, id: NodeId) -> GraphResult<Option<Node>> {
        let key = encode_node_key(id);
        let Some(value) = tx.get(TABLE_NODES, &key)? else {
            return Ok(None);
        };
        let node = Node::decode(&value)?;

        for label in &node.labels {
            tx.delete(TABLE_LABELS, &encode_label_index_key(label, id)?)?;
        }
        tx.delete(TABLE_NODES, &key)?;

        Ok(Some(node))
    }

    /// Lazily find the IDs of all nodes carrying `label`, in ID order.
    pub fn find_by_label<'c, T: Transaction>(
        tx: &'c T,
        label: &Label,
    ) -> GraphResult<Rows<'c, NodeId>> {
        let prefix = encode_label_index_prefix(label)?;
        let cursor = tx.scan_prefix(TABLE_LABELS, &prefix)?;
        Ok(Rows::new(KeyIds::new(cursor)))
    }

    /// Lazily find the IDs of nodes carrying `label` whose property `key`
    /// equals `value`, by scanning the label.
    pub fn find_by_label_and_property<'c, T: Transaction>(
        tx: &'c T,
        label: &Label,
        key: &str,
        value: &Value,
    ) -> GraphResult<Rows<'c, NodeId>> {
        let key = key.to_owned();
        let value = value.clone();
        let ids = Self::find_by_label(tx, label)?;
        Ok(Rows::new(ids.filter_map(move |id| {
            let node = id.and_then(|id| Self::get_or_error(tx, id));
            match node {
                Ok(node) => (node.get_property(&key) == Some(&value)).then_some(Ok(node.id)),
                Err(e) => Some(Err(e)),
            }
        })))
    }

    /// Load every node carrying `label`.
    pub fn nodes_with_label<T: Transaction>(tx: &T, label: &Label) -> GraphResult<Vec<Node>> {
        let mut nodes = Vec::new();
        for id in Self::find_by_label(tx, label)? {
            nodes.push(Self::get_or_error(tx, id?)?);
        }
        Ok(nodes)
    }
}

#[cfg(test)]
mod tests {
    use graphassert_storage::backends::MemoryEngine;
    use graphassert_storage::StorageEngine;

    use super::*;

    #[test]
    fn put_replaces_label_entries() {
        let engine = MemoryEngine::new();
        let mut tx = engine.begin_write().expect("begin_write");

        let node = Node::new(NodeId::new(1)).with_label("A").with_label("B");
        assert!(NodeStore::put(&mut tx, &node).expect("put").is_none());

        let mut updated = node.clone();
        updated.remove_label(&Label::new("A"));
        let old = NodeStore::put(&mut tx, &updated).expect("put");
        assert_eq!(old, Some(node));

        let a: Vec<_> = NodeStore::find_by_label(&tx, &Label::new("A"))
            .expect("find")
            .collect::<GraphResult<_>>()
            .expect("scan");
        let b: Vec<_> = NodeStore::find_by_label(&tx, &Label::new("B"))
            .expect("find")
            .collect::<GraphResult<_>>()
            .expect("scan");
        assert!(a.is_empty());
        assert_eq!(b, vec![NodeId::new(1)]);
    }

    #[test]
    fn delete_removes_label_entries() {
        let engine = MemoryEngine::new();
        let mut tx = engine.begin_write().expect("begin_write");

        NodeStore::put(&mut tx, &Node::new(NodeId::new(7)).with_label("A")).expect("put");
        assert!(NodeStore::delete(&mut tx, NodeId::new(7)).expect("delete").is_some());
        assert!(NodeStore::delete(&mut tx, NodeId::new(7)).expect("delete").is_none());
        assert!(NodeStore::get(&tx, NodeId::new(7)).expect("get").is_none());
        assert_eq!(NodeStore::find_by_label(&tx, &Label::new("A")).expect("find").count(), 0);
    }
}
