//! Property index maintenance and lookups.

use graphassert_core::encoding::keys::{encode_property_index_key, encode_property_index_prefix};
use graphassert_core::encoding::Encoder;
use graphassert_core::{IndexDefinition, IndexId, Node, NodeId, Value};
use graphassert_storage::Transaction;

use crate::store::{GraphResult, KeyIds, Rows};

/// Table name for property index entries.
pub const TABLE_PROPERTY_INDEX: &str = "property_index";

/// Property index operations.
///
/// Every index maps `(index, encoded value, node)` to an empty value. A node
/// has an entry in an index when it carries the index's label and has the
/// indexed property.
///
/// Entries are maintained for every defined index as nodes change, whatever
/// the index's build state; the background populator only covers nodes that
/// existed before the index was defined.
pub struct PropertyIndex;

impl PropertyIndex {
    /// Compute the entry `node` should have in `index`, if any.
    fn entry_key(index: &IndexDefinition, node: &Node) -> GraphResult<Option<Vec<u8>>> {
        if !node.has_label(&index.label) {
            return Ok(None);
        }
        let Some(value) = node.get_property(&index.property) else {
            return Ok(None);
        };
        Ok(Some(encode_property_index_key(index.id, &value.encode()?, node.id)?))
    }

    /// Add the entry for `node` to `index`.
    ///
    /// Returns `true` if the node belongs in the index.
    pub fn add<T: Transaction>(tx: &mut T, index: &IndexDefinition, node: &Node) -> GraphResult<bool> {
        match Self::entry_key(index, node)? {
            Some(key) => {
                tx.put(TABLE_PROPERTY_INDEX, &key, &[])?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Bring every index in `indexes` in line with a node changing from
    /// `old` to `new`. Either side may be absent (create or delete).
    pub fn update<T: Transaction>(
        tx: &mut T,
        indexes: &[IndexDefinition],
        old: Option<&Node>,
        new: Option<&Node>,
    ) -> GraphResult<()> {
        for index in indexes {
            let old_key = old.map(|n| Self::entry_key(index, n)).transpose()?.flatten();
            let new_key = new.map(|n| Self::entry_key(index, n)).transpose()?.flatten();
            if old_key == new_key {
                continue;
            }
            if let Some(key) = old_key {
                tx.delete(TABLE_PROPERTY_INDEX, &key)?;
            }
            if let Some(key) = new_key {
                tx.put(TABLE_PROPERTY_INDEX, &key, &[])?;
            }
        }
        Ok(())
    }

    /// Lazily find the IDs of nodes whose indexed property equals `value`.
    pub fn lookup<'c, T: Transaction>(
        tx: &'c T,
        index: IndexId,
        value: &Value,
    ) -> GraphResult<Rows<'c, NodeId>> {
        let prefix = encode_property_index_prefix(index, &value.encode()?)?;
        let cursor = tx.scan_prefix(TABLE_PROPERTY_INDEX, &prefix)?;
        Ok(Rows::new(KeyIds::new(cursor)))
    }
}

#[cfg(test)]
mod tests {
    use graphassert_core::Label;
    use graphassert_storage::backends::MemoryEngine;
    use graphassert_storage::StorageEngine;

    use super::*;

    fn ids<T: Transaction>(tx: &T, index: IndexId, value: &Value) -> Vec<NodeId> {
        PropertyIndex::lookup(tx, index, value)
            .expect("lookup")
            .collect::<GraphResult<_>>()
            .expect("scan")
    }

    #[test]
    fn update_moves_entry_with_value() {
        let engine = MemoryEngine::new();
        let mut tx = engine.begin_write().expect("begin_write");
        let index = IndexDefinition::new(IndexId::new(1), "Person", "name");

        let alice = Node::new(NodeId::new(1)).with_label("Person").with_property("name", "Alice");
        PropertyIndex::update(&mut tx, &[index.clone()], None, Some(&alice)).expect("update");
        assert_eq!(ids(&tx, index.id, &Value::from("Alice")), vec![NodeId::new(1)]);

        let mut renamed = alice.clone();
        renamed.set_property("name", "Alicia");
        PropertyIndex::update(&mut tx, &[index.clone()], Some(&alice), Some(&renamed))
            .expect("update");
        assert!(ids(&tx, index.id, &Value::from("Alice")).is_empty());
        assert_eq!(ids(&tx, index.id, &Value::from("Alicia")), vec![NodeId::new(1)]);

        let mut unlabeled = renamed.clone();
        unlabeled.remove_label(&Label::new("Person"));
        PropertyIndex::update(&mut tx, &[index.clone()], Some(&renamed), Some(&unlabeled))
            .expect("update");
        assert!(ids(&tx, index.id, &Value::from("Alicia")).is_empty());
    }

    #[test]
    fn add_skips_nodes_outside_the_index() {
        let engine = MemoryEngine::new();
        let mut tx = engine.begin_write().expect("begin_write");
        let index = IndexDefinition::new(IndexId::new(2), "Person", "name");

        let other_label = Node::new(NodeId::new(1)).with_label("Pet").with_property("name", "Rex");
        let no_property = Node::new(NodeId::new(2)).with_label("Person");
        assert!(!PropertyIndex::add(&mut tx, &index, &other_label).expect("add"));
        assert!(!PropertyIndex::add(&mut tx, &index, &no_property).expect("add"));
    }
}
