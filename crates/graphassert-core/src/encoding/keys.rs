//! Ordered key encoding for storage tables.
//!
//! # Key Formats
//!
//! ```text
//! node:            [PREFIX_NODE][node_id: 8]
//! label index:     [PREFIX_LABEL_INDEX][label_len: 4][label][node_id: 8]
//! property index:  [PREFIX_PROPERTY_INDEX][index_id: 8][value_len: 4][value][node_id: 8]
//! index schema:    [PREFIX_SCHEMA_INDEX][index_id: 8]
//! constraint:      [PREFIX_SCHEMA_CONSTRAINT][constraint_id: 8]
//! ```
//!
//! Integers are big-endian so keys sort numerically. Variable-length parts are
//! length-prefixed so that one label (or value) is never a prefix of another.
//! Every index key ends with the node ID, which
//! [`decode_trailing_node_id`] recovers.

use crate::error::CoreError;
use crate::schema::{ConstraintId, IndexId};
use crate::types::{Label, NodeId};

/// Key prefix for node records.
pub const PREFIX_NODE: u8 = 0x01;
/// Key prefix for label index entries.
pub const PREFIX_LABEL_INDEX: u8 = 0x02;
/// Key prefix for property index entries.
pub const PREFIX_PROPERTY_INDEX: u8 = 0x03;
/// Key prefix for index definitions.
pub const PREFIX_SCHEMA_INDEX: u8 = 0x04;
/// Key prefix for constraint definitions.
pub const PREFIX_SCHEMA_CONSTRAINT: u8 = 0x05;

const ID_LEN: usize = 8;

/// Encode the key of a node record.
#[must_use]
pub fn encode_node_key(id: NodeId) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + ID_LEN);
    key.push(PREFIX_NODE);
    key.extend_from_slice(&id.as_u64().to_be_bytes());
    key
}

/// Encode a prefix covering every label index entry for `label`.
///
/// # Errors
///
/// Returns an error if the label name is longer than `u32::MAX` bytes.
pub fn encode_label_index_prefix(label: &Label) -> Result<Vec<u8>, CoreError> {
    let bytes = label.as_str().as_bytes();
    let mut key = Vec::with_capacity(1 + 4 + bytes.len() + ID_LEN);
    key.push(PREFIX_LABEL_INDEX);
    push_len_prefixed(&mut key, bytes, "label")?;
    Ok(key)
}

/// Encode a label index key mapping `label` to `node`.
///
/// # Errors
///
/// Returns an error if the label name is longer than `u32::MAX` bytes.
pub fn encode_label_index_key(label: &Label, node: NodeId) -> Result<Vec<u8>, CoreError> {
    let mut key = encode_label_index_prefix(label)?;
    key.extend_from_slice(&node.as_u64().to_be_bytes());
    Ok(key)
}

/// Encode a prefix covering every entry of `index` whose value encodes to
/// `value_bytes`.
///
/// # Errors
///
/// Returns an error if the encoded value is longer than `u32::MAX` bytes.
pub fn encode_property_index_prefix(
    index: IndexId,
    value_bytes: &[u8],
) -> Result<Vec<u8>, CoreError> {
    let mut key = Vec::with_capacity(1 + ID_LEN + 4 + value_bytes.len() + ID_LEN);
    key.push(PREFIX_PROPERTY_INDEX);
    key.extend_from_slice(&index.as_u64().to_be_bytes());
    push_len_prefixed(&mut key, value_bytes, "property value")?;
    Ok(key)
}

/// Encode a property index key.
///
/// # Errors
///
/// Returns an error if the encoded value is longer than `u32::MAX` bytes.
pub fn encode_property_index_key(
    index: IndexId,
    value_bytes: &[u8],
    node: NodeId,
) -> Result<Vec<u8>, CoreError> {
    let mut key = encode_property_index_prefix(index, value_bytes)?;
    key.extend_from_slice(&node.as_u64().to_be_bytes());
    Ok(key)
}

/// Encode the key of an index definition.
#[must_use]
pub fn encode_schema_index_key(id: IndexId) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + ID_LEN);
    key.push(PREFIX_SCHEMA_INDEX);
    key.extend_from_slice(&id.as_u64().to_be_bytes());
    key
}

/// Encode the key of a constraint definition.
#[must_use]
pub fn encode_schema_constraint_key(id: ConstraintId) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + ID_LEN);
    key.push(PREFIX_SCHEMA_CONSTRAINT);
    key.extend_from_slice(&id.as_u64().to_be_bytes());
    key
}

/// Decode the node ID stored in the last eight bytes of an index key.
#[must_use]
pub fn decode_trailing_node_id(key: &[u8]) -> Option<NodeId> {
    let start = key.len().checked_sub(ID_LEN)?;
    let bytes: [u8; ID_LEN] = key[start..].try_into().ok()?;
    Some(NodeId::new(u64::from_be_bytes(bytes)))
}

fn push_len_prefixed(key: &mut Vec<u8>, bytes: &[u8], what: &str) -> Result<(), CoreError> {
    let len = u32::try_from(bytes.len())
        .map_err(|_| CoreError::Encoding(format!("{what} too long for key")))?;
    key.extend_from_slice(&len.to_be_bytes());
    key.extend_from_slice(bytes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_key_layout() {
        let key = encode_node_key(NodeId::new(42));
        assert_eq!(key[0], PREFIX_NODE);
        assert_eq!(decode_trailing_node_id(&key), Some(NodeId::new(42)));
    }

    #[test]
    fn test_label_prefixes_do_not_overlap() {
        let short = encode_label_index_prefix(&Label::new("Person")).expect("prefix");
        let long = encode_label_index_key(&Label::new("PersonX"), NodeId::new(1)).expect("key");
        assert!(!long.starts_with(&short));
    }

    #[test]
    fn test_property_key_ends_with_node_id() {
        let key = encode_property_index_key(IndexId::new(9), b"value", NodeId::new(77))
            .expect("key");
        let prefix = encode_property_index_prefix(IndexId::new(9), b"value").expect("prefix");
        assert!(key.starts_with(&prefix));
        assert_eq!(decode_trailing_node_id(&key), Some(NodeId::new(77)));
    }
}
