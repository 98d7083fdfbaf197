//! Serialization and key encoding for storage.
//!
//! # Encoding Traits
//!
//! - [`Encoder`] - Serialize types to bytes
//! - [`Decoder`] - Deserialize types from bytes
//!
//! Values are encoded with `bincode` using its serde integration. The
//! encoding is deterministic, so equal values produce equal bytes and can be
//! used inside index keys.
//!
//! # Key Encoding
//!
//! The [`keys`] module builds ordered keys with type prefixes and big-endian
//! integers so prefix scans return related entries together.
//!
//! # Example
//!
//! ```
//! use graphassert_core::encoding::{Decoder, Encoder};
//! use graphassert_core::{Node, NodeId};
//!
//! let node = Node::new(NodeId::new(1)).with_label("Person").with_property("name", "Alice");
//! let bytes = node.encode().unwrap();
//! assert_eq!(Node::decode(&bytes).unwrap(), node);
//! ```

pub mod keys;


use crate::error::CoreError;
use crate::schema::{ConstraintDefinition, IndexDefinition};
use crate::types::{Node, Value};

/// A trait for types that can be encoded to bytes.
pub trait Encoder {
    /// Encode this value to bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    fn encode(&self) -> Result<Vec<u8>, CoreError>;
}

/// A trait for types that can be decoded from bytes.
pub trait Decoder: Sized {
    /// Decode a value from bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are truncated or malformed.
    fn decode(bytes: &[u8]) -> Result<Self, CoreError>;
}

macro_rules! bincode_codec {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Encoder for $ty {
                fn encode(&self) -> Result<Vec<u8>, CoreError> {
                    bincode::serde::encode_to_vec(self, bincode::config::standard())
                        .map_err(|e| CoreError::Encoding(e.to_string()))
                }
            }

            impl Decoder for $ty {
                fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
                    let (value, read): (Self, usize) =
                        bincode::serde::decode_from_slice(bytes, bincode::config::standard())
                            .map_err(|e| CoreError::Encoding(e.to_string()))?;
                    if read != bytes.len() {
                        return Err(CoreError::Encoding(format!(
                            "{} trailing bytes after {}",
                            bytes.len() - read,
                            stringify!($ty)
                        )));
                    }
                    Ok(value)
                }
            }
        )+
    };
}

bincode_codec!(Node, Value, IndexDefinition, ConstraintDefinition);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::IndexId;

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut bytes = Value::Int(5).encode().expect("encode");
        bytes.push(0);
        assert!(matches!(Value::decode(&bytes), Err(CoreError::Encoding(_))));
    }

    #[test]
    fn test_decode_rejects_truncated_input() {
        let index = IndexDefinition::new(IndexId::new(1), "Person", "name");
        let bytes = index.encode().expect("encode");
        assert!(IndexDefinition::decode(&bytes[..bytes.len() - 1]).is_err());
    }
}
