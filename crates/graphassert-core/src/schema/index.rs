//! Property index definitions and lifecycle states.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Label;

/// Unique identifier for an index definition.
///
/// A simple auto-incrementing counter assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndexId(u64);

impl IndexId {
    /// Create a new index ID.
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// A single-property index over all nodes carrying a label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndexDefinition {
    /// Identifier assigned by the store.
    pub id: IndexId,
    /// Label whose nodes are indexed.
    pub label: Label,
    /// Indexed property key.
    pub property: String,
}

impl IndexDefinition {
    /// Create a new index definition.
    #[must_use]
    pub fn new(id: IndexId, label: impl Into<Label>, property: impl Into<String>) -> Self {
        Self { id, label: label.into(), property: property.into() }
    }

    /// Returns `true` if this index covers the given label and property.
    #[must_use]
    pub fn covers(&self, label: &Label, property: &str) -> bool {
        &self.label == label && self.property == property
    }
}

impl fmt::Display for IndexDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}({})", self.label, self.property)
    }
}

/// Build state of an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexState {
    /// The index is being built from existing data and cannot serve queries yet.
    Populating,
    /// The index is fully built and serves queries.
    Online,
    /// The build failed; the index will never come online.
    Failed(String),
}

impl IndexState {
    /// Returns `true` if the index can serve queries.
    #[must_use]
    pub const fn is_online(&self) -> bool {
        matches!(self, Self::Online)
    }
}

impl fmt::Display for IndexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Populating => f.write_str("POPULATING"),
            Self::Online => f.write_str("ONLINE"),
            Self::Failed(reason) => write!(f, "FAILED ({reason})"),
        }
    }
}
