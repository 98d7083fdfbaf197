//! Constraint definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Label;

/// Unique identifier for a constraint definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConstraintId(u64);

impl ConstraintId {
    /// Create a new constraint ID.
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

/// Kind of rule a constraint enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ConstraintKind {
    /// No two nodes with the label share a value for the property.
    Uniqueness,
}

/// A constraint over the nodes carrying a label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConstraintDefinition {
    /// Identifier assigned by the store.
    pub id: ConstraintId,
    /// Label whose nodes are constrained.
    pub label: Label,
    /// Constrained property key.
    pub property: String,
    /// The rule enforced.
    pub kind: ConstraintKind,
}

impl ConstraintDefinition {
    /// Create a uniqueness constraint definition.
    #[must_use]
    pub fn uniqueness(
        id: ConstraintId,
        label: impl Into<Label>,
        property: impl Into<String>,
    ) -> Self {
        Self { id, label: label.into(), property: property.into(), kind: ConstraintKind::Uniqueness }
    }
}

impl fmt::Display for ConstraintDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ConstraintKind::Uniqueness => write!(
                f,
                "CONSTRAINT ON (n:{}) ASSERT n.{} IS UNIQUE",
                self.label, self.property
            ),
        }
    }
}
