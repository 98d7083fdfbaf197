//! Node types for the graph.
//!
//! This module provides the [`Node`] type, a graph node with labels and
//! properties, and the [`Label`] type used to categorize nodes.
//!
//! # Example
//!
//! ```
//! use graphassert_core::types::{Label, Node, NodeId};
//!
//! let node = Node::new(NodeId::new(1))
//!     .with_label("Person")
//!     .with_label("Employee")
//!     .with_property("name", "Alice");
//!
//! assert!(node.has_label(&Label::new("Employee")));
//! assert_eq!(node.get_property("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{NodeId, Value};

/// A label that categorizes a node.
///
/// Labels group nodes into categories like "Person" or "Product". A node can
/// carry several labels.
///
/// ```
/// use graphassert_core::Label;
///
/// let label = Label::new("Person");
/// assert_eq!(label.as_str(), "Person");
///
/// let label: Label = "Company".into();
/// assert_eq!(label.to_string(), "Company");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Label(String);

impl Label {
    /// Create a new label.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the label name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Label {
    #[inline]
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Label {
    #[inline]
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&Label> for Label {
    #[inline]
    fn from(label: &Label) -> Self {
        label.clone()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A node in the graph.
///
/// A node has a unique [`NodeId`], zero or more [`Label`]s and a map of
/// property keys to [`Value`]s. Labels keep insertion order and are
/// de-duplicated by [`Node::add_label`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node.
    pub id: NodeId,
    /// Labels that categorize this node.
    pub labels: Vec<Label>,
    /// Properties stored on this node.
    pub properties: HashMap<String, Value>,
}

impl Node {
    /// Create a new node with the given ID.
    #[must_use]
    pub fn new(id: NodeId) -> Self {
        Self { id, labels: Vec::new(), properties: HashMap::new() }
    }

    /// Add a label to this node.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Label>) -> Self {
        self.add_label(label);
        self
    }

    /// Add a property to this node.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Check if this node has a specific label.
    #[must_use]
    pub fn has_label(&self, label: &Label) -> bool {
        self.labels.contains(label)
    }

    /// Add a label. Returns `false` if the node already carried it.
    pub fn add_label(&mut self, label: impl Into<Label>) -> bool {
        let label = label.into();
        if self.labels.contains(&label) {
            return false;
        }
        self.labels.push(label);
        true
    }

    /// Remove a label. Returns `true` if the node carried it.
    pub fn remove_label(&mut self, label: &Label) -> bool {
        let before = self.labels.len();
        self.labels.retain(|l| l != label);
        self.labels.len() != before
    }

    /// Check if this node has a property with the given key.
    #[must_use]
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Get a property value by key.
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Set a property value.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Remove a property, returning its old value.
    pub fn remove_property(&mut self, key: &str) -> Option<Value> {
        self.properties.remove(key)
    }

    /// Iterate over the property keys of this node.
    pub fn property_keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_builder() {
        let node = Node::new(NodeId::new(1))
            .with_label("Person")
            .with_property("name", "Alice")
            .with_property("age", 30i64);

        assert_eq!(node.labels, vec![Label::new("Person")]);
        assert_eq!(node.get_property("age"), Some(&Value::Int(30)));
        assert!(node.has_property("name"));
        assert!(!node.has_property("email"));
    }

    #[test]
    fn test_labels_are_deduplicated() {
        let mut node = Node::new(NodeId::new(1)).with_label("A").with_label("A");
        assert_eq!(node.labels.len(), 1);

        assert!(node.add_label("B"));
        assert!(!node.add_label("B"));
        assert!(node.remove_label(&Label::new("A")));
        assert!(!node.remove_label(&Label::new("A")));
        assert_eq!(node.labels, vec![Label::new("B")]);
    }

    #[test]
    fn test_property_keys() {
        let node = Node::new(NodeId::new(1)).with_property("a", 1i64).with_property("b", 2i64);
        let mut keys: Vec<_> = node.property_keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
