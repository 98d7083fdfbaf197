//! Predicates over nodes and over the graph as a whole.
//!
//! Every predicate here is a [`TxMatcher`]: it reads the store, so it has to
//! be evaluated through [`in_tx`](crate::in_tx).

use std::collections::BTreeSet;

use graphassert_core::{Label, NodeId, Value};
use graphassert_graph::{GraphResult, GraphTransaction};
use graphassert_storage::StorageEngine;

use crate::collection::render_set;
use crate::error::Result;
use crate::matcher::{MatchResult, TxMatcher};

/// The names of `labels` as an ordered set.
pub fn as_label_name_set<'a>(labels: impl IntoIterator<Item = &'a Label>) -> BTreeSet<String> {
    labels.into_iter().map(|label| label.as_str().to_owned()).collect()
}

fn label_names<E: StorageEngine + 'static>(
    tx: &GraphTransaction<'_, E>,
    id: NodeId,
) -> Result<BTreeSet<String>> {
    Ok(as_label_name_set(&tx.get_node(id)?.labels))
}

/// Render a property value, quoting strings.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{s}'"),
        other => other.to_string(),
    }
}

// ============================================================================
// Labels
// ============================================================================

/// Matches a node carrying a label. Created by [`has_label`].
#[derive(Debug, Clone)]
pub struct HasLabel {
    label: Label,
}

/// Expect the node to carry `label`.
pub fn has_label(label: impl Into<Label>) -> HasLabel {
    HasLabel { label: label.into() }
}

impl<E: StorageEngine + 'static> TxMatcher<E, NodeId> for HasLabel {
    fn describe(&self) -> String {
        format!("<{}>", self.label)
    }

    fn matches_in(&self, tx: &GraphTransaction<'_, E>, item: &NodeId) -> Result<MatchResult> {
        let node = tx.get_node(*item)?;
        if node.has_label(&self.label) {
            return Ok(MatchResult::Match);
        }
        Ok(MatchResult::mismatch(render_set(&as_label_name_set(&node.labels))))
    }
}

/// Matches a node whose labels are all among the expected ones. Created by
/// [`has_labels`] and [`has_no_labels`].
#[derive(Debug, Clone)]
pub struct HasLabels {
    expected: BTreeSet<String>,
}

/// Expect every label of the node to be one of `labels`.
pub fn has_labels<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> HasLabels {
    HasLabels { expected: labels.into_iter().map(Into::into).collect() }
}

/// Expect the node to carry no labels.
pub const fn has_no_labels() -> HasLabels {
    HasLabels { expected: BTreeSet::new() }
}

impl<E: StorageEngine + 'static> TxMatcher<E, NodeId> for HasLabels {
    fn describe(&self) -> String {
        render_set(&self.expected)
    }

    fn matches_in(&self, tx: &GraphTransaction<'_, E>, item: &NodeId) -> Result<MatchResult> {
        let found = label_names(tx, *item)?;
        if found.is_subset(&self.expected) {
            Ok(MatchResult::Match)
        } else {
            Ok(MatchResult::mismatch(format!("was {}", render_set(&found))))
        }
    }
}

// ============================================================================
// Properties
// ============================================================================

/// Matches a node with a property. Created by [`has_property`].
#[derive(Debug, Clone)]
pub struct HasProperty {
    key: String,
}

/// Expect the node to have a property named `key`.
pub fn has_property(key: impl Into<String>) -> HasProperty {
    HasProperty { key: key.into() }
}

impl HasProperty {
    /// Also expect the property to equal `value`.
    pub fn with_value(self, value: impl Into<Value>) -> PropertyValue {
        PropertyValue { key: self.key, value: value.into() }
    }

    fn missing(&self) -> MatchResult {
        MatchResult::mismatch(format!("found node without property named '{}'", self.key))
    }
}

impl<E: StorageEngine + 'static> TxMatcher<E, NodeId> for HasProperty {
    fn describe(&self) -> String {
        format!("node with property name '{}' ", self.key)
    }

    fn matches_in(&self, tx: &GraphTransaction<'_, E>, item: &NodeId) -> Result<MatchResult> {
        if tx.get_node(*item)?.has_property(&self.key) {
            Ok(MatchResult::Match)
        } else {
            Ok(self.missing())
        }
    }
}

/// Matches a node whose property has a given value. Created by
/// [`HasProperty::with_value`].
#[derive(Debug, Clone)]
pub struct PropertyValue {
    key: String,
    value: Value,
}

impl<E: StorageEngine + 'static> TxMatcher<E, NodeId> for PropertyValue {
    fn describe(&self) -> String {
        format!("node with property name '{}' having value {}", self.key, render_value(&self.value))
    }

    fn matches_in(&self, tx: &GraphTransaction<'_, E>, item: &NodeId) -> Result<MatchResult> {
        let node = tx.get_node(*item)?;
        match node.get_property(&self.key) {
            None => Ok(HasProperty { key: self.key.clone() }.missing()),
            Some(found) if *found == self.value => Ok(MatchResult::Match),
            Some(found) => {
                Ok(MatchResult::mismatch(format!("found value {}", render_value(found))))
            }
        }
    }
}

// ============================================================================
// Graph
// ============================================================================

/// The graph as a whole, as the subject of an assertion.
///
/// ```
/// use graphassert::node::{has_no_nodes, GlobalOperations};
/// use graphassert::{assert_that, in_tx, GraphDatabase};
///
/// let db = GraphDatabase::in_memory();
/// assert_that(&GlobalOperations, &in_tx(&db, has_no_nodes("Person")));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalOperations;

fn nodes_with_label<E: StorageEngine + 'static>(
    tx: &GraphTransaction<'_, E>,
    label: &Label,
) -> Result<BTreeSet<NodeId>> {
    Ok(tx.find_nodes_by_label(label)?.collect::<GraphResult<_>>()?)
}

/// Matches when no node carries a label. Created by [`has_no_nodes`].
#[derive(Debug, Clone)]
pub struct HasNoNodes {
    label: Label,
}

/// Expect no node to carry `label`.
pub fn has_no_nodes(label: impl Into<Label>) -> HasNoNodes {
    HasNoNodes { label: label.into() }
}

impl<E: StorageEngine + 'static> TxMatcher<E, GlobalOperations> for HasNoNodes {
    fn describe(&self) -> String {
        format!("no nodes with label {}", self.label)
    }

    fn matches_in(
        &self,
        tx: &GraphTransaction<'_, E>,
        _item: &GlobalOperations,
    ) -> Result<MatchResult> {
        let found = nodes_with_label(tx, &self.label)?;
        if found.is_empty() {
            Ok(MatchResult::Match)
        } else {
            Ok(MatchResult::mismatch(format!("found {}", render_set(&found))))
        }
    }
}

/// Matches when exactly the expected nodes carry a label. Created by
/// [`has_nodes`].
#[derive(Debug, Clone)]
pub struct HasNodes {
    label: Label,
    expected: BTreeSet<NodeId>,
}

/// Expect exactly `nodes` to carry `label`.
pub fn has_nodes(label: impl Into<Label>, nodes: impl IntoIterator<Item = NodeId>) -> HasNodes {
    HasNodes { label: label.into(), expected: nodes.into_iter().collect() }
}

impl<E: StorageEngine + 'static> TxMatcher<E, GlobalOperations> for HasNodes {
    fn describe(&self) -> String {
        format!("{} with label {}", render_set(&self.expected), self.label)
    }

    fn matches_in(
        &self,
        tx: &GraphTransaction<'_, E>,
        _item: &GlobalOperations,
    ) -> Result<MatchResult> {
        let found = nodes_with_label(tx, &self.label)?;
        if found == self.expected {
            Ok(MatchResult::Match)
        } else {
            Ok(MatchResult::mismatch(format!("found {}", render_set(&found))))
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_render_value_quotes_strings() {
        assert_eq!(render_value(&Value::from("Alice")), "'Alice'");
        assert_eq!(render_value(&Value::Int(42)), "42");
        assert_eq!(render_value(&Value::Bool(true)), "true");
    }

    #[test]
    fn test_label_name_set() {
        let labels = [Label::new("B"), Label::new("A"), Label::new("B")];
        let names = as_label_name_set(&labels);
        assert_eq!(render_set(&names), "[A, B]");
    }

    proptest! {
        #[test]
        fn label_name_set_ignores_order_and_duplicates(
            names in prop::collection::vec("[A-Z][a-z]{0,6}", 0..8),
            rotation in 0usize..16,
        ) {
            let labels: Vec<Label> = names.iter().map(Label::new).collect();

            let mut shuffled: Vec<Label> = labels.iter().rev().cloned().collect();
            shuffled.extend(labels.iter().cloned());
            if !shuffled.is_empty() {
                let len = shuffled.len();
                shuffled.rotate_left(rotation % len);
            }

            let expected: BTreeSet<String> = names.into_iter().collect();
            prop_assert_eq!(as_label_name_set(&labels), expected.clone());
            prop_assert_eq!(as_label_name_set(&shuffled), expected);
        }
    }
}
