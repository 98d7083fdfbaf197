//! Schema storage: index and constraint definitions.

use graphassert_core::encoding::keys::{
    encode_schema_constraint_key, encode_schema_index_key, PREFIX_SCHEMA_CONSTRAINT,
    PREFIX_SCHEMA_INDEX,
};
use graphassert_core::encoding::{Decoder, Encoder};
use graphassert_core::{ConstraintDefinition, IndexDefinition, IndexId, Label};
use graphassert_storage::Transaction;

use super::error::GraphResult;
use super::rows::{Records, Rows};

/// Table name for index definitions.
pub const TABLE_SCHEMA_INDEXES: &str = "schema_indexes";

/// Table name for constraint definitions.
pub const TABLE_SCHEMA_CONSTRAINTS: &str = "schema_constraints";

/// Persistent schema definitions.
///
/// Definitions are ordinary transactional data: an index or constraint
/// created in a transaction that rolls back never existed. The build state
/// of an index is not stored here; see [`IndexRegistry`](crate::index::IndexRegistry).
pub struct SchemaStore;

impl SchemaStore {
    /// Store an index definition.
    pub fn put_index<T: Transaction>(tx: &mut T, index: &IndexDefinition) -> GraphResult<()> {
        tx.put(TABLE_SCHEMA_INDEXES, &encode_schema_index_key(index.id), &index.encode()?)?;
        Ok(())
    }

    /// Get an index definition by ID.
    pub fn get_index<T: Transaction>(tx: &T, id: IndexId) -> GraphResult<Option<IndexDefinition>> {
        match tx.get(TABLE_SCHEMA_INDEXES, &encode_schema_index_key(id))? {
            Some(value) => Ok(Some(IndexDefinition::decode(&value)?)),
            None => Ok(None),
        }
    }

    /// Lazily list every index definition, in ID order.
    pub fn indexes<T: Transaction>(tx: &T) -> GraphResult<Rows<'_, IndexDefinition>> {
        let cursor = tx.scan_prefix(TABLE_SCHEMA_INDEXES, &[PREFIX_SCHEMA_INDEX])?;
        Ok(Rows::new(Records::new(cursor)))
    }

    /// Lazily list the index definitions on `label`.
    pub fn indexes_for_label<'c, T: Transaction>(
        tx: &'c T,
        label: &Label,
    ) -> GraphResult<Rows<'c, IndexDefinition>> {
        let label = label.clone();
        let all = Self::indexes(tx)?;
        Ok(Rows::new(all.filter(move |index| index.as_ref().map_or(true, |i| i.label == label))))
    }

    /// Load every index definition.
    pub fn all_indexes<T: Transaction>(tx: &T) -> GraphResult<Vec<IndexDefinition>> {
        Self::indexes(tx)?.collect()
    }

    /// Store a constraint definition.
    pub fn put_constraint<T: Transaction>(
        tx: &mut T,
        constraint: &ConstraintDefinition,
    ) -> GraphResult<()> {
        let key = encode_schema_constraint_key(constraint.id);
        tx.put(TABLE_SCHEMA_CONSTRAINTS, &key, &constraint.encode()?)?;
        Ok(())
    }

    /// Lazily list every constraint definition, in ID order.
    pub fn constraints<T: Transaction>(tx: &T) -> GraphResult<Rows<'_, ConstraintDefinition>> {
        let cursor = tx.scan_prefix(TABLE_SCHEMA_CONSTRAINTS, &[PREFIX_SCHEMA_CONSTRAINT])?;
        Ok(Rows::new(Records::new(cursor)))
    }

    /// Lazily list the constraint definitions on `label`.
    pub fn constraints_for_label<'c, T: Transaction>(
        tx: &'c T,
        label: &Label,
    ) -> GraphResult<Rows<'c, ConstraintDefinition>> {
        let label = label.clone();
        let all = Self::constraints(tx)?;
        Ok(Rows::new(all.filter(move |c| c.as_ref().map_or(true, |c| c.label == label))))
    }

    /// Load every constraint definition.
    pub fn all_constraints<T: Transaction>(tx: &T) -> GraphResult<Vec<ConstraintDefinition>> {
        Self::constraints(tx)?.collect()
    }
}
