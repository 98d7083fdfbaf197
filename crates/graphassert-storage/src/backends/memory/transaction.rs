//! In-memory transactions and cursors.

use std::collections::btree_map;
use std::ops::Bound;
use std::sync::{Arc, MutexGuard};

use super::engine::{MemoryEngine, Tables};
use crate::engine::{Cursor, CursorResult, StorageError, Transaction};

/// Write access held by a write transaction until it completes.
struct Writer<'a> {
    engine: &'a MemoryEngine,
    _guard: MutexGuard<'a, ()>,
}

impl Drop for Writer<'_> {
    fn drop(&mut self) {
        // Runs before the guard is released.
        self.engine.release_writer();
    }
}

/// A transaction over a private copy of the table directory.
pub struct MemoryTransaction<'a> {
    tables: Tables,
    writer: Option<Writer<'a>>,
}

impl<'a> MemoryTransaction<'a> {
    pub(super) fn read(tables: Tables) -> Self {
        Self { tables, writer: None }
    }

    pub(super) fn write(engine: &'a MemoryEngine, guard: MutexGuard<'a, ()>, tables: Tables) -> Self {
        Self { tables, writer: Some(Writer { engine, _guard: guard }) }
    }

    fn ensure_writable(&self) -> Result<(), StorageError> {
        if self.writer.is_none() {
            return Err(StorageError::ReadOnly);
        }
        Ok(())
    }
}

impl Transaction for MemoryTransaction<'_> {
    type Cursor<'c>
        = MemoryCursor<'c>
    where
        Self: 'c;

    fn get(&self, table: &str, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.tables.get(table).and_then(|t| t.get(key)).cloned())
    }

    fn put(&mut self, table: &str, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        self.ensure_writable()?;
        let table = self.tables.entry(table.to_owned()).or_default();
        Arc::make_mut(table).insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, table: &str, key: &[u8]) -> Result<bool, StorageError> {
        self.ensure_writable()?;
        let Some(table) = self.tables.get_mut(table) else {
            return Ok(false);
        };
        if !table.contains_key(key) {
            return Ok(false);
        }
        Ok(Arc::make_mut(table).remove(key).is_some())
    }

    fn range(
        &self,
        table: &str,
        start: Bound<&[u8]>,
        end: Bound<&[u8]>,
    ) -> Result<Self::Cursor<'_>, StorageError> {
        check_range(start, end)?;
        let iter = self.tables.get(table).map(|t| t.range::<[u8], _>((start, end)));
        Ok(MemoryCursor { iter })
    }

    fn commit(self) -> Result<(), StorageError> {
        let Self { tables, writer } = self;
        match writer {
            Some(writer) => writer.engine.publish(tables),
            None => Ok(()),
        }
    }

    fn rollback(self) -> Result<(), StorageError> {
        Ok(())
    }

    fn is_read_only(&self) -> bool {
        self.writer.is_none()
    }
}

/// Reject ranges that `BTreeMap::range` would panic on.
fn check_range(start: Bound<&[u8]>, end: Bound<&[u8]>) -> Result<(), StorageError> {
    let (s, e) = match (start, end) {
        (Bound::Included(s) | Bound::Excluded(s), Bound::Included(e) | Bound::Excluded(e)) => {
            (s, e)
        }
        _ => return Ok(()),
    };
    let both_excluded = matches!((start, end), (Bound::Excluded(_), Bound::Excluded(_)));
    if s > e || (s == e && both_excluded) {
        return Err(StorageError::InvalidRange(format!("start {s:?} is after end {e:?}")));
    }
    Ok(())
}

/// A cursor over a key range of one table snapshot.
///
/// A cursor over a missing table is empty.
pub struct MemoryCursor<'c> {
    iter: Option<btree_map::Range<'c, Vec<u8>, Vec<u8>>>,
}

impl Cursor for MemoryCursor<'_> {
    fn next(&mut self) -> CursorResult {
        Ok(self.iter.as_mut().and_then(Iterator::next).map(|(k, v)| (k.clone(), v.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StorageEngine;

    #[test]
    fn test_read_only_rejects_writes() {
        let engine = MemoryEngine::new();
        let mut tx = engine.begin_read().expect("begin_read failed");
        assert!(tx.is_read_only());
        assert!(matches!(tx.put("t", b"k", b"v"), Err(StorageError::ReadOnly)));
        assert!(matches!(tx.delete("t", b"k"), Err(StorageError::ReadOnly)));
    }

    #[test]
    fn test_inverted_range_is_an_error() {
        let engine = MemoryEngine::new();
        let tx = engine.begin_read().expect("begin_read failed");
        let result = tx.range("t", Bound::Included(b"z".as_slice()), Bound::Excluded(b"a".as_slice()));
        assert!(matches!(result, Err(StorageError::InvalidRange(_))));

        let result = tx.range("t", Bound::Excluded(b"a".as_slice()), Bound::Excluded(b"a".as_slice()));
        assert!(matches!(result, Err(StorageError::InvalidRange(_))));
    }

    #[test]
    fn test_missing_table_yields_empty_cursor() {
        let engine = MemoryEngine::new();
        let tx = engine.begin_read().expect("begin_read failed");
        let mut cursor = tx.scan_prefix("missing", b"p").expect("scan failed");
        assert_eq!(cursor.next().expect("next failed"), None);
    }
}
