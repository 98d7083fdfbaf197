//! Lazy result sequences over storage cursors.

use std::marker::PhantomData;

use graphassert_core::encoding::keys::decode_trailing_node_id;
use graphassert_core::encoding::Decoder;
use graphassert_core::NodeId;
use graphassert_storage::Cursor;

use super::error::{GraphError, GraphResult};

/// A lazy sequence of query results.
///
/// `Rows` borrows the transaction that produced it, so it can only be
/// consumed while that transaction is open. Each item is a [`GraphResult`]
/// because reading the next row can fail; after the first error the
/// sequence ends.
pub struct Rows<'tx, T> {
    inner: Box<dyn Iterator<Item = GraphResult<T>> + 'tx>,
}

impl<'tx, T> Rows<'tx, T> {
    /// Wrap an iterator of results.
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = GraphResult<T>> + 'tx,
    {
        Self { inner: Box::new(iter) }
    }

    /// Rows over already materialized values.
    pub fn from_vec(items: Vec<T>) -> Self
    where
        T: 'tx,
    {
        Self::new(items.into_iter().map(Ok))
    }
}

impl<T> Iterator for Rows<'_, T> {
    type Item = GraphResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Yields the node ID at the end of each key of an index cursor.
pub(crate) struct KeyIds<C> {
    cursor: C,
    done: bool,
}

impl<C: Cursor> KeyIds<C> {
    pub(crate) const fn new(cursor: C) -> Self {
        Self { cursor, done: false }
    }
}

impl<C: Cursor> Iterator for KeyIds<C> {
    type Item = GraphResult<NodeId>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.cursor.next() {
            Ok(Some((key, _))) => Some(decode_trailing_node_id(&key).ok_or_else(|| {
                self.done = true;
                GraphError::Internal(format!("malformed index key: {key:02x?}"))
            })),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e.into()))
            }
        }
    }
}

/// Decodes each value of a cursor as a `T`.
pub(crate) struct Records<C, T> {
    cursor: C,
    done: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<C: Cursor, T: Decoder> Records<C, T> {
    pub(crate) const fn new(cursor: C) -> Self {
        Self { cursor, done: false, _marker: PhantomData }
    }
}

impl<C: Cursor, T: Decoder> Iterator for Records<C, T> {
    type Item = GraphResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = match self.cursor.next() {
            Ok(Some((_, value))) => T::decode(&value).map_err(GraphError::from),
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(e) => Err(e.into()),
        };
        if item.is_err() {
            self.done = true;
        }
        Some(item)
    }
}
