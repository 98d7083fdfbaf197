//! Predicates with diagnostics, and the transactional wrapper.
//!
//! - [`Matcher`] - A predicate that needs nothing but the item
//! - [`TxMatcher`] - A predicate that reads the store through a transaction
//! - [`in_tx`] - Lifts a [`TxMatcher`] into a [`Matcher`] that opens and
//!   closes its own transaction on every evaluation

use std::fmt;

use graphassert_graph::{GraphDatabase, GraphTransaction};
use graphassert_storage::StorageEngine;

use crate::error::Result;
use crate::scope::{in_transaction, TxOutcome};

/// Outcome of evaluating a predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// The expectation holds.
    Match,
    /// The expectation does not hold; the text describes what was found.
    Mismatch(String),
}

impl MatchResult {
    /// A mismatch with the given description.
    pub fn mismatch(description: impl Into<String>) -> Self {
        Self::Mismatch(description.into())
    }

    /// Returns `true` for [`MatchResult::Match`].
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }

    /// The mismatch description, if any.
    #[must_use]
    pub fn mismatch_description(&self) -> Option<&str> {
        match self {
            Self::Match => None,
            Self::Mismatch(text) => Some(text),
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Match => f.write_str("matched"),
            Self::Mismatch(text) => f.write_str(text),
        }
    }
}

/// A predicate over `T` that explains itself.
pub trait Matcher<T: ?Sized> {
    /// Describe the expectation, e.g. `exactly [a, b]`.
    fn describe(&self) -> String;

    /// Evaluate the predicate against `item`.
    ///
    /// A failed expectation is `Ok(MatchResult::Mismatch(..))`; `Err` is
    /// reserved for faults.
    fn matches(&self, item: &T) -> Result<MatchResult>;
}

/// A predicate over `T` that reads the store.
///
/// Evaluate it through [`in_tx`], which supplies the transaction.
pub trait TxMatcher<E: StorageEngine + 'static, T: ?Sized> {
    /// Describe the expectation.
    fn describe(&self) -> String;

    /// Evaluate the predicate against `item` inside `tx`.
    fn matches_in(&self, tx: &GraphTransaction<'_, E>, item: &T) -> Result<MatchResult>;
}

/// A [`TxMatcher`] bound to a database. Created by [`in_tx`].
pub struct InTx<'db, E: StorageEngine + 'static, M> {
    db: &'db GraphDatabase<E>,
    inner: M,
}

/// Wrap `inner` so that every evaluation runs in a fresh transaction.
///
/// Each call to [`Matcher::matches`] opens one transaction, evaluates
/// `inner`, and closes the transaction (rolling back) before returning,
/// also when `inner` fails or panics. The description and any mismatch text
/// of `inner` are passed through unchanged.
///
/// # Example
///
/// ```
/// use graphassert::node::has_label;
/// use graphassert::{assert_that, in_transaction, in_tx, GraphDatabase, TxOutcome};
///
/// let db = GraphDatabase::in_memory();
/// let id = in_transaction(&db, TxOutcome::Commit, |tx| {
///     let node = tx.create_node()?.with_label("Person");
///     tx.put_node(&node)?;
///     Ok(node.id)
/// })
/// .unwrap();
///
/// assert_that(&id, &in_tx(&db, has_label("Person")));
/// ```
pub fn in_tx<E, M>(db: &GraphDatabase<E>, inner: M) -> InTx<'_, E, M>
where
    E: StorageEngine + 'static,
{
    InTx { db, inner }
}

impl<E, M, T> Matcher<T> for InTx<'_, E, M>
where
    E: StorageEngine + 'static,
    M: TxMatcher<E, T>,
    T: ?Sized,
{
    fn describe(&self) -> String {
        self.inner.describe()
    }

    fn matches(&self, item: &T) -> Result<MatchResult> {
        in_transaction(self.db, TxOutcome::Rollback, |tx| self.inner.matches_in(tx, item))
    }
}

/// Evaluate `matcher` against `item` and return the outcome.
///
/// # Errors
///
/// Returns the matcher's fault, if it raised one.
pub fn check<T, M>(item: &T, matcher: &M) -> Result<MatchResult>
where
    T: ?Sized,
    M: Matcher<T> + ?Sized,
{
    matcher.matches(item)
}

/// Assert that `matcher` accepts `item`.
///
/// # Panics
///
/// Panics with the expectation and the mismatch description if the matcher
/// rejects `item`, and with the fault if evaluating it failed:
///
/// ```text
/// Expected: exactly [a, b]
///      but: found [a, b, c]
/// ```
#[track_caller]
pub fn assert_that<T, M>(item: &T, matcher: &M)
where
    T: ?Sized,
    M: Matcher<T> + ?Sized,
{
    match matcher.matches(item) {
        Ok(MatchResult::Match) => {}
        Ok(MatchResult::Mismatch(text)) => {
            panic!("\nExpected: {}\n     but: {text}", matcher.describe());
        }
        Err(e) => panic!("\nExpected: {}\n     but: failed with {e}", matcher.describe()),
    }
}
