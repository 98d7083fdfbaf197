//! Set comparisons over materialized collections.
//!
//! Both sides are compared as ordered sets, so element order and duplicate
//! counts do not matter. Sets render as `[a, b, c]` in ascending order.

use std::collections::BTreeSet;
use std::fmt::Display;

use crate::deferred::Materialize;
use crate::error::Result;
use crate::matcher::{MatchResult, Matcher};

/// Render items as `[a, b, c]`.
pub fn render_set<'a, T, I>(items: I) -> String
where
    T: Display + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let parts: Vec<String> = items.into_iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}

fn found_set<D, T>(item: &D) -> Result<BTreeSet<T>>
where
    D: Materialize<Item = T> + ?Sized,
    T: Ord,
{
    Ok(item.collection()?.into_iter().collect())
}

/// Matches when the collection holds exactly the `expected` elements.
#[derive(Debug, Clone)]
pub struct ContainsOnly<T> {
    expected: BTreeSet<T>,
}

/// Expect exactly these elements, in any order.
pub fn contains_only<T: Ord>(expected: impl IntoIterator<Item = T>) -> ContainsOnly<T> {
    ContainsOnly { expected: expected.into_iter().collect() }
}

impl<D, T> Matcher<D> for ContainsOnly<T>
where
    D: Materialize<Item = T> + ?Sized,
    T: Ord + Display,
{
    fn describe(&self) -> String {
        format!("exactly {}", render_set(&self.expected))
    }

    fn matches(&self, item: &D) -> Result<MatchResult> {
        let found = found_set(item)?;
        if found == self.expected {
            Ok(MatchResult::Match)
        } else {
            Ok(MatchResult::mismatch(format!("found {}", render_set(&found))))
        }
    }
}

/// Matches when the collection holds at least the `expected` elements.
#[derive(Debug, Clone)]
pub struct Contains<T> {
    expected: BTreeSet<T>,
}

/// Expect these elements, and possibly others.
pub fn contains<T: Ord>(expected: impl IntoIterator<Item = T>) -> Contains<T> {
    Contains { expected: expected.into_iter().collect() }
}

impl<D, T> Matcher<D> for Contains<T>
where
    D: Materialize<Item = T> + ?Sized,
    T: Ord + Display,
{
    fn describe(&self) -> String {
        format!("contains {}", render_set(&self.expected))
    }

    fn matches(&self, item: &D) -> Result<MatchResult> {
        let found = found_set(item)?;
        if found.is_superset(&self.expected) {
            Ok(MatchResult::Match)
        } else {
            Ok(MatchResult::mismatch(format!("found {}", render_set(&found))))
        }
    }
}

/// Matches an empty collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsEmpty;

/// Expect no elements.
pub const fn is_empty() -> IsEmpty {
    IsEmpty
}

impl<D, T> Matcher<D> for IsEmpty
where
    D: Materialize<Item = T> + ?Sized,
    T: Ord + Display,
{
    fn describe(&self) -> String {
        "empty collection".to_owned()
    }

    fn matches(&self, item: &D) -> Result<MatchResult> {
        let found = found_set(item)?;
        if found.is_empty() {
            Ok(MatchResult::Match)
        } else {
            Ok(MatchResult::mismatch(format!("was {}", render_set(&found))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::check;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_render_set() {
        assert_eq!(render_set(&BTreeSet::<i64>::new()), "[]");
        assert_eq!(render_set(&[3, 1, 2]), "[3, 1, 2]");
        assert_eq!(render_set(&contains_only([3, 1, 2]).expected), "[1, 2, 3]");
    }

    #[test]
    fn test_contains_only() {
        let ab = strings(&["A", "B"]);
        let same = check(&strings(&["B", "A", "A"]), &contains_only(ab.clone())).expect("check");
        assert!(same.is_match());

        let outcome = check(&strings(&["A", "B", "C"]), &contains_only(ab.clone())).expect("check");
        assert_eq!(outcome, MatchResult::mismatch("found [A, B, C]"));
        assert_eq!(Matcher::<Vec<String>>::describe(&contains_only(ab)), "exactly [A, B]");
    }

    #[test]
    fn test_contains() {
        let found = strings(&["A", "B"]);
        assert!(check(&found, &contains(strings(&["A"]))).expect("check").is_match());

        let outcome = check(&found, &contains(strings(&["A", "C"]))).expect("check");
        assert_eq!(outcome, MatchResult::mismatch("found [A, B]"));
        let description = Matcher::<Vec<String>>::describe(&contains(strings(&["C", "A"])));
        assert_eq!(description, "contains [A, C]");
    }

    #[test]
    fn test_is_empty() {
        assert!(check(&Vec::<String>::new(), &is_empty()).expect("check").is_match());

        let outcome = check(&strings(&["A"]), &is_empty()).expect("check");
        assert_eq!(outcome, MatchResult::mismatch("was [A]"));
        assert_eq!(Matcher::<Vec<String>>::describe(&is_empty()), "empty collection");
    }

    #[test]
    fn test_slices_materialize() {
        let found: &[i64] = &[2, 1];
        assert!(check(found, &contains_only([1, 2])).expect("check").is_match());
    }
}
