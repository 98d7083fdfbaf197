//! Property indexes.
//!
//! - [`PropertyIndex`] - Entry maintenance and equality lookups
//! - [`IndexRegistry`] - Live build state shared with populator threads
//!
//! A new index is built on a background thread once the transaction that
//! created it commits. Until the build finishes the index reports
//! [`IndexState::Populating`](graphassert_core::IndexState::Populating) and
//! refuses direct lookups.

mod populator;
mod property;
mod registry;

pub(crate) use populator::spawn as spawn_populator;
pub use property::{PropertyIndex, TABLE_PROPERTY_INDEX};
pub use registry::IndexRegistry;
