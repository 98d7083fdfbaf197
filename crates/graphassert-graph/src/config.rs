//! Database configuration.

use std::time::Duration;

/// Configuration for a [`GraphDatabase`](crate::GraphDatabase).
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    /// Time each index populator waits before it starts building.
    /// Default: no delay.
    pub population_delay: Duration,
}

impl DatabaseConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delay before each index build starts.
    ///
    /// Useful in tests that need an index to stay populating for a while.
    #[must_use]
    pub const fn population_delay(mut self, delay: Duration) -> Self {
        self.population_delay = delay;
        self
    }
}
