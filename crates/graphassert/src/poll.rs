//! Bounded polling.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::Result;

/// Default time to wait for a condition.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default pause between two checks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(10);

/// Configuration for [`poll_until`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// How long to keep checking before giving up.
    pub timeout: Duration,
    /// Pause between two checks.
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { timeout: DEFAULT_TIMEOUT, interval: DEFAULT_INTERVAL }
    }
}

impl PollConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how long to keep checking.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the pause between two checks.
    #[must_use]
    pub const fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// State reported by a polled condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// The condition holds.
    Ready,
    /// The condition does not hold yet.
    Pending,
    /// The condition can no longer hold.
    Failed(String),
}

/// Check `condition` until it is no longer [`Readiness::Pending`] or the
/// timeout elapses.
///
/// The condition is checked at least once, even with a zero timeout. On
/// timeout the last state, [`Readiness::Pending`], is returned; callers
/// decide what a timeout means.
///
/// # Errors
///
/// Returns the first error raised by `condition`.
pub fn poll_until<F>(config: &PollConfig, mut condition: F) -> Result<Readiness>
where
    F: FnMut() -> Result<Readiness>,
{
    let start = Instant::now();
    let deadline = start.checked_add(config.timeout);
    let mut attempts = 0u32;

    loop {
        attempts = attempts.saturating_add(1);
        let state = condition()?;
        if state != Readiness::Pending {
            debug!(attempts, elapsed = ?start.elapsed(), ?state, "poll finished");
            return Ok(state);
        }

        let now = Instant::now();
        let remaining = match deadline {
            Some(deadline) if now >= deadline => {
                warn!(attempts, timeout = ?config.timeout, "poll timed out");
                return Ok(Readiness::Pending);
            }
            Some(deadline) => deadline - now,
            None => config.interval,
        };
        thread::sleep(config.interval.min(remaining));
    }
}
