//! Trailing-edge debouncing for resize notifications.
//!
//! The debouncer does no I/O and owns no timer. Callers feed it the time
//! of each notification and ask it, at any later instant, whether the
//! quiet period has elapsed. The returned deadline tells an event loop
//! when to wake.

use std::time::{Duration, Instant};

/// Default quiet period before a coalesced pass runs.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(100);

/// Collapses bursts of notifications into a single trailing event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Debouncer::new(DEFAULT_QUIET_PERIOD)
    }
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Debouncer {
            quiet,
            deadline: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Record a notification at `now`, superseding any pending deadline.
    pub fn notify(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// When the pending event fires, if one is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Drop a pending event without firing it.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns true exactly once per burst, at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
