//! Settle-delay debouncing for resize events.
//!
//! Re-sizing a window emits a burst of intermediate geometry events;
//! only the last one within the settle window should actually resize the
//! canvas buffer. Time is always passed in by the caller, so the unit is
//! testable without sleeping.

use std::time::{Duration, Instant};

/// Default settle delay before a pending resize fires.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct Debouncer {
    settle: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(settle: Duration) -> Self {
        Self {
            settle,
            deadline: None,
        }
    }

    /// Arms (or re-arms) the debouncer. A trigger inside an open settle
    /// window supersedes the pending one; only the last trigger before the
    /// window closes takes effect.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.settle);
    }

    /// Returns `true` exactly once when `now` has passed the armed
    /// deadline, then disarms.
    pub fn fire_ready(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drops any pending trigger.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_DELAY)
    }
}
