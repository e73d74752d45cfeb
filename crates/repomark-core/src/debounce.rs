//! Cancellable scheduled task used to collapse rapid input into one action.
//!
//! The timer never reads the clock itself. Callers pass `now` in, which keeps
//! the state machine deterministic and lets an event loop compute how long it
//! may sleep via [`DebounceTimer::remaining`].

use std::time::{Duration, Instant};

/// A single resettable timer
///
/// At most one deadline is pending at any time. Scheduling again replaces the
/// previous deadline rather than queueing another one.
#[derive(Debug, Clone)]
pub struct DebounceTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Quiet period required before the timer fires
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any pending deadline and schedule a new one at `now + delay`
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the pending deadline, zero if already due
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Fire the timer if its deadline has passed
    ///
    /// Returns true exactly once per schedule; the deadline is consumed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Fire a pending timer immediately, regardless of its deadline
    pub fn fire_now(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}
