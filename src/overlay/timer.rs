// SPDX-License-Identifier: MPL-2.0
//! Auto-hide timer.
//!
//! A single cancellable deadline. Arming always cancels the previous
//! deadline first, so at most one is ever outstanding.

use crate::domain::ui::FadeTimeout;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct AutoHideTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl AutoHideTimer {
    #[must_use]
    pub fn new(timeout: FadeTimeout) -> Self {
        Self {
            delay: timeout.as_duration(),
            deadline: None,
        }
    }

    /// Cancels any pending deadline and schedules a new one `delay` after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.cancel();
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true exactly once when the deadline has passed, disarming
    /// the timer.
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

impl Default for AutoHideTimer {
    fn default() -> Self {
        Self::new(FadeTimeout::default())
    }
}
