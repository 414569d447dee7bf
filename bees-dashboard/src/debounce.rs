//! Resize coalescing.
//!
//! Every resize pushes the deadline out by one window. Only when the window
//! passes with no new resize does [`ResizeDebouncer::poll`] fire, once.
//! Time is passed in, so the caller owns the clock.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl ResizeDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a resize at `now`.
    pub fn note(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// True exactly once after the window has elapsed since the last resize.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}
