// Copyright 2025 the Feedview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-pending-timer throttle and debounce.
//!
//! Neither type reads a clock. Callers pass monotonic milliseconds in, and poll
//! with [`Throttle::fire`] / [`Debounce::fire`] from their timer or frame
//! callback. Both govern idempotent recomputation, so a superseded deadline is
//! simply overwritten rather than cancelled through a token.
//!
//! ## Minimal example
//!
//! ```
//! use feedview_scroll::timer::{Debounce, Throttle};
//!
//! let mut throttle = Throttle::new(100);
//! assert!(throttle.hit(0));
//! assert!(!throttle.hit(40)); // Already pending: dropped.
//! assert!(!throttle.fire(99));
//! assert!(throttle.fire(100));
//!
//! let mut debounce = Debounce::new(50);
//! debounce.schedule(0);
//! debounce.schedule(30); // Last call wins.
//! assert!(!debounce.fire(50));
//! assert!(debounce.fire(80));
//! ```

/// Runs at most one pass per interval, starting from the first hit.
///
/// Hits that arrive while a pass is pending are dropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Throttle {
    interval_ms: u64,
    deadline: Option<u64>,
}

impl Throttle {
    /// Creates an idle throttle.
    #[must_use]
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            deadline: None,
        }
    }

    /// Requests a pass; returns `true` if this call armed the timer.
    pub fn hit(&mut self, now_ms: u64) -> bool {
        if self.deadline.is_some() {
            return false;
        }
        self.deadline = Some(now_ms.saturating_add(self.interval_ms));
        true
    }

    /// Returns `true`, once, when the pending pass is due.
    pub fn fire(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// When the pending pass is due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// The configured interval.
    #[must_use]
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}

/// Runs once, `wait_ms` after the most recent schedule call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Debounce {
    wait_ms: u64,
    deadline: Option<u64>,
}

impl Debounce {
    /// Creates an idle debounce.
    #[must_use]
    pub fn new(wait_ms: u64) -> Self {
        Self {
            wait_ms,
            deadline: None,
        }
    }

    /// Replaces any pending deadline with `now_ms + wait_ms`.
    pub fn schedule(&mut self, now_ms: u64) {
        self.deadline = Some(now_ms.saturating_add(self.wait_ms));
    }

    /// Returns `true`, once, when the pending run is due.
    pub fn fire(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// When the pending run is due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }
}
