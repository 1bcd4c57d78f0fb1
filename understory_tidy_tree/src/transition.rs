// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Busy window that blocks overlapping toggles while an animation runs.
//!
//! The engine never reads a clock. Hosts pass a monotonic timestamp in
//! milliseconds with every interaction, the same convention click tracking
//! uses, and the lock compares against it.
//!
//! ```
//! use understory_tidy_tree::TransitionLock;
//!
//! let mut lock = TransitionLock::new();
//! let deadline = lock.begin(1_000, 500);
//! assert_eq!(deadline, 1_510);
//!
//! assert!(!lock.settle(1_200));
//! assert!(lock.is_busy());
//! assert!(lock.settle(1_510));
//! assert!(!lock.is_busy());
//! ```

/// Extra time added to every transition before the lock releases.
pub const SETTLE_GRACE_MS: u64 = 10;

/// Tracks whether a transition is still in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransitionLock {
    busy_until: Option<u64>,
}

impl TransitionLock {
    /// An idle lock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a transition of `duration_ms` at `now`; returns the release deadline.
    ///
    /// Starting while busy moves the deadline.
    pub fn begin(&mut self, now: u64, duration_ms: u64) -> u64 {
        let deadline = now.saturating_add(duration_ms).saturating_add(SETTLE_GRACE_MS);
        self.busy_until = Some(deadline);
        deadline
    }

    /// Whether a transition was started and not yet settled.
    pub fn is_busy(&self) -> bool {
        self.busy_until.is_some()
    }

    /// Deadline of the running transition, if any.
    pub fn deadline(&self) -> Option<u64> {
        self.busy_until
    }

    /// Release the lock if `now` has reached the deadline.
    ///
    /// Returns `true` when this call released it.
    pub fn settle(&mut self, now: u64) -> bool {
        match self.busy_until {
            Some(deadline) if now >= deadline => {
                self.busy_until = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any running transition immediately.
    pub fn reset(&mut self) {
        self.busy_until = None;
    }
}
