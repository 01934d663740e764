// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Monotonic projection of a raw clock.
//!
//! The raw clock may be set backward or jitter; the projection never
//! decreases. Forward movement of the raw clock is passed through as a delta
//! on top of the highest value handed out so far, and the projection snaps up
//! to the raw reading whenever the raw reading overtakes it. Backward movement
//! holds the projection on its plateau.

use crate::clock::{Clock, NANOS_PER_SEC};

/// Non-decreasing nanosecond readings derived from a [`Clock`]
#[derive(Debug, Clone)]
pub struct MonotonicProjector<C: Clock> {
    clock: C,
    highest_seen: i64,
    previous_reading: i64,
}

impl<C: Clock> MonotonicProjector<C> {
    pub fn new(clock: C) -> Self {
        Self { clock, highest_seen: 0, previous_reading: 0 }
    }

    pub fn read_ns(&mut self) -> u64 {
        let current = self.clock.now_ns();
        let delta = current.saturating_sub(self.previous_reading);
        if delta > 0 {
            self.highest_seen = current.max(self.highest_seen.saturating_add(delta));
        }
        self.previous_reading = current;
        // highest_seen starts at 0 and never decreases
        self.highest_seen.max(0) as u64
    }

    pub fn read_seconds(&mut self) -> f64 {
        self.read_ns() as f64 / NANOS_PER_SEC as f64
    }

    pub fn highest_seen(&self) -> i64 {
        self.highest_seen
    }

    pub fn previous_reading(&self) -> i64 {
        self.previous_reading
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
#[path = "monotonic_tests.rs"]
mod tests;
