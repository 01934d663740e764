// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Raw clock readings in nanoseconds since the Unix epoch.
//!
//! A [`Clock`] is allowed to jump around: it can be set backward, frozen, or
//! moved forward in arbitrary steps. Anything that needs a non-decreasing
//! reading wraps it in a [`MonotonicProjector`](crate::MonotonicProjector).

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const NANOS_PER_SEC: i64 = 1_000_000_000;
const NANOS_PER_MILLI: i64 = 1_000_000;

/// A clock that provides the current wall-style time
pub trait Clock: Clone + Send + Sync {
    /// Nanoseconds since the Unix epoch. Negative before the epoch.
    fn now_ns(&self) -> i64;

    fn epoch_ms(&self) -> i64 {
        self.now_ns().div_euclid(NANOS_PER_MILLI)
    }
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ns(&self) -> i64 {
        system_time_to_ns(SystemTime::now())
    }
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<i64>>,
}

impl FakeClock {
    pub fn new(start_ns: i64) -> Self {
        Self { current: Arc::new(Mutex::new(start_ns)) }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock();
        *current = current.saturating_add(duration_to_ns(duration));
    }

    /// Move the clock backward by the given duration
    pub fn rewind(&self, duration: Duration) {
        let mut current = self.current.lock();
        *current = current.saturating_sub(duration_to_ns(duration));
    }

    /// Set the clock to a specific reading
    pub fn set(&self, ns: i64) {
        *self.current.lock() = ns;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clock for FakeClock {
    fn now_ns(&self) -> i64 {
        *self.current.lock()
    }
}

/// Saturates at `i64::MAX` (roughly 292 years).
pub fn duration_to_ns(duration: Duration) -> i64 {
    i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX)
}

pub fn system_time_to_ns(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => duration_to_ns(after),
        Err(before) => duration_to_ns(before.duration()).saturating_neg(),
    }
}

pub fn ns_to_system_time(ns: i64) -> SystemTime {
    let magnitude = Duration::from_nanos(ns.unsigned_abs());
    let shifted = if ns >= 0 {
        UNIX_EPOCH.checked_add(magnitude)
    } else {
        UNIX_EPOCH.checked_sub(magnitude)
    };
    shifted.unwrap_or(UNIX_EPOCH)
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
