// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time entry points for host code.
//!
//! Code that wants its timing to be controllable in tests reads the clock and
//! sleeps through these functions instead of `std::time`/`std::thread`. Each
//! one defers to its hook when an override is bound.

use crate::hooks;
use faketime_core::clock::ns_to_system_time;
use faketime_core::NANOS_PER_SEC;
use std::time::{Duration, SystemTime};

/// Current wall-clock time
pub fn now() -> SystemTime {
    ns_to_system_time(time_ns())
}

/// Wall-clock nanoseconds since the Unix epoch
pub fn time_ns() -> i64 {
    match hooks::WALL_TIME_NS.get() {
        Some(f) => f(),
        None => real::time_ns(),
    }
}

/// Wall-clock seconds since the Unix epoch
pub fn time() -> f64 {
    time_ns() as f64 / NANOS_PER_SEC as f64
}

/// Monotonic nanoseconds from an arbitrary origin
pub fn monotonic_ns() -> u64 {
    match hooks::MONOTONIC_NS.get() {
        Some(f) => f(),
        None => real::monotonic_ns(),
    }
}

/// Monotonic seconds from an arbitrary origin
pub fn monotonic() -> f64 {
    match hooks::MONOTONIC.get() {
        Some(f) => f(),
        None => real::monotonic(),
    }
}

/// Block the current thread for `duration`
pub fn sleep(duration: Duration) {
    match hooks::SYNC_SLEEP.get() {
        Some(f) => f(duration),
        None => real::sleep(duration),
    }
}

/// The unhooked implementations. Never redirected.
pub mod real {
    use faketime_core::clock::duration_to_ns;
    use faketime_core::{Clock, SystemClock, NANOS_PER_SEC};
    use std::sync::OnceLock;
    use std::time::{Duration, Instant};

    static ORIGIN: OnceLock<Instant> = OnceLock::new();

    pub fn time_ns() -> i64 {
        SystemClock.now_ns()
    }

    pub fn monotonic_ns() -> u64 {
        let origin = ORIGIN.get_or_init(Instant::now);
        duration_to_ns(origin.elapsed()).max(0) as u64
    }

    pub fn monotonic() -> f64 {
        monotonic_ns() as f64 / NANOS_PER_SEC as f64
    }

    pub fn sleep(duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod tests;
