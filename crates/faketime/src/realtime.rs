// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Assertions against the real clock, which sessions never touch.

use crate::env;
use std::time::{Duration, Instant};

/// Run `body` and assert it took less than `FAKETIME_QUICK_MS` of real time.
///
/// # Panics
///
/// Panics if the budget is exceeded.
pub fn must_complete_quickly<R>(body: impl FnOnce() -> R) -> R {
    must_complete_within(env::quick_limit(), body)
}

/// Run `body` and assert it took less than `limit` of real time.
///
/// # Panics
///
/// Panics if `limit` is exceeded.
#[allow(clippy::panic)]
pub fn must_complete_within<R>(limit: Duration, body: impl FnOnce() -> R) -> R {
    let start = Instant::now();
    let output = body();
    let elapsed = start.elapsed();
    if elapsed >= limit {
        panic!("took {elapsed:?} of real time, limit is {limit:?}");
    }
    output
}

#[cfg(test)]
#[path = "realtime_tests.rs"]
mod tests;
