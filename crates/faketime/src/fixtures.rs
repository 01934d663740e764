// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ready-made sessions for tests.
//!
//! Each fixture returns a guard; the entry points are restored when it goes
//! out of scope, so one `let _time = frozentime();` covers a whole test.
//! Destination and tick rate come from `FAKETIME_DESTINATION` and
//! `FAKETIME_TICK_RATE`.

use crate::env;
use crate::session::FakeTime;
use faketime_core::Tick;

/// A ticking session.
///
/// # Panics
///
/// Panics if a session is already active or cannot be installed.
#[allow(clippy::expect_used)]
pub fn faketime() -> FakeTime {
    FakeTime::builder()
        .destination(env::fixture_destination())
        .tick_mode(env::fixture_tick())
        .begin()
        .expect("failed to start faketime fixture")
}

/// A frozen session: only sleeps and shifts move time.
///
/// # Panics
///
/// Panics if a session is already active or cannot be installed.
#[allow(clippy::expect_used)]
pub fn frozentime() -> FakeTime {
    FakeTime::builder()
        .destination(env::fixture_destination())
        .tick_mode(Tick::Frozen)
        .begin()
        .expect("failed to start frozentime fixture")
}
