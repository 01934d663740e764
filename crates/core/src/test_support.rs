// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

/// Proptest strategies for displacements and sleeps.
pub mod strategies {
    use crate::Shift;
    use proptest::prelude::*;
    use std::time::Duration;

    /// Signed shifts up to a day either way, millisecond granularity.
    pub fn arb_shift() -> impl Strategy<Value = Shift> {
        (-86_400_000i64..=86_400_000).prop_map(|ms| Shift::from_nanos(ms * 1_000_000))
    }

    /// Sleep lengths up to a day, millisecond granularity.
    pub fn arb_sleep() -> impl Strategy<Value = Duration> {
        (0u64..=86_400_000).prop_map(Duration::from_millis)
    }

    /// One step of a session: either a shift or a sleep.
    #[derive(Debug, Clone, Copy)]
    pub enum TimeStep {
        Shift(Shift),
        Sleep(Duration),
    }

    pub fn arb_time_step() -> impl Strategy<Value = TimeStep> {
        prop_oneof![arb_shift().prop_map(TimeStep::Shift), arb_sleep().prop_map(TimeStep::Sleep)]
    }
}
