// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for fixtures and helpers.

use faketime_core::{Destination, Tick};
use std::time::Duration;

/// Where fixture sessions start (default now, configurable via
/// `FAKETIME_DESTINATION`). Unparseable values fall back to now with a warning.
pub fn fixture_destination() -> Destination {
    let Ok(raw) = std::env::var("FAKETIME_DESTINATION") else {
        return Destination::Now;
    };
    Destination::parse(&raw).unwrap_or_else(|err| {
        tracing::warn!(value = %raw, error = %err, "ignoring FAKETIME_DESTINATION");
        Destination::Now
    })
}

/// How fast the ticking fixture runs (default real time, configurable via
/// `FAKETIME_TICK_RATE`).
pub fn fixture_tick() -> Tick {
    std::env::var("FAKETIME_TICK_RATE")
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .and_then(|rate| Tick::scaled(rate).ok())
        .map(|tick| if tick == Tick::Scaled(1.0) { Tick::Realtime } else { tick })
        .unwrap_or(Tick::Realtime)
}

/// Real-time budget for `must_complete_quickly`
/// (default 1s, configurable via `FAKETIME_QUICK_MS`).
pub fn quick_limit() -> Duration {
    std::env::var("FAKETIME_QUICK_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(1))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
