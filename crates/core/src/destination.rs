// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Where a virtual timeline starts, and how far it is displaced.

use crate::clock::{duration_to_ns, system_time_to_ns, Clock, SystemClock, NANOS_PER_SEC};
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::time::{Duration, SystemTime};
use thiserror::Error;

/// Errors raised by the virtual clock primitive
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClockError {
    #[error("invalid destination {0:?}: expected RFC 3339, YYYY-MM-DD or epoch seconds")]
    InvalidDestination(String),
    #[error("destination out of range: {0}")]
    OutOfRange(String),
    #[error("invalid shift of {0} seconds")]
    InvalidShift(f64),
    #[error("invalid tick rate {0}: must be finite and positive")]
    InvalidTickRate(f64),
}

/// The instant a virtual timeline is placed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Destination {
    /// The real current instant.
    #[default]
    Now,
    /// The real current instant plus an offset.
    FromNow(Duration),
    /// An absolute instant, in nanoseconds since the Unix epoch.
    EpochNanos(i64),
}

impl Destination {
    pub fn epoch_secs(secs: i64) -> Self {
        Destination::EpochNanos(secs.saturating_mul(NANOS_PER_SEC))
    }

    /// Fractional epoch seconds, e.g. `1.5` for 1.5s past the epoch.
    pub fn epoch_secs_f64(secs: f64) -> Result<Self, ClockError> {
        secs_f64_to_ns(secs)
            .map(Destination::EpochNanos)
            .ok_or_else(|| ClockError::OutOfRange(secs.to_string()))
    }

    /// Parse an RFC 3339 timestamp, a `YYYY-MM-DD` date (midnight UTC), or
    /// numeric epoch seconds. `"now"` (any case) and the empty string mean
    /// [`Destination::Now`].
    pub fn parse(input: &str) -> Result<Self, ClockError> {
        let input = input.trim();
        if input.is_empty() || input.eq_ignore_ascii_case("now") {
            return Ok(Destination::Now);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return dt
                .timestamp_nanos_opt()
                .map(Destination::EpochNanos)
                .ok_or_else(|| ClockError::OutOfRange(input.to_string()));
        }

        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            return date
                .and_hms_opt(0, 0, 0)
                .and_then(|dt| dt.and_utc().timestamp_nanos_opt())
                .map(Destination::EpochNanos)
                .ok_or_else(|| ClockError::OutOfRange(input.to_string()));
        }

        match input.parse::<f64>() {
            Ok(secs) if secs.is_finite() => Self::epoch_secs_f64(secs),
            _ => Err(ClockError::InvalidDestination(input.to_string())),
        }
    }

    /// Absolute nanoseconds since the epoch, with `now_ns` standing in for
    /// the real current instant.
    pub fn resolve_at(&self, now_ns: i64) -> i64 {
        match self {
            Destination::Now => now_ns,
            Destination::FromNow(offset) => now_ns.saturating_add(duration_to_ns(*offset)),
            Destination::EpochNanos(ns) => *ns,
        }
    }

    /// Absolute nanoseconds since the epoch, relative to the real clock.
    pub fn resolve(&self) -> i64 {
        self.resolve_at(SystemClock.now_ns())
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Now => f.write_str("now"),
            Destination::FromNow(offset) => write!(f, "now+{:?}", offset),
            Destination::EpochNanos(ns) => {
                let secs = ns.div_euclid(NANOS_PER_SEC);
                let nanos = ns.rem_euclid(NANOS_PER_SEC) as u32;
                match DateTime::<Utc>::from_timestamp(secs, nanos) {
                    Some(dt) => write!(f, "{}", dt.to_rfc3339()),
                    None => write!(f, "{}ns", ns),
                }
            }
        }
    }
}

impl From<SystemTime> for Destination {
    fn from(time: SystemTime) -> Self {
        Destination::EpochNanos(system_time_to_ns(time))
    }
}

impl From<DateTime<Utc>> for Destination {
    fn from(dt: DateTime<Utc>) -> Self {
        match dt.timestamp_nanos_opt() {
            Some(ns) => Destination::EpochNanos(ns),
            None if dt.timestamp() < 0 => Destination::EpochNanos(i64::MIN),
            None => Destination::EpochNanos(i64::MAX),
        }
    }
}

/// Whole seconds since the epoch.
impl From<i64> for Destination {
    fn from(secs: i64) -> Self {
        Destination::epoch_secs(secs)
    }
}

/// An offset from the real current instant.
impl From<Duration> for Destination {
    fn from(offset: Duration) -> Self {
        Destination::FromNow(offset)
    }
}

/// A signed displacement of a virtual timeline, in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Shift(i64);

impl Shift {
    pub const ZERO: Shift = Shift(0);

    pub fn from_nanos(ns: i64) -> Self {
        Shift(ns)
    }

    pub fn secs(secs: i64) -> Self {
        Shift(secs.saturating_mul(NANOS_PER_SEC))
    }

    /// Fractional seconds; rejects NaN, infinities and values beyond ±292 years.
    pub fn secs_f64(secs: f64) -> Result<Self, ClockError> {
        secs_f64_to_ns(secs).map(Shift).ok_or(ClockError::InvalidShift(secs))
    }

    pub fn forward(duration: Duration) -> Self {
        Shift(duration_to_ns(duration))
    }

    pub fn backward(duration: Duration) -> Self {
        Shift(duration_to_ns(duration).saturating_neg())
    }

    pub fn as_nanos(&self) -> i64 {
        self.0
    }

    pub fn is_backward(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}s", self.0 as f64 / NANOS_PER_SEC as f64)
    }
}

/// Whole seconds, either direction.
impl From<i64> for Shift {
    fn from(secs: i64) -> Self {
        Shift::secs(secs)
    }
}

impl From<i32> for Shift {
    fn from(secs: i32) -> Self {
        Shift::secs(secs.into())
    }
}

impl From<Duration> for Shift {
    fn from(duration: Duration) -> Self {
        Shift::forward(duration)
    }
}

impl TryFrom<f64> for Shift {
    type Error = ClockError;

    fn try_from(secs: f64) -> Result<Self, Self::Error> {
        Shift::secs_f64(secs)
    }
}

fn secs_f64_to_ns(secs: f64) -> Option<i64> {
    let ns = (secs * NANOS_PER_SEC as f64).round();
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    if ns.is_finite() && ns >= i64::MIN as f64 && ns < i64::MAX as f64 {
        Some(ns as i64)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "destination_tests.rs"]
mod tests;
