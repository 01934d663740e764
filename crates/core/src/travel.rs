// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The virtual clock primitive.
//!
//! A [`TravelClock`] is a shared handle to one virtual timeline. The timeline
//! is stored as an anchor: the virtual instant it was last placed at, and the
//! real [`Instant`] at which that happened. Reading the clock projects the real
//! time elapsed since the anchor onto the virtual timeline at the tick rate.
//! Every displacement re-anchors, so ticking resumes from the new instant.

use crate::clock::{duration_to_ns, ns_to_system_time, Clock, NANOS_PER_SEC};
use crate::destination::{ClockError, Destination, Shift};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

/// How a virtual timeline moves while nobody is displacing it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Tick {
    /// Only explicit displacement moves the clock.
    Frozen,
    /// One virtual nanosecond per real nanosecond.
    #[default]
    Realtime,
    /// `rate` virtual nanoseconds per real nanosecond.
    Scaled(f64),
}

impl Tick {
    /// `true` ticks in real time, `false` freezes.
    pub fn from_flag(tick: bool) -> Self {
        if tick {
            Tick::Realtime
        } else {
            Tick::Frozen
        }
    }

    pub fn scaled(rate: f64) -> Result<Self, ClockError> {
        Tick::Scaled(rate).validated()
    }

    pub fn is_frozen(&self) -> bool {
        matches!(self, Tick::Frozen)
    }

    pub fn validated(self) -> Result<Self, ClockError> {
        match self {
            Tick::Scaled(rate) if !rate.is_finite() || rate <= 0.0 => {
                Err(ClockError::InvalidTickRate(rate))
            }
            tick => Ok(tick),
        }
    }

    fn advance(&self, anchor_ns: i64, real_elapsed: Duration) -> i64 {
        match self {
            Tick::Frozen => anchor_ns,
            Tick::Realtime => anchor_ns.saturating_add(duration_to_ns(real_elapsed)),
            // float-to-int casts saturate
            Tick::Scaled(rate) => {
                anchor_ns.saturating_add((real_elapsed.as_nanos() as f64 * rate) as i64)
            }
        }
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tick::Frozen => f.write_str("frozen"),
            Tick::Realtime => f.write_str("ticking"),
            Tick::Scaled(rate) => write!(f, "ticking x{}", rate),
        }
    }
}

struct Timeline {
    anchor_ns: i64,
    anchored_at: Instant,
    tick: Tick,
}

impl Timeline {
    fn now_ns(&self) -> i64 {
        self.tick.advance(self.anchor_ns, self.anchored_at.elapsed())
    }

    fn reanchor(&mut self, ns: i64) {
        self.anchor_ns = ns;
        self.anchored_at = Instant::now();
    }
}

/// Shared handle to a virtual timeline
#[derive(Clone)]
pub struct TravelClock {
    timeline: Arc<Mutex<Timeline>>,
}

impl TravelClock {
    /// Place a new timeline at `destination`.
    pub fn start(destination: impl Into<Destination>, tick: Tick) -> Result<Self, ClockError> {
        let tick = tick.validated()?;
        let anchor_ns = destination.into().resolve();
        Ok(Self {
            timeline: Arc::new(Mutex::new(Timeline {
                anchor_ns,
                anchored_at: Instant::now(),
                tick,
            })),
        })
    }

    /// Displace the timeline by a signed amount.
    pub fn shift(&self, by: impl Into<Shift>) {
        let by = by.into();
        let mut timeline = self.timeline.lock();
        let target = timeline.now_ns().saturating_add(by.as_nanos());
        timeline.reanchor(target);
        tracing::trace!(shift = %by, now_ns = target, "timeline shifted");
    }

    /// Forward displacement; what a virtual sleep does.
    pub fn advance(&self, duration: Duration) {
        self.shift(Shift::forward(duration));
    }

    /// Place the timeline at an absolute instant.
    pub fn move_to(&self, destination: impl Into<Destination>) {
        let destination = destination.into();
        let target = destination.resolve();
        self.timeline.lock().reanchor(target);
        tracing::trace!(%destination, now_ns = target, "timeline moved");
    }

    pub fn tick(&self) -> Tick {
        self.timeline.lock().tick
    }

    /// Switch between ticking and frozen without losing or gaining time.
    pub fn set_tick(&self, tick: Tick) -> Result<(), ClockError> {
        let tick = tick.validated()?;
        let mut timeline = self.timeline.lock();
        let current = timeline.now_ns();
        timeline.reanchor(current);
        timeline.tick = tick;
        Ok(())
    }

    pub fn now(&self) -> SystemTime {
        ns_to_system_time(self.now_ns())
    }

    pub fn epoch_secs(&self) -> f64 {
        self.now_ns() as f64 / NANOS_PER_SEC as f64
    }
}

impl Clock for TravelClock {
    fn now_ns(&self) -> i64 {
        self.timeline.lock().now_ns()
    }
}

impl fmt::Debug for TravelClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timeline = self.timeline.lock();
        f.debug_struct("TravelClock")
            .field("now_ns", &timeline.now_ns())
            .field("tick", &timeline.tick)
            .finish()
    }
}

#[cfg(test)]
#[path = "travel_tests.rs"]
mod tests;
