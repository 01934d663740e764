// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session manager.
//!
//! A [`FakeTime`] guard owns one virtual timeline and the bindings that route
//! every time entry point through it. At most one session exists per process.
//! Installation is all-or-nothing; teardown restores every entry point it
//! replaced, whether the session ends explicitly, by error, by panic, or
//! because the future holding it was dropped.
//!
//! A session begun inside a current-thread tokio runtime also takes over that
//! runtime's clock (see [`crate::scheduler`]) and hands it back at teardown.

use crate::adapters::{self, VirtualMonotonic};
use crate::scheduler::SchedulerLink;
use faketime_core::{ClockError, Destination, Shift, Tick, TravelClock};
use faketime_runtime::hooks::{self, Binding, HookError};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

static ACTIVE: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a faketime session is already active")]
    Nested,

    #[error("failed to install time overrides")]
    Install(#[source] HookError),

    #[error("failed to restore real implementations of: {}", .hooks.join(", "))]
    Restore { hooks: Vec<&'static str> },

    #[error(transparent)]
    Clock(#[from] ClockError),
}

/// Whether a session currently owns the time entry points.
pub fn is_active() -> bool {
    ACTIVE.load(Ordering::SeqCst)
}

/// Configures and starts a [`FakeTime`] session
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    destination: Destination,
    tick: Tick,
}

impl SessionBuilder {
    pub fn destination(mut self, destination: impl Into<Destination>) -> Self {
        self.destination = destination.into();
        self
    }

    /// `true` to tick in real time, `false` to freeze.
    pub fn tick(mut self, tick: bool) -> Self {
        self.tick = Tick::from_flag(tick);
        self
    }

    pub fn tick_mode(mut self, tick: Tick) -> Self {
        self.tick = tick;
        self
    }

    /// Tick at `rate` virtual seconds per real second. Validated by [`begin`](Self::begin).
    pub fn tick_rate(mut self, rate: f64) -> Self {
        self.tick = Tick::Scaled(rate);
        self
    }

    pub fn begin(self) -> Result<FakeTime, SessionError> {
        if ACTIVE.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).is_err() {
            return Err(SessionError::Nested);
        }
        let session = self.install();
        if session.is_err() {
            ACTIVE.store(false, Ordering::SeqCst);
        }
        session
    }

    fn install(self) -> Result<FakeTime, SessionError> {
        let clock = TravelClock::start(self.destination, self.tick)?;
        let monotonic = VirtualMonotonic::new(clock.clone());
        let scheduler = SchedulerLink::attach(&clock, &monotonic);

        let mut bindings = Vec::with_capacity(5);
        if let Err(err) = bind_all(&mut bindings, &clock, &monotonic, scheduler.as_ref()) {
            rollback(bindings);
            if let Some(scheduler) = &scheduler {
                scheduler.detach();
            }
            return Err(SessionError::Install(err));
        }

        tracing::debug!(
            destination = %self.destination,
            tick = %self.tick,
            scheduler = scheduler.is_some(),
            "session started"
        );
        Ok(FakeTime { clock, monotonic, scheduler, bindings, ended: false })
    }
}

fn bind_all(
    bindings: &mut Vec<Binding>,
    clock: &TravelClock,
    monotonic: &VirtualMonotonic,
    scheduler: Option<&SchedulerLink>,
) -> Result<(), HookError> {
    bindings.push(hooks::WALL_TIME_NS.bind(adapters::wall_time_ns(clock, scheduler))?);
    bindings.push(hooks::SYNC_SLEEP.bind(adapters::sync_sleep(clock, scheduler))?);
    bindings.push(hooks::MONOTONIC.bind(adapters::monotonic(monotonic, scheduler))?);
    bindings.push(hooks::MONOTONIC_NS.bind(adapters::monotonic_ns(monotonic, scheduler))?);
    bindings.push(hooks::ASYNC_SLEEP.bind(adapters::async_sleep(clock, scheduler))?);
    Ok(())
}

/// Release partially installed bindings, most recent first.
fn rollback(bindings: Vec<Binding>) {
    for binding in bindings.into_iter().rev() {
        let hook = binding.hook();
        if let Err(err) = binding.release() {
            tracing::error!(hook, error = %err, "rollback failed");
        }
    }
}

/// An active session. Dropping it restores the real time entry points.
pub struct FakeTime {
    clock: TravelClock,
    monotonic: VirtualMonotonic,
    scheduler: Option<SchedulerLink>,
    bindings: Vec<Binding>,
    ended: bool,
}

impl FakeTime {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Displace virtual time by a signed amount. Wall time follows exactly;
    /// monotonic readings never move backward.
    pub fn shift(&self, by: impl Into<Shift>) {
        let by = by.into();
        tracing::debug!(shift = %by, "session shift");
        self.clock.shift(by);
        self.catch_up();
    }

    pub fn move_to(&self, destination: impl Into<Destination>) {
        let destination = destination.into();
        tracing::debug!(%destination, "session move");
        self.clock.move_to(destination);
        self.catch_up();
    }

    pub fn clock(&self) -> &TravelClock {
        &self.clock
    }

    pub fn monotonic(&self) -> &VirtualMonotonic {
        &self.monotonic
    }

    /// The tokio clock this session drives, if it began inside a
    /// current-thread runtime.
    pub fn scheduler(&self) -> Option<&SchedulerLink> {
        self.scheduler.as_ref()
    }

    pub fn tick(&self) -> Tick {
        self.clock.tick()
    }

    pub fn set_tick(&self, tick: Tick) -> Result<(), SessionError> {
        self.clock.set_tick(tick)?;
        Ok(())
    }

    /// End the session, reporting any entry point that could not be restored.
    ///
    /// A tokio clock the session paused resumes from the virtual instant it
    /// reached, so timers still pending fire after their remaining real time.
    pub fn end(mut self) -> Result<(), SessionError> {
        self.teardown()
    }

    fn catch_up(&self) {
        if let Some(scheduler) = &self.scheduler {
            scheduler.catch_up();
        }
    }

    fn teardown(&mut self) -> Result<(), SessionError> {
        if self.ended {
            return Ok(());
        }
        self.ended = true;

        if let Some(scheduler) = &self.scheduler {
            scheduler.detach();
        }

        let mut failed = Vec::new();
        for binding in std::mem::take(&mut self.bindings).into_iter().rev() {
            let hook = binding.hook();
            if let Err(err) = binding.release() {
                tracing::error!(hook, error = %err, "failed to restore time entry point");
                failed.push(hook);
            }
        }
        ACTIVE.store(false, Ordering::SeqCst);

        if failed.is_empty() {
            tracing::debug!("session ended");
            Ok(())
        } else {
            Err(SessionError::Restore { hooks: failed })
        }
    }
}

impl Drop for FakeTime {
    #[allow(clippy::panic)]
    fn drop(&mut self) {
        if let Err(err) = self.teardown() {
            if std::thread::panicking() {
                tracing::error!(error = %err, "session teardown failed during unwind");
            } else {
                panic!("{err}");
            }
        }
    }
}

impl std::fmt::Debug for FakeTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeTime")
            .field("clock", &self.clock)
            .field("scheduler", &self.scheduler)
            .field("hooks", &self.bindings.len())
            .field("ended", &self.ended)
            .finish()
    }
}

/// Start a session at `destination`, ticking in real time if `tick`.
pub fn begin_session(
    destination: impl Into<Destination>,
    tick: bool,
) -> Result<FakeTime, SessionError> {
    FakeTime::builder().destination(destination).tick(tick).begin()
}

pub fn begin_frozen_session(destination: impl Into<Destination>) -> Result<FakeTime, SessionError> {
    begin_session(destination, false)
}

/// Run `f` inside a ticking session.
pub fn with_faketime<R>(
    destination: impl Into<Destination>,
    f: impl FnOnce(&FakeTime) -> R,
) -> Result<R, SessionError> {
    let session = begin_session(destination, true)?;
    let output = f(&session);
    session.end()?;
    Ok(output)
}

/// Run `f` inside a frozen session.
pub fn with_frozentime<R>(
    destination: impl Into<Destination>,
    f: impl FnOnce(&FakeTime) -> R,
) -> Result<R, SessionError> {
    let session = begin_frozen_session(destination)?;
    let output = f(&session);
    session.end()?;
    Ok(output)
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
