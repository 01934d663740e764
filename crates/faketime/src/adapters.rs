// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Virtual replacements for each time entry point.
//!
//! Every adapter closes over the session's [`TravelClock`]; the monotonic
//! readers additionally share one [`VirtualMonotonic`], so all of them
//! observe the same plateau after a backward jump. When the session runs on
//! a tokio scheduler, readers first pull in time the scheduler skipped and
//! sleeps push the scheduler's clock forward.

use crate::scheduler::SchedulerLink;
use faketime_core::{Clock, MonotonicProjector, TravelClock};
use faketime_runtime::hooks::{
    AsyncSleepFn, BoxSleep, MonotonicNsFn, SecondsFn, SyncSleepFn, WallTimeNsFn,
};
use faketime_runtime::yield_now;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Monotonic projection of a session's clock, shared between adapters
#[derive(Clone)]
pub struct VirtualMonotonic {
    projector: Arc<Mutex<MonotonicProjector<TravelClock>>>,
}

impl VirtualMonotonic {
    pub fn new(clock: TravelClock) -> Self {
        Self { projector: Arc::new(Mutex::new(MonotonicProjector::new(clock))) }
    }

    pub fn read_ns(&self) -> u64 {
        self.projector.lock().read_ns()
    }

    pub fn read_seconds(&self) -> f64 {
        self.projector.lock().read_seconds()
    }

    /// Highest reading handed out so far, without taking a new one.
    pub fn highest_seen(&self) -> i64 {
        self.projector.lock().highest_seen()
    }
}

pub fn wall_time_ns(clock: &TravelClock, scheduler: Option<&SchedulerLink>) -> Arc<WallTimeNsFn> {
    let clock = clock.clone();
    let scheduler = scheduler.cloned();
    Arc::new(move || {
        pull(scheduler.as_ref());
        clock.now_ns()
    })
}

/// Blocking sleep becomes an instantaneous forward displacement.
pub fn sync_sleep(clock: &TravelClock, scheduler: Option<&SchedulerLink>) -> Arc<SyncSleepFn> {
    let clock = clock.clone();
    let scheduler = scheduler.cloned();
    Arc::new(move |duration: Duration| {
        clock.advance(duration);
        if let Some(scheduler) = &scheduler {
            scheduler.catch_up();
        }
    })
}

/// Async sleep displaces the clock, then yields exactly once so tasks and
/// timers due at the new instant get to run.
pub fn async_sleep(clock: &TravelClock, scheduler: Option<&SchedulerLink>) -> Arc<AsyncSleepFn> {
    let clock = clock.clone();
    let scheduler = scheduler.cloned();
    Arc::new(move |duration: Duration| -> BoxSleep {
        let clock = clock.clone();
        let scheduler = scheduler.clone();
        Box::pin(async move {
            clock.advance(duration);
            match scheduler {
                Some(scheduler) => scheduler.push().await,
                None => yield_now().await,
            }
        })
    })
}

pub fn monotonic(
    projection: &VirtualMonotonic,
    scheduler: Option<&SchedulerLink>,
) -> Arc<SecondsFn> {
    let projection = projection.clone();
    let scheduler = scheduler.cloned();
    Arc::new(move || match &scheduler {
        Some(scheduler) => scheduler.now_seconds(),
        None => projection.read_seconds(),
    })
}

pub fn monotonic_ns(
    projection: &VirtualMonotonic,
    scheduler: Option<&SchedulerLink>,
) -> Arc<MonotonicNsFn> {
    let projection = projection.clone();
    let scheduler = scheduler.cloned();
    Arc::new(move || {
        pull(scheduler.as_ref());
        projection.read_ns()
    })
}

fn pull(scheduler: Option<&SchedulerLink>) {
    if let Some(scheduler) = scheduler {
        scheduler.pull();
    }
}

#[cfg(test)]
#[path = "adapters_tests.rs"]
mod tests;
