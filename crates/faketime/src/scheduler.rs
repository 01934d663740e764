// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Keeps the tokio scheduler's clock level with a session's timeline.
//!
//! Inside a current-thread runtime a session pauses tokio's clock and treats
//! it as the scheduler's time source. Forward movement of the monotonic
//! projection is pushed into tokio with `tokio::time::advance`, so timers
//! come due without real delay. Time tokio skips on its own (auto-advance to
//! the next timer while idle) is pulled back into the virtual clock before
//! every reading. Both clocks therefore agree on elapsed time since attach.
//!
//! Multi-threaded runtimes cannot pause their clock; sessions there leave
//! tokio on real time.

use crate::adapters::VirtualMonotonic;
use faketime_core::TravelClock;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::task::yield_now;
use tokio::time::Instant;

/// Readings of both clocks taken at attach
struct Anchor {
    projected_ns: u64,
    scheduled: Instant,
}

struct Inner {
    handle: Handle,
    clock: TravelClock,
    projection: VirtualMonotonic,
    anchor: Mutex<Anchor>,
    paused_here: bool,
    catch_up_queued: AtomicBool,
    detached: AtomicBool,
}

/// A session's hold on the current runtime's clock
#[derive(Clone)]
pub struct SchedulerLink {
    inner: Arc<Inner>,
}

impl SchedulerLink {
    /// Take over the clock of the runtime this thread is in, if it can be
    /// paused. Returns `None` outside tokio and on multi-threaded runtimes.
    pub fn attach(clock: &TravelClock, projection: &VirtualMonotonic) -> Option<Self> {
        let handle = Handle::try_current().ok()?;
        let flavor = handle.runtime_flavor();
        if flavor != RuntimeFlavor::CurrentThread {
            tracing::debug!(?flavor, "scheduler clock left on real time");
            return None;
        }

        let (paused_here, scheduled) = {
            let _entered = handle.enter();
            let paused_here = !is_paused();
            if paused_here {
                tokio::time::pause();
            }
            (paused_here, Instant::now())
        };
        let anchor = Anchor { projected_ns: projection.read_ns(), scheduled };
        tracing::debug!(paused_here, "scheduler clock attached");

        Some(Self {
            inner: Arc::new(Inner {
                handle,
                clock: clock.clone(),
                projection: projection.clone(),
                anchor: Mutex::new(anchor),
                paused_here,
                catch_up_queued: AtomicBool::new(false),
                detached: AtomicBool::new(false),
            }),
        })
    }

    /// Fold time the scheduler moved on its own into the virtual clock.
    pub fn pull(&self) {
        if self.is_detached() {
            return;
        }
        let _entered = self.inner.handle.enter();
        let anchor = self.inner.anchor.lock();
        let scheduled = anchor.scheduled.elapsed();
        let projected = self.projected_since(&anchor);
        if scheduled > projected {
            self.inner.clock.advance(scheduled - projected);
        }
    }

    /// The scheduler's "now" in seconds, read from the monotonic projection.
    pub fn now_seconds(&self) -> f64 {
        self.pull();
        self.inner.projection.read_seconds()
    }

    /// Advance the scheduler's clock up to the projection, then yield once.
    ///
    /// Either way the caller is suspended exactly once. Outside the linked
    /// runtime the clock cannot be reached and only the yield happens.
    pub async fn push(&self) {
        let lag = self.scheduler_lag();
        if lag.is_zero() || Handle::try_current().is_err() {
            yield_now().await;
        } else {
            tokio::time::advance(lag).await;
        }
    }

    /// Queue a [`push`](Self::push) on the runtime for displacements made
    /// from synchronous code.
    pub fn catch_up(&self) {
        if self.is_detached() || self.inner.catch_up_queued.swap(true, Ordering::AcqRel) {
            return;
        }
        let link = self.clone();
        self.inner.handle.spawn(async move {
            link.inner.catch_up_queued.store(false, Ordering::Release);
            link.push().await;
        });
    }

    /// Give the clock back. A clock the session paused resumes from where
    /// virtual time left it, so timers set inside the session still fire.
    pub fn detach(&self) {
        if self.inner.detached.swap(true, Ordering::AcqRel) || !self.inner.paused_here {
            return;
        }
        let _entered = self.inner.handle.enter();
        if is_paused() {
            tokio::time::resume();
            tracing::debug!("scheduler clock resumed");
        }
    }

    pub fn is_detached(&self) -> bool {
        self.inner.detached.load(Ordering::Acquire)
    }

    /// Whether attaching paused the clock, rather than finding it paused.
    pub fn paused_here(&self) -> bool {
        self.inner.paused_here
    }

    /// How far the scheduler's clock trails the projection.
    fn scheduler_lag(&self) -> Duration {
        if self.is_detached() {
            return Duration::ZERO;
        }
        let _entered = self.inner.handle.enter();
        let anchor = self.inner.anchor.lock();
        let scheduled = anchor.scheduled.elapsed();
        self.projected_since(&anchor).saturating_sub(scheduled)
    }

    fn projected_since(&self, anchor: &Anchor) -> Duration {
        Duration::from_nanos(self.inner.projection.read_ns().saturating_sub(anchor.projected_ns))
    }
}

impl std::fmt::Debug for SchedulerLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerLink")
            .field("paused_here", &self.inner.paused_here)
            .field("detached", &self.is_detached())
            .finish()
    }
}

/// A paused clock reads the same instant until something advances it, while
/// a running one moves with the real clock.
fn is_paused() -> bool {
    let before = Instant::now();
    let real = std::time::Instant::now();
    while std::time::Instant::now() == real {
        std::hint::spin_loop();
    }
    Instant::now() == before
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
