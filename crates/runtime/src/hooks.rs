// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Replaceable process-wide time entry points.
//!
//! Every function in [`crate::time`] and [`crate::scheduler::sleep`] consults one
//! [`Hook`] before falling back to its real implementation. A hook holds at
//! most one override at a time; binding a second one is refused rather than
//! stacked, so there is never a question of which override to restore.

use parking_lot::RwLock;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Boxed future returned by an async sleep override
pub type BoxSleep = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

pub type WallTimeNsFn = dyn Fn() -> i64 + Send + Sync;
pub type MonotonicNsFn = dyn Fn() -> u64 + Send + Sync;
pub type SecondsFn = dyn Fn() -> f64 + Send + Sync;
pub type SyncSleepFn = dyn Fn(Duration) + Send + Sync;
pub type AsyncSleepFn = dyn Fn(Duration) -> BoxSleep + Send + Sync;

/// Wall clock, nanoseconds since the Unix epoch
pub static WALL_TIME_NS: Hook<WallTimeNsFn> = Hook::new("time_ns");
/// Blocking sleep
pub static SYNC_SLEEP: Hook<SyncSleepFn> = Hook::new("sleep");
/// Monotonic clock, seconds
pub static MONOTONIC: Hook<SecondsFn> = Hook::new("monotonic");
/// Monotonic clock, nanoseconds
pub static MONOTONIC_NS: Hook<MonotonicNsFn> = Hook::new("monotonic_ns");
/// Suspension-based sleep
pub static ASYNC_SLEEP: Hook<AsyncSleepFn> = Hook::new("async_sleep");

static NEXT_BINDING: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    #[error("hook {hook} is already bound")]
    AlreadyBound { hook: &'static str },
    #[error("hook {hook} no longer holds this binding")]
    Displaced { hook: &'static str },
}

struct Bound<F: ?Sized> {
    id: u64,
    f: Arc<F>,
}

/// A named process-wide slot holding an optional override
pub struct Hook<F: ?Sized + 'static> {
    name: &'static str,
    slot: RwLock<Option<Bound<F>>>,
}

impl<F: ?Sized + Send + Sync + 'static> Hook<F> {
    pub const fn new(name: &'static str) -> Self {
        Self { name, slot: parking_lot::const_rwlock(None) }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The current override, if any. The lock is released before returning,
    /// so overrides may freely call other entry points.
    pub fn get(&self) -> Option<Arc<F>> {
        self.slot.read().as_ref().map(|bound| Arc::clone(&bound.f))
    }

    pub fn is_bound(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Install `f` until the returned [`Binding`] is released.
    pub fn bind(&'static self, f: Arc<F>) -> Result<Binding, HookError> {
        let mut slot = self.slot.write();
        if slot.is_some() {
            return Err(HookError::AlreadyBound { hook: self.name });
        }
        let id = NEXT_BINDING.fetch_add(1, Ordering::Relaxed);
        *slot = Some(Bound { id, f });
        tracing::trace!(hook = self.name, id, "bound");
        Ok(Binding { slot: self, id })
    }
}

/// Type-erased view of a hook, so bindings of different signatures can be
/// held together.
trait Slot: Send + Sync {
    fn name(&self) -> &'static str;
    fn occupied(&self) -> bool;
    fn unbind(&self, id: u64) -> Result<(), HookError>;
    fn clear(&self) -> bool;
}

impl<F: ?Sized + Send + Sync + 'static> Slot for Hook<F> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn occupied(&self) -> bool {
        self.is_bound()
    }

    fn unbind(&self, id: u64) -> Result<(), HookError> {
        let mut slot = self.slot.write();
        match slot.as_ref() {
            Some(bound) if bound.id == id => {
                *slot = None;
                tracing::trace!(hook = self.name, id, "released");
                Ok(())
            }
            _ => Err(HookError::Displaced { hook: self.name }),
        }
    }

    fn clear(&self) -> bool {
        self.slot.write().take().is_some()
    }
}

/// Proof that an override is installed. Releasing it restores the real
/// implementation.
#[must_use = "dropping a Binding leaves the hook bound"]
pub struct Binding {
    slot: &'static dyn Slot,
    id: u64,
}

impl Binding {
    pub fn hook(&self) -> &'static str {
        self.slot.name()
    }

    pub fn release(self) -> Result<(), HookError> {
        self.slot.unbind(self.id)
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding").field("hook", &self.hook()).field("id", &self.id).finish()
    }
}

fn all() -> [&'static dyn Slot; 5] {
    [&WALL_TIME_NS, &SYNC_SLEEP, &MONOTONIC, &MONOTONIC_NS, &ASYNC_SLEEP]
}

/// Names of the hooks currently holding an override.
pub fn bound_hooks() -> Vec<&'static str> {
    all().into_iter().filter(|slot| slot.occupied()).map(|slot| slot.name()).collect()
}

/// Drop every override regardless of who installed it. Outstanding
/// [`Binding`]s become displaced.
///
/// Returns the number of hooks that were bound.
pub fn reset_all() -> usize {
    let mut cleared = 0;
    for slot in all() {
        if slot.clear() {
            tracing::warn!(hook = slot.name(), "forcibly restored real implementation");
            cleared += 1;
        }
    }
    cleared
}

#[cfg(test)]
#[path = "hooks_tests.rs"]
mod tests;
