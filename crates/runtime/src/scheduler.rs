// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Async entry points on the tokio scheduler.
//!
//! Host code runs its tasks on a current-thread tokio runtime. A session
//! drives that runtime's paused clock from the virtual timeline, so tokio
//! timers, `tokio::time::sleep` and [`sleep`] all observe virtual time.

use crate::hooks;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};

pub use tokio::task::yield_now;

/// Suspend the current task for `duration`.
///
/// Consults the async sleep hook when awaited; without an override this is
/// `tokio::time::sleep`, which panics outside a tokio runtime.
pub async fn sleep(duration: Duration) {
    match hooks::ASYNC_SLEEP.get() {
        Some(f) => f(duration).await,
        None => tokio::time::sleep(duration).await,
    }
}

/// A current-thread runtime with every driver enabled, the flavor whose
/// clock a session can take over.
pub fn runtime() -> std::io::Result<Runtime> {
    Builder::new_current_thread().enable_all().build()
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
