// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! faketime-runtime: the time entry points host code calls
//!
//! - `time`: wall clock, monotonic clock and blocking sleep
//! - `scheduler`: async sleep and yield on the tokio scheduler
//! - `hooks`: the process-wide slots that redirect all of the above

pub mod hooks;
pub mod scheduler;
pub mod time;

pub use scheduler::{runtime, sleep, yield_now};
pub use hooks::{Binding, Hook, HookError};
