// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! faketime: deterministic, controllable time for tests
//!
//! A session replaces every time entry point in `faketime_runtime` with a
//! view of one virtual timeline:
//!
//! - wall time follows the timeline exactly, including backward jumps
//! - monotonic time and the tokio scheduler's clock never move backward
//! - blocking sleeps return immediately after moving the timeline forward
//! - async sleeps move the timeline forward, then yield once
//!
//! ```no_run
//! use faketime::{begin_frozen_session, Destination};
//! use faketime_runtime::time;
//! use std::time::Duration;
//!
//! let session = begin_frozen_session(Destination::Now)?;
//! let start = time::monotonic();
//! time::sleep(Duration::from_secs(3_600));
//! assert_eq!(time::monotonic() - start, 3_600.0);
//! session.end()?;
//! # Ok::<(), faketime::SessionError>(())
//! ```

pub mod adapters;
pub mod env;
pub mod scheduler;
pub mod session;

#[cfg(any(test, feature = "test-support"))]
pub mod fixtures;
#[cfg(any(test, feature = "test-support"))]
pub mod realtime;

pub use adapters::VirtualMonotonic;
pub use faketime_core::{ClockError, Destination, Shift, Tick, TravelClock};
pub use scheduler::SchedulerLink;
pub use session::{
    begin_frozen_session, begin_session, with_faketime, with_frozentime, FakeTime, SessionBuilder,
    SessionError,
};
