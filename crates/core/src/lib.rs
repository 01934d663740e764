// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! faketime-core: the virtual clock primitive and its monotonic projection
//!
//! Nothing in this crate touches process-wide state. Sessions that redirect
//! the process's time entry points live in the `faketime` crate.

pub mod clock;
pub mod destination;
pub mod monotonic;
pub mod travel;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock, NANOS_PER_SEC};
pub use destination::{ClockError, Destination, Shift};
pub use monotonic::MonotonicProjector;
pub use travel::{Tick, TravelClock};
