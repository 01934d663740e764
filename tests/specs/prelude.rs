//! Shared imports and helpers for specs.

pub use faketime::fixtures::{faketime, frozentime};
pub use faketime::realtime::must_complete_quickly;
pub use faketime::{
    begin_frozen_session, begin_session, with_faketime, with_frozentime, Destination, FakeTime,
    SessionError, Shift, Tick,
};
pub use faketime_core::NANOS_PER_SEC;
pub use faketime_runtime::{hooks, time};
pub use serial_test::serial;
pub use std::sync::Arc;
pub use std::time::Duration;

/// Assert `actual` is within `rel` (relative) of `expected`.
#[track_caller]
pub fn assert_approx(actual: f64, expected: f64, rel: f64) {
    let tolerance = expected.abs() * rel;
    assert!(
        (actual - expected).abs() <= tolerance,
        "{actual} is not within {rel} of {expected}"
    );
}

/// Run `future` to completion on a fresh current-thread runtime.
pub fn run<F: std::future::Future>(future: F) -> F::Output {
    faketime_runtime::runtime().unwrap().block_on(future)
}
