//! Blocking sleep specs
//!
//! Verify `time::sleep` returns immediately and moves virtual time forward.

use crate::prelude::*;

#[test]
#[serial]
fn sleep_returns_without_waiting() {
    must_complete_quickly(|| {
        let _time = faketime();
        time::sleep(Duration::from_secs(10));
    });
}

#[test]
#[serial]
fn frozen_sleep_moves_wall_time_exactly() {
    must_complete_quickly(|| {
        let _time = frozentime();
        let start = time::time_ns();
        time::sleep(Duration::from_secs(10));
        let end = time::time_ns();
        assert_eq!(end - start, 10 * NANOS_PER_SEC, "time didn't advance while sleeping");
    });
}

#[test]
#[serial]
fn ticking_sleep_moves_wall_time_by_about_the_amount() {
    must_complete_quickly(|| {
        let _time = faketime();
        let start = time::time();
        time::sleep(Duration::from_secs(10));
        assert_approx(time::time() - start, 10.0, 0.1);
    });
}

#[test]
#[serial]
fn a_day_of_sleeps_is_instant() {
    must_complete_quickly(|| {
        let _time = frozentime();
        let start = time::monotonic_ns();
        for _ in 0..1_440 {
            time::sleep(Duration::from_secs(60));
        }
        assert_eq!(time::monotonic_ns() - start, 86_400 * NANOS_PER_SEC as u64);
    });
}
