//! Fixture specs
//!
//! Verify the ready-made sessions behave like their hand-built equivalents.

use crate::prelude::*;

#[test]
#[serial]
fn faketime_fixture_ticks_and_sleeps() {
    must_complete_quickly(|| {
        let session = faketime();
        assert_eq!(session.tick(), Tick::Realtime);
        let start = time::monotonic_ns();
        time::sleep(Duration::from_secs(10));
        let elapsed = (time::monotonic_ns() - start) as f64 / NANOS_PER_SEC as f64;
        assert_approx(elapsed, 10.0, 0.1);
    });
}

#[test]
#[serial]
fn frozentime_fixture_is_exact() {
    must_complete_quickly(|| {
        let session = frozentime();
        assert!(session.tick().is_frozen());
        let start = time::monotonic_ns();
        time::sleep(Duration::from_secs(10));
        assert_eq!(time::monotonic_ns() - start, 10 * NANOS_PER_SEC as u64);
    });
}

#[test]
#[serial]
fn frozen_session_at_the_epoch_reads_sleep_totals() {
    must_complete_quickly(|| {
        let _session = begin_frozen_session(0i64).unwrap();
        time::sleep(Duration::from_secs(10));
        assert_eq!(time::monotonic(), 10.0);
        assert_eq!(time::time(), 10.0);
    });
}

#[test]
#[serial]
fn fixture_starts_near_the_real_present() {
    let real = time::time();
    let session = frozentime();
    assert_approx(time::time(), real, 0.01);
    drop(session);
}
