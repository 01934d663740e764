//! Session lifecycle specs
//!
//! Verify entry points are restored however a session ends.

use crate::prelude::*;

fn assert_restored() {
    assert!(hooks::bound_hooks().is_empty(), "still bound: {:?}", hooks::bound_hooks());
    assert!(!faketime::session::is_active());
}

#[test]
#[serial]
fn explicit_end_restores_real_time() {
    let session = begin_frozen_session(0i64).unwrap();
    assert_eq!(time::time_ns(), 0);
    session.end().unwrap();

    assert_restored();
    assert!(time::time() > 1_577_836_800.0);
}

#[test]
#[serial]
fn scoped_helpers_restore_after_the_body() {
    let slept = with_frozentime(0i64, |_| {
        time::sleep(Duration::from_secs(90));
        time::monotonic()
    })
    .unwrap();
    assert_eq!(slept, 90.0);
    assert_restored();

    let moved = with_faketime(Destination::Now, |session| {
        session.shift(Shift::secs(3_600));
        time::time()
    })
    .unwrap();
    assert!(moved > time::time() + 3_000.0);
    assert_restored();
}

#[test]
#[serial]
fn nested_sessions_are_refused() {
    let outer = frozentime();
    let err = begin_session(Destination::Now, true).unwrap_err();
    assert!(matches!(err, SessionError::Nested));
    outer.end().unwrap();

    assert_restored();
    begin_frozen_session(0i64).unwrap().end().unwrap();
}

#[test]
#[serial]
fn panicking_body_restores_real_time() {
    let result = std::panic::catch_unwind(|| {
        let _: () = with_frozentime(0i64, |_| panic!("body failed")).unwrap();
    });
    assert!(result.is_err());
    assert_restored();
}

#[test]
#[serial]
fn cancelled_task_restores_real_time() {
    run(async {
        let task = tokio::spawn(async {
            let _session = frozentime();
            std::future::pending::<()>().await;
        });
        faketime_runtime::yield_now().await;
        assert!(faketime::session::is_active());

        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());
        assert_restored();
    });
}

#[test]
#[serial]
fn dropping_the_runtime_restores_real_time() {
    run(async {
        tokio::spawn(async {
            let _session = frozentime();
            std::future::pending::<()>().await;
        });
        faketime_runtime::yield_now().await;
        assert!(faketime::session::is_active());
    });
    // The still-suspended task is dropped with the runtime
    assert_restored();
}

#[test]
#[serial]
fn foreign_override_blocks_install_without_leaking() {
    let blocker = hooks::MONOTONIC.bind(Arc::new(|| 1.0)).unwrap();
    let err = FakeTime::builder().destination(0i64).begin().unwrap_err();
    assert!(matches!(err, SessionError::Install(_)));
    assert_eq!(hooks::bound_hooks(), vec!["monotonic"]);
    blocker.release().unwrap();
    assert_restored();
}

#[test]
#[serial]
fn scaled_session_runs_faster_than_real_time() {
    let session = FakeTime::builder().destination(0i64).tick_rate(1_000.0).begin().unwrap();
    std::thread::sleep(Duration::from_millis(20));
    assert!(time::time() >= 20.0);
    session.end().unwrap();
}
