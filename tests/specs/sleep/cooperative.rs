//! Cooperative sleep specs
//!
//! Verify async sleeps and tokio's timers run on virtual time.

use crate::prelude::*;
use tokio::time::Instant;

#[test]
#[serial]
fn async_sleep_returns_without_waiting() {
    must_complete_quickly(|| {
        run(async {
            let _time = faketime();
            faketime_runtime::sleep(Duration::from_secs(10)).await;
        })
    });
}

#[test]
#[serial]
fn tokio_timer_fires_once_enough_virtual_time_passes() {
    must_complete_quickly(|| {
        let fired_after = run(async {
            let _time = faketime();
            let timer = tokio::spawn(async {
                let start = time::monotonic();
                tokio::time::sleep(Duration::from_secs(10)).await;
                time::monotonic() - start
            });

            // Wait for up to 100 virtual seconds for the timer to fire
            for _ in 0..100 {
                faketime_runtime::sleep(Duration::from_secs(1)).await;
                if timer.is_finished() {
                    return timer.await.unwrap();
                }
            }
            panic!("timer never fired");
        });
        assert_approx(fired_after, 10.0, 0.1);
    });
}

#[test]
#[serial]
fn sleepy_task_finishes() {
    must_complete_quickly(|| {
        run(async {
            let _time = faketime();
            let task = tokio::spawn(async {
                faketime_runtime::sleep(Duration::from_secs(10)).await;
            });

            for _ in 0..100 {
                faketime_runtime::sleep(Duration::from_secs(1)).await;
                if task.is_finished() {
                    return;
                }
            }
            panic!("task never finished");
        })
    });
}

#[tokio::test]
#[serial]
async fn tokio_sleep_inside_a_session_is_virtual() {
    let session = begin_frozen_session(0i64).unwrap();
    let real = std::time::Instant::now();

    tokio::time::sleep(Duration::from_millis(300)).await;

    assert!(real.elapsed() < Duration::from_millis(300));
    assert_eq!(time::monotonic_ns(), 300_000_000);
    session.end().unwrap();
}

#[test]
#[serial]
fn frozen_scheduler_time_advances_by_sleeps() {
    run(async {
        let _session = begin_frozen_session(0i64).unwrap();
        let start = Instant::now();
        faketime_runtime::sleep(Duration::from_secs(30)).await;
        assert_eq!(start.elapsed(), Duration::from_secs(30));
        assert_eq!(time::monotonic(), 30.0);
    });
}

#[test]
#[serial]
fn backward_shift_holds_scheduler_time() {
    run(async {
        let session = begin_frozen_session(86_400i64).unwrap();
        let start = Instant::now();
        session.shift(-3_600i64);
        faketime_runtime::yield_now().await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        faketime_runtime::sleep(Duration::from_secs(5)).await;
        assert_eq!(start.elapsed(), Duration::from_secs(5));
        assert_eq!(time::time(), 82_805.0);
    });
}

#[test]
#[serial]
fn future_woken_from_another_thread_completes() {
    must_complete_quickly(|| {
        run(async {
            let _time = frozentime();
            let (tx, rx) = tokio::sync::oneshot::channel();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(20));
                let _ = tx.send(7);
            });
            assert_eq!(rx.await.unwrap(), 7);
        })
    });
}

#[test]
#[serial]
fn timer_set_in_a_session_fires_after_it_ends() {
    must_complete_quickly(|| {
        run(async {
            let session = frozentime();
            let timer = tokio::spawn(tokio::time::sleep(Duration::from_millis(100)));
            session.end().unwrap();

            tokio::time::timeout(Duration::from_secs(5), timer).await.unwrap().unwrap();
        })
    });
}

#[tokio::test]
#[serial]
async fn async_sleep_works_under_tokio() {
    let session = begin_frozen_session(0i64).unwrap();
    let start = time::monotonic();
    let started = std::time::Instant::now();

    faketime_runtime::sleep(Duration::from_secs(3_600)).await;

    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(time::monotonic() - start, 3_600.0);
    session.end().unwrap();
}

#[test]
#[serial]
fn multi_thread_runtime_keeps_real_scheduler_time() {
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build().unwrap();
    runtime.block_on(async {
        let session = begin_frozen_session(0i64).unwrap();
        assert!(session.scheduler().is_none());

        let start = time::monotonic();
        faketime_runtime::sleep(Duration::from_secs(60)).await;
        assert_eq!(time::monotonic() - start, 60.0);
        session.end().unwrap();
    });
}
