//! Monotonic clock specs
//!
//! Verify monotonic readings never decrease, and advance by exactly the
//! forward displacement in a frozen session.

use crate::prelude::*;
use faketime_core::test_support::strategies::{arb_time_step, TimeStep};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    #[serial]
    fn monotonic_only_goes_forward(shifts in prop::collection::vec(any::<i32>(), 0..50)) {
        let readings = must_complete_quickly(|| {
            let session = faketime();
            let mut readings = Vec::with_capacity(shifts.len());
            for shift in &shifts {
                readings.push(time::monotonic_ns());
                session.shift(*shift);
            }
            readings.push(time::monotonic_ns());
            readings
        });
        prop_assert!(
            readings.windows(2).all(|pair| pair[0] <= pair[1]),
            "went down: {:?}",
            readings
        );
    }

    #[test]
    #[serial]
    fn frozen_monotonic_moves_by_exact_forward_amounts(
        shifts in prop::collection::vec(-1_000_000i64..1_000_000, 0..50)
    ) {
        let session = frozentime();
        for shift in shifts {
            let before = time::monotonic_ns();
            session.shift(shift);
            let after = time::monotonic_ns();
            if shift < 0 {
                prop_assert_eq!(after, before, "shifting back moved monotonic");
            } else {
                prop_assert_eq!(after - before, shift as u64 * NANOS_PER_SEC as u64);
            }
        }
    }

    #[test]
    #[serial]
    fn wall_time_tracks_every_step_exactly(steps in prop::collection::vec(arb_time_step(), 0..50)) {
        let session = frozentime();
        let mut expected = time::time_ns();
        let mut floor = time::monotonic_ns();
        for step in steps {
            match step {
                TimeStep::Shift(by) => {
                    session.shift(by);
                    expected += by.as_nanos();
                }
                TimeStep::Sleep(duration) => {
                    time::sleep(duration);
                    expected += duration.as_nanos() as i64;
                }
            }
            prop_assert_eq!(time::time_ns(), expected);
            let reading = time::monotonic_ns();
            prop_assert!(reading >= floor);
            floor = reading;
        }
    }
}
