//! Property-based tests for the delay schedule.

use std::time::Duration;

use headway::backoff::{delays, jittered_delays_with};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

proptest! {
    #[test]
    fn prop_delays_never_exceed_the_ceiling(
        min_ms in 1u64..1_000,
        factor in 1u64..64,
        take in 1usize..32,
    ) {
        let min = Duration::from_millis(min_ms);
        let max = Duration::from_millis(min_ms * factor);
        for delay in delays(min, max).take(take) {
            prop_assert!(delay <= max);
            prop_assert!(delay > Duration::ZERO);
        }
    }

    #[test]
    fn prop_delays_double_until_the_ceiling(
        min_ms in 1u64..1_000,
        factor in 1u64..64,
    ) {
        let min = Duration::from_millis(min_ms);
        let max = Duration::from_millis(min_ms * factor);
        let schedule: Vec<_> = delays(min, max).take(16).collect();
        prop_assert_eq!(schedule[0], min.min(max));
        for pair in schedule.windows(2) {
            if pair[0] < max {
                prop_assert_eq!(pair[1], (pair[0] * 2).min(max));
            } else {
                prop_assert_eq!(pair[1], max);
            }
        }
    }

    #[test]
    fn prop_jittered_draws_stay_below_the_schedule(
        min_ms in 1u64..1_000,
        factor in 1u64..64,
        seed in any::<u64>(),
    ) {
        let min = Duration::from_millis(min_ms);
        let max = Duration::from_millis(min_ms * factor);
        let draws = jittered_delays_with(min, max, StdRng::seed_from_u64(seed));
        for (draw, bound) in draws.zip(delays(min, max)).take(24) {
            prop_assert!(draw <= bound);
            prop_assert!(draw <= max);
        }
    }
}
