//! Property tests for the level curve and streak calculator.

use chrono::NaiveDate;
use lifequest_engine::{compute_streak, LevelCurve};
use proptest::prelude::*;
use std::collections::BTreeSet;

proptest! {
    // Non-negative deltas never lower total XP or level.
    #[test]
    fn curve_is_monotonic(start in 0u64..2_000_000, delta in 0u64..500_000) {
        let curve = LevelCurve::default();
        let (old_level, _) = curve.level_for_total_xp(start);
        let gain = curve.apply_xp(start, delta);

        prop_assert!(gain.new_total_xp >= start);
        prop_assert!(gain.new_level >= old_level);
        prop_assert_eq!(gain.leveled_up, gain.new_level > old_level);
        prop_assert_eq!(gain.levels_gained, gain.new_level - old_level);
    }

    // Splitting a grant in two lands on the same level and leftover as
    // granting it at once.
    #[test]
    fn split_grants_compose(start in 0u64..1_000_000, a in 0u64..100_000, b in 0u64..100_000) {
        let curve = LevelCurve::default();
        let combined = curve.apply_xp(start, a + b);
        let stepped = curve.apply_xp(curve.apply_xp(start, a).new_total_xp, b);

        prop_assert_eq!(combined.new_total_xp, stepped.new_total_xp);
        prop_assert_eq!(combined.new_level, stepped.new_level);
        prop_assert_eq!(combined.xp_in_level, stepped.xp_in_level);
    }

    // In-level XP never reaches the next threshold.
    #[test]
    fn leftover_stays_below_threshold(total in 0u64..5_000_000) {
        let curve = LevelCurve::default();
        let (level, xp_in_level) = curve.level_for_total_xp(total);
        prop_assert!(level >= 1);
        prop_assert!(xp_in_level < curve.threshold(level));
    }

    // A streak is never longer than the number of distinct activity days,
    // and is zero whenever both today and yesterday are missing.
    #[test]
    fn streak_is_bounded_by_activity(offsets in proptest::collection::btree_set(0i64..60, 0..40)) {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let days: BTreeSet<NaiveDate> = offsets
            .iter()
            .map(|&off| today - chrono::Duration::days(off))
            .collect();

        let streak = compute_streak(&days, today);
        prop_assert!(streak as usize <= days.len());

        let yesterday = today.pred_opt().unwrap();
        if !days.contains(&today) && !days.contains(&yesterday) {
            prop_assert_eq!(streak, 0);
        }
        if days.contains(&today) {
            prop_assert!(streak >= 1);
        }
    }
}
