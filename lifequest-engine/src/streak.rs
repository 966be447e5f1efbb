//! Consecutive-day login streaks.
//!
//! The streak is recomputed from the raw set of activity days on every
//! call rather than incrementally maintained — partial updates against a
//! stored "last streak date" drift, a full recompute cannot.

use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Counts consecutive days of activity ending at `today` or yesterday.
///
/// A streak is active only if `today` or `today - 1` appears in the set;
/// any older gap means the streak is broken and the count is 0, not
/// merely frozen. The walk starts at `today` when present (else
/// yesterday) and steps backward until the first missing day.
#[must_use]
pub fn compute_streak(activity_days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(yesterday) = today.pred_opt() else {
        return u32::from(activity_days.contains(&today));
    };

    let start = if activity_days.contains(&today) {
        today
    } else if activity_days.contains(&yesterday) {
        yesterday
    } else {
        return 0;
    };

    let mut streak = 0u32;
    let mut cursor = start;
    while activity_days.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn days(list: &[&str]) -> BTreeSet<NaiveDate> {
        list.iter().map(|s| d(s)).collect()
    }

    #[test]
    fn unbroken_run_counts_every_day() {
        let set = days(&["2026-03-08", "2026-03-09", "2026-03-10"]);
        assert_eq!(compute_streak(&set, d("2026-03-10")), 3);
    }

    #[test]
    fn gap_before_today_breaks_the_streak_entirely() {
        // Activity on D-3 and D-2 but not D-1 or D: broken, not frozen.
        let set = days(&["2026-03-07", "2026-03-08"]);
        assert_eq!(compute_streak(&set, d("2026-03-10")), 0);
    }

    #[test]
    fn yesterday_only_still_counts_as_active() {
        let set = days(&["2026-03-09"]);
        assert_eq!(compute_streak(&set, d("2026-03-10")), 1);
    }

    #[test]
    fn walk_stops_at_first_missing_day() {
        let set = days(&["2026-03-06", "2026-03-08", "2026-03-09", "2026-03-10"]);
        assert_eq!(compute_streak(&set, d("2026-03-10")), 3);
    }

    #[test]
    fn empty_set_is_zero() {
        assert_eq!(compute_streak(&BTreeSet::new(), d("2026-03-10")), 0);
    }

    #[test]
    fn streak_spans_month_boundary() {
        let set = days(&["2026-02-27", "2026-02-28", "2026-03-01"]);
        assert_eq!(compute_streak(&set, d("2026-03-01")), 3);
    }
}
