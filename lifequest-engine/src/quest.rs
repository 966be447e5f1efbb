//! Quest requirement checks and progress transitions.
//!
//! Per (user, quest) the state machine is ACTIVE → COMPLETED → claimed,
//! where claiming happens at the storage layer and deletes the row. A
//! stale daily/weekly window resets progress to ACTIVE(0) and is always
//! applied before any progress is accrued, so a user can never make
//! progress inside an already-expired window.

use crate::window;
use chrono::{DateTime, Utc};
use lifequest_model::{ActivityKind, ActivitySnapshot, Quest, QuestProgress};

/// The snapshot counter a requirement kind reads, or `None` for kinds
/// with no tracked counter (which therefore never satisfy).
#[must_use]
pub fn counter_for(kind: ActivityKind, snapshot: &ActivitySnapshot) -> Option<u32> {
    match kind {
        ActivityKind::Journal => Some(snapshot.journals_today),
        ActivityKind::VoiceJournal => Some(snapshot.voice_journals_today),
        ActivityKind::Goal => Some(snapshot.goals_completed),
        ActivityKind::Task => Some(snapshot.tasks_completed),
        ActivityKind::Meditation => Some(snapshot.meditation_minutes),
        ActivityKind::Streak => Some(snapshot.current_streak),
        ActivityKind::Project | ActivityKind::Exercise | ActivityKind::Unknown => None,
    }
}

/// Pure predicate: is the quest's requirement satisfied by the snapshot?
/// Kinds without a tracked counter fail closed.
#[must_use]
pub fn check_requirement(quest: &Quest, snapshot: &ActivitySnapshot) -> bool {
    counter_for(quest.requirement.kind, snapshot)
        .is_some_and(|have| have >= quest.requirement.count)
}

/// Resets a stale daily/weekly progress row to ACTIVE(0), re-anchoring
/// its window at `now`. Returns whether a reset fired.
pub fn reset_if_stale(progress: &mut QuestProgress, quest: &Quest, now: DateTime<Utc>) -> bool {
    if !window::is_stale_for(quest.quest_type, progress.last_reset_at, now) {
        return false;
    }
    progress.progress = 0;
    progress.is_completed = false;
    progress.completed_at = None;
    progress.last_reset_at = now;
    true
}

/// Advances a progress row from an activity snapshot: reset first if the
/// window rolled over, then raise `progress` toward the requirement
/// (clamped, never lowered), completing when the threshold is met.
pub fn tick(
    progress: &mut QuestProgress,
    quest: &Quest,
    snapshot: &ActivitySnapshot,
    now: DateTime<Utc>,
) {
    reset_if_stale(progress, quest, now);

    let have = counter_for(quest.requirement.kind, snapshot).unwrap_or(0);
    let clamped = have.min(quest.requirement.count);
    if clamped > progress.progress {
        progress.progress = clamped;
    }
    if progress.progress >= quest.requirement.count && !progress.is_completed {
        progress.is_completed = true;
        progress.completed_at = Some(now);
    }
}

/// Marks a row completed at `now`, pinning progress to the requirement
/// threshold. The reward stays ungranted until the separate claim step.
pub fn complete(progress: &mut QuestProgress, quest: &Quest, now: DateTime<Utc>) {
    progress.progress = quest.requirement.count;
    if !progress.is_completed {
        progress.is_completed = true;
        progress.completed_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use lifequest_model::{QuestCategory, QuestRequirement, QuestType};

    fn quest(kind: ActivityKind, count: u32, quest_type: QuestType) -> Quest {
        Quest {
            id: "q1".into(),
            quest_type,
            category: QuestCategory::Goals,
            title: "test".into(),
            description: String::new(),
            difficulty: 1,
            requirement: QuestRequirement { kind, count },
            min_level: 1,
            xp_reward: 10,
            gold_reward: 5,
            stat_rewards: Default::default(),
            is_active: true,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn requirement_compares_the_named_counter() {
        let q = quest(ActivityKind::Task, 3, QuestType::Daily);
        let snapshot = ActivitySnapshot { tasks_completed: 3, ..Default::default() };
        assert!(check_requirement(&q, &snapshot));
        let snapshot = ActivitySnapshot { tasks_completed: 2, ..Default::default() };
        assert!(!check_requirement(&q, &snapshot));
    }

    #[test]
    fn untracked_kinds_fail_closed() {
        let q = quest(ActivityKind::Unknown, 1, QuestType::Daily);
        let snapshot = ActivitySnapshot {
            journals_today: 99,
            tasks_completed: 99,
            ..Default::default()
        };
        assert!(!check_requirement(&q, &snapshot));
    }

    #[test]
    fn stale_daily_window_resets_before_progress_accrues() {
        let q = quest(ActivityKind::Journal, 2, QuestType::Daily);
        let mut progress = QuestProgress::new("p1", "u1", "q1", at(2026, 3, 9, 8));
        progress.progress = 1;

        // Next day: yesterday's partial progress must not survive into the
        // new window even though the snapshot shows a journal written today.
        let snapshot = ActivitySnapshot { journals_today: 1, ..Default::default() };
        tick(&mut progress, &q, &snapshot, at(2026, 3, 10, 8));
        assert_eq!(progress.progress, 1);
        assert!(!progress.is_completed);
        assert_eq!(progress.last_reset_at, at(2026, 3, 10, 8));
    }

    #[test]
    fn tick_completes_at_threshold_and_clamps_above_it() {
        let q = quest(ActivityKind::Task, 3, QuestType::Daily);
        let now = at(2026, 3, 10, 12);
        let mut progress = QuestProgress::new("p1", "u1", "q1", now);

        let snapshot = ActivitySnapshot { tasks_completed: 5, ..Default::default() };
        tick(&mut progress, &q, &snapshot, now);
        assert_eq!(progress.progress, 3);
        assert!(progress.is_completed);
        assert_eq!(progress.completed_at, Some(now));
    }

    #[test]
    fn tick_never_lowers_progress_within_a_window() {
        let q = quest(ActivityKind::Task, 3, QuestType::Daily);
        let now = at(2026, 3, 10, 12);
        let mut progress = QuestProgress::new("p1", "u1", "q1", now);
        progress.progress = 2;

        let snapshot = ActivitySnapshot { tasks_completed: 1, ..Default::default() };
        tick(&mut progress, &q, &snapshot, now);
        assert_eq!(progress.progress, 2);
    }

    #[test]
    fn weekly_quest_survives_a_day_but_not_a_week() {
        let q = quest(ActivityKind::Journal, 7, QuestType::Weekly);
        // Monday of an ISO week.
        let mut progress = QuestProgress::new("p1", "u1", "q1", at(2026, 3, 9, 8));
        progress.progress = 4;

        assert!(!reset_if_stale(&mut progress, &q, at(2026, 3, 11, 8)));
        assert_eq!(progress.progress, 4);

        // Following Monday.
        assert!(reset_if_stale(&mut progress, &q, at(2026, 3, 16, 8)));
        assert_eq!(progress.progress, 0);
    }

    #[test]
    fn complete_pins_progress_and_stamps_time_once() {
        let q = quest(ActivityKind::Journal, 1, QuestType::Daily);
        let first = at(2026, 3, 10, 9);
        let mut progress = QuestProgress::new("p1", "u1", "q1", first);

        complete(&mut progress, &q, first);
        assert!(progress.is_completed);
        assert_eq!(progress.progress, 1);
        assert_eq!(progress.completed_at, Some(first));

        complete(&mut progress, &q, at(2026, 3, 10, 10));
        assert_eq!(progress.completed_at, Some(first));
    }
}
