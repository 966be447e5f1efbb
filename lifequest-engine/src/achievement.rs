//! Achievement unlock evaluation.
//!
//! Evaluation is pure: given the catalog, the set of already-unlocked ids,
//! and the user's lifetime counters, report which achievements newly
//! qualify. Persisting the unlock exactly once is the caller's job (the
//! storage layer's unique (user, achievement) index makes a lost race a
//! harmless no-op).

use lifequest_model::{Achievement, CounterKind, LifetimeStats};
use std::collections::HashSet;

/// The lifetime counter a requirement kind reads, or `None` for kinds
/// this build does not recognize (which never unlock).
#[must_use]
pub fn counter_value(kind: CounterKind, lifetime: &LifetimeStats) -> Option<u64> {
    match kind {
        CounterKind::Streak => Some(u64::from(lifetime.current_streak)),
        CounterKind::Journals => Some(lifetime.total_journals),
        CounterKind::Goals => Some(lifetime.total_goals),
        CounterKind::Level => Some(u64::from(lifetime.level)),
        CounterKind::Xp => Some(lifetime.total_xp),
        CounterKind::Tasks => Some(lifetime.total_tasks),
        CounterKind::Projects => Some(lifetime.total_projects),
        CounterKind::VoiceJournals => Some(lifetime.total_voice_journals),
        CounterKind::Unknown => None,
    }
}

/// Does the achievement's requirement hold against the lifetime counters?
/// Unrecognized requirement kinds fail closed.
#[must_use]
pub fn check_unlock(achievement: &Achievement, lifetime: &LifetimeStats) -> bool {
    counter_value(achievement.requirement.kind, lifetime)
        .is_some_and(|current| current >= achievement.requirement.count)
}

/// Filters the catalog down to achievements that qualify now and are not
/// yet unlocked. Unlock is irreversible: entries in `already_unlocked`
/// stay unlocked regardless of what the counters currently read.
#[must_use]
pub fn find_newly_unlocked<'a>(
    catalog: &'a [Achievement],
    already_unlocked: &HashSet<String>,
    lifetime: &LifetimeStats,
) -> Vec<&'a Achievement> {
    catalog
        .iter()
        .filter(|a| !already_unlocked.contains(&a.id))
        .filter(|a| check_unlock(a, lifetime))
        .collect()
}

/// Completion ratio toward a locked achievement, 0-100. Display only —
/// unlock decisions go through `check_unlock`.
#[must_use]
pub fn progress_percent(achievement: &Achievement, lifetime: &LifetimeStats) -> u8 {
    let current = counter_value(achievement.requirement.kind, lifetime).unwrap_or(0);
    let count = achievement.requirement.count.max(1);
    ((current.saturating_mul(100)) / count).min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifequest_model::{AchievementRequirement, Rarity};

    fn achievement(id: &str, kind: CounterKind, count: u64) -> Achievement {
        Achievement {
            id: id.into(),
            key: id.into(),
            title: id.into(),
            description: String::new(),
            rarity: Rarity::Common,
            requirement: AchievementRequirement { kind, count },
            xp_reward: 50,
            stat_rewards: Default::default(),
        }
    }

    #[test]
    fn unlock_uses_gte_comparison() {
        let a = achievement("writer_10", CounterKind::Journals, 10);
        let mut lifetime = LifetimeStats { total_journals: 9, ..Default::default() };
        assert!(!check_unlock(&a, &lifetime));
        lifetime.total_journals = 10;
        assert!(check_unlock(&a, &lifetime));
        lifetime.total_journals = 11;
        assert!(check_unlock(&a, &lifetime));
    }

    #[test]
    fn unrecognized_requirement_never_unlocks() {
        let a = achievement("mystery", CounterKind::Unknown, 0);
        let lifetime = LifetimeStats { total_journals: 1000, level: 99, ..Default::default() };
        assert!(!check_unlock(&a, &lifetime));
        assert_eq!(progress_percent(&a, &lifetime), 0);
    }

    #[test]
    fn already_unlocked_entries_are_skipped() {
        let catalog = vec![
            achievement("writer_10", CounterKind::Journals, 10),
            achievement("writer_50", CounterKind::Journals, 50),
        ];
        let lifetime = LifetimeStats { total_journals: 60, ..Default::default() };

        let unlocked: HashSet<String> = ["writer_10".to_string()].into();
        let newly = find_newly_unlocked(&catalog, &unlocked, &lifetime);
        assert_eq!(newly.len(), 1);
        assert_eq!(newly[0].id, "writer_50");
    }

    #[test]
    fn unlock_is_not_revoked_when_counters_regress() {
        // Once persisted as unlocked, a lower counter reading must not
        // surface the achievement as newly-unlockable or locked again.
        let catalog = vec![achievement("writer_10", CounterKind::Journals, 10)];
        let unlocked: HashSet<String> = ["writer_10".to_string()].into();
        let regressed = LifetimeStats { total_journals: 3, ..Default::default() };
        assert!(find_newly_unlocked(&catalog, &unlocked, &regressed).is_empty());
    }

    #[test]
    fn progress_percent_caps_at_100() {
        let a = achievement("writer_10", CounterKind::Journals, 10);
        let lifetime = LifetimeStats { total_journals: 7, ..Default::default() };
        assert_eq!(progress_percent(&a, &lifetime), 70);
        let lifetime = LifetimeStats { total_journals: 25, ..Default::default() };
        assert_eq!(progress_percent(&a, &lifetime), 100);
    }
}
