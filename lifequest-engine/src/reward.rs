//! Reward application: XP through the level curve, currency deltas, and
//! clamped ability-stat changes.
//!
//! All grant functions are pure — they take a stats snapshot and return an
//! updated copy plus a `RewardResult` the caller can surface (level-up
//! celebration UI) and persist. Concurrent grants to the same user must be
//! serialized at the storage layer; a snapshot-based grant is otherwise
//! open to lost updates.

use crate::level::{self, LevelCurve};
use lifequest_model::{Achievement, Quest, StatChanges, UserStats, STAT_MAX, STAT_MIN};
use serde::{Deserialize, Serialize};

/// What a grant produced, for the caller to display and log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardResult {
    pub xp_gained: u64,
    pub gold_gained: i64,
    pub crystals_gained: i64,
    pub stat_changes: StatChanges,
    pub leveled_up: bool,
    pub new_level: u32,
    pub levels_gained: u32,
}

/// Daily login bonus, scaled by streak length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoginBonus {
    pub xp: u64,
    pub gold: i64,
    pub crystals: i64,
}

/// Applies XP, gold, crystal, and stat rewards to a stats snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct RewardGrantor {
    curve: LevelCurve,
}

impl RewardGrantor {
    #[must_use]
    pub fn new(curve: LevelCurve) -> Self {
        Self { curve }
    }

    #[must_use]
    pub fn curve(&self) -> &LevelCurve {
        &self.curve
    }

    /// Grants XP, carrying it through the level curve. Level-ups add the
    /// scaled gold/crystal level-up rewards on top.
    #[must_use]
    pub fn grant_xp(&self, stats: &UserStats, xp: u64) -> (UserStats, RewardResult) {
        let gain = self.curve.apply_xp(stats.total_xp, xp);

        let mut updated = stats.clone();
        updated.total_xp = gain.new_total_xp;
        updated.level = gain.new_level;
        updated.xp = gain.xp_in_level;

        let mut result = RewardResult {
            xp_gained: xp,
            leveled_up: gain.leveled_up,
            new_level: gain.new_level,
            levels_gained: gain.levels_gained,
            ..Default::default()
        };

        if gain.leveled_up {
            let bonus = level::level_up_rewards(gain.new_level);
            result.gold_gained = bonus.gold;
            result.crystals_gained = bonus.crystals;
            updated.gold += bonus.gold;
            updated.crystals += bonus.crystals;
        }

        (updated, result)
    }

    /// Grants a completed quest's XP, gold, and stat rewards.
    #[must_use]
    pub fn grant_quest_reward(&self, stats: &UserStats, quest: &Quest) -> (UserStats, RewardResult) {
        let (mut updated, mut result) = self.grant_xp(stats, quest.xp_reward);

        updated.gold = grant_currency(updated.gold, quest.gold_reward);
        result.gold_gained += quest.gold_reward;

        apply_stat_changes(&mut updated, &quest.stat_rewards);
        result.stat_changes = quest.stat_rewards.clone();

        (updated, result)
    }

    /// Grants an unlocked achievement's XP and stat rewards.
    #[must_use]
    pub fn grant_achievement_reward(
        &self,
        stats: &UserStats,
        achievement: &Achievement,
    ) -> (UserStats, RewardResult) {
        let (mut updated, mut result) = self.grant_xp(stats, achievement.xp_reward);

        apply_stat_changes(&mut updated, &achievement.stat_rewards);
        result.stat_changes = achievement.stat_rewards.clone();

        (updated, result)
    }
}

/// Currencies are unbounded above but floored at zero.
#[must_use]
pub fn grant_currency(current: i64, delta: i64) -> i64 {
    (current + delta).max(0)
}

/// Ability stats clamp to [0, 100], unlike currencies.
#[must_use]
pub fn clamp_stat(current: i64, change: i64) -> i64 {
    (current + change).clamp(STAT_MIN, STAT_MAX)
}

/// Applies every named stat delta through the clamp.
pub fn apply_stat_changes(stats: &mut UserStats, changes: &StatChanges) {
    for (&key, &change) in changes {
        let slot = stats.stat_mut(key);
        *slot = clamp_stat(*slot, change);
    }
}

/// Daily login bonus: base 5 XP / 10 gold scaled by a streak multiplier
/// capped at 3x, plus crystals on every 7th consecutive day.
#[must_use]
pub fn daily_login_bonus(streak_days: u32) -> LoginBonus {
    let multiplier = (1.0 + f64::from(streak_days) / 30.0).min(3.0);
    let mut bonus = LoginBonus {
        xp: (5.0 * multiplier) as u64,
        gold: (10.0 * multiplier) as i64,
        crystals: 0,
    };
    if streak_days > 0 && streak_days % 7 == 0 {
        bonus.crystals = i64::from(streak_days / 7) * 5;
    }
    bonus
}

/// Folds several grant results into one, for endpoints that apply a batch
/// of rewards in a single response.
#[must_use]
pub fn combine(rewards: &[RewardResult]) -> RewardResult {
    let mut total = RewardResult::default();
    for reward in rewards {
        total.xp_gained += reward.xp_gained;
        total.gold_gained += reward.gold_gained;
        total.crystals_gained += reward.crystals_gained;
        for (&key, &change) in &reward.stat_changes {
            *total.stat_changes.entry(key).or_insert(0) += change;
        }
        total.leveled_up |= reward.leveled_up;
        total.levels_gained += reward.levels_gained;
        if reward.new_level > total.new_level {
            total.new_level = reward.new_level;
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lifequest_model::AbilityStat;

    fn stats() -> UserStats {
        UserStats::new("u1", Utc::now())
    }

    #[test]
    fn grant_xp_updates_level_and_cached_xp() {
        let grantor = RewardGrantor::default();
        let mut base = stats();
        base.total_xp = 550;
        base.level = 3;
        base.xp = 250;

        let (updated, result) = grantor.grant_xp(&base, 100);
        assert_eq!(updated.total_xp, 650);
        assert_eq!(updated.level, 4);
        assert_eq!(updated.xp, 50);
        assert!(result.leveled_up);
        assert_eq!(result.new_level, 4);
        // Level-up side rewards.
        assert_eq!(updated.gold, 400);
        assert_eq!(result.gold_gained, 400);
    }

    #[test]
    fn grant_xp_without_level_up_leaves_currencies_alone() {
        let grantor = RewardGrantor::default();
        let (updated, result) = grantor.grant_xp(&stats(), 40);
        assert_eq!(updated.total_xp, 40);
        assert_eq!(updated.level, 1);
        assert!(!result.leveled_up);
        assert_eq!(updated.gold, 0);
    }

    #[test]
    fn stat_rewards_clamp_at_100() {
        let grantor = RewardGrantor::default();
        let mut base = stats();
        base.spirit = 90;

        let mut quest_rewards = StatChanges::new();
        quest_rewards.insert(AbilityStat::Spirit, 30);
        let quest = Quest {
            id: "q".into(),
            quest_type: lifequest_model::QuestType::Daily,
            category: lifequest_model::QuestCategory::Mindfulness,
            title: "t".into(),
            description: String::new(),
            difficulty: 1,
            requirement: lifequest_model::QuestRequirement {
                kind: lifequest_model::ActivityKind::Meditation,
                count: 5,
            },
            min_level: 1,
            xp_reward: 15,
            gold_reward: 10,
            stat_rewards: quest_rewards,
            is_active: true,
        };

        let (updated, result) = grantor.grant_quest_reward(&base, &quest);
        assert_eq!(updated.spirit, 100);
        assert_eq!(updated.gold, 10);
        assert_eq!(result.xp_gained, 15);
    }

    #[test]
    fn currencies_floor_at_zero() {
        assert_eq!(grant_currency(5, -20), 0);
        assert_eq!(grant_currency(5, 20), 25);
    }

    #[test]
    fn stat_clamp_floor() {
        assert_eq!(clamp_stat(10, -40), 0);
        assert_eq!(clamp_stat(90, 30), 100);
        assert_eq!(clamp_stat(50, 25), 75);
    }

    #[test]
    fn login_bonus_scales_and_caps() {
        let day1 = daily_login_bonus(1);
        assert_eq!(day1.xp, 5);
        assert_eq!(day1.crystals, 0);

        let day14 = daily_login_bonus(14);
        assert_eq!(day14.crystals, 10);

        // Multiplier caps at 3x no matter how long the streak.
        let long = daily_login_bonus(300);
        assert_eq!(long.xp, 15);
        assert_eq!(long.gold, 30);
    }

    #[test]
    fn combine_sums_and_merges_stat_changes() {
        let mut a = RewardResult { xp_gained: 10, gold_gained: 5, ..Default::default() };
        a.stat_changes.insert(AbilityStat::Spirit, 5);
        let mut b = RewardResult { xp_gained: 20, leveled_up: true, new_level: 2, levels_gained: 1, ..Default::default() };
        b.stat_changes.insert(AbilityStat::Spirit, 3);
        b.stat_changes.insert(AbilityStat::Luck, 1);

        let total = combine(&[a, b]);
        assert_eq!(total.xp_gained, 30);
        assert_eq!(total.stat_changes[&AbilityStat::Spirit], 8);
        assert_eq!(total.stat_changes[&AbilityStat::Luck], 1);
        assert!(total.leveled_up);
        assert_eq!(total.new_level, 2);
    }
}
