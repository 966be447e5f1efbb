//! Per-user progression stats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lower clamp for ability stats.
pub const STAT_MIN: i64 = 0;
/// Upper clamp for ability stats. Currencies (gold, crystals) are unbounded.
pub const STAT_MAX: i64 = 100;

/// The six bounded ability stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityStat {
    Strength,
    Vitality,
    Intelligence,
    Charisma,
    Luck,
    Spirit,
}

impl AbilityStat {
    pub const ALL: [AbilityStat; 6] = [
        AbilityStat::Strength,
        AbilityStat::Vitality,
        AbilityStat::Intelligence,
        AbilityStat::Charisma,
        AbilityStat::Luck,
        AbilityStat::Spirit,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AbilityStat::Strength => "strength",
            AbilityStat::Vitality => "vitality",
            AbilityStat::Intelligence => "intelligence",
            AbilityStat::Charisma => "charisma",
            AbilityStat::Luck => "luck",
            AbilityStat::Spirit => "spirit",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stat| stat.as_str() == s)
    }
}

/// A set of signed stat deltas, keyed by stat. Used for quest and
/// achievement rewards and for direct stat updates from the API.
pub type StatChanges = BTreeMap<AbilityStat, i64>;

/// One row per user: level, currencies, ability stats, streaks, and
/// lifetime activity counters. Created lazily on first access and mutated
/// by the reward grantor and by activity-recording endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub user_id: String,
    /// Current level, >= 1.
    pub level: u32,
    /// Monotonic lifetime XP counter.
    pub total_xp: u64,
    /// XP within the current level's bucket (cached, derived from the curve).
    pub xp: u64,
    pub gold: i64,
    pub crystals: i64,
    pub strength: i64,
    pub vitality: i64,
    pub intelligence: i64,
    pub charisma: i64,
    pub luck: i64,
    pub spirit: i64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_journals: u64,
    pub total_tasks: u64,
    pub total_goals: u64,
    pub total_projects: u64,
    pub total_voice_journals: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserStats {
    /// Fresh stats row for a first-time user: level 1, all ability stats
    /// at the 50-point midpoint, empty currencies and counters.
    #[must_use]
    pub fn new(user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            level: 1,
            total_xp: 0,
            xp: 0,
            gold: 0,
            crystals: 0,
            strength: 50,
            vitality: 50,
            intelligence: 50,
            charisma: 50,
            luck: 50,
            spirit: 50,
            current_streak: 0,
            longest_streak: 0,
            total_journals: 0,
            total_tasks: 0,
            total_goals: 0,
            total_projects: 0,
            total_voice_journals: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reads one ability stat by key.
    #[must_use]
    pub fn stat(&self, key: AbilityStat) -> i64 {
        match key {
            AbilityStat::Strength => self.strength,
            AbilityStat::Vitality => self.vitality,
            AbilityStat::Intelligence => self.intelligence,
            AbilityStat::Charisma => self.charisma,
            AbilityStat::Luck => self.luck,
            AbilityStat::Spirit => self.spirit,
        }
    }

    pub fn stat_mut(&mut self, key: AbilityStat) -> &mut i64 {
        match key {
            AbilityStat::Strength => &mut self.strength,
            AbilityStat::Vitality => &mut self.vitality,
            AbilityStat::Intelligence => &mut self.intelligence,
            AbilityStat::Charisma => &mut self.charisma,
            AbilityStat::Luck => &mut self.luck,
            AbilityStat::Spirit => &mut self.spirit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stats_start_at_level_one_with_midpoint_abilities() {
        let stats = UserStats::new("u1", Utc::now());
        assert_eq!(stats.level, 1);
        assert_eq!(stats.total_xp, 0);
        for key in AbilityStat::ALL {
            assert_eq!(stats.stat(key), 50);
        }
    }

    #[test]
    fn ability_stat_round_trips_through_str() {
        for key in AbilityStat::ALL {
            assert_eq!(AbilityStat::parse(key.as_str()), Some(key));
        }
        assert_eq!(AbilityStat::parse("fame"), None);
    }
}
