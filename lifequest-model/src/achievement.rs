//! Achievement catalog entries and per-user unlock rows.

use crate::stats::StatChanges;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Badge rarity tier, display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "common" => Some(Rarity::Common),
            "rare" => Some(Rarity::Rare),
            "epic" => Some(Rarity::Epic),
            "legendary" => Some(Rarity::Legendary),
            _ => None,
        }
    }
}

/// The closed set of lifetime counters an achievement requirement can
/// reference. Unrecognized stored kinds deserialize to `Unknown`, which
/// never unlocks (fail closed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterKind {
    Streak,
    Journals,
    Goals,
    Level,
    Xp,
    Tasks,
    Projects,
    VoiceJournals,
    #[serde(other)]
    Unknown,
}

impl CounterKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CounterKind::Streak => "streak",
            CounterKind::Journals => "journals",
            CounterKind::Goals => "goals",
            CounterKind::Level => "level",
            CounterKind::Xp => "xp",
            CounterKind::Tasks => "tasks",
            CounterKind::Projects => "projects",
            CounterKind::VoiceJournals => "voice_journals",
            CounterKind::Unknown => "unknown",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "streak" => CounterKind::Streak,
            "journals" => CounterKind::Journals,
            "goals" => CounterKind::Goals,
            "level" => CounterKind::Level,
            "xp" => CounterKind::Xp,
            "tasks" => CounterKind::Tasks,
            "projects" => CounterKind::Projects,
            "voice_journals" => CounterKind::VoiceJournals,
            _ => CounterKind::Unknown,
        }
    }
}

/// Lifetime-counter threshold for unlocking an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRequirement {
    pub kind: CounterKind,
    pub count: u64,
}

/// A catalog achievement definition. Immutable, seeded once if empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    /// Stable identifier, unique across the catalog.
    pub key: String,
    pub title: String,
    pub description: String,
    pub rarity: Rarity,
    pub requirement: AchievementRequirement,
    pub xp_reward: u64,
    pub stat_rewards: StatChanges,
}

/// One row per (user, achievement), created only once unlocked — the
/// existence of the row is the unlock signal. At most one row per user
/// has `is_equipped = true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAchievement {
    pub user_id: String,
    pub achievement_id: String,
    pub unlocked_at: DateTime<Utc>,
    pub is_equipped: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_kind_fails_closed_on_unknown_strings() {
        assert_eq!(CounterKind::parse("meetings"), CounterKind::Unknown);
        assert_eq!(CounterKind::parse("voice_journals"), CounterKind::VoiceJournals);
    }

    #[test]
    fn unknown_counter_kind_serde() {
        let kind: CounterKind = serde_json::from_str("\"meetings\"").unwrap();
        assert_eq!(kind, CounterKind::Unknown);
    }
}
