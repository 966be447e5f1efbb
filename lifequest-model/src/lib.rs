//! Shared data model for the LifeQuest gamification core.
//!
//! Plain records exchanged between the progression engine, the storage
//! layer, and the service layer. Everything here is serde-serializable and
//! carries no behavior beyond small accessors — the rules live in
//! `lifequest-engine`.

mod achievement;
mod activity;
mod balance;
mod quest;
mod stats;

pub use achievement::{Achievement, AchievementRequirement, CounterKind, Rarity, UserAchievement};
pub use activity::{ActivitySnapshot, LifetimeStats};
pub use balance::{
    BalanceCategory, BalanceScores, GoalRecord, JournalActivities, JournalRecord,
    LifeBalanceEntry, TaskRecord,
};
pub use quest::{ActivityKind, Quest, QuestCategory, QuestProgress, QuestRequirement, QuestType};
pub use stats::{AbilityStat, StatChanges, UserStats, STAT_MAX, STAT_MIN};
