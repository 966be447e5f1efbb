//! Request and response shapes for the service operations.

use chrono::{DateTime, Utc};
use lifequest_engine::{LoginBonus, RewardResult};
use lifequest_model::{Achievement, Quest, QuestProgress, StatChanges, UserStats};
use serde::{Deserialize, Serialize};

/// A batch of deltas applied to a user's stats row in one call.
///
/// `xp` is a delta but must be non-negative: lifetime XP is monotonic and
/// levels are never revoked. Gold and crystal deltas may be negative
/// (purchases) and floor at zero; ability-stat deltas clamp to [0, 100].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsUpdate {
    pub xp: i64,
    pub gold: i64,
    pub crystals: i64,
    pub stat_changes: StatChanges,
    /// Lifetime counter increments.
    pub journals: u64,
    pub voice_journals: u64,
    pub tasks: u64,
    pub goals: u64,
    pub projects: u64,
}

/// What to do to a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestAction {
    /// Mark the quest completed (reward not yet granted).
    Complete,
    /// Grant the reward and retire the progress row.
    Claim,
}

/// A quest paired with the user's current progress toward it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestEntry {
    pub quest: Quest,
    pub progress: QuestProgress,
}

/// The user's quest board, grouped by reset cadence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestBoard {
    pub daily: Vec<QuestEntry>,
    pub weekly: Vec<QuestEntry>,
    /// Main and event quests, which never reset.
    pub ongoing: Vec<QuestEntry>,
}

/// Result of a quest action. `progress` is `None` after a claim because
/// claiming deletes the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestActionOutcome {
    pub stats: UserStats,
    pub progress: Option<QuestProgress>,
    pub reward: Option<RewardResult>,
}

/// One catalog achievement annotated with the user's unlock state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementView {
    pub achievement: Achievement,
    pub unlocked_at: Option<DateTime<Utc>>,
    pub is_equipped: bool,
    /// 0-100 toward the requirement; pinned to 100 once unlocked.
    pub progress_percent: u8,
}

/// The full achievement listing plus anything unlocked by this call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementReport {
    pub achievements: Vec<AchievementView>,
    /// Ids unlocked during this evaluation, in catalog order.
    pub newly_unlocked: Vec<String>,
    /// Combined rewards from the new unlocks; zeroed when none fired.
    pub reward: RewardResult,
}

/// Result of recording a daily login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginOutcome {
    pub stats: UserStats,
    pub streak: u32,
    /// The bonus granted for this login, zeroed when today was already
    /// counted.
    pub bonus: LoginBonus,
    pub reward: RewardResult,
}
