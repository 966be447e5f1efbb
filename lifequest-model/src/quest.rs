//! Quest catalog entries and per-user quest progress rows.

use crate::stats::StatChanges;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quest cadence. Daily and weekly quests reset on window rollover; main
/// and event quests never reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestType {
    Daily,
    Weekly,
    Main,
    Event,
}

impl QuestType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestType::Daily => "daily",
            QuestType::Weekly => "weekly",
            QuestType::Main => "main",
            QuestType::Event => "event",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(QuestType::Daily),
            "weekly" => Some(QuestType::Weekly),
            "main" => Some(QuestType::Main),
            "event" => Some(QuestType::Event),
            _ => None,
        }
    }
}

/// Thematic bucket for a quest, used only for display grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestCategory {
    Goals,
    Health,
    Learning,
    Relationships,
    Work,
    Creativity,
    Finance,
    Mindfulness,
    Social,
    Fun,
}

impl QuestCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestCategory::Goals => "goals",
            QuestCategory::Health => "health",
            QuestCategory::Learning => "learning",
            QuestCategory::Relationships => "relationships",
            QuestCategory::Work => "work",
            QuestCategory::Creativity => "creativity",
            QuestCategory::Finance => "finance",
            QuestCategory::Mindfulness => "mindfulness",
            QuestCategory::Social => "social",
            QuestCategory::Fun => "fun",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        [
            QuestCategory::Goals,
            QuestCategory::Health,
            QuestCategory::Learning,
            QuestCategory::Relationships,
            QuestCategory::Work,
            QuestCategory::Creativity,
            QuestCategory::Finance,
            QuestCategory::Mindfulness,
            QuestCategory::Social,
            QuestCategory::Fun,
        ]
        .into_iter()
        .find(|c| c.as_str() == s)
    }
}

/// The closed set of activity counters a quest requirement can reference.
///
/// Catalog rows loaded from storage may carry a kind this build does not
/// recognize; those deserialize to `Unknown` and never satisfy a
/// requirement (fail closed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Journal,
    VoiceJournal,
    Goal,
    Task,
    Project,
    Meditation,
    Exercise,
    Streak,
    #[serde(other)]
    Unknown,
}

impl ActivityKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::Journal => "journal",
            ActivityKind::VoiceJournal => "voice_journal",
            ActivityKind::Goal => "goal",
            ActivityKind::Task => "task",
            ActivityKind::Project => "project",
            ActivityKind::Meditation => "meditation",
            ActivityKind::Exercise => "exercise",
            ActivityKind::Streak => "streak",
            ActivityKind::Unknown => "unknown",
        }
    }

    /// Parses a stored kind string, mapping unrecognized values to
    /// `Unknown` rather than failing.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "journal" => ActivityKind::Journal,
            "voice_journal" => ActivityKind::VoiceJournal,
            "goal" => ActivityKind::Goal,
            "task" => ActivityKind::Task,
            "project" => ActivityKind::Project,
            "meditation" => ActivityKind::Meditation,
            "exercise" => ActivityKind::Exercise,
            "streak" => ActivityKind::Streak,
            _ => ActivityKind::Unknown,
        }
    }
}

/// What a quest asks for: a counter kind and a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestRequirement {
    pub kind: ActivityKind,
    pub count: u32,
}

/// A catalog quest definition. Immutable after seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub quest_type: QuestType,
    pub category: QuestCategory,
    pub title: String,
    pub description: String,
    /// Display difficulty, 1-5.
    pub difficulty: u8,
    pub requirement: QuestRequirement,
    pub min_level: u32,
    pub xp_reward: u64,
    pub gold_reward: i64,
    pub stat_rewards: StatChanges,
    pub is_active: bool,
}

/// One row per (user, quest). Claiming the reward deletes the row; daily
/// and weekly quests are re-seeded fresh, not reused.
///
/// Invariants: `progress <= requirement.count` and
/// `is_completed` implies `progress == requirement.count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestProgress {
    pub id: String,
    pub user_id: String,
    pub quest_id: String,
    pub progress: u32,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    /// Anchors the current daily/weekly window.
    pub last_reset_at: DateTime<Utc>,
}

impl QuestProgress {
    /// Fresh progress row anchored at `now`.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        quest_id: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            quest_id: quest_id.into(),
            progress: 0,
            is_completed: false,
            completed_at: None,
            last_reset_at: now,
        }
    }
}
