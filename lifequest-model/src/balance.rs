//! Life-balance categories, scores, and the raw records the scorer reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The nine fixed wellness categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceCategory {
    Physical,
    Mental,
    Relationships,
    Contribution,
    Career,
    Financial,
    Growth,
    SelfActualization,
    Leisure,
}

impl BalanceCategory {
    pub const ALL: [BalanceCategory; 9] = [
        BalanceCategory::Physical,
        BalanceCategory::Mental,
        BalanceCategory::Relationships,
        BalanceCategory::Contribution,
        BalanceCategory::Career,
        BalanceCategory::Financial,
        BalanceCategory::Growth,
        BalanceCategory::SelfActualization,
        BalanceCategory::Leisure,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BalanceCategory::Physical => "physical",
            BalanceCategory::Mental => "mental",
            BalanceCategory::Relationships => "relationships",
            BalanceCategory::Contribution => "contribution",
            BalanceCategory::Career => "career",
            BalanceCategory::Financial => "financial",
            BalanceCategory::Growth => "growth",
            BalanceCategory::SelfActualization => "self_actualization",
            BalanceCategory::Leisure => "leisure",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// One 0-100 score per category. All nine keys are always present so
/// callers never have to handle a missing category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceScores {
    pub physical: u8,
    pub mental: u8,
    pub relationships: u8,
    pub contribution: u8,
    pub career: u8,
    pub financial: u8,
    pub growth: u8,
    pub self_actualization: u8,
    pub leisure: u8,
}

impl BalanceScores {
    #[must_use]
    pub fn get(&self, category: BalanceCategory) -> u8 {
        match category {
            BalanceCategory::Physical => self.physical,
            BalanceCategory::Mental => self.mental,
            BalanceCategory::Relationships => self.relationships,
            BalanceCategory::Contribution => self.contribution,
            BalanceCategory::Career => self.career,
            BalanceCategory::Financial => self.financial,
            BalanceCategory::Growth => self.growth,
            BalanceCategory::SelfActualization => self.self_actualization,
            BalanceCategory::Leisure => self.leisure,
        }
    }

    /// Iterates the nine (category, score) pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (BalanceCategory, u8)> + '_ {
        BalanceCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

/// Append-only (user, category, score) history point. The "current" value
/// for a category is its most recent entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeBalanceEntry {
    pub id: String,
    pub user_id: String,
    pub category: BalanceCategory,
    pub score: u8,
    pub created_at: DateTime<Utc>,
}

/// Per-journal boolean activity flags captured at entry time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalActivities {
    pub exercise: bool,
    pub socializing: bool,
    pub work_done: bool,
    pub learning: bool,
    pub hobby: bool,
    pub healthy_meal: bool,
    pub meditation: bool,
    pub outdoor: bool,
    pub helping: bool,
    pub grateful: bool,
}

/// A journal entry as the scorer sees it. Mood, energy, stress, and sleep
/// are on a 1-5 scale when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub content: String,
    pub tags: Vec<String>,
    pub mood: Option<u8>,
    pub energy: Option<u8>,
    pub stress: Option<u8>,
    pub sleep: Option<u8>,
    pub activities: Option<JournalActivities>,
    pub created_at: DateTime<Utc>,
}

/// A task as the scorer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub title: String,
    pub completed: bool,
    pub tags: Vec<String>,
}

/// A goal as the scorer sees it; `progress` is 0-100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalRecord {
    pub title: String,
    pub progress: f64,
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_expose_all_nine_categories() {
        let scores = BalanceScores { physical: 70, ..Default::default() };
        let pairs: Vec<_> = scores.iter().collect();
        assert_eq!(pairs.len(), 9);
        assert_eq!(scores.get(BalanceCategory::Physical), 70);
        assert_eq!(scores.get(BalanceCategory::Leisure), 0);
    }

    #[test]
    fn category_round_trips_through_str() {
        for c in BalanceCategory::ALL {
            assert_eq!(BalanceCategory::parse(c.as_str()), Some(c));
        }
        assert_eq!(BalanceCategory::parse("spiritual"), None);
    }
}
