//! Activity counter snapshots consumed by the engine.
//!
//! The engine never performs I/O; callers load these from wherever
//! journals, tasks, and goals actually live and pass them in.

use crate::stats::UserStats;
use serde::{Deserialize, Serialize};

/// Windowed activity counters for quest requirement checks. Counters are
/// scoped to the quest's window (e.g. journals written today); the caller
/// is responsible for supplying up-to-date values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySnapshot {
    pub journals_today: u32,
    pub voice_journals_today: u32,
    pub goals_completed: u32,
    pub tasks_completed: u32,
    pub meditation_minutes: u32,
    pub current_streak: u32,
}

/// Lifetime counters evaluated by the achievement unlock engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifetimeStats {
    pub current_streak: u32,
    pub total_journals: u64,
    pub total_goals: u64,
    pub level: u32,
    pub total_xp: u64,
    pub total_tasks: u64,
    pub total_projects: u64,
    pub total_voice_journals: u64,
}

impl From<&UserStats> for LifetimeStats {
    fn from(stats: &UserStats) -> Self {
        Self {
            current_streak: stats.current_streak,
            total_journals: stats.total_journals,
            total_goals: stats.total_goals,
            level: stats.level,
            total_xp: stats.total_xp,
            total_tasks: stats.total_tasks,
            total_projects: stats.total_projects,
            total_voice_journals: stats.total_voice_journals,
        }
    }
}
