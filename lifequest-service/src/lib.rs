//! The LifeQuest progression service.
//!
//! Orchestrates the pure engine rules over the DuckDB store: stats and XP
//! grants, the quest board with window resets, achievement unlocks, life
//! balance history, and daily login streaks. This crate is the API an
//! application embeds; HTTP or IPC framing sits above it.

mod error;
mod service;
mod types;

pub use error::{ServiceError, ServiceResult};
pub use service::GameService;
pub use types::{
    AchievementReport, AchievementView, LoginOutcome, QuestAction, QuestActionOutcome,
    QuestBoard, QuestEntry, StatsUpdate,
};
