//! The LifeQuest progression engine.
//!
//! Pure, synchronous rules over already-loaded snapshots: XP-to-level
//! conversion, login streaks, daily/weekly window rollover, quest progress,
//! achievement unlocks, reward application, and life-balance scoring.
//!
//! Nothing in this crate performs I/O or reads the system clock — `now` is
//! always an explicit parameter, which keeps every function deterministic
//! and testable. Persistence, and the transactional guarantees that go with
//! it (unique unlock rows, atomic quest claims), belong to the caller.

pub mod achievement;
pub mod balance;
pub mod catalog;
pub mod level;
pub mod quest;
pub mod reward;
pub mod streak;
pub mod window;

pub use balance::LifeBalanceScorer;
pub use level::{LevelCurve, LevelUpRewards, XpGain, DEFAULT_XP_PER_LEVEL};
pub use reward::{LoginBonus, RewardGrantor, RewardResult};
pub use streak::compute_streak;
