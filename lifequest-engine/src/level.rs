//! XP-to-level conversion.
//!
//! Leveling is per-level, not globally cumulative: advancing past level `L`
//! costs `L * xp_per_level` XP within that level's bucket, and leftover XP
//! carries into the next bucket. One large grant can cross several levels
//! in a single application.

use serde::{Deserialize, Serialize};

/// Default per-level multiplier. The exact curve is deliberately a
/// parameter rather than a constant; see `LevelCurve::new`.
pub const DEFAULT_XP_PER_LEVEL: u64 = 100;

/// Outcome of applying an XP delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpGain {
    pub new_total_xp: u64,
    pub new_level: u32,
    /// XP inside the new level's bucket after any thresholds crossed.
    pub xp_in_level: u64,
    pub leveled_up: bool,
    pub levels_gained: u32,
}

/// Rewards granted when a level-up occurs, scaled by the level reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelUpRewards {
    pub gold: i64,
    pub stat_points: u32,
    pub crystals: i64,
}

/// Maps total accumulated XP to levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCurve {
    xp_per_level: u64,
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self::new(DEFAULT_XP_PER_LEVEL)
    }
}

impl LevelCurve {
    /// A curve where level `L` requires `L * xp_per_level` XP within the
    /// level. Zero is coerced to 1 so the walk always terminates.
    #[must_use]
    pub fn new(xp_per_level: u64) -> Self {
        Self { xp_per_level: xp_per_level.max(1) }
    }

    /// XP-within-level needed to advance past `level`.
    #[must_use]
    pub fn threshold(&self, level: u32) -> u64 {
        u64::from(level) * self.xp_per_level
    }

    /// Derives `(level, xp_within_level)` from a total XP counter by
    /// walking the escalating thresholds from level 1.
    #[must_use]
    pub fn level_for_total_xp(&self, total_xp: u64) -> (u32, u64) {
        let mut level = 1u32;
        let mut remaining = total_xp;
        while remaining >= self.threshold(level) {
            remaining -= self.threshold(level);
            level += 1;
        }
        (level, remaining)
    }

    /// Applies a non-negative XP delta. A delta of zero is a no-op that
    /// reports `leveled_up = false`.
    #[must_use]
    pub fn apply_xp(&self, current_total_xp: u64, delta: u64) -> XpGain {
        let (old_level, _) = self.level_for_total_xp(current_total_xp);
        let new_total_xp = current_total_xp + delta;
        let (new_level, xp_in_level) = self.level_for_total_xp(new_total_xp);

        XpGain {
            new_total_xp,
            new_level,
            xp_in_level,
            leveled_up: new_level > old_level,
            levels_gained: new_level - old_level,
        }
    }

    /// Progress through the current level's bucket, 0-100. UI display only.
    #[must_use]
    pub fn progress_percent(&self, total_xp: u64) -> u8 {
        let (level, xp_in_level) = self.level_for_total_xp(total_xp);
        let needed = self.threshold(level);
        ((xp_in_level * 100) / needed).min(100) as u8
    }
}

/// Gold and stat points granted on reaching `new_level`, with bonus
/// crystals at every 10th level.
#[must_use]
pub fn level_up_rewards(new_level: u32) -> LevelUpRewards {
    LevelUpRewards {
        gold: 100 * i64::from(new_level),
        stat_points: new_level / 5 + 1,
        crystals: if new_level % 10 == 0 { 10 * i64::from(new_level) } else { 0 },
    }
}

/// Bonus XP awarded per qualifying day, stepped by streak length.
#[must_use]
pub fn streak_bonus_xp(streak_days: u32) -> u64 {
    match streak_days {
        0..=2 => 0,
        3..=6 => 10,
        7..=29 => 25,
        30..=99 => 50,
        _ => 100,
    }
}
