//! The gamification store — stats, catalogs, progress, unlocks, history.

use crate::error::{StorageError, StorageResult};
use chrono::{DateTime, Utc};
use duckdb::{params, Connection};
use lifequest_model::{
    Achievement, AchievementRequirement, ActivityKind, BalanceCategory, BalanceScores,
    CounterKind, Quest, QuestCategory, QuestProgress, QuestRequirement, QuestType, Rarity,
    StatChanges, UserAchievement, UserStats,
};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use uuid::Uuid;

/// Gamification store backed by DuckDB.
///
/// All timestamps are stored as epoch milliseconds. The composite primary
/// keys on `user_quests` and `user_achievements` carry the uniqueness
/// guarantees the engine's callers rely on.
#[derive(Clone)]
pub struct GameStore {
    conn: Arc<Mutex<Connection>>,
}

impl GameStore {
    /// Opens or creates a store at the given path.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = crate::open_duckdb_with_wal_recovery(path, "128MB", 2)?;
        initialize_schema(&conn)?;
        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }

    /// Runs `f` inside a transaction, rolling back on error.
    fn with_transaction<T>(
        &self,
        f: impl FnOnce(&Connection) -> StorageResult<T>,
    ) -> StorageResult<T> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch("BEGIN TRANSACTION;")?;
        match f(&conn) {
            Ok(value) => {
                conn.execute_batch("COMMIT;")?;
                Ok(value)
            }
            Err(e) => {
                let _ = conn.execute_batch("ROLLBACK;");
                Err(e)
            }
        }
    }

    // ── User stats ───────────────────────────────────────────────

    /// Loads a user's stats row, if one exists.
    pub fn load_stats(&self, user_id: &str) -> StorageResult<Option<UserStats>> {
        let conn = self.conn.lock().unwrap();
        let result = conn.query_row(
            "SELECT user_id, level, total_xp, xp, gold, crystals, \
                    strength, vitality, intelligence, charisma, luck, spirit, \
                    current_streak, longest_streak, \
                    total_journals, total_tasks, total_goals, total_projects, total_voice_journals, \
                    created_at, updated_at \
             FROM user_stats WHERE user_id = ?",
            params![user_id],
            stats_from_row,
        );
        match result {
            Ok(raw) => Ok(Some(raw.into_stats()?)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Loads a user's stats row, creating a fresh one on first access.
    pub fn load_or_create_stats(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> StorageResult<UserStats> {
        if let Some(stats) = self.load_stats(user_id)? {
            return Ok(stats);
        }
        let stats = UserStats::new(user_id, now);
        self.save_stats(&stats)?;
        debug!(user_id, "created fresh stats row");
        Ok(stats)
    }

    /// Saves (upserts) a stats row.
    pub fn save_stats(&self, stats: &UserStats) -> StorageResult<()> {
        let conn = self.conn.lock().unwrap();
        save_stats_on(&conn, stats)
    }

    // ── Quest catalog ────────────────────────────────────────────

    /// Seeds the quest catalog if it is empty. Idempotent — intended to
    /// run once at startup, not on every read. Returns how many rows were
    /// inserted.
    pub fn ensure_quest_catalog(&self, quests: &[Quest]) -> StorageResult<usize> {
        self.with_transaction(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM quests", [], |row| row.get(0))?;
            if count > 0 {
                return Ok(0);
            }
            for quest in quests {
                insert_quest(conn, quest)?;
            }
            info!(seeded = quests.len(), "seeded quest catalog");
            Ok(quests.len())
        })
    }

    /// Active catalog quests visible at or below `max_level`.
    pub fn list_active_quests(&self, max_level: u32) -> StorageResult<Vec<Quest>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, quest_type, category, title, description, difficulty, \
                    requirement_kind, requirement_count, min_level, \
                    xp_reward, gold_reward, stat_rewards, is_active \
             FROM quests WHERE is_active AND min_level <= ? ORDER BY id",
        )?;
        let rows: Vec<RawQuest> = stmt
            .query_map(params![i64::from(max_level)], quest_from_row)?
            .collect::<Result<_, _>>()?;
        rows.into_iter().map(RawQuest::into_quest).collect()
    }

    /// Looks up one catalog quest.
    pub fn get_quest(&self, quest_id: &str) -> StorageResult<Option<Quest>> {
        let conn = self.conn.lock().unwrap();
        let result = conn.query_row(
            "SELECT id, quest_type, category, title, description, difficulty, \
                    requirement_kind, requirement_count, min_level, \
                    xp_reward, gold_reward, stat_rewards, is_active \
             FROM quests WHERE id = ?",
            params![quest_id],
            quest_from_row,
        );
        match result {
            Ok(raw) => Ok(Some(raw.into_quest()?)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    // ── Quest progress ───────────────────────────────────────────

    /// Creates missing progress rows for the given quests. Existing rows
    /// are left untouched (insert-or-ignore on the (user, quest) key).
    pub fn ensure_progress_rows(
        &self,
        user_id: &str,
        quests: &[Quest],
        now: DateTime<Utc>,
    ) -> StorageResult<()> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "INSERT OR IGNORE INTO user_quests \
             (id, user_id, quest_id, progress, is_completed, completed_at, last_reset_at) \
             VALUES (?, ?, ?, 0, FALSE, NULL, ?)",
        )?;
        for quest in quests {
            stmt.execute(params![
                Uuid::new_v4().to_string(),
                user_id,
                quest.id,
                now.timestamp_millis(),
            ])?;
        }
        Ok(())
    }

    /// All progress rows for a user.
    pub fn list_progress(&self, user_id: &str) -> StorageResult<Vec<QuestProgress>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, user_id, quest_id, progress, is_completed, completed_at, last_reset_at \
             FROM user_quests WHERE user_id = ? ORDER BY quest_id",
        )?;
        let rows: Vec<RawProgress> = stmt
            .query_map(params![user_id], progress_from_row)?
            .collect::<Result<_, _>>()?;
        rows.into_iter().map(RawProgress::into_progress).collect()
    }

    /// One progress row by (user, quest).
    pub fn get_progress(
        &self,
        user_id: &str,
        quest_id: &str,
    ) -> StorageResult<Option<QuestProgress>> {
        let conn = self.conn.lock().unwrap();
        let result = conn.query_row(
            "SELECT id, user_id, quest_id, progress, is_completed, completed_at, last_reset_at \
             FROM user_quests WHERE user_id = ? AND quest_id = ?",
            params![user_id, quest_id],
            progress_from_row,
        );
        match result {
            Ok(raw) => Ok(Some(raw.into_progress()?)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Saves (upserts) a progress row on its (user, quest) key.
    pub fn save_progress(&self, progress: &QuestProgress) -> StorageResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO user_quests \
             (id, user_id, quest_id, progress, is_completed, completed_at, last_reset_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                progress.id,
                progress.user_id,
                progress.quest_id,
                i64::from(progress.progress),
                progress.is_completed,
                progress.completed_at.map(|t| t.timestamp_millis()),
                progress.last_reset_at.timestamp_millis(),
            ],
        )?;
        Ok(())
    }

    /// Claims a quest: persists the rewarded stats and deletes the
    /// progress row as one atomic unit. A partial claim (reward granted
    /// without the delete, or vice versa) can never be observed.
    pub fn claim_quest(&self, stats: &UserStats, quest_id: &str) -> StorageResult<()> {
        self.with_transaction(|conn| {
            save_stats_on(conn, stats)?;
            let deleted = conn.execute(
                "DELETE FROM user_quests WHERE user_id = ? AND quest_id = ?",
                params![stats.user_id, quest_id],
            )?;
            if deleted == 0 {
                return Err(StorageError::NotFound(format!(
                    "quest progress {}/{}",
                    stats.user_id, quest_id
                )));
            }
            info!(user_id = %stats.user_id, quest_id, "quest claimed");
            Ok(())
        })
    }

    // ── Achievement catalog ──────────────────────────────────────

    /// Seeds the achievement catalog if it is empty. Idempotent.
    pub fn ensure_achievement_catalog(
        &self,
        achievements: &[Achievement],
    ) -> StorageResult<usize> {
        self.with_transaction(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM achievements", [], |row| row.get(0))?;
            if count > 0 {
                return Ok(0);
            }
            for achievement in achievements {
                insert_achievement(conn, achievement)?;
            }
            info!(seeded = achievements.len(), "seeded achievement catalog");
            Ok(achievements.len())
        })
    }

    /// The full achievement catalog.
    pub fn list_achievements(&self) -> StorageResult<Vec<Achievement>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, key, title, description, rarity, \
                    requirement_kind, requirement_count, xp_reward, stat_rewards \
             FROM achievements ORDER BY id",
        )?;
        let rows: Vec<RawAchievement> = stmt
            .query_map([], achievement_from_row)?
            .collect::<Result<_, _>>()?;
        rows.into_iter().map(RawAchievement::into_achievement).collect()
    }

    // ── Achievement unlocks ──────────────────────────────────────

    /// Records an unlock exactly once. Returns false when the row already
    /// existed — a concurrent duplicate unlock is a harmless no-op, not an
    /// error, which is what keeps the operation idempotent for callers.
    pub fn unlock_achievement(
        &self,
        user_id: &str,
        achievement_id: &str,
        now: DateTime<Utc>,
    ) -> StorageResult<bool> {
        let conn = self.conn.lock().unwrap();
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO user_achievements \
             (user_id, achievement_id, unlocked_at, is_equipped) VALUES (?, ?, ?, FALSE)",
            params![user_id, achievement_id, now.timestamp_millis()],
        )?;
        if inserted > 0 {
            info!(user_id, achievement_id, "achievement unlocked");
        }
        Ok(inserted > 0)
    }

    /// Persists a batch of unlock rows together with the rewarded stats as
    /// one atomic unit. Either every row and the stats land, or none do —
    /// a failure can never leave an unlock durable with its reward lost.
    /// Rows that already exist are ignored; returns how many were new.
    pub fn commit_unlocks(
        &self,
        stats: &UserStats,
        achievement_ids: &[String],
        now: DateTime<Utc>,
    ) -> StorageResult<usize> {
        self.with_transaction(|conn| {
            let mut inserted = 0;
            for achievement_id in achievement_ids {
                inserted += conn.execute(
                    "INSERT OR IGNORE INTO user_achievements \
                     (user_id, achievement_id, unlocked_at, is_equipped) VALUES (?, ?, ?, FALSE)",
                    params![stats.user_id, achievement_id, now.timestamp_millis()],
                )?;
            }
            save_stats_on(conn, stats)?;
            if inserted > 0 {
                info!(user_id = %stats.user_id, inserted, "achievements unlocked");
            }
            Ok(inserted)
        })
    }

    /// All unlock rows for a user.
    pub fn list_user_achievements(&self, user_id: &str) -> StorageResult<Vec<UserAchievement>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT user_id, achievement_id, unlocked_at, is_equipped \
             FROM user_achievements WHERE user_id = ? ORDER BY achievement_id",
        )?;
        let rows: Vec<(String, String, i64, bool)> = stmt
            .query_map(params![user_id], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?
            .collect::<Result<_, _>>()?;

        rows.into_iter()
            .map(|(user_id, achievement_id, unlocked_at, is_equipped)| {
                Ok(UserAchievement {
                    user_id,
                    achievement_id,
                    unlocked_at: from_millis(unlocked_at)?,
                    is_equipped,
                })
            })
            .collect()
    }

    /// Equips one achievement, clearing every other equipped flag for the
    /// user first so at most one row is ever equipped. Returns false when
    /// the user has no unlock row for the achievement.
    pub fn equip_achievement(&self, user_id: &str, achievement_id: &str) -> StorageResult<bool> {
        self.with_transaction(|conn| {
            conn.execute(
                "UPDATE user_achievements SET is_equipped = FALSE \
                 WHERE user_id = ? AND is_equipped",
                params![user_id],
            )?;
            let updated = conn.execute(
                "UPDATE user_achievements SET is_equipped = TRUE \
                 WHERE user_id = ? AND achievement_id = ?",
                params![user_id, achievement_id],
            )?;
            Ok(updated > 0)
        })
    }

    // ── Life balance history ─────────────────────────────────────

    /// Appends one history row per category at `now`. Always an append —
    /// repeated calls within a window legitimately produce multiple
    /// history points.
    pub fn append_balance_scores(
        &self,
        user_id: &str,
        scores: &BalanceScores,
        now: DateTime<Utc>,
    ) -> StorageResult<()> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "INSERT INTO life_balance_entries (id, user_id, category, score, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )?;
        for (category, score) in scores.iter() {
            stmt.execute(params![
                Uuid::new_v4().to_string(),
                user_id,
                category.as_str(),
                i64::from(score),
                now.timestamp_millis(),
            ])?;
        }
        Ok(())
    }

    /// The most recent score per category. Categories with no history are
    /// absent from the map.
    pub fn latest_balance_scores(
        &self,
        user_id: &str,
    ) -> StorageResult<BTreeMap<BalanceCategory, u8>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT category, score FROM life_balance_entries \
             WHERE user_id = ? ORDER BY created_at ASC",
        )?;
        let rows: Vec<(String, i64)> = stmt
            .query_map(params![user_id], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<_, _>>()?;

        // Later rows overwrite earlier ones, leaving the newest per category.
        let mut latest = BTreeMap::new();
        for (category, score) in rows {
            if let Some(category) = BalanceCategory::parse(&category) {
                latest.insert(category, score.clamp(0, 100) as u8);
            }
        }
        Ok(latest)
    }
}

// ── Row mapping ──────────────────────────────────────────────────

type RowResult<T> = Result<T, duckdb::Error>;

struct RawStats {
    user_id: String,
    ints: [i64; 18],
    created_at: i64,
    updated_at: i64,
}

fn stats_from_row(row: &duckdb::Row<'_>) -> RowResult<RawStats> {
    let user_id: String = row.get(0)?;
    let mut ints = [0i64; 18];
    for (i, slot) in ints.iter_mut().enumerate() {
        *slot = row.get(i + 1)?;
    }
    Ok(RawStats { user_id, ints, created_at: row.get(19)?, updated_at: row.get(20)? })
}

impl RawStats {
    fn into_stats(self) -> StorageResult<UserStats> {
        let [level, total_xp, xp, gold, crystals, strength, vitality, intelligence, charisma, luck, spirit, current_streak, longest_streak, total_journals, total_tasks, total_goals, total_projects, total_voice_journals] =
            self.ints;
        Ok(UserStats {
            user_id: self.user_id,
            level: level.max(1) as u32,
            total_xp: total_xp.max(0) as u64,
            xp: xp.max(0) as u64,
            gold,
            crystals,
            strength,
            vitality,
            intelligence,
            charisma,
            luck,
            spirit,
            current_streak: current_streak.max(0) as u32,
            longest_streak: longest_streak.max(0) as u32,
            total_journals: total_journals.max(0) as u64,
            total_tasks: total_tasks.max(0) as u64,
            total_goals: total_goals.max(0) as u64,
            total_projects: total_projects.max(0) as u64,
            total_voice_journals: total_voice_journals.max(0) as u64,
            created_at: from_millis(self.created_at)?,
            updated_at: from_millis(self.updated_at)?,
        })
    }
}

fn save_stats_on(conn: &Connection, stats: &UserStats) -> StorageResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO user_stats ( \
            user_id, level, total_xp, xp, gold, crystals, \
            strength, vitality, intelligence, charisma, luck, spirit, \
            current_streak, longest_streak, \
            total_journals, total_tasks, total_goals, total_projects, total_voice_journals, \
            created_at, updated_at \
         ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            stats.user_id,
            i64::from(stats.level),
            stats.total_xp as i64,
            stats.xp as i64,
            stats.gold,
            stats.crystals,
            stats.strength,
            stats.vitality,
            stats.intelligence,
            stats.charisma,
            stats.luck,
            stats.spirit,
            i64::from(stats.current_streak),
            i64::from(stats.longest_streak),
            stats.total_journals as i64,
            stats.total_tasks as i64,
            stats.total_goals as i64,
            stats.total_projects as i64,
            stats.total_voice_journals as i64,
            stats.created_at.timestamp_millis(),
            stats.updated_at.timestamp_millis(),
        ],
    )?;
    Ok(())
}

struct RawQuest {
    id: String,
    quest_type: String,
    category: String,
    title: String,
    description: String,
    difficulty: i64,
    requirement_kind: String,
    requirement_count: i64,
    min_level: i64,
    xp_reward: i64,
    gold_reward: i64,
    stat_rewards: String,
    is_active: bool,
}

fn quest_from_row(row: &duckdb::Row<'_>) -> RowResult<RawQuest> {
    Ok(RawQuest {
        id: row.get(0)?,
        quest_type: row.get(1)?,
        category: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        difficulty: row.get(5)?,
        requirement_kind: row.get(6)?,
        requirement_count: row.get(7)?,
        min_level: row.get(8)?,
        xp_reward: row.get(9)?,
        gold_reward: row.get(10)?,
        stat_rewards: row.get(11)?,
        is_active: row.get(12)?,
    })
}

impl RawQuest {
    fn into_quest(self) -> StorageResult<Quest> {
        let quest_type = QuestType::parse(&self.quest_type)
            .ok_or_else(|| StorageError::CorruptRow(format!("quest type {}", self.quest_type)))?;
        let category = QuestCategory::parse(&self.category).ok_or_else(|| {
            StorageError::CorruptRow(format!("quest category {}", self.category))
        })?;
        let stat_rewards: StatChanges = serde_json::from_str(&self.stat_rewards)?;
        Ok(Quest {
            id: self.id,
            quest_type,
            category,
            title: self.title,
            description: self.description,
            difficulty: self.difficulty.clamp(1, 5) as u8,
            requirement: QuestRequirement {
                // Unrecognized kinds survive the round-trip as Unknown and
                // fail closed in the engine.
                kind: ActivityKind::parse(&self.requirement_kind),
                count: self.requirement_count.max(0) as u32,
            },
            min_level: self.min_level.max(1) as u32,
            xp_reward: self.xp_reward.max(0) as u64,
            gold_reward: self.gold_reward,
            stat_rewards,
            is_active: self.is_active,
        })
    }
}

fn insert_quest(conn: &Connection, quest: &Quest) -> StorageResult<()> {
    conn.execute(
        "INSERT INTO quests ( \
            id, quest_type, category, title, description, difficulty, \
            requirement_kind, requirement_count, min_level, \
            xp_reward, gold_reward, stat_rewards, is_active \
         ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            quest.id,
            quest.quest_type.as_str(),
            quest.category.as_str(),
            quest.title,
            quest.description,
            i64::from(quest.difficulty),
            quest.requirement.kind.as_str(),
            i64::from(quest.requirement.count),
            i64::from(quest.min_level),
            quest.xp_reward as i64,
            quest.gold_reward,
            serde_json::to_string(&quest.stat_rewards)?,
            quest.is_active,
        ],
    )?;
    Ok(())
}

struct RawAchievement {
    id: String,
    key: String,
    title: String,
    description: String,
    rarity: String,
    requirement_kind: String,
    requirement_count: i64,
    xp_reward: i64,
    stat_rewards: String,
}

fn achievement_from_row(row: &duckdb::Row<'_>) -> RowResult<RawAchievement> {
    Ok(RawAchievement {
        id: row.get(0)?,
        key: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        rarity: row.get(4)?,
        requirement_kind: row.get(5)?,
        requirement_count: row.get(6)?,
        xp_reward: row.get(7)?,
        stat_rewards: row.get(8)?,
    })
}

impl RawAchievement {
    fn into_achievement(self) -> StorageResult<Achievement> {
        let rarity = Rarity::parse(&self.rarity)
            .ok_or_else(|| StorageError::CorruptRow(format!("rarity {}", self.rarity)))?;
        let stat_rewards: StatChanges = serde_json::from_str(&self.stat_rewards)?;
        Ok(Achievement {
            id: self.id,
            key: self.key,
            title: self.title,
            description: self.description,
            rarity,
            requirement: AchievementRequirement {
                kind: CounterKind::parse(&self.requirement_kind),
                count: self.requirement_count.max(0) as u64,
            },
            xp_reward: self.xp_reward.max(0) as u64,
            stat_rewards,
        })
    }
}

fn insert_achievement(conn: &Connection, achievement: &Achievement) -> StorageResult<()> {
    conn.execute(
        "INSERT INTO achievements ( \
            id, key, title, description, rarity, \
            requirement_kind, requirement_count, xp_reward, stat_rewards \
         ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            achievement.id,
            achievement.key,
            achievement.title,
            achievement.description,
            achievement.rarity.as_str(),
            achievement.requirement.kind.as_str(),
            achievement.requirement.count as i64,
            achievement.xp_reward as i64,
            serde_json::to_string(&achievement.stat_rewards)?,
        ],
    )?;
    Ok(())
}

struct RawProgress {
    id: String,
    user_id: String,
    quest_id: String,
    progress: i64,
    is_completed: bool,
    completed_at: Option<i64>,
    last_reset_at: i64,
}

fn progress_from_row(row: &duckdb::Row<'_>) -> RowResult<RawProgress> {
    Ok(RawProgress {
        id: row.get(0)?,
        user_id: row.get(1)?,
        quest_id: row.get(2)?,
        progress: row.get(3)?,
        is_completed: row.get(4)?,
        completed_at: row.get(5)?,
        last_reset_at: row.get(6)?,
    })
}

impl RawProgress {
    fn into_progress(self) -> StorageResult<QuestProgress> {
        Ok(QuestProgress {
            id: self.id,
            user_id: self.user_id,
            quest_id: self.quest_id,
            progress: self.progress.max(0) as u32,
            is_completed: self.is_completed,
            completed_at: self.completed_at.map(from_millis).transpose()?,
            last_reset_at: from_millis(self.last_reset_at)?,
        })
    }
}

fn from_millis(millis: i64) -> StorageResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| StorageError::CorruptRow(format!("timestamp {millis}")))
}

// ── Schema ───────────────────────────────────────────────────────

fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS user_stats (
            user_id VARCHAR PRIMARY KEY,
            level BIGINT NOT NULL,
            total_xp BIGINT NOT NULL,
            xp BIGINT NOT NULL,
            gold BIGINT NOT NULL,
            crystals BIGINT NOT NULL,
            strength BIGINT NOT NULL,
            vitality BIGINT NOT NULL,
            intelligence BIGINT NOT NULL,
            charisma BIGINT NOT NULL,
            luck BIGINT NOT NULL,
            spirit BIGINT NOT NULL,
            current_streak BIGINT NOT NULL,
            longest_streak BIGINT NOT NULL,
            total_journals BIGINT NOT NULL,
            total_tasks BIGINT NOT NULL,
            total_goals BIGINT NOT NULL,
            total_projects BIGINT NOT NULL,
            total_voice_journals BIGINT NOT NULL,
            created_at BIGINT NOT NULL,
            updated_at BIGINT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS quests (
            id VARCHAR PRIMARY KEY,
            quest_type VARCHAR NOT NULL,
            category VARCHAR NOT NULL,
            title VARCHAR NOT NULL,
            description VARCHAR NOT NULL,
            difficulty BIGINT NOT NULL,
            requirement_kind VARCHAR NOT NULL,
            requirement_count BIGINT NOT NULL,
            min_level BIGINT NOT NULL,
            xp_reward BIGINT NOT NULL,
            gold_reward BIGINT NOT NULL,
            stat_rewards VARCHAR NOT NULL,
            is_active BOOLEAN NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_quests_active ON quests(is_active, min_level);

        -- The (user, quest) key makes progress-row creation idempotent.
        CREATE TABLE IF NOT EXISTS user_quests (
            id VARCHAR NOT NULL,
            user_id VARCHAR NOT NULL,
            quest_id VARCHAR NOT NULL,
            progress BIGINT NOT NULL,
            is_completed BOOLEAN NOT NULL,
            completed_at BIGINT,
            last_reset_at BIGINT NOT NULL,
            PRIMARY KEY (user_id, quest_id)
        );

        CREATE TABLE IF NOT EXISTS achievements (
            id VARCHAR PRIMARY KEY,
            key VARCHAR UNIQUE NOT NULL,
            title VARCHAR NOT NULL,
            description VARCHAR NOT NULL,
            rarity VARCHAR NOT NULL,
            requirement_kind VARCHAR NOT NULL,
            requirement_count BIGINT NOT NULL,
            xp_reward BIGINT NOT NULL,
            stat_rewards VARCHAR NOT NULL
        );

        -- The (user, achievement) key is the exactly-once unlock guarantee:
        -- a raced duplicate insert is ignored, never an error.
        CREATE TABLE IF NOT EXISTS user_achievements (
            user_id VARCHAR NOT NULL,
            achievement_id VARCHAR NOT NULL,
            unlocked_at BIGINT NOT NULL,
            is_equipped BOOLEAN NOT NULL,
            PRIMARY KEY (user_id, achievement_id)
        );

        -- Append-only history; the newest row per category is the current
        -- score.
        CREATE TABLE IF NOT EXISTS life_balance_entries (
            id VARCHAR PRIMARY KEY,
            user_id VARCHAR NOT NULL,
            category VARCHAR NOT NULL,
            score BIGINT NOT NULL,
            created_at BIGINT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_balance_user_time
            ON life_balance_entries(user_id, created_at);
        "#,
    )?;
    Ok(())
}
