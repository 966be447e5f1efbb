//! The progression service.
//!
//! Each operation loads the rows it needs, runs the pure engine rules over
//! them, and persists the result. `now` is always an explicit parameter so
//! callers (and tests) control the clock; the service itself never reads
//! it from the system.

use crate::error::{ServiceError, ServiceResult};
use crate::types::{
    AchievementReport, AchievementView, LoginOutcome, QuestAction, QuestActionOutcome,
    QuestBoard, QuestEntry, StatsUpdate,
};
use chrono::{DateTime, NaiveDate, Utc};
use lifequest_engine::{
    achievement, catalog, level, quest, reward, LevelCurve, LifeBalanceScorer, RewardGrantor,
    RewardResult,
};
use lifequest_model::{
    ActivitySnapshot, BalanceCategory, BalanceScores, GoalRecord, JournalRecord, LifetimeStats,
    QuestType, TaskRecord, UserStats,
};
use lifequest_storage::GameStore;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tracing::{debug, info};

/// Ties the engine's rules to the store. Cheap to clone; the underlying
/// connection is shared.
#[derive(Clone)]
pub struct GameService {
    store: GameStore,
    grantor: RewardGrantor,
    scorer: LifeBalanceScorer,
}

impl GameService {
    /// Opens a service over the store with the default level curve and a
    /// 30-day balance window, seeding the built-in catalogs if the store
    /// is empty.
    pub fn new(store: GameStore) -> ServiceResult<Self> {
        Self::with_config(store, LevelCurve::default(), 30)
    }

    /// As `new`, with an explicit curve and balance window.
    pub fn with_config(
        store: GameStore,
        curve: LevelCurve,
        balance_window_days: u32,
    ) -> ServiceResult<Self> {
        store.ensure_quest_catalog(&catalog::default_quests())?;
        store.ensure_achievement_catalog(&catalog::default_achievements())?;
        Ok(Self {
            store,
            grantor: RewardGrantor::new(curve),
            scorer: LifeBalanceScorer::new(balance_window_days),
        })
    }

    #[must_use]
    pub fn store(&self) -> &GameStore {
        &self.store
    }

    // ── Stats ────────────────────────────────────────────────────

    /// The user's stats row, created fresh on first access.
    pub fn get_stats(&self, user_id: &str, now: DateTime<Utc>) -> ServiceResult<UserStats> {
        Ok(self.store.load_or_create_stats(user_id, now)?)
    }

    /// Applies a batch of deltas: XP through the level curve, floored
    /// currency deltas, clamped stat deltas, and lifetime counter
    /// increments.
    pub fn update_stats(
        &self,
        user_id: &str,
        update: &StatsUpdate,
        now: DateTime<Utc>,
    ) -> ServiceResult<(UserStats, RewardResult)> {
        if update.xp < 0 {
            return Err(ServiceError::InvalidInput(
                "xp delta must be non-negative".into(),
            ));
        }

        let stats = self.store.load_or_create_stats(user_id, now)?;
        let (mut updated, mut result) = self.grantor.grant_xp(&stats, update.xp as u64);

        updated.gold = reward::grant_currency(updated.gold, update.gold);
        updated.crystals = reward::grant_currency(updated.crystals, update.crystals);
        result.gold_gained += update.gold;
        result.crystals_gained += update.crystals;

        reward::apply_stat_changes(&mut updated, &update.stat_changes);
        for (&key, &change) in &update.stat_changes {
            *result.stat_changes.entry(key).or_insert(0) += change;
        }

        updated.total_journals += update.journals;
        updated.total_voice_journals += update.voice_journals;
        updated.total_tasks += update.tasks;
        updated.total_goals += update.goals;
        updated.total_projects += update.projects;

        updated.updated_at = now;
        self.store.save_stats(&updated)?;
        debug!(user_id, xp = update.xp, leveled_up = result.leveled_up, "stats updated");
        Ok((updated, result))
    }

    // ── Quests ───────────────────────────────────────────────────

    /// The user's quest board: active catalog quests at or below the
    /// user's level, each with its progress row, stale windows already
    /// reset. Missing progress rows are created on the way.
    pub fn quest_board(&self, user_id: &str, now: DateTime<Utc>) -> ServiceResult<QuestBoard> {
        let stats = self.store.load_or_create_stats(user_id, now)?;
        let quests = self.store.list_active_quests(stats.level)?;
        self.store.ensure_progress_rows(user_id, &quests, now)?;

        let mut by_quest: HashMap<String, _> = self
            .store
            .list_progress(user_id)?
            .into_iter()
            .map(|p| (p.quest_id.clone(), p))
            .collect();

        let mut board = QuestBoard::default();
        for q in quests {
            let Some(mut progress) = by_quest.remove(&q.id) else {
                continue;
            };
            if quest::reset_if_stale(&mut progress, &q, now) {
                self.store.save_progress(&progress)?;
            }
            let entry = QuestEntry { quest: q, progress };
            match entry.quest.quest_type {
                QuestType::Daily => board.daily.push(entry),
                QuestType::Weekly => board.weekly.push(entry),
                QuestType::Main | QuestType::Event => board.ongoing.push(entry),
            }
        }
        Ok(board)
    }

    /// Completes or claims a quest.
    ///
    /// `Complete` verifies the requirement against the activity snapshot
    /// and marks the row; the reward stays ungranted. `Claim` grants the
    /// reward and retires the row atomically. Claiming an expired window
    /// fails: the reset runs first, so yesterday's completion cannot be
    /// cashed in today. Retrying a claim whose row is already retired is
    /// a no-op success, so clients can resubmit safely.
    pub fn quest_action(
        &self,
        user_id: &str,
        quest_id: &str,
        action: QuestAction,
        snapshot: &ActivitySnapshot,
        now: DateTime<Utc>,
    ) -> ServiceResult<QuestActionOutcome> {
        let q = self
            .store
            .get_quest(quest_id)?
            .ok_or_else(|| ServiceError::NotFound(format!("quest {quest_id}")))?;
        if !q.is_active {
            return Err(ServiceError::PreconditionFailed(format!(
                "quest {quest_id} is inactive"
            )));
        }

        let stats = self.store.load_or_create_stats(user_id, now)?;
        if stats.level < q.min_level {
            return Err(ServiceError::PreconditionFailed(format!(
                "quest {quest_id} requires level {}",
                q.min_level
            )));
        }

        match action {
            QuestAction::Complete => {
                self.store
                    .ensure_progress_rows(user_id, std::slice::from_ref(&q), now)?;
                let mut progress = self
                    .store
                    .get_progress(user_id, quest_id)?
                    .ok_or_else(|| ServiceError::NotFound(format!("quest progress {quest_id}")))?;
                quest::reset_if_stale(&mut progress, &q, now);
                if !progress.is_completed && !quest::check_requirement(&q, snapshot) {
                    return Err(ServiceError::PreconditionFailed(format!(
                        "quest {quest_id} requirement not met"
                    )));
                }
                quest::complete(&mut progress, &q, now);
                self.store.save_progress(&progress)?;
                debug!(user_id, quest_id, "quest completed");
                Ok(QuestActionOutcome { stats, progress: Some(progress), reward: None })
            }
            QuestAction::Claim => {
                // A claim retires the row, so a missing row means the claim
                // already went through. A retry is acknowledged as a no-op
                // success with no second reward, never an error.
                let Some(mut progress) = self.store.get_progress(user_id, quest_id)? else {
                    debug!(user_id, quest_id, "claim retry acknowledged");
                    return Ok(QuestActionOutcome { stats, progress: None, reward: None });
                };
                let was_reset = quest::reset_if_stale(&mut progress, &q, now);
                if was_reset || !progress.is_completed {
                    return Err(ServiceError::PreconditionFailed(format!(
                        "quest {quest_id} is not completed"
                    )));
                }
                let (mut updated, result) = self.grantor.grant_quest_reward(&stats, &q);
                updated.updated_at = now;
                self.store.claim_quest(&updated, quest_id)?;
                info!(
                    user_id,
                    quest_id,
                    xp = result.xp_gained,
                    leveled_up = result.leveled_up,
                    "quest claimed"
                );
                Ok(QuestActionOutcome { stats: updated, progress: None, reward: Some(result) })
            }
        }
    }

    /// Advances every quest on the board from an activity snapshot.
    /// Completion fires automatically at the threshold; claiming stays a
    /// separate, explicit step.
    pub fn tick_quests(
        &self,
        user_id: &str,
        snapshot: &ActivitySnapshot,
        now: DateTime<Utc>,
    ) -> ServiceResult<QuestBoard> {
        let mut board = self.quest_board(user_id, now)?;
        for entry in board
            .daily
            .iter_mut()
            .chain(board.weekly.iter_mut())
            .chain(board.ongoing.iter_mut())
        {
            let before = entry.progress.clone();
            quest::tick(&mut entry.progress, &entry.quest, snapshot, now);
            if entry.progress != before {
                self.store.save_progress(&entry.progress)?;
            }
        }
        Ok(board)
    }

    // ── Achievements ─────────────────────────────────────────────

    /// Evaluates unlocks against the user's lifetime counters, grants
    /// rewards for anything newly unlocked, and returns the annotated
    /// catalog.
    ///
    /// Unlocks are irreversible: once a row exists the achievement stays
    /// unlocked even if the counters later regress. A single evaluation
    /// pass does not cascade — XP granted here can qualify further
    /// achievements only on the next call.
    pub fn achievement_report(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> ServiceResult<AchievementReport> {
        let mut stats = self.store.load_or_create_stats(user_id, now)?;
        let all = self.store.list_achievements()?;
        let unlocked_ids: HashSet<String> = self
            .store
            .list_user_achievements(user_id)?
            .into_iter()
            .map(|row| row.achievement_id)
            .collect();

        let lifetime = LifetimeStats::from(&stats);
        let mut newly_unlocked = Vec::new();
        let mut granted = Vec::new();
        for a in achievement::find_newly_unlocked(&all, &unlocked_ids, &lifetime) {
            let (updated, result) = self.grantor.grant_achievement_reward(&stats, a);
            stats = updated;
            granted.push(result);
            newly_unlocked.push(a.id.clone());
        }
        if !granted.is_empty() {
            // One transaction: the unlock rows and the rewarded stats land
            // together or not at all.
            stats.updated_at = now;
            self.store.commit_unlocks(&stats, &newly_unlocked, now)?;
        }

        let rows: HashMap<String, _> = self
            .store
            .list_user_achievements(user_id)?
            .into_iter()
            .map(|row| (row.achievement_id.clone(), row))
            .collect();
        let lifetime = LifetimeStats::from(&stats);
        let achievements = all
            .into_iter()
            .map(|a| {
                let row = rows.get(&a.id);
                let progress_percent = if row.is_some() {
                    100
                } else {
                    achievement::progress_percent(&a, &lifetime)
                };
                AchievementView {
                    unlocked_at: row.map(|r| r.unlocked_at),
                    is_equipped: row.is_some_and(|r| r.is_equipped),
                    progress_percent,
                    achievement: a,
                }
            })
            .collect();

        Ok(AchievementReport {
            achievements,
            newly_unlocked,
            reward: reward::combine(&granted),
        })
    }

    /// Equips one unlocked achievement as the user's displayed title,
    /// unequipping whatever was equipped before.
    pub fn equip_achievement(&self, user_id: &str, achievement_id: &str) -> ServiceResult<()> {
        if !self.store.equip_achievement(user_id, achievement_id)? {
            return Err(ServiceError::NotFound(format!(
                "unlocked achievement {achievement_id}"
            )));
        }
        debug!(user_id, achievement_id, "achievement equipped");
        Ok(())
    }

    // ── Life balance ─────────────────────────────────────────────

    /// Scores the nine categories from the window's journals, tasks, and
    /// goals, and appends the result to the user's history.
    pub fn recalculate_balance(
        &self,
        user_id: &str,
        journals: &[JournalRecord],
        tasks: &[TaskRecord],
        goals: &[GoalRecord],
        now: DateTime<Utc>,
    ) -> ServiceResult<BalanceScores> {
        let scores = self.scorer.score(journals, tasks, goals, now);
        self.store.append_balance_scores(user_id, &scores, now)?;
        debug!(user_id, journals = journals.len(), "balance recalculated");
        Ok(scores)
    }

    /// The most recent stored score per category.
    pub fn latest_balance(
        &self,
        user_id: &str,
    ) -> ServiceResult<BTreeMap<BalanceCategory, u8>> {
        Ok(self.store.latest_balance_scores(user_id)?)
    }

    // ── Login ────────────────────────────────────────────────────

    /// Records a login at `now` against the set of prior activity days,
    /// recomputing the streak and granting the daily bonus.
    ///
    /// The bonus is granted once per calendar day: when `activity_days`
    /// already contains today the streak is still refreshed, but the
    /// bonus comes back zeroed.
    pub fn record_login(
        &self,
        user_id: &str,
        activity_days: &BTreeSet<NaiveDate>,
        now: DateTime<Utc>,
    ) -> ServiceResult<LoginOutcome> {
        let stats = self.store.load_or_create_stats(user_id, now)?;
        let today = now.date_naive();
        let already_counted = activity_days.contains(&today);

        let mut days = activity_days.clone();
        days.insert(today);
        let streak = lifequest_engine::compute_streak(&days, today);

        // Longer streaks also earn a stepped XP bonus on top of the
        // scaled daily grant.
        let (bonus, streak_xp) = if already_counted {
            (lifequest_engine::LoginBonus::default(), 0)
        } else {
            (reward::daily_login_bonus(streak), level::streak_bonus_xp(streak))
        };

        let (mut updated, mut result) = self.grantor.grant_xp(&stats, bonus.xp + streak_xp);
        updated.gold = reward::grant_currency(updated.gold, bonus.gold);
        updated.crystals = reward::grant_currency(updated.crystals, bonus.crystals);
        result.gold_gained += bonus.gold;
        result.crystals_gained += bonus.crystals;

        updated.current_streak = streak;
        updated.longest_streak = updated.longest_streak.max(streak);
        updated.updated_at = now;
        self.store.save_stats(&updated)?;
        info!(user_id, streak, bonus_xp = bonus.xp, "login recorded");

        Ok(LoginOutcome { stats: updated, streak, bonus, reward: result })
    }
}
