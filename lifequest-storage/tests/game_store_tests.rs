//! Integration tests for `GameStore` against an in-memory DuckDB.

use chrono::{DateTime, NaiveDateTime, Utc};
use lifequest_engine::catalog::{default_achievements, default_quests};
use lifequest_model::{BalanceCategory, BalanceScores, QuestProgress, UserStats};
use lifequest_storage::GameStore;
use pretty_assertions::assert_eq;

fn store() -> GameStore {
    GameStore::open_in_memory().expect("in-memory store")
}

fn at(s: &str) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| panic!("bad timestamp literal {s}"))
        .and_utc()
}

// ── User stats ───────────────────────────────────────────────────

#[test]
fn load_stats_returns_none_for_unknown_user() {
    let store = store();
    assert_eq!(store.load_stats("nobody").unwrap(), None);
}

#[test]
fn load_or_create_stats_is_idempotent() {
    let store = store();
    let now = at("2025-06-01 09:00:00");

    let first = store.load_or_create_stats("alice", now).unwrap();
    assert_eq!(first.level, 1);
    assert_eq!(first.strength, 50);

    let again = store.load_or_create_stats("alice", at("2025-06-02 09:00:00")).unwrap();
    assert_eq!(again, first);
}

#[test]
fn save_stats_round_trips_every_field() {
    let store = store();
    let now = at("2025-06-01 09:00:00");
    let mut stats = UserStats::new("alice", now);
    stats.level = 7;
    stats.total_xp = 2_850;
    stats.xp = 50;
    stats.gold = 1_234;
    stats.crystals = 30;
    stats.spirit = 83;
    stats.current_streak = 12;
    stats.longest_streak = 40;
    stats.total_journals = 55;
    stats.updated_at = at("2025-06-03 18:30:00");

    store.save_stats(&stats).unwrap();
    assert_eq!(store.load_stats("alice").unwrap(), Some(stats));
}

// ── Catalogs ─────────────────────────────────────────────────────

#[test]
fn quest_catalog_seeds_once() {
    let store = store();
    let catalog = default_quests();

    assert_eq!(store.ensure_quest_catalog(&catalog).unwrap(), catalog.len());
    // A second seed attempt is a no-op.
    assert_eq!(store.ensure_quest_catalog(&catalog).unwrap(), 0);
    assert_eq!(store.list_active_quests(100).unwrap().len(), catalog.len());
}

#[test]
fn quest_listing_filters_by_min_level() {
    let store = store();
    store.ensure_quest_catalog(&default_quests()).unwrap();

    let at_level_1 = store.list_active_quests(1).unwrap();
    let at_level_10 = store.list_active_quests(10).unwrap();
    assert!(at_level_1.len() < at_level_10.len());
    assert!(at_level_1.iter().all(|q| q.min_level <= 1));
}

#[test]
fn quest_round_trips_requirement_and_stat_rewards() {
    let store = store();
    let catalog = default_quests();
    store.ensure_quest_catalog(&catalog).unwrap();

    for quest in &catalog {
        let loaded = store.get_quest(&quest.id).unwrap().expect("seeded quest");
        assert_eq!(&loaded, quest);
    }
}

#[test]
fn achievement_catalog_seeds_once_and_round_trips() {
    let store = store();
    let catalog = default_achievements();

    assert_eq!(store.ensure_achievement_catalog(&catalog).unwrap(), catalog.len());
    assert_eq!(store.ensure_achievement_catalog(&catalog).unwrap(), 0);
    assert_eq!(store.list_achievements().unwrap(), catalog);
}

// ── Quest progress ───────────────────────────────────────────────

#[test]
fn ensure_progress_rows_never_clobbers_existing_progress() {
    let store = store();
    let catalog = default_quests();
    store.ensure_quest_catalog(&catalog).unwrap();
    let now = at("2025-06-01 09:00:00");

    store.ensure_progress_rows("alice", &catalog, now).unwrap();
    let mut row = store.get_progress("alice", "daily_reflection").unwrap().expect("row");
    row.progress = 1;
    row.is_completed = true;
    row.completed_at = Some(now);
    store.save_progress(&row).unwrap();

    // Re-ensuring must leave the advanced row alone.
    store.ensure_progress_rows("alice", &catalog, at("2025-06-01 12:00:00")).unwrap();
    let reloaded = store.get_progress("alice", "daily_reflection").unwrap().expect("row");
    assert_eq!(reloaded, row);
}

#[test]
fn progress_rows_are_scoped_per_user() {
    let store = store();
    let catalog = default_quests();
    store.ensure_quest_catalog(&catalog).unwrap();
    let now = at("2025-06-01 09:00:00");

    store.ensure_progress_rows("alice", &catalog, now).unwrap();
    store.ensure_progress_rows("bob", &catalog, now).unwrap();

    assert_eq!(store.list_progress("alice").unwrap().len(), catalog.len());
    assert_eq!(store.list_progress("bob").unwrap().len(), catalog.len());
}

#[test]
fn claim_quest_persists_stats_and_deletes_the_row_atomically() {
    let store = store();
    let catalog = default_quests();
    store.ensure_quest_catalog(&catalog).unwrap();
    let now = at("2025-06-01 09:00:00");

    let mut stats = store.load_or_create_stats("alice", now).unwrap();
    store.ensure_progress_rows("alice", &catalog, now).unwrap();

    stats.total_xp = 20;
    stats.xp = 20;
    store.claim_quest(&stats, "daily_reflection").unwrap();

    assert_eq!(store.load_stats("alice").unwrap().unwrap().total_xp, 20);
    assert_eq!(store.get_progress("alice", "daily_reflection").unwrap(), None);
}

#[test]
fn claim_without_a_progress_row_fails_and_rolls_back_the_stats() {
    let store = store();
    let now = at("2025-06-01 09:00:00");
    let mut stats = store.load_or_create_stats("alice", now).unwrap();
    stats.total_xp = 999;

    assert!(store.claim_quest(&stats, "no_such_quest").is_err());
    // The stats write inside the failed transaction must not stick.
    assert_eq!(store.load_stats("alice").unwrap().unwrap().total_xp, 0);
}

#[test]
fn save_progress_upserts_on_the_user_quest_key() {
    let store = store();
    store.ensure_quest_catalog(&default_quests()).unwrap();
    let now = at("2025-06-01 09:00:00");

    let mut row = QuestProgress::new("row-1", "alice", "daily_task_master", now);
    store.save_progress(&row).unwrap();
    row.progress = 2;
    store.save_progress(&row).unwrap();

    let all = store.list_progress("alice").unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].progress, 2);
}

// ── Achievement unlocks ──────────────────────────────────────────

#[test]
fn unlock_is_recorded_exactly_once() {
    let store = store();
    store.ensure_achievement_catalog(&default_achievements()).unwrap();
    let now = at("2025-06-01 09:00:00");

    assert!(store.unlock_achievement("alice", "writer_10", now).unwrap());
    assert!(!store.unlock_achievement("alice", "writer_10", now).unwrap());

    let unlocked = store.list_user_achievements("alice").unwrap();
    assert_eq!(unlocked.len(), 1);
    assert_eq!(unlocked[0].achievement_id, "writer_10");
    assert!(!unlocked[0].is_equipped);
}

#[test]
fn commit_unlocks_lands_rows_and_rewarded_stats_together() {
    let store = store();
    store.ensure_achievement_catalog(&default_achievements()).unwrap();
    let now = at("2025-06-01 09:00:00");
    let mut stats = store.load_or_create_stats("alice", now).unwrap();
    stats.total_xp = 150;
    stats.intelligence = 55;

    let ids = vec!["writer_10".to_string(), "early_bird_7".to_string()];
    assert_eq!(store.commit_unlocks(&stats, &ids, now).unwrap(), 2);

    // One call, both effects visible.
    assert_eq!(store.load_stats("alice").unwrap().unwrap().total_xp, 150);
    assert_eq!(store.list_user_achievements("alice").unwrap().len(), 2);

    // A retried commit inserts nothing new and leaves the rows intact.
    assert_eq!(store.commit_unlocks(&stats, &ids, now).unwrap(), 0);
    assert_eq!(store.list_user_achievements("alice").unwrap().len(), 2);
}

#[test]
fn equipping_clears_the_previously_equipped_row() {
    let store = store();
    store.ensure_achievement_catalog(&default_achievements()).unwrap();
    let now = at("2025-06-01 09:00:00");
    store.unlock_achievement("alice", "writer_10", now).unwrap();
    store.unlock_achievement("alice", "early_bird_7", now).unwrap();

    assert!(store.equip_achievement("alice", "writer_10").unwrap());
    assert!(store.equip_achievement("alice", "early_bird_7").unwrap());

    let equipped: Vec<_> = store
        .list_user_achievements("alice")
        .unwrap()
        .into_iter()
        .filter(|a| a.is_equipped)
        .collect();
    assert_eq!(equipped.len(), 1);
    assert_eq!(equipped[0].achievement_id, "early_bird_7");
}

#[test]
fn equipping_a_locked_achievement_updates_nothing() {
    let store = store();
    store.ensure_achievement_catalog(&default_achievements()).unwrap();
    assert!(!store.equip_achievement("alice", "writer_10").unwrap());
}

// ── Life balance history ─────────────────────────────────────────

#[test]
fn balance_history_is_append_only_and_latest_wins() {
    let store = store();
    let first = BalanceScores { physical: 40, mental: 60, ..Default::default() };
    store.append_balance_scores("alice", &first, at("2025-06-01 09:00:00")).unwrap();

    let second = BalanceScores { physical: 70, mental: 55, ..Default::default() };
    store.append_balance_scores("alice", &second, at("2025-06-02 09:00:00")).unwrap();

    let latest = store.latest_balance_scores("alice").unwrap();
    assert_eq!(latest.get(&BalanceCategory::Physical), Some(&70));
    assert_eq!(latest.get(&BalanceCategory::Mental), Some(&55));
}

#[test]
fn balance_history_is_empty_for_an_unseen_user() {
    let store = store();
    assert!(store.latest_balance_scores("nobody").unwrap().is_empty());
}

// ── On-disk persistence ──────────────────────────────────────────

#[test]
fn reopened_store_sees_previously_written_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("game.db");
    let now = at("2025-06-01 09:00:00");

    {
        let store = GameStore::open(&path).unwrap();
        store.ensure_quest_catalog(&default_quests()).unwrap();
        let mut stats = store.load_or_create_stats("alice", now).unwrap();
        stats.gold = 500;
        store.save_stats(&stats).unwrap();
    }

    let store = GameStore::open(&path).unwrap();
    assert_eq!(store.load_stats("alice").unwrap().unwrap().gold, 500);
    assert!(!store.list_active_quests(1).unwrap().is_empty());
    // Catalog survives, so the reopen must not re-seed.
    assert_eq!(store.ensure_quest_catalog(&default_quests()).unwrap(), 0);
}
