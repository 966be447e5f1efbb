//! Daily and weekly window staleness.
//!
//! A daily progress record is stale once the calendar day changes; a
//! weekly record is stale once the ISO-8601 week changes (Monday-start,
//! first week contains the year's first Thursday). ISO weeks are required
//! here: a naive day-of-year / 7 comparison misclassifies the week that
//! spans a year boundary.

use chrono::{DateTime, Datelike, Utc};
use lifequest_model::QuestType;

/// True iff `last_reset` and `now` fall on different calendar days.
#[must_use]
pub fn is_daily_stale(last_reset: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    last_reset.date_naive() != now.date_naive()
}

/// True iff `last_reset` and `now` fall in different ISO weeks.
///
/// Both the ISO week-year and the week number are compared, so week 5 of
/// one year never aliases week 5 of another.
#[must_use]
pub fn is_weekly_stale(last_reset: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    let a = last_reset.date_naive().iso_week();
    let b = now.date_naive().iso_week();
    (a.year(), a.week()) != (b.year(), b.week())
}

/// Staleness for a quest's cadence. Main and event quests never reset.
#[must_use]
pub fn is_stale_for(quest_type: QuestType, last_reset: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    match quest_type {
        QuestType::Daily => is_daily_stale(last_reset, now),
        QuestType::Weekly => is_weekly_stale(last_reset, now),
        QuestType::Main | QuestType::Event => false,
    }
}
