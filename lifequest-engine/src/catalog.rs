//! Built-in quest and achievement catalogs.
//!
//! These are the fixed definitions seeded into an empty store at startup,
//! not user-authorable content. Ids are stable slugs so seeding is
//! idempotent and tests can reference entries directly.

use lifequest_model::{
    AbilityStat, Achievement, AchievementRequirement, ActivityKind, CounterKind, Quest,
    QuestCategory, QuestRequirement, QuestType, Rarity, StatChanges,
};

fn stat_changes(pairs: &[(AbilityStat, i64)]) -> StatChanges {
    pairs.iter().copied().collect()
}

/// The default daily and weekly quests.
#[must_use]
pub fn default_quests() -> Vec<Quest> {
    vec![
        Quest {
            id: "daily_morning_meditation".into(),
            quest_type: QuestType::Daily,
            category: QuestCategory::Mindfulness,
            title: "Morning Meditation".into(),
            description: "Start the day with five quiet minutes".into(),
            difficulty: 1,
            requirement: QuestRequirement { kind: ActivityKind::Meditation, count: 5 },
            min_level: 1,
            xp_reward: 15,
            gold_reward: 10,
            stat_rewards: stat_changes(&[(AbilityStat::Spirit, 5)]),
            is_active: true,
        },
        Quest {
            id: "daily_reflection".into(),
            quest_type: QuestType::Daily,
            category: QuestCategory::Goals,
            title: "Daily Reflection".into(),
            description: "Write a journal entry and look back on the day".into(),
            difficulty: 1,
            requirement: QuestRequirement { kind: ActivityKind::Journal, count: 1 },
            min_level: 1,
            xp_reward: 10,
            gold_reward: 5,
            stat_rewards: stat_changes(&[(AbilityStat::Intelligence, 3)]),
            is_active: true,
        },
        Quest {
            id: "daily_task_master".into(),
            quest_type: QuestType::Daily,
            category: QuestCategory::Work,
            title: "Task Master".into(),
            description: "Complete three tasks".into(),
            difficulty: 2,
            requirement: QuestRequirement { kind: ActivityKind::Task, count: 3 },
            min_level: 1,
            xp_reward: 20,
            gold_reward: 15,
            stat_rewards: stat_changes(&[(AbilityStat::Strength, 5)]),
            is_active: true,
        },
        Quest {
            id: "daily_voice_note".into(),
            quest_type: QuestType::Daily,
            category: QuestCategory::Health,
            title: "Voice Journal".into(),
            description: "Record your thoughts out loud".into(),
            difficulty: 1,
            requirement: QuestRequirement { kind: ActivityKind::VoiceJournal, count: 1 },
            min_level: 3,
            xp_reward: 15,
            gold_reward: 10,
            stat_rewards: stat_changes(&[(AbilityStat::Vitality, 4)]),
            is_active: true,
        },
        Quest {
            id: "weekly_review".into(),
            quest_type: QuestType::Weekly,
            category: QuestCategory::Goals,
            title: "Weekly Review".into(),
            description: "Journal on seven days".into(),
            difficulty: 3,
            requirement: QuestRequirement { kind: ActivityKind::Journal, count: 7 },
            min_level: 1,
            xp_reward: 100,
            gold_reward: 50,
            stat_rewards: stat_changes(&[(AbilityStat::Intelligence, 10), (AbilityStat::Spirit, 5)]),
            is_active: true,
        },
        Quest {
            id: "weekly_goal_getter".into(),
            quest_type: QuestType::Weekly,
            category: QuestCategory::Goals,
            title: "Goal Getter".into(),
            description: "Complete three goals".into(),
            difficulty: 4,
            requirement: QuestRequirement { kind: ActivityKind::Goal, count: 3 },
            min_level: 5,
            xp_reward: 150,
            gold_reward: 75,
            stat_rewards: stat_changes(&[(AbilityStat::Strength, 15)]),
            is_active: true,
        },
        Quest {
            id: "weekly_persistence".into(),
            quest_type: QuestType::Weekly,
            category: QuestCategory::Mindfulness,
            title: "Power of Persistence".into(),
            description: "Keep a seven-day login streak".into(),
            difficulty: 3,
            requirement: QuestRequirement { kind: ActivityKind::Streak, count: 7 },
            min_level: 1,
            xp_reward: 120,
            gold_reward: 60,
            stat_rewards: stat_changes(&[(AbilityStat::Spirit, 10), (AbilityStat::Vitality, 5)]),
            is_active: true,
        },
    ]
}

/// The default achievement catalog.
#[must_use]
pub fn default_achievements() -> Vec<Achievement> {
    fn entry(
        key: &str,
        title: &str,
        description: &str,
        rarity: Rarity,
        kind: CounterKind,
        count: u64,
        xp_reward: u64,
        rewards: &[(AbilityStat, i64)],
    ) -> Achievement {
        Achievement {
            id: key.into(),
            key: key.into(),
            title: title.into(),
            description: description.into(),
            rarity,
            requirement: AchievementRequirement { kind, count },
            xp_reward,
            stat_rewards: stat_changes(rewards),
        }
    }

    vec![
        // Streaks
        entry(
            "early_bird_7", "Early Bird", "Seven consecutive days of activity",
            Rarity::Common, CounterKind::Streak, 7, 100,
            &[(AbilityStat::Spirit, 10)],
        ),
        entry(
            "dedication_30", "Devoted Warrior", "Thirty consecutive days of activity",
            Rarity::Rare, CounterKind::Streak, 30, 500,
            &[(AbilityStat::Spirit, 25), (AbilityStat::Vitality, 15)],
        ),
        entry(
            "legend_100", "Living Legend", "One hundred consecutive days of activity",
            Rarity::Legendary, CounterKind::Streak, 100, 2000,
            &[(AbilityStat::Spirit, 50), (AbilityStat::Vitality, 30), (AbilityStat::Strength, 20)],
        ),
        // Journals
        entry(
            "writer_10", "Apprentice Chronicler", "Write ten journal entries",
            Rarity::Common, CounterKind::Journals, 10, 50,
            &[(AbilityStat::Intelligence, 5)],
        ),
        entry(
            "writer_50", "Seasoned Chronicler", "Write fifty journal entries",
            Rarity::Rare, CounterKind::Journals, 50, 300,
            &[(AbilityStat::Intelligence, 15)],
        ),
        entry(
            "writer_100", "Master Chronicler", "Write one hundred journal entries",
            Rarity::Epic, CounterKind::Journals, 100, 800,
            &[(AbilityStat::Intelligence, 30), (AbilityStat::Spirit, 20)],
        ),
        // Goals
        entry(
            "goal_master_10", "Goal Getter", "Complete ten goals",
            Rarity::Common, CounterKind::Goals, 10, 100,
            &[(AbilityStat::Strength, 10)],
        ),
        entry(
            "goal_master_50", "Master of Goals", "Complete fifty goals",
            Rarity::Epic, CounterKind::Goals, 50, 1000,
            &[(AbilityStat::Strength, 40), (AbilityStat::Charisma, 20)],
        ),
        // Levels
        entry(
            "level_10", "Proof of Growth", "Reach level 10",
            Rarity::Common, CounterKind::Level, 10, 200,
            &[(AbilityStat::Strength, 5), (AbilityStat::Vitality, 5), (AbilityStat::Intelligence, 5)],
        ),
        entry(
            "level_25", "Seasoned Adventurer", "Reach level 25",
            Rarity::Rare, CounterKind::Level, 25, 500,
            &[(AbilityStat::Strength, 10), (AbilityStat::Vitality, 10), (AbilityStat::Intelligence, 10)],
        ),
        entry(
            "level_50", "Legendary Hero", "Reach level 50",
            Rarity::Legendary, CounterKind::Level, 50, 2000,
            &[
                (AbilityStat::Strength, 25), (AbilityStat::Vitality, 25),
                (AbilityStat::Intelligence, 25), (AbilityStat::Charisma, 25),
                (AbilityStat::Luck, 25), (AbilityStat::Spirit, 25),
            ],
        ),
        // Voice journals
        entry(
            "voice_master_10", "Voice of Record", "Record ten voice journals",
            Rarity::Common, CounterKind::VoiceJournals, 10, 100,
            &[(AbilityStat::Vitality, 10)],
        ),
        entry(
            "voice_master_50", "Master of Voices", "Record fifty voice journals",
            Rarity::Epic, CounterKind::VoiceJournals, 50, 800,
            &[(AbilityStat::Vitality, 30), (AbilityStat::Spirit, 20)],
        ),
        // Tasks
        entry(
            "task_master_100", "Task Master", "Complete one hundred tasks",
            Rarity::Rare, CounterKind::Tasks, 100, 400,
            &[(AbilityStat::Strength, 20), (AbilityStat::Vitality, 10)],
        ),
        // XP
        entry(
            "xp_10000", "Seeker of Experience", "Earn 10,000 lifetime XP",
            Rarity::Epic, CounterKind::Xp, 10_000, 1000,
            &[(AbilityStat::Luck, 30)],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn quest_ids_are_unique() {
        let quests = default_quests();
        let ids: HashSet<_> = quests.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids.len(), quests.len());
    }

    #[test]
    fn catalog_splits_into_four_daily_and_three_weekly() {
        let quests = default_quests();
        let daily = quests.iter().filter(|q| q.quest_type == QuestType::Daily).count();
        let weekly = quests.iter().filter(|q| q.quest_type == QuestType::Weekly).count();
        assert_eq!((daily, weekly), (4, 3));
    }

    #[test]
    fn achievement_keys_are_unique_and_recognized() {
        let achievements = default_achievements();
        let keys: HashSet<_> = achievements.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys.len(), achievements.len());
        assert!(achievements.iter().all(|a| a.requirement.kind != CounterKind::Unknown));
    }

    #[test]
    fn every_quest_requirement_is_trackable() {
        for quest in default_quests() {
            assert_ne!(quest.requirement.kind, ActivityKind::Unknown, "{}", quest.id);
            assert!(quest.requirement.count > 0, "{}", quest.id);
        }
    }
}
