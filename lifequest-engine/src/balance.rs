//! Life-balance scoring: journals, tasks, and goals in a rolling window
//! blended into nine 0-100 wellness-category scores.
//!
//! Each category mixes a different subset of signals — keyword hits in
//! journal text, per-entry activity flags, mood/energy/stress/sleep
//! averages (1-5 normalized to 0-100), themed task completion ratios, and
//! goal progress averages — with fixed weights. Missing rated signals use
//! a neutral 50 so a sparse window is not read as a crisis; a completely
//! empty window scores zero across the board.

use chrono::{DateTime, Duration, Utc};
use lifequest_model::{BalanceScores, GoalRecord, JournalRecord, TaskRecord};

// Keyword dictionaries per category. Matched case-insensitively as
// substrings of journal/task/goal text and tags.
const PHYSICAL: &[&str] = &[
    "exercise", "workout", "gym", "yoga", "running", "training", "sleep", "walk", "sport",
    "stretch", "tired",
];
const MENTAL: &[&str] = &[
    "grateful", "happy", "relax", "meditat", "stress", "anxious", "calm", "healing", "mindful",
    "breath", "peaceful",
];
const RELATIONSHIPS: &[&str] = &[
    "friend", "family", "partner", "date", "talked", "called", "dinner with", "parents", "kids",
    "together",
];
const CONTRIBUTION: &[&str] = &[
    "volunteer", "helped", "contribut", "donat", "support", "community", "charity", "mentor",
];
const CAREER: &[&str] = &[
    "work", "meeting", "project", "finished", "achieved", "career", "promotion", "deadline",
    "shipped", "client",
];
const FINANCIAL_POSITIVE: &[&str] = &[
    "savings", "saved", "income", "salary", "raise", "invest", "budget", "stable",
];
const FINANCIAL_NEGATIVE: &[&str] = &[
    "debt", "overdrawn", "broke", "expensive", "can't afford", "bills piling",
];
const LEARNING: &[&str] = &[
    "learned", "reading", "study", "book", "seminar", "course", "skill", "practice", "tutorial",
];
const ACHIEVEMENT: &[&str] = &[
    "achieved", "growth", "confidence", "success", "milestone", "progress", "improved",
    "breakthrough",
];
const LEISURE: &[&str] = &[
    "fun", "hobby", "play", "movie", "music", "game", "travel", "vacation", "nature", "relaxed",
];

fn count_keywords(text: &str, keywords: &[&str]) -> u32 {
    let lower = text.to_lowercase();
    keywords.iter().map(|k| lower.matches(k).count() as u32).sum()
}

/// Accumulated signals from the journal window.
#[derive(Debug, Default)]
struct JournalAnalysis {
    physical: u32,
    mental: u32,
    relationships: u32,
    contribution: u32,
    career: u32,
    financial_positive: u32,
    financial_negative: u32,
    learning: u32,
    achievement: u32,
    leisure: u32,
    total_mood: u32,
    total_energy: u32,
    total_stress: u32,
    total_sleep: u32,
    rated_count: u32,
    act_exercise: u32,
    act_socializing: u32,
    act_work_done: u32,
    act_learning: u32,
    act_hobby: u32,
    act_meditation: u32,
    act_outdoor: u32,
    act_helping: u32,
}

fn analyze_journals(
    journals: &[JournalRecord],
    window_days: u32,
    now: DateTime<Utc>,
) -> JournalAnalysis {
    let cutoff = now - Duration::days(i64::from(window_days));
    let mut a = JournalAnalysis::default();

    for journal in journals.iter().filter(|j| j.created_at >= cutoff) {
        let full_text = format!("{} {}", journal.content, journal.tags.join(" "));

        a.physical += count_keywords(&full_text, PHYSICAL);
        a.mental += count_keywords(&full_text, MENTAL);
        a.relationships += count_keywords(&full_text, RELATIONSHIPS);
        a.contribution += count_keywords(&full_text, CONTRIBUTION);
        a.career += count_keywords(&full_text, CAREER);
        a.financial_positive += count_keywords(&full_text, FINANCIAL_POSITIVE);
        a.financial_negative += count_keywords(&full_text, FINANCIAL_NEGATIVE);
        a.learning += count_keywords(&full_text, LEARNING);
        a.achievement += count_keywords(&full_text, ACHIEVEMENT);
        a.leisure += count_keywords(&full_text, LEISURE);

        if let Some(mood) = journal.mood {
            a.total_mood += u32::from(mood);
            a.rated_count += 1;
        }
        if let Some(energy) = journal.energy {
            a.total_energy += u32::from(energy);
        }
        if let Some(stress) = journal.stress {
            a.total_stress += u32::from(stress);
        }
        if let Some(sleep) = journal.sleep {
            a.total_sleep += u32::from(sleep);
        }

        if let Some(acts) = journal.activities {
            a.act_exercise += u32::from(acts.exercise);
            a.act_socializing += u32::from(acts.socializing);
            a.act_work_done += u32::from(acts.work_done);
            a.act_learning += u32::from(acts.learning);
            a.act_hobby += u32::from(acts.hobby);
            a.act_meditation += u32::from(acts.meditation);
            a.act_outdoor += u32::from(acts.outdoor);
            a.act_helping += u32::from(acts.helping);
        }
    }

    a
}

#[derive(Debug, Default)]
struct Bucket {
    total: u32,
    completed: u32,
}

impl Bucket {
    fn tally(&mut self, completed: bool) {
        self.total += 1;
        self.completed += u32::from(completed);
    }

    /// Completion ratio 0-100, or a neutral 50 when the bucket is empty.
    fn ratio_or_neutral(&self) -> f64 {
        if self.total == 0 {
            50.0
        } else {
            f64::from(self.completed) / f64::from(self.total) * 100.0
        }
    }
}

#[derive(Debug, Default)]
struct TaskAnalysis {
    health: Bucket,
    social: Bucket,
    work: Bucket,
    learning: Bucket,
}

fn analyze_tasks(tasks: &[TaskRecord]) -> TaskAnalysis {
    let mut a = TaskAnalysis::default();
    for task in tasks {
        let text = format!("{} {}", task.title, task.tags.join(" "));

        if count_keywords(&text, PHYSICAL) > 0 {
            a.health.tally(task.completed);
        }
        if count_keywords(&text, RELATIONSHIPS) > 0 || count_keywords(&text, CONTRIBUTION) > 0 {
            a.social.tally(task.completed);
        }
        if count_keywords(&text, CAREER) > 0 {
            a.work.tally(task.completed);
        }
        if count_keywords(&text, LEARNING) > 0 {
            a.learning.tally(task.completed);
        }
    }
    a
}

#[derive(Debug, Default)]
struct GoalAnalysis {
    career_avg: f64,
    financial_avg: f64,
    learning_avg: f64,
    overall_avg: f64,
}

fn analyze_goals(goals: &[GoalRecord]) -> GoalAnalysis {
    let mut career = Vec::new();
    let mut financial = Vec::new();
    let mut learning = Vec::new();
    let mut overall = Vec::new();

    for goal in goals {
        let text = format!("{} {}", goal.title, goal.category.as_deref().unwrap_or(""));

        if count_keywords(&text, CAREER) > 0 {
            career.push(goal.progress);
        }
        if count_keywords(&text, FINANCIAL_POSITIVE) > 0 {
            financial.push(goal.progress);
        }
        if count_keywords(&text, LEARNING) > 0 {
            learning.push(goal.progress);
        }
        overall.push(goal.progress);
    }

    let avg = |v: &[f64]| {
        if v.is_empty() { 0.0 } else { v.iter().sum::<f64>() / v.len() as f64 }
    };

    GoalAnalysis {
        career_avg: avg(&career),
        financial_avg: avg(&financial),
        learning_avg: avg(&learning),
        overall_avg: avg(&overall),
    }
}

/// Blends journal, task, and goal signals into the nine category scores.
#[derive(Debug, Clone, Copy)]
pub struct LifeBalanceScorer {
    window_days: u32,
}

impl Default for LifeBalanceScorer {
    fn default() -> Self {
        Self::new(30)
    }
}

impl LifeBalanceScorer {
    #[must_use]
    pub fn new(window_days: u32) -> Self {
        Self { window_days: window_days.max(1) }
    }

    #[must_use]
    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    /// Frequency per window day, projected onto a 30-day baseline so a
    /// shorter window is not penalized for having fewer entries.
    fn rate(&self, count: u32) -> f64 {
        let days = f64::from(self.window_days);
        f64::from(count) / days * 100.0 * (30.0 / days)
    }

    /// Keyword-hit rate, capped at 100 before weighting.
    fn capped_rate(&self, count: u32) -> f64 {
        self.rate(count).min(100.0)
    }

    /// Computes all nine category scores for the window ending at `now`.
    /// Every key is always present; a window with no journals, tasks, or
    /// goals at all scores zero in every category.
    #[must_use]
    pub fn score(
        &self,
        journals: &[JournalRecord],
        tasks: &[TaskRecord],
        goals: &[GoalRecord],
        now: DateTime<Utc>,
    ) -> BalanceScores {
        if journals.is_empty() && tasks.is_empty() && goals.is_empty() {
            return BalanceScores::default();
        }

        let j = analyze_journals(journals, self.window_days, now);
        let t = analyze_tasks(tasks);
        let g = analyze_goals(goals);

        // Rated signals normalize 1-5 to 0-100; neutral 50 when absent.
        let rated = |total: u32| {
            if j.rated_count == 0 {
                50.0
            } else {
                f64::from(total) / f64::from(j.rated_count) / 5.0 * 100.0
            }
        };
        let mood_score = rated(j.total_mood);
        let energy_score = rated(j.total_energy);
        let sleep_score = rated(j.total_sleep);
        // Stress is inverted: a low average stress is a high score.
        let stress_score = if j.rated_count == 0 {
            50.0
        } else {
            (5.0 - f64::from(j.total_stress) / f64::from(j.rated_count)) / 5.0 * 100.0
        };

        let physical = self.capped_rate(j.physical) * 0.2
            + self.rate(j.act_exercise) * 0.3
            + t.health.ratio_or_neutral() * 0.2
            + energy_score * 0.15
            + sleep_score * 0.15;

        let mental = mood_score * 0.4
            + stress_score * 0.3
            + self.capped_rate(j.mental) * 0.2
            + self.rate(j.act_meditation) * 0.1;

        let relationships = self.rate(j.act_socializing) * 0.5
            + self.capped_rate(j.relationships) * 0.3
            + t.social.ratio_or_neutral() * 0.2;

        let contribution =
            self.rate(j.act_helping) * 0.6 + self.capped_rate(j.contribution) * 0.4;

        let career = t.work.ratio_or_neutral() * 0.5
            + g.career_avg * 0.3
            + self.rate(j.act_work_done) * 0.2;

        let sentiment =
            f64::from(j.financial_positive) - f64::from(j.financial_negative);
        let sentiment_score = (50.0 + sentiment * 10.0).clamp(0.0, 100.0);
        let financial = sentiment_score * 0.7 + g.financial_avg * 0.3;

        let growth = self.rate(j.act_learning) * 0.4
            + self.capped_rate(j.learning) * 0.3
            + t.learning.ratio_or_neutral() * 0.2
            + g.learning_avg * 0.1;

        let self_actualization = g.overall_avg * 0.6 + self.capped_rate(j.achievement) * 0.4;

        let leisure = self.rate(j.act_hobby) * 0.4
            + self.capped_rate(j.leisure) * 0.3
            + self.rate(j.act_outdoor) * 0.3;

        BalanceScores {
            physical: finish(physical),
            mental: finish(mental),
            relationships: finish(relationships),
            contribution: finish(contribution),
            career: finish(career),
            financial: finish(financial),
            growth: finish(growth),
            self_actualization: finish(self_actualization),
            leisure: finish(leisure),
        }
    }
}

fn finish(score: f64) -> u8 {
    score.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifequest_model::JournalActivities;

    fn journal(content: &str, created_at: DateTime<Utc>) -> JournalRecord {
        JournalRecord {
            content: content.into(),
            tags: vec![],
            mood: None,
            energy: None,
            stress: None,
            sleep: None,
            activities: None,
            created_at,
        }
    }

    #[test]
    fn empty_window_scores_zero_everywhere() {
        let scorer = LifeBalanceScorer::default();
        let scores = scorer.score(&[], &[], &[], Utc::now());
        for (_, score) in scores.iter() {
            assert_eq!(score, 0);
        }
    }

    #[test]
    fn mood_normalizes_one_to_five_onto_percent() {
        let scorer = LifeBalanceScorer::default();
        let now = Utc::now();
        let mut entry = journal("an ordinary day", now);
        entry.mood = Some(5);
        entry.stress = Some(1);

        let scores = scorer.score(&[entry], &[], &[], now);
        // mood 100 * 0.4 + stress-inverted 80 * 0.3 + no mental keywords +
        // no meditation = 64.
        assert_eq!(scores.mental, 64);
    }

    #[test]
    fn journals_outside_the_window_are_ignored() {
        let scorer = LifeBalanceScorer::default();
        let now = Utc::now();
        let mut old = journal("grateful and happy", now - Duration::days(45));
        old.mood = Some(5);

        let fresh = scorer.score(&[old], &[], &[], now);
        // The stale journal contributes nothing; only the neutral rated
        // defaults remain: 50 * 0.4 + 50 * 0.3 = 35.
        assert_eq!(fresh.mental, 35);
    }

    #[test]
    fn task_completion_feeds_career() {
        let scorer = LifeBalanceScorer::default();
        let tasks = vec![
            TaskRecord { title: "finish work report".into(), completed: true, tags: vec![] },
            TaskRecord { title: "prepare client meeting".into(), completed: true, tags: vec![] },
        ];
        let scores = scorer.score(&[], &tasks, &[], Utc::now());
        // work ratio 100 * 0.5 + goal avg 0 * 0.3 + workDone rate 0 * 0.2.
        assert_eq!(scores.career, 50);
    }

    #[test]
    fn goal_progress_feeds_self_actualization() {
        let scorer = LifeBalanceScorer::default();
        let goals = vec![
            GoalRecord { title: "ship the side project".into(), progress: 80.0, category: None },
            GoalRecord { title: "run a marathon".into(), progress: 20.0, category: None },
        ];
        let scores = scorer.score(&[], &[], &goals, Utc::now());
        // overall avg 50 * 0.6 + achievement keywords 0 * 0.4 = 30.
        assert_eq!(scores.self_actualization, 30);
    }

    #[test]
    fn activity_flags_drive_their_categories() {
        let scorer = LifeBalanceScorer::default();
        let now = Utc::now();
        let journals: Vec<JournalRecord> = (0..15)
            .map(|i| {
                let mut entry = journal("day notes", now - Duration::days(i));
                entry.activities = Some(JournalActivities {
                    helping: true,
                    ..Default::default()
                });
                entry
            })
            .collect();

        let scores = scorer.score(&journals, &[], &[], now);
        // helping 15/30 days = rate 50 * 0.6 = 30; no contribution keywords.
        assert_eq!(scores.contribution, 30);
    }

    #[test]
    fn financial_sentiment_swings_around_neutral() {
        let scorer = LifeBalanceScorer::default();
        let now = Utc::now();
        let positive = journal("salary raise and more savings this month", now);
        let scores = scorer.score(&[positive], &[], &[], now);
        // sentiment 50 + 3*10 = 80, weighted 0.7 = 56.
        assert_eq!(scores.financial, 56);

        let negative = journal("debt and more debt, everything expensive", now);
        let scores = scorer.score(&[negative], &[], &[], now);
        // sentiment 50 - 3*10 = 20, weighted 0.7 = 14.
        assert_eq!(scores.financial, 14);
    }

    #[test]
    fn all_nine_keys_are_always_present() {
        let scorer = LifeBalanceScorer::default();
        let now = Utc::now();
        let scores = scorer.score(&[journal("quiet day", now)], &[], &[], now);
        assert_eq!(scores.iter().count(), 9);
    }
}
