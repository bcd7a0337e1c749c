//! In-memory per-user learning progress.

use crate::types::{Course, QuizAttempt, UserProgress};
use dashmap::DashMap;
use std::collections::BTreeSet;

/// Per-user aggregate of generated courses, quiz attempts, scores and
/// preferences.
///
/// State lives for the process lifetime only; durability is an external
/// collaborator's concern. Entries are created lazily on first reference to
/// a user, and every mutation goes through a single map entry so aggregate
/// fields stay consistent under concurrent reads.
#[derive(Debug, Default)]
pub struct ProgressStore {
    users: DashMap<String, UserProgress>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a user's progress, initializing an empty record if the
    /// user has not been seen before.
    pub fn get_or_init(&self, user: &str) -> UserProgress {
        self.users.entry(user.to_string()).or_default().clone()
    }

    /// Record a generated course against a user.
    pub fn record_course(&self, user: &str, course: Course) {
        let mut entry = self.users.entry(user.to_string()).or_default();
        entry.courses.push(course);
        entry.courses_completed += 1;
        tracing::debug!(user, courses = entry.courses.len(), "recorded course");
    }

    /// Append a quiz attempt, updating the score and count aggregates.
    pub fn record_quiz_attempt(&self, user: &str, attempt: QuizAttempt) {
        let mut entry = self.users.entry(user.to_string()).or_default();
        entry.total_score += attempt.score;
        entry.quizzes_taken += 1;
        entry.quiz_history.push(attempt);
        tracing::debug!(user, quizzes = entry.quizzes_taken, "recorded quiz attempt");
    }

    /// Replace a user's learning preferences.
    pub fn set_preferences(&self, user: &str, preferences: BTreeSet<String>) {
        let mut entry = self.users.entry(user.to_string()).or_default();
        entry.preferences = preferences;
    }

    /// All quiz attempts for a user, oldest first.
    pub fn history(&self, user: &str) -> Vec<QuizAttempt> {
        self.users
            .get(user)
            .map(|entry| entry.quiz_history.clone())
            .unwrap_or_default()
    }

    /// Topics of the user's generated courses, oldest first. This feeds the
    /// recommendation history.
    pub fn course_topics(&self, user: &str) -> Vec<String> {
        self.users
            .get(user)
            .map(|entry| {
                entry
                    .courses
                    .iter()
                    .map(|c| c.source_topic.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Mean quiz score, or None if the user has taken no quizzes.
    pub fn average_score(&self, user: &str) -> Option<f64> {
        self.users.get(user).and_then(|entry| {
            if entry.quizzes_taken == 0 {
                None
            } else {
                Some(entry.total_score / entry.quizzes_taken as f64)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CourseLevel;

    fn attempt(topic: &str, score: f64) -> QuizAttempt {
        QuizAttempt {
            topic: topic.into(),
            score,
            timestamp: "2024-01-01 12:00".into(),
        }
    }

    #[test]
    fn totals_match_recorded_attempts() {
        let store = ProgressStore::new();
        let scores = [80.0, 66.7, 100.0, 0.0];

        for (i, score) in scores.iter().enumerate() {
            store.record_quiz_attempt("alice", attempt(&format!("topic-{i}"), *score));
        }

        let progress = store.get_or_init("alice");
        assert_eq!(progress.quizzes_taken, scores.len() as u32);
        assert_eq!(progress.total_score, scores.iter().sum::<f64>());
        assert_eq!(progress.quiz_history.len(), scores.len());
    }

    #[test]
    fn fresh_user_starts_empty() {
        let store = ProgressStore::new();
        let progress = store.get_or_init("bob");
        assert_eq!(progress.quizzes_taken, 0);
        assert_eq!(progress.total_score, 0.0);
        assert!(progress.courses.is_empty());
        assert!(store.average_score("bob").is_none());
    }

    #[test]
    fn average_score_is_mean_of_attempts() {
        let store = ProgressStore::new();
        store.record_quiz_attempt("carol", attempt("rust", 50.0));
        store.record_quiz_attempt("carol", attempt("rust", 100.0));
        assert_eq!(store.average_score("carol"), Some(75.0));
    }

    #[test]
    fn courses_feed_recommendation_history() {
        let store = ProgressStore::new();
        let course = Course {
            title: "Intro to Rust".into(),
            description: String::new(),
            modules: vec![],
            learning_outcomes: vec![],
            prerequisites: vec![],
            created_date: "2024-01-01".into(),
            source_topic: "Rust".into(),
            level: CourseLevel::Beginner,
        };
        store.record_course("dave", course);

        assert_eq!(store.course_topics("dave"), vec!["Rust"]);
        assert_eq!(store.get_or_init("dave").courses_completed, 1);
    }

    #[test]
    fn submission_records_graded_score() {
        use crate::types::{Quiz, QuizQuestion};

        let quiz = Quiz {
            questions: (0..3)
                .map(|i| QuizQuestion {
                    question: format!("Q{i}"),
                    options: vec!["A) 1".into(), "B) 2".into(), "C) 3".into(), "D) 4".into()],
                    correct: "A".into(),
                    explanation: String::new(),
                })
                .collect(),
        };

        // two of three correct
        let answers = vec!["A".to_string(), "A".to_string(), "B".to_string()];
        let score = quiz.grade(&answers);
        assert_eq!(score, 66.7);

        let store = ProgressStore::new();
        store.record_quiz_attempt("grace", attempt("Python Basics", score));

        let progress = store.get_or_init("grace");
        assert_eq!(progress.quiz_history.len(), 1);
        assert_eq!(progress.quiz_history[0].score, 66.7);
        assert_eq!(progress.total_score, 66.7);
    }

    #[test]
    fn users_are_isolated() {
        let store = ProgressStore::new();
        store.record_quiz_attempt("erin", attempt("sql", 90.0));
        assert!(store.history("frank").is_empty());
        assert_eq!(store.history("erin").len(), 1);
    }
}
