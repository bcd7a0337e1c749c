//! Core types for learning content generation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Course skill level
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum CourseLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CourseLevel::Beginner => "Beginner",
            CourseLevel::Intermediate => "Intermediate",
            CourseLevel::Advanced => "Advanced",
        };
        f.write_str(s)
    }
}

/// Planned course duration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CourseDuration {
    #[serde(rename = "1 week")]
    OneWeek,
    #[serde(rename = "2 weeks")]
    TwoWeeks,
    #[serde(rename = "1 month")]
    OneMonth,
    #[serde(rename = "3 months")]
    ThreeMonths,
}

impl fmt::Display for CourseDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CourseDuration::OneWeek => "1 week",
            CourseDuration::TwoWeeks => "2 weeks",
            CourseDuration::OneMonth => "1 month",
            CourseDuration::ThreeMonths => "3 months",
        };
        f.write_str(s)
    }
}

/// Quiz difficulty level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum QuizDifficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for QuizDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QuizDifficulty::Easy => "Easy",
            QuizDifficulty::Medium => "Medium",
            QuizDifficulty::Hard => "Hard",
        };
        f.write_str(s)
    }
}

/// Parameters for course outline generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseParams {
    pub topic: String,
    pub level: CourseLevel,
    pub duration: CourseDuration,
}

impl CourseParams {
    pub fn new(topic: impl Into<String>, level: CourseLevel, duration: CourseDuration) -> Self {
        Self {
            topic: topic.into(),
            level,
            duration,
        }
    }
}

/// Valid range for the number of quiz questions
pub const QUIZ_QUESTION_RANGE: std::ops::RangeInclusive<u8> = 3..=10;

/// Parameters for quiz generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizParams {
    pub topic: String,
    pub difficulty: QuizDifficulty,
    pub count: u8,
}

impl QuizParams {
    pub fn new(topic: impl Into<String>, difficulty: QuizDifficulty, count: u8) -> Self {
        Self {
            topic: topic.into(),
            difficulty,
            count,
        }
    }

    /// Validate the question count against the supported range.
    pub fn validate(&self) -> Result<(), crate::error::HubError> {
        if !QUIZ_QUESTION_RANGE.contains(&self.count) {
            return Err(crate::error::HubError::invalid_request(format!(
                "question count must be between {} and {}, got {}",
                QUIZ_QUESTION_RANGE.start(),
                QUIZ_QUESTION_RANGE.end(),
                self.count
            )));
        }
        Ok(())
    }
}

/// Parameters for course recommendations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationParams {
    /// Topics of previously generated courses, oldest first
    pub history: Vec<String>,
    /// Declared learning interests
    pub preferences: BTreeSet<String>,
}

/// One module within a generated course outline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseModule {
    pub name: String,
    pub topics: Vec<String>,
    pub duration: String,
}

/// A generated course outline.
///
/// The backend fills the content fields; `created_date`, `source_topic` and
/// `level` are stamped by the generator after a successful parse, so they
/// default when decoding the raw response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub modules: Vec<CourseModule>,
    #[serde(default)]
    pub learning_outcomes: Vec<String>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub created_date: String,
    #[serde(default)]
    pub source_topic: String,
    #[serde(default)]
    pub level: CourseLevel,
}

/// A multiple-choice question with exactly four lettered options (A-D)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Letter tag of the correct option
    pub correct: String,
    #[serde(default)]
    pub explanation: String,
}

impl QuizQuestion {
    /// Check an answer's letter tag against the correct one.
    ///
    /// Comparison is on the first non-whitespace character only, case
    /// insensitive, so "a", "A" and "A) Option 1" all match a `correct`
    /// field of "A".
    pub fn is_correct(&self, answer: &str) -> bool {
        match (first_letter(answer), first_letter(&self.correct)) {
            (Some(a), Some(c)) => a.eq_ignore_ascii_case(&c),
            _ => false,
        }
    }
}

fn first_letter(s: &str) -> Option<char> {
    s.trim().chars().next()
}

/// A generated quiz. Not persisted into history; only the derived
/// [`QuizAttempt`] is recorded once the user submits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    /// Grade a set of answers, one per question in order.
    ///
    /// Returns the percentage score rounded to one decimal place. Missing
    /// answers count as incorrect.
    pub fn grade(&self, answers: &[String]) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        let correct = self
            .questions
            .iter()
            .enumerate()
            .filter(|(i, q)| answers.get(*i).is_some_and(|a| q.is_correct(a)))
            .count();
        let score = (correct as f64 / self.questions.len() as f64) * 100.0;
        (score * 10.0).round() / 10.0
    }
}

/// Result of one submitted quiz, appended to the user's history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub topic: String,
    /// Percentage score in [0, 100]
    pub score: f64,
    /// Submission time, formatted "%Y-%m-%d %H:%M"
    pub timestamp: String,
}

impl QuizAttempt {
    /// Create an attempt stamped with the current local time.
    pub fn now(topic: impl Into<String>, score: f64) -> Self {
        Self {
            topic: topic.into(),
            score,
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Per-user learning progress aggregate.
///
/// Invariants maintained by [`crate::progress::ProgressStore`]:
/// `total_score` equals the sum of `quiz_history` scores and
/// `quizzes_taken` equals its length.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProgress {
    pub courses: Vec<Course>,
    pub quiz_history: Vec<QuizAttempt>,
    pub preferences: BTreeSet<String>,
    pub total_score: f64,
    pub courses_completed: u32,
    pub quizzes_taken: u32,
    pub streak: u32,
}

// ============================================================================
// Backend wire types
// ============================================================================

/// Harm category for safety filtering, matching the backend's identifiers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

/// Blocking threshold for a harm category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlockThreshold {
    #[serde(rename = "BLOCK_NONE")]
    BlockNone,
    #[serde(rename = "BLOCK_ONLY_HIGH")]
    BlockOnlyHigh,
    #[serde(rename = "BLOCK_MEDIUM_AND_ABOVE")]
    BlockMediumAndAbove,
    #[serde(rename = "BLOCK_LOW_AND_ABOVE")]
    BlockLowAndAbove,
}

/// Per-category safety threshold sent with every generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: BlockThreshold,
}

impl SafetySetting {
    /// Disable blocking for all four harm categories.
    ///
    /// Educational topics (historical violence, health, ...) routinely trip
    /// default filters, so generation requests always ship this set.
    pub fn disable_all() -> Vec<SafetySetting> {
        [
            HarmCategory::HateSpeech,
            HarmCategory::Harassment,
            HarmCategory::SexuallyExplicit,
            HarmCategory::DangerousContent,
        ]
        .into_iter()
        .map(|category| SafetySetting {
            category,
            threshold: BlockThreshold::BlockNone,
        })
        .collect()
    }
}

/// A model advertised by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Fully qualified name, possibly carrying a `models/` namespace prefix
    pub name: String,
    /// Generation methods the model supports
    pub generation_methods: Vec<String>,
}

impl ModelInfo {
    /// Whether this model can serve content generation requests.
    pub fn supports_generation(&self) -> bool {
        self.generation_methods
            .iter()
            .any(|m| m == "generateContent")
    }

    /// The model identifier with any `models/` namespace prefix stripped.
    pub fn short_name(&self) -> &str {
        self.name.strip_prefix("models/").unwrap_or(&self.name)
    }
}

/// A content generation request sent to the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub safety_settings: Vec<SafetySetting>,
}

impl GenerateRequest {
    /// Create a new request with no safety settings.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            safety_settings: Vec::new(),
        }
    }

    /// Set the safety thresholds.
    pub fn with_safety(mut self, settings: Vec<SafetySetting>) -> Self {
        self.safety_settings = settings;
        self
    }
}

/// Backend identification
#[derive(Debug, Clone)]
pub struct BackendInfo {
    pub id: String,
    pub name: String,
}

impl BackendInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: id.into(),
            name: name.into(),
        })
    }
}
