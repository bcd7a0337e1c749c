//! ContentGenerator implementation.
//!
//! The generator composes the rate limiter, model resolver, prompt builders
//! and response parser into the three generation operations. Every operation
//! follows the same protocol: permit check, model resolution, prompt build,
//! backend call with safety filtering disabled, parse, stamp metadata.
//! No step is retried internally.

use crate::backend::Backend;
use crate::error::HubError;
use crate::layer::Layer;
use crate::parse::{self, COURSE_SHAPE, QUIZ_SHAPE, RECOMMENDATIONS_SHAPE};
use crate::prompt;
use crate::ratelimit::{Permit, RateLimiter};
use crate::resolver::ModelResolver;
use crate::types::*;
use std::sync::{Arc, Mutex};

/// Type-erased backend shared between the generator and its resolver
type BoxedBackend = Arc<dyn Backend>;

/// The canonical recommendation fallback, returned whenever the primary
/// path cannot run. Recommendations are decorative rather than load-bearing,
/// so this is the only operation with a non-error degraded path.
pub fn default_recommendations() -> Vec<String> {
    vec![
        "Python Programming".to_string(),
        "Data Science Basics".to_string(),
        "Web Development".to_string(),
        "Machine Learning Introduction".to_string(),
    ]
}

/// Builder for composing a generator from a backend and layers.
///
/// Layers use static dispatch during building: each call to `layer()` wraps
/// the previous backend in a new concrete type, with a single type erasure
/// at `finish()`.
///
/// # Example
///
/// ```ignore
/// let generator = ContentGenerator::builder(gemini)
///     .layer(LoggingLayer::new())
///     .finish();
/// ```
pub struct ContentGeneratorBuilder<B> {
    backend: B,
}

impl<B: Backend> ContentGeneratorBuilder<B> {
    /// Create a new builder with a backend
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Add a layer to wrap the backend
    pub fn layer<L>(self, layer: L) -> ContentGeneratorBuilder<L::LayeredBackend>
    where
        L: Layer<B>,
    {
        ContentGeneratorBuilder {
            backend: layer.layer(self.backend),
        }
    }

    /// Finish building and create a ContentGenerator
    pub fn finish(self) -> ContentGenerator {
        let backend: BoxedBackend = Arc::new(self.backend);
        ContentGenerator {
            resolver: ModelResolver::new(backend.clone()),
            limiter: Mutex::new(RateLimiter::new()),
            backend,
        }
    }
}

/// Session-scoped orchestrator for AI learning content.
///
/// One generator corresponds to one credential: the rate window and the
/// resolved model are scoped to it, so independent sessions in the same
/// process get independent state. Replacing a credential means building a
/// new generator (or calling [`invalidate_model`](Self::invalidate_model)
/// when only the model cache must be dropped).
pub struct ContentGenerator {
    backend: BoxedBackend,
    resolver: ModelResolver,
    limiter: Mutex<RateLimiter>,
}

impl ContentGenerator {
    /// Create a new builder
    pub fn builder<B: Backend>(backend: B) -> ContentGeneratorBuilder<B> {
        ContentGeneratorBuilder::new(backend)
    }

    /// Backend identification
    pub fn info(&self) -> Arc<BackendInfo> {
        self.backend.info()
    }

    /// Requests counted in the current rate window, for display.
    pub fn requests_used(&self) -> u32 {
        self.lock_limiter().used()
    }

    /// Drop the cached model catalog and choice, forcing re-resolution on
    /// the next generation call.
    pub async fn invalidate_model(&self) {
        self.resolver.invalidate().await;
    }

    fn lock_limiter(&self) -> std::sync::MutexGuard<'_, RateLimiter> {
        // The limiter cannot poison: permit() does not panic.
        self.limiter
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn checked_permit(&self) -> Result<(), HubError> {
        let permit = self.lock_limiter().permit();
        match permit {
            Permit::Allowed => Ok(()),
            Permit::Denied { wait_secs } => {
                tracing::warn!(wait_secs, "rate window exhausted, denying request");
                Err(HubError::rate_limited(wait_secs))
            }
        }
    }

    async fn generate_raw(&self, prompt: String) -> Result<String, HubError> {
        let model = self.resolver.resolve().await?;
        let req = GenerateRequest::new(model, prompt).with_safety(SafetySetting::disable_all());
        self.backend.generate_content(req).await
    }

    /// Generate a course outline for a topic, level and duration.
    pub async fn generate_course(&self, params: &CourseParams) -> Result<Course, HubError> {
        self.checked_permit()?;

        let raw = self.generate_raw(prompt::course_prompt(params)).await?;
        let mut course: Course = parse::parse_response(&raw, &COURSE_SHAPE)?;

        course.created_date = chrono::Local::now().format("%Y-%m-%d").to_string();
        course.source_topic = params.topic.clone();
        course.level = params.level;

        tracing::info!(title = %course.title, modules = course.modules.len(), "generated course");
        Ok(course)
    }

    /// Generate a multiple-choice quiz.
    pub async fn generate_quiz(&self, params: &QuizParams) -> Result<Quiz, HubError> {
        params.validate()?;
        self.checked_permit()?;

        let raw = self.generate_raw(prompt::quiz_prompt(params)).await?;
        let quiz: Quiz = parse::parse_response(&raw, &QUIZ_SHAPE)?;

        tracing::info!(questions = quiz.questions.len(), "generated quiz");
        Ok(quiz)
    }

    /// Generate course recommendations from learning history and preferences.
    ///
    /// This operation is total: with no history the backend is never
    /// contacted, and any failure on the primary path degrades to
    /// [`default_recommendations`] instead of surfacing an error.
    pub async fn generate_recommendations(&self, params: &RecommendationParams) -> Vec<String> {
        if params.history.is_empty() {
            return default_recommendations();
        }

        match self.try_recommendations(params).await {
            Ok(courses) if !courses.is_empty() => courses,
            Ok(_) => default_recommendations(),
            Err(e) => {
                tracing::warn!(error = %e, "recommendation generation failed, using fallback");
                default_recommendations()
            }
        }
    }

    async fn try_recommendations(
        &self,
        params: &RecommendationParams,
    ) -> Result<Vec<String>, HubError> {
        self.checked_permit()?;
        let raw = self
            .generate_raw(prompt::recommendations_prompt(params))
            .await?;
        parse::parse_response(&raw, &RECOMMENDATIONS_SHAPE)
    }
}

impl std::fmt::Debug for ContentGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentGenerator")
            .field("backend", &self.backend.info().id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const QUIZ_REPLY: &str = r#"```json
{
    "questions": [
        {
            "question": "What does the print() function do?",
            "options": ["A) Prints output", "B) Reads input", "C) Opens a file", "D) Exits"],
            "correct": "A",
            "explanation": "print() writes to standard output"
        },
        {
            "question": "Which symbol starts a comment?",
            "options": ["A) //", "B) #", "C) --", "D) ;;"],
            "correct": "B",
            "explanation": "Python comments start with #"
        },
        {
            "question": "What type is 3.14?",
            "options": ["A) int", "B) str", "C) float", "D) bool"],
            "correct": "C",
            "explanation": "Decimal literals are floats"
        }
    ]
}
```"#;

    const COURSE_REPLY: &str = r#"```json
{
    "title": "Python Basics",
    "description": "A gentle introduction",
    "modules": [
        {"name": "Getting Started", "topics": ["Installation", "REPL"], "duration": "2 days"}
    ],
    "learning_outcomes": ["Write simple scripts"],
    "prerequisites": []
}
```"#;

    #[derive(Debug)]
    struct ScriptedBackend {
        reply: String,
        generate_calls: Arc<AtomicUsize>,
        list_calls: Arc<AtomicUsize>,
    }

    impl ScriptedBackend {
        fn new(reply: &str) -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let generate_calls = Arc::new(AtomicUsize::new(0));
            let list_calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    reply: reply.to_string(),
                    generate_calls: generate_calls.clone(),
                    list_calls: list_calls.clone(),
                },
                generate_calls,
                list_calls,
            )
        }
    }

    #[async_trait]
    impl Backend for ScriptedBackend {
        fn info(&self) -> Arc<BackendInfo> {
            BackendInfo::new("scripted", "Scripted")
        }

        async fn list_models(&self) -> Result<Vec<ModelInfo>, HubError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![ModelInfo {
                name: "models/gemini-1.5-flash".into(),
                generation_methods: vec!["generateContent".into()],
            }])
        }

        async fn generate_content(&self, req: GenerateRequest) -> Result<String, HubError> {
            self.generate_calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(req.model, "gemini-1.5-flash");
            assert_eq!(req.safety_settings.len(), 4);
            assert!(req
                .safety_settings
                .iter()
                .all(|s| s.threshold == BlockThreshold::BlockNone));
            Ok(self.reply.clone())
        }
    }

    fn quiz_params() -> QuizParams {
        QuizParams::new("Python Basics", QuizDifficulty::Easy, 3)
    }

    #[tokio::test]
    async fn generate_quiz_end_to_end() {
        let (backend, _, _) = ScriptedBackend::new(QUIZ_REPLY);
        let generator = ContentGenerator::builder(backend).finish();

        let quiz = generator.generate_quiz(&quiz_params()).await.unwrap();
        assert_eq!(quiz.questions.len(), 3);
        for q in &quiz.questions {
            assert_eq!(q.options.len(), 4);
            assert!(["A", "B", "C", "D"].contains(&q.correct.as_str()));
        }
    }

    #[tokio::test]
    async fn generate_course_stamps_metadata() {
        let (backend, _, _) = ScriptedBackend::new(COURSE_REPLY);
        let generator = ContentGenerator::builder(backend).finish();

        let params = CourseParams::new(
            "Python Basics",
            CourseLevel::Beginner,
            CourseDuration::TwoWeeks,
        );
        let course = generator.generate_course(&params).await.unwrap();

        assert_eq!(course.title, "Python Basics");
        assert_eq!(course.source_topic, "Python Basics");
        assert_eq!(course.level, CourseLevel::Beginner);
        assert!(!course.created_date.is_empty());
    }

    #[tokio::test]
    async fn rate_limited_request_never_reaches_backend() {
        let (backend, generate_calls, _) = ScriptedBackend::new(QUIZ_REPLY);
        let generator = ContentGenerator::builder(backend).finish();

        for _ in 0..10 {
            generator.generate_quiz(&quiz_params()).await.unwrap();
        }
        assert_eq!(generate_calls.load(Ordering::SeqCst), 10);

        let params = CourseParams::new(
            "Python Basics",
            CourseLevel::Beginner,
            CourseDuration::OneWeek,
        );
        match generator.generate_course(&params).await {
            Err(HubError::RateLimited { wait_secs }) => assert!(wait_secs <= 60),
            other => panic!("expected RateLimited, got {other:?}"),
        }
        // denied before the backend call
        assert_eq!(generate_calls.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn empty_history_skips_backend_entirely() {
        let (backend, generate_calls, list_calls) = ScriptedBackend::new("[]");
        let generator = ContentGenerator::builder(backend).finish();

        let recs = generator
            .generate_recommendations(&RecommendationParams::default())
            .await;

        assert_eq!(recs, default_recommendations());
        assert_eq!(recs.len(), 4);
        assert_eq!(generate_calls.load(Ordering::SeqCst), 0);
        assert_eq!(list_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn recommendations_degrade_on_parse_failure() {
        let (backend, _, _) = ScriptedBackend::new("I'd suggest learning some Rust!");
        let generator = ContentGenerator::builder(backend).finish();

        let params = RecommendationParams {
            history: vec!["Rust".into()],
            preferences: Default::default(),
        };
        assert_eq!(
            generator.generate_recommendations(&params).await,
            default_recommendations()
        );
    }

    #[tokio::test]
    async fn recommendations_use_backend_when_history_exists() {
        let (backend, generate_calls, _) =
            ScriptedBackend::new(r#"["Advanced Rust", "Systems Programming"]"#);
        let generator = ContentGenerator::builder(backend).finish();

        let params = RecommendationParams {
            history: vec!["Rust".into()],
            preferences: Default::default(),
        };
        let recs = generator.generate_recommendations(&params).await;
        assert_eq!(recs, vec!["Advanced Rust", "Systems Programming"]);
        assert_eq!(generate_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn parse_failure_surfaces_raw_text() {
        let (backend, _, _) = ScriptedBackend::new("Sorry, I can't help with that.");
        let generator = ContentGenerator::builder(backend).finish();

        match generator.generate_quiz(&quiz_params()).await {
            Err(HubError::Parse { raw, .. }) => assert!(raw.contains("Sorry")),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_question_count_is_rejected_before_permit() {
        let (backend, generate_calls, _) = ScriptedBackend::new(QUIZ_REPLY);
        let generator = ContentGenerator::builder(backend).finish();

        let params = QuizParams::new("Python", QuizDifficulty::Easy, 2);
        assert!(matches!(
            generator.generate_quiz(&params).await,
            Err(HubError::InvalidRequest(_))
        ));
        assert_eq!(generator.requests_used(), 0);
        assert_eq!(generate_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn model_is_resolved_once_across_operations() {
        let (backend, _, list_calls) = ScriptedBackend::new(QUIZ_REPLY);
        let generator = ContentGenerator::builder(backend).finish();

        generator.generate_quiz(&quiz_params()).await.unwrap();
        generator.generate_quiz(&quiz_params()).await.unwrap();
        assert_eq!(list_calls.load(Ordering::SeqCst), 1);

        generator.invalidate_model().await;
        generator.generate_quiz(&quiz_params()).await.unwrap();
        assert_eq!(list_calls.load(Ordering::SeqCst), 2);
    }
}
