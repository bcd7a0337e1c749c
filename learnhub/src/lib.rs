//! # Learnhub
//!
//! An SDK for AI-generated learning content: course outlines, quizzes and
//! course recommendations, orchestrated over a generative text backend.
//!
//! Learnhub handles the failure-prone parts of talking to such a backend:
//! resolving a usable model with preference fallback, throttling requests
//! under a sliding-window quota, building prompts that demand fixed JSON
//! shapes, tolerantly parsing markdown-fenced responses, and tracking
//! per-user learning progress.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! learnhub = { version = "0.1", features = ["gemini", "layers"] }
//! ```
//!
//! ```ignore
//! use learnhub::prelude::*;
//! use learnhub::provider::GeminiBackend;
//! use learnhub::layer::LoggingLayer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // One generator per credential; its rate window and resolved model are
//! // scoped to it. Replacing the API key means building a new generator.
//! let backend = GeminiBackend::new("your-api-key")?;
//! let generator = ContentGenerator::builder(backend)
//!     .layer(LoggingLayer::new())
//!     .finish();
//!
//! let params = CourseParams::new("Rust", CourseLevel::Beginner, CourseDuration::OneMonth);
//! let course = generator.generate_course(&params).await?;
//! println!("{}: {} modules", course.title, course.modules.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Includes the `gemini` backend and `layers`
//! - `gemini`: Google Gemini backend support
//! - `layers`: Built-in layers (logging, caller-side retry)
//! - `full`: All features enabled

// Re-export core types and traits
pub use learnhub_core::*;

// Re-export backends under `provider` module
#[cfg(feature = "learnhub-provider")]
pub mod provider {
    //! Backend implementations.
    pub use learnhub_provider::*;
}

// Re-export layers under `layer` module
#[cfg(feature = "learnhub-layer")]
pub mod layer {
    //! Built-in middleware layers.
    pub use learnhub_layer::*;
}

// Convenience re-exports at root level for common types
pub use learnhub_core::{
    error::HubError,
    layer::{Layer, LayeredBackend},
    progress::ProgressStore,
    ratelimit::{Permit, RateLimiter},
    resolver::ModelResolver,
    runtime::{default_recommendations, ContentGenerator},
    types::{
        BackendInfo, BlockThreshold, Course, CourseDuration, CourseLevel, CourseModule,
        CourseParams, GenerateRequest, HarmCategory, ModelInfo, Quiz, QuizAttempt, QuizDifficulty,
        QuizParams, QuizQuestion, RecommendationParams, SafetySetting, UserProgress,
    },
    Result,
};

/// Prelude module for convenient imports
pub mod prelude {
    //! Prelude module containing the most commonly used types and traits.
    //!
    //! ```
    //! use learnhub::prelude::*;
    //! ```

    pub use crate::{
        Backend, ContentGenerator, Course, CourseDuration, CourseLevel, CourseParams, HubError,
        Layer, ProgressStore, Quiz, QuizAttempt, QuizDifficulty, QuizParams, RecommendationParams,
        Result, UserProgress,
    };

    #[cfg(feature = "learnhub-provider")]
    pub use crate::provider::*;

    #[cfg(feature = "learnhub-layer")]
    pub use crate::layer::*;
}
