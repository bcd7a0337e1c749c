//! # Learnhub Core
//!
//! Core abstractions and orchestration runtime for AI-generated learning
//! content.
//!
//! This crate mediates between an interactive learner-facing client and a
//! remote generative text backend: it picks a usable model with fallback,
//! throttles outgoing requests under a sliding-window quota, builds
//! task-specific prompts, tolerantly parses free-form (optionally
//! markdown-fenced) JSON responses, and folds the results into per-user
//! learning progress records.

pub mod backend;
pub mod error;
pub mod layer;
pub mod parse;
pub mod progress;
pub mod prompt;
pub mod ratelimit;
pub mod resolver;
pub mod runtime;
pub mod types;

// Re-exports
pub use backend::Backend;
pub use error::HubError;
pub use layer::{Layer, LayeredBackend};
pub use progress::ProgressStore;
pub use ratelimit::{Permit, RateLimiter};
pub use resolver::ModelResolver;
pub use runtime::{default_recommendations, ContentGenerator};
pub use types::*;

/// Result type alias for Learnhub operations
pub type Result<T> = std::result::Result<T, HubError>;
