//! # Learnhub Providers
//!
//! Backend implementations for generative text services.

pub mod gemini;

// Re-exports
pub use gemini::{GeminiBackend, GeminiBuilder};
