//! Runtime layer for Learnhub.
//!
//! This module provides the orchestration runtime that sits between the
//! high-level API (generate_course, generate_quiz, generate_recommendations)
//! and the low-level backend interface (list_models, generate_content).
//!
//! The runtime is responsible for:
//! - Gating every outbound call behind the sliding-window rate limiter
//! - Resolving and memoizing a usable generation model
//! - Building task prompts and parsing free-form responses into typed records
//! - Managing layers (logging, caller-side retry) stacked over the backend

pub mod generator;

pub use generator::{default_recommendations, ContentGenerator};
