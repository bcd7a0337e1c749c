//! # Learnhub Layers
//!
//! Built-in layers for Learnhub backends.
//!
//! Currently implemented layers:
//! - `LoggingLayer`: Logs all backend operations with timing information
//! - `RetryLayer`: Opt-in caller-side retry with exponential backoff for
//!   transient backend failures. The core never retries on its own; stacking
//!   this layer is how a caller expresses a retry policy.
//!
//! ## Usage
//!
//! ```ignore
//! use learnhub_core::ContentGenerator;
//! use learnhub_layer::{LoggingLayer, RetryLayer};
//!
//! let generator = ContentGenerator::builder(backend)
//!     .layer(LoggingLayer::new())
//!     .layer(RetryLayer::new().with_max_retries(3))
//!     .finish();
//! ```

pub mod logging;
pub mod retry;

// Re-exports
pub use logging::LoggingLayer;
pub use retry::RetryLayer;
