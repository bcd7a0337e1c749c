//! Error types for Learnhub operations.

/// The main error type for content generation operations.
///
/// The taxonomy is deliberately small: every failure a caller can see maps
/// to one of these variants, and no variant is retried internally. Retry
/// policy belongs to the caller (see `learnhub-layer`'s opt-in `RetryLayer`).
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// The local request window is exhausted; retry after `wait_secs`.
    #[error("rate limited: retry in {wait_secs}s")]
    RateLimited { wait_secs: u64 },

    /// The credential advertises no model that supports content generation.
    #[error("no usable model available for this credential")]
    NoModelAvailable,

    /// Transient network, credential, or service failure.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend returned text that could not be interpreted as the
    /// expected schema. Carries the raw text for diagnostics.
    #[error("response parse error: {reason}")]
    Parse { raw: String, reason: String },

    /// Configuration errors (missing API key, bad base URL, ...)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Invalid request parameters (e.g. question count out of range)
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl HubError {
    /// Create a rate limit error
    pub fn rate_limited(wait_secs: u64) -> Self {
        Self::RateLimited { wait_secs }
    }

    /// Create a backend unavailable error
    pub fn backend_unavailable(msg: impl Into<String>) -> Self {
        Self::BackendUnavailable(msg.into())
    }

    /// Create a parse error carrying the raw backend text
    pub fn parse(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            raw: raw.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Check if this is a retryable error.
    ///
    /// Only transient backend failures qualify. `RateLimited` is recoverable
    /// but carries its own wait hint, and `Parse` requires a fresh request,
    /// so neither is blindly retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, HubError::BackendUnavailable(_))
    }
}
