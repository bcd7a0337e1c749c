//! Backend trait and core abstractions.

use crate::error::HubError;
use crate::types::*;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// Core trait for generative text backends.
///
/// A backend is an opaque capability exposing exactly two calls: listing the
/// models available to the current credential, and generating free-form text
/// for a prompt under per-category safety thresholds. Any compliant service
/// is substitutable; higher-level orchestration (model resolution, rate
/// limiting, response parsing) lives in [`crate::runtime::ContentGenerator`].
#[async_trait]
pub trait Backend: Send + Sync + Debug + 'static {
    /// Get backend information
    fn info(&self) -> Arc<BackendInfo>;

    /// List all models advertised for the current credential, with the
    /// generation methods each one supports.
    async fn list_models(&self) -> Result<Vec<ModelInfo>, HubError>;

    /// Generate content for a prompt. Returns the raw response text; the
    /// caller is responsible for interpreting it.
    async fn generate_content(&self, req: GenerateRequest) -> Result<String, HubError>;
}

#[async_trait]
impl Backend for Arc<dyn Backend> {
    fn info(&self) -> Arc<BackendInfo> {
        (**self).info()
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, HubError> {
        (**self).list_models().await
    }

    async fn generate_content(&self, req: GenerateRequest) -> Result<String, HubError> {
        (**self).generate_content(req).await
    }
}
