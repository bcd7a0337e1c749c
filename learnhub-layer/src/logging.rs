//! Logging layer for backend operations.

use async_trait::async_trait;
use learnhub_core::backend::Backend;
use learnhub_core::error::HubError;
use learnhub_core::layer::{Layer, LayeredBackend};
use learnhub_core::types::*;
use std::sync::Arc;

/// Logging layer that logs backend operations.
#[derive(Debug, Clone)]
pub struct LoggingLayer {
    prefix: String,
}

impl LoggingLayer {
    /// Create a new logging layer
    pub fn new() -> Self {
        Self {
            prefix: "[learnhub]".to_string(),
        }
    }

    /// Create a logging layer with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for LoggingLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Layer<B> for LoggingLayer {
    type LayeredBackend = LoggingBackend<B>;

    fn layer(&self, inner: B) -> Self::LayeredBackend {
        LoggingBackend {
            inner,
            prefix: self.prefix.clone(),
        }
    }
}

/// Backend wrapped with logging
#[derive(Debug)]
pub struct LoggingBackend<B> {
    inner: B,
    prefix: String,
}

#[async_trait]
impl<B: Backend> LayeredBackend for LoggingBackend<B> {
    type Inner = B;

    fn inner(&self) -> &Self::Inner {
        &self.inner
    }

    async fn layered_list_models(&self) -> Result<Vec<ModelInfo>, HubError> {
        tracing::debug!("{} list_models request", self.prefix);

        let start = std::time::Instant::now();
        let result = self.inner.list_models().await;
        let elapsed = start.elapsed();

        match &result {
            Ok(models) => {
                tracing::debug!(
                    "{} list_models success: models={}, elapsed={:?}",
                    self.prefix,
                    models.len(),
                    elapsed
                );
            }
            Err(e) => {
                tracing::error!(
                    "{} list_models error: {:?}, elapsed={:?}",
                    self.prefix,
                    e,
                    elapsed
                );
            }
        }

        result
    }

    async fn layered_generate_content(&self, req: GenerateRequest) -> Result<String, HubError> {
        tracing::debug!(
            "{} generate_content request: model={}, prompt_len={}",
            self.prefix,
            req.model,
            req.prompt.len()
        );

        let start = std::time::Instant::now();
        let result = self.inner.generate_content(req).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(text) => {
                tracing::debug!(
                    "{} generate_content success: response_len={}, elapsed={:?}",
                    self.prefix,
                    text.len(),
                    elapsed
                );
            }
            Err(e) => {
                tracing::error!(
                    "{} generate_content error: {:?}, elapsed={:?}",
                    self.prefix,
                    e,
                    elapsed
                );
            }
        }

        result
    }
}

#[async_trait]
impl<B: Backend> Backend for LoggingBackend<B> {
    fn info(&self) -> Arc<BackendInfo> {
        LayeredBackend::layered_info(self)
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, HubError> {
        LayeredBackend::layered_list_models(self).await
    }

    async fn generate_content(&self, req: GenerateRequest) -> Result<String, HubError> {
        LayeredBackend::layered_generate_content(self, req).await
    }
}
