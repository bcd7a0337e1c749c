//! Layer trait and abstractions.
//!
//! Layers provide a composable way to wrap backends with cross-cutting
//! concerns like logging and caller-side retry policy. Each layer wraps an
//! inner backend and returns a new backend with enhanced capabilities.

use crate::backend::Backend;
use crate::error::HubError;
use crate::types::*;
use async_trait::async_trait;
use std::sync::Arc;

/// Layer trait for wrapping backends.
pub trait Layer<B: Backend> {
    /// The type of the layered backend
    type LayeredBackend: Backend;

    /// Wrap the inner backend with this layer
    fn layer(&self, inner: B) -> Self::LayeredBackend;
}

/// Helper trait for layered backends.
///
/// Provides default forwarding implementations for backend methods, so
/// implementers only need to override the calls they want to intercept.
#[async_trait]
pub trait LayeredBackend: Sized + Backend {
    /// The inner backend type
    type Inner: Backend;

    /// Get a reference to the inner backend
    fn inner(&self) -> &Self::Inner;

    /// Default implementation for info - forwards to inner
    fn layered_info(&self) -> Arc<BackendInfo> {
        self.inner().info()
    }

    /// Default implementation for list_models - forwards to inner
    async fn layered_list_models(&self) -> Result<Vec<ModelInfo>, HubError> {
        self.inner().list_models().await
    }

    /// Default implementation for generate_content - forwards to inner
    async fn layered_generate_content(&self, req: GenerateRequest) -> Result<String, HubError> {
        self.inner().generate_content(req).await
    }
}

/// Macro to implement Backend by forwarding to LayeredBackend methods.
///
/// This reduces boilerplate for layered backends.
#[macro_export]
macro_rules! impl_layered_backend {
    ($type:ty) => {
        #[async_trait::async_trait]
        impl $crate::backend::Backend for $type {
            fn info(&self) -> std::sync::Arc<$crate::types::BackendInfo> {
                $crate::layer::LayeredBackend::layered_info(self)
            }

            async fn list_models(
                &self,
            ) -> Result<Vec<$crate::types::ModelInfo>, $crate::error::HubError> {
                $crate::layer::LayeredBackend::layered_list_models(self).await
            }

            async fn generate_content(
                &self,
                req: $crate::types::GenerateRequest,
            ) -> Result<String, $crate::error::HubError> {
                $crate::layer::LayeredBackend::layered_generate_content(self, req).await
            }
        }
    };
}
