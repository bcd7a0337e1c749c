//! Retry layer with exponential backoff.
//!
//! Strictly opt-in: the core performs no hidden retries, so this layer is
//! the caller's mechanism for retrying transient backend failures.

use async_trait::async_trait;
use learnhub_core::backend::Backend;
use learnhub_core::error::HubError;
use learnhub_core::layer::{Layer, LayeredBackend};
use learnhub_core::types::*;
use std::sync::Arc;
use std::time::Duration;

/// Retry layer configuration
#[derive(Debug, Clone)]
pub struct RetryLayer {
    max_retries: u32,
    initial_delay: Duration,
    max_delay: Duration,
    backoff_multiplier: f64,
}

impl RetryLayer {
    /// Create a new retry layer with default settings
    pub fn new() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
        }
    }

    /// Set maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set initial delay
    pub fn with_initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    /// Set maximum delay
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Set backoff multiplier
    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Calculate delay for a given attempt
    fn calculate_delay(&self, attempt: u32) -> Duration {
        let delay_ms =
            self.initial_delay.as_millis() as f64 * self.backoff_multiplier.powi(attempt as i32);
        let delay = Duration::from_millis(delay_ms as u64);
        delay.min(self.max_delay)
    }
}

impl Default for RetryLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Layer<B> for RetryLayer {
    type LayeredBackend = RetryBackend<B>;

    fn layer(&self, inner: B) -> Self::LayeredBackend {
        RetryBackend {
            inner,
            config: self.clone(),
        }
    }
}

/// Backend wrapped with retry logic
#[derive(Debug)]
pub struct RetryBackend<B> {
    inner: B,
    config: RetryLayer,
}

impl<B: Backend> RetryBackend<B> {
    /// Execute with retry logic
    async fn execute_with_retry<T, F, Fut>(&self, mut operation: F) -> Result<T, HubError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, HubError>>,
    {
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if !e.is_retryable() || attempt >= self.config.max_retries {
                        return Err(e);
                    }

                    let delay = self.config.calculate_delay(attempt);
                    tracing::debug!(
                        "Retry attempt {}/{}, waiting {:?}",
                        attempt + 1,
                        self.config.max_retries,
                        delay
                    );

                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[async_trait]
impl<B: Backend> LayeredBackend for RetryBackend<B> {
    type Inner = B;

    fn inner(&self) -> &Self::Inner {
        &self.inner
    }

    async fn layered_list_models(&self) -> Result<Vec<ModelInfo>, HubError> {
        self.execute_with_retry(|| async { self.inner.list_models().await })
            .await
    }

    async fn layered_generate_content(&self, req: GenerateRequest) -> Result<String, HubError> {
        // Clone req for retry attempts
        let req_clone = req.clone();
        self.execute_with_retry(|| {
            let req = req_clone.clone();
            async move { self.inner.generate_content(req).await }
        })
        .await
    }
}

#[async_trait]
impl<B: Backend> Backend for RetryBackend<B> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct FlakyBackend {
        failures: usize,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Backend for FlakyBackend {
        fn info(&self) -> Arc<BackendInfo> {
            BackendInfo::new("flaky", "Flaky")
        }

        async fn list_models(&self) -> Result<Vec<ModelInfo>, HubError> {
            Ok(vec![])
        }

        async fn generate_content(&self, _req: GenerateRequest) -> Result<String, HubError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(HubError::backend_unavailable("connection reset"))
            } else {
                Ok("ok".to_string())
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn retries_transient_failures() {
        let calls = Arc::new(AtomicUsize::new(0));
        let backend = RetryLayer::new().layer(FlakyBackend {
            failures: 2,
            calls: calls.clone(),
        });

        let result = backend
            .generate_content(GenerateRequest::new("m", "p"))
            .await
            .unwrap();
        assert_eq!(result, "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_retries() {
        let calls = Arc::new(AtomicUsize::new(0));
        let backend = RetryLayer::new().with_max_retries(1).layer(FlakyBackend {
            failures: 5,
            calls: calls.clone(),
        });

        let result = backend
            .generate_content(GenerateRequest::new("m", "p"))
            .await;
        assert!(matches!(result, Err(HubError::BackendUnavailable(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn non_retryable_errors_fail_fast() {
        #[derive(Debug)]
        struct BadOutput {
            calls: Arc<AtomicUsize>,
        }

        #[async_trait]
        impl Backend for BadOutput {
            fn info(&self) -> Arc<BackendInfo> {
                BackendInfo::new("bad", "Bad")
            }

            async fn list_models(&self) -> Result<Vec<ModelInfo>, HubError> {
                Ok(vec![])
            }

            async fn generate_content(&self, _req: GenerateRequest) -> Result<String, HubError> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                Err(HubError::parse("garbage", "invalid JSON"))
            }
        }

        let calls = Arc::new(AtomicUsize::new(0));
        let backend = RetryLayer::new().layer(BadOutput {
            calls: calls.clone(),
        });

        let result = backend
            .generate_content(GenerateRequest::new("m", "p"))
            .await;
        assert!(matches!(result, Err(HubError::Parse { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
