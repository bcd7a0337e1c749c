//! Google Gemini backend over the Generative Language REST API.
//!
//! Implements the two-call backend contract: model listing
//! (`GET /models`) and content generation
//! (`POST /models/{model}:generateContent`) with per-category safety
//! thresholds. Responses are returned as raw text; interpretation belongs
//! to the core's response parser.

use async_trait::async_trait;
use learnhub_core::backend::Backend;
use learnhub_core::error::HubError;
use learnhub_core::types::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Backend calls have no timeout in the upstream protocol; we impose one and
/// surface expiry as `BackendUnavailable`.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Gemini backend using reqwest
#[derive(Clone)]
pub struct GeminiBackend {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    info: Arc<BackendInfo>,
}

impl std::fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // api_key deliberately omitted
        f.debug_struct("GeminiBackend")
            .field("api_base", &self.api_base)
            .field("info", &self.info)
            .finish()
    }
}

impl GeminiBackend {
    /// Create a new Gemini backend with default configuration.
    pub fn new(api_key: impl Into<String>) -> Result<Self, HubError> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a builder for more configuration options
    pub fn builder() -> GeminiBuilder {
        GeminiBuilder::default()
    }

    fn map_transport_error(e: reqwest::Error) -> HubError {
        if e.is_timeout() {
            HubError::backend_unavailable(format!("request timed out: {e}"))
        } else {
            HubError::backend_unavailable(e.to_string())
        }
    }

    async fn error_for_status(
        what: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, HubError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(HubError::backend_unavailable(format!(
            "{what} failed with status {status}: {body}"
        )))
    }
}

#[async_trait]
impl Backend for GeminiBackend {
    fn info(&self) -> Arc<BackendInfo> {
        self.info.clone()
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, HubError> {
        let url = format!("{}/models", self.api_base);
        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let response = Self::error_for_status("model listing", response).await?;
        let listing: ListModelsResponse = response
            .json()
            .await
            .map_err(|e| HubError::backend_unavailable(format!("bad listing payload: {e}")))?;

        let models = listing
            .models
            .into_iter()
            .map(|m| ModelInfo {
                name: m.name,
                generation_methods: m.supported_generation_methods,
            })
            .collect::<Vec<_>>();

        tracing::debug!(models = models.len(), "listed backend models");
        Ok(models)
    }

    async fn generate_content(&self, req: GenerateRequest) -> Result<String, HubError> {
        let url = format!("{}/models/{}:generateContent", self.api_base, req.model);
        let body = GenerateContentBody {
            contents: vec![WireContent {
                parts: vec![WirePart { text: req.prompt }],
            }],
            safety_settings: req.safety_settings,
        };

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let response = Self::error_for_status("content generation", response).await?;
        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| HubError::backend_unavailable(format!("bad generation payload: {e}")))?;

        let text = payload
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(HubError::backend_unavailable(
                "backend returned no candidates",
            ));
        }

        Ok(text)
    }
}

/// Builder for the Gemini backend
#[derive(Default)]
pub struct GeminiBuilder {
    api_key: Option<String>,
    api_base: Option<String>,
    timeout: Option<Duration>,
}

impl GeminiBuilder {
    /// Set the API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the API base URL (for proxies or API-compatible endpoints)
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set the per-request timeout (default 30s)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the backend
    pub fn build(self) -> Result<GeminiBackend, HubError> {
        let api_key = self
            .api_key
            .ok_or_else(|| HubError::configuration("API key is required"))?;

        let http = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|e| HubError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(GeminiBackend {
            http,
            api_key,
            api_base: self
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            info: BackendInfo::new("gemini", "Google Gemini"),
        })
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<WireModel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireModel {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody {
    contents: Vec<WireContent>,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct WireContent {
    #[serde(default)]
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WirePart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Debug, Deserialize)]
struct WireCandidate {
    #[serde(default)]
    content: WireContent,
}
