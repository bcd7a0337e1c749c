//! Model resolution with preference ordering and catalog caching.

use crate::backend::Backend;
use crate::error::HubError;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Fixed preference order: fastest / highest-quota models first, the
/// general-purpose fallback last.
pub const PREFERRED_MODELS: [&str; 5] = [
    "gemini-1.5-flash-8b",
    "gemini-1.5-flash",
    "gemini-2.0-flash-exp",
    "gemini-1.5-pro",
    "gemini-pro",
];

#[derive(Debug, Default)]
struct ResolverState {
    catalog: Option<Vec<String>>,
    chosen: Option<String>,
}

/// Picks a usable generation model and sticks with it.
///
/// The first `resolve` call lists the backend's models, filters to those
/// supporting content generation, strips any namespace prefix, and caches
/// the catalog. The chosen model is memoized for the resolver's lifetime
/// until [`invalidate`](ModelResolver::invalidate) is called (e.g. on
/// credential replacement).
#[derive(Debug)]
pub struct ModelResolver {
    backend: Arc<dyn Backend>,
    state: Mutex<ResolverState>,
}

impl ModelResolver {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            state: Mutex::new(ResolverState::default()),
        }
    }

    /// Resolve the model to use for generation requests.
    pub async fn resolve(&self) -> Result<String, HubError> {
        let mut state = self.state.lock().await;

        if let Some(model) = &state.chosen {
            return Ok(model.clone());
        }

        let catalog = match &state.catalog {
            Some(catalog) => catalog.clone(),
            None => {
                let models = self.backend.list_models().await.map_err(|e| match e {
                    HubError::BackendUnavailable(_) => e,
                    other => HubError::backend_unavailable(other.to_string()),
                })?;

                let catalog: Vec<String> = models
                    .iter()
                    .filter(|m| m.supports_generation())
                    .map(|m| m.short_name().to_string())
                    .collect();

                tracing::debug!(models = catalog.len(), "cached model catalog");
                state.catalog = Some(catalog.clone());
                catalog
            }
        };

        if catalog.is_empty() {
            return Err(HubError::NoModelAvailable);
        }

        let chosen = PREFERRED_MODELS
            .iter()
            .find(|pref| catalog.iter().any(|m| m == *pref))
            .map(|s| s.to_string())
            .unwrap_or_else(|| catalog[0].clone());

        tracing::info!(model = %chosen, "resolved generation model");
        state.chosen = Some(chosen.clone());
        Ok(chosen)
    }

    /// Forget the cached catalog and chosen model, forcing a fresh listing
    /// on the next resolve. Called when the credential changes.
    pub async fn invalidate(&self) {
        let mut state = self.state.lock().await;
        *state = ResolverState::default();
        tracing::debug!("model resolution invalidated");
    }
}
