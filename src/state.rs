//! Shared application state injected into request handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::application::services::ShortLinkRegistry;
use crate::domain::repositories::KeyValueStore;

/// State cloned into every handler.
///
/// Holds the single store client of the process, wrapped by the registry,
/// and the handle used to render the installed metrics recorder.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ShortLinkRegistry>,
    pub metrics: PrometheusHandle,
}

impl AppState {
    /// Builds the state around an already connected store.
    pub fn new(store: Arc<dyn KeyValueStore>, metrics: PrometheusHandle) -> Self {
        Self {
            registry: Arc::new(ShortLinkRegistry::new(store)),
            metrics,
        }
    }
}
