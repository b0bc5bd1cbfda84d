//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::{ConnectivityProbe, DocumentStore};

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Contains the application configuration and the two store capabilities:
/// the document store used by the submission path and the connectivity
/// probe used by diagnostics.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DocumentStore>,
    pub probe: Arc<dyn ConnectivityProbe>,
}

impl AppState {
    /// Creates a new application state from the given configuration and store handles.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn DocumentStore>,
        probe: Arc<dyn ConnectivityProbe>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            probe,
        }
    }
}
