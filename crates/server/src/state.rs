//! Application state shared across handlers.

use brewmap_core::AppConfig;
use brewmap_store::CafeStore;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn CafeStore>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: AppConfig, store: Arc<dyn CafeStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
