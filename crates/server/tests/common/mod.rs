//! Server test utilities.

use brewmap_core::AppConfig;
use brewmap_server::{AppState, create_router};
use brewmap_store::{CafeStore, SqliteStore};
use std::sync::Arc;
use tempfile::TempDir;

/// A test server wrapper with all dependencies.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a new test server backed by a temp-dir SQLite file.
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("cafes.db");

        let store: Arc<dyn CafeStore> = Arc::new(
            SqliteStore::new(&db_path)
                .await
                .expect("Failed to create cafe store"),
        );

        let config = AppConfig::for_testing(db_path);
        let state = AppState::new(config, store);
        let router = create_router(state.clone());

        Self {
            router,
            state,
            _temp_dir: temp_dir,
        }
    }

    /// Get access to the underlying store.
    pub fn store(&self) -> Arc<dyn CafeStore> {
        self.state.store.clone()
    }

    /// The API key the server was configured with.
    pub fn api_key(&self) -> String {
        self.state.config.admin.api_key.clone()
    }
}
