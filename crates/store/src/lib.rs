//! Record store for the brewmap cafe directory.
//!
//! This crate provides the persistence layer:
//! - The `cafes` table schema
//! - Lookup by id, by location, and full enumeration
//! - Creation, price updates, and deletion

pub mod error;
pub mod models;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use models::{CafeRow, NewCafe};
pub use store::{CafeStore, SqliteStore};

use brewmap_core::config::StoreConfig;
use std::sync::Arc;

/// Create a cafe store from configuration.
pub async fn from_config(config: &StoreConfig) -> StoreResult<Arc<dyn CafeStore>> {
    let store = SqliteStore::new(&config.path).await?;
    Ok(Arc::new(store) as Arc<dyn CafeStore>)
}
