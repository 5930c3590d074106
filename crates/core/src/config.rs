//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
}

/// Record store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file. Created (with parent directories)
    /// on first start if missing.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

/// Admin configuration.
///
/// The API key authorizes cafe deletion. It must be supplied via the config
/// file or environment at startup, never compiled into the binary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Shared secret checked on `DELETE /report-closed/{id}`.
    pub api_key: String,
}

impl AdminConfig {
    /// Create a test configuration with a dummy key.
    ///
    /// **For testing only.**
    pub fn for_testing() -> Self {
        Self {
            api_key: "test-api-key".to_string(),
        }
    }
}

/// Top-level application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    pub admin: AdminConfig,
}

impl AppConfig {
    /// Validate settings that the type system cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.admin.api_key.trim().is_empty() {
            return Err("admin.api_key must not be empty".to_string());
        }
        Ok(())
    }

    /// Create a test configuration backed by the given database path.
    ///
    /// **For testing only.**
    pub fn for_testing(db_path: PathBuf) -> Self {
        Self {
            server: ServerConfig::default(),
            store: StoreConfig { path: db_path },
            admin: AdminConfig::for_testing(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("data/cafes.db")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let server = ServerConfig::default();
        assert_eq!(server.bind, "127.0.0.1:8080");

        let store = StoreConfig::default();
        assert_eq!(store.path, PathBuf::from("data/cafes.db"));
    }

    #[test]
    fn blank_api_key_is_rejected() {
        let config = AppConfig {
            server: ServerConfig::default(),
            store: StoreConfig::default(),
            admin: AdminConfig {
                api_key: "   ".to_string(),
            },
        };
        assert!(config.validate().is_err());

        let config = AppConfig::for_testing(PathBuf::from("cafes.db"));
        assert!(config.validate().is_ok());
    }
}
