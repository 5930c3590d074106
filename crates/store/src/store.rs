//! Cafe store trait and SQLite implementation.

use crate::error::{StoreError, StoreResult};
use crate::models::{CafeRow, NewCafe};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Persistence operations over cafe records.
#[async_trait]
pub trait CafeStore: Send + Sync {
    /// All cafes in primary-key order. An empty store yields an empty vec.
    async fn list_cafes(&self) -> StoreResult<Vec<CafeRow>>;

    /// Cafes whose location matches exactly. Empty vec when nothing matches.
    async fn find_by_location(&self, location: &str) -> StoreResult<Vec<CafeRow>>;

    /// Look up a cafe by id. Absence is `None`, not an error.
    async fn get_cafe(&self, id: i64) -> StoreResult<Option<CafeRow>>;

    /// Insert a new cafe and return the stored row with its assigned id.
    /// A duplicate name fails with [`StoreError::Constraint`].
    async fn create_cafe(&self, cafe: &NewCafe) -> StoreResult<CafeRow>;

    /// Set the coffee price of an existing cafe. Only `coffee_price` changes.
    async fn update_price(&self, id: i64, price: &str) -> StoreResult<()>;

    /// Permanently remove a cafe.
    async fn delete_cafe(&self, id: i64) -> StoreResult<()>;

    /// Apply the schema. Idempotent.
    async fn migrate(&self) -> StoreResult<()>;

    /// Check database connectivity.
    async fn health_check(&self) -> StoreResult<()>;
}

/// SQLite-backed cafe store.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and apply the schema.
    pub async fn new(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .foreign_keys(true)
            // Prevent transient "database is locked" errors under concurrent access.
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            // SQLite permits limited write concurrency; a single connection avoids
            // persistent "database is locked" failures under axum concurrency.
            .max_connections(1)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }
}

#[async_trait]
impl CafeStore for SqliteStore {
    async fn list_cafes(&self) -> StoreResult<Vec<CafeRow>> {
        let rows = sqlx::query_as::<_, CafeRow>("SELECT * FROM cafes ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_location(&self, location: &str) -> StoreResult<Vec<CafeRow>> {
        let rows =
            sqlx::query_as::<_, CafeRow>("SELECT * FROM cafes WHERE location = ? ORDER BY id")
                .bind(location)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    async fn get_cafe(&self, id: i64) -> StoreResult<Option<CafeRow>> {
        let row = sqlx::query_as::<_, CafeRow>("SELECT * FROM cafes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create_cafe(&self, cafe: &NewCafe) -> StoreResult<CafeRow> {
        let result = sqlx::query(
            r#"
            INSERT INTO cafes (name, map_url, img_url, location, seats, has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&cafe.name)
        .bind(&cafe.map_url)
        .bind(&cafe.img_url)
        .bind(&cafe.location)
        .bind(&cafe.seats)
        .bind(cafe.has_toilet)
        .bind(cafe.has_wifi)
        .bind(cafe.has_sockets)
        .bind(cafe.can_take_calls)
        .bind(&cafe.coffee_price)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => {
                let id = done.last_insert_rowid();
                tracing::debug!(id, name = %cafe.name, "Cafe row inserted");
                self.get_cafe(id).await?.ok_or_else(|| {
                    StoreError::NotFound(format!("cafe {id} missing after insert"))
                })
            }
            Err(sqlx::Error::Database(db_err)) => {
                let msg = db_err.message();
                // SQLite error: "UNIQUE constraint failed: cafes.name"
                if msg.contains("UNIQUE constraint") {
                    Err(StoreError::Constraint(format!(
                        "a cafe named '{}' already exists",
                        cafe.name
                    )))
                } else if msg.contains("NOT NULL constraint") {
                    Err(StoreError::Constraint(msg.to_string()))
                } else {
                    Err(sqlx::Error::Database(db_err).into())
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update_price(&self, id: i64, price: &str) -> StoreResult<()> {
        let result = sqlx::query("UPDATE cafes SET coffee_price = ? WHERE id = ?")
            .bind(price)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("cafe {id} not found")));
        }
        Ok(())
    }

    async fn delete_cafe(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM cafes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("cafe {id} not found")));
        }
        Ok(())
    }

    async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS cafes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    map_url TEXT NOT NULL,
    img_url TEXT NOT NULL,
    location TEXT NOT NULL,
    seats TEXT NOT NULL,
    has_toilet INTEGER NOT NULL,
    has_wifi INTEGER NOT NULL,
    has_sockets INTEGER NOT NULL,
    can_take_calls INTEGER NOT NULL,
    coffee_price TEXT
)
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_cafe(name: &str, location: &str) -> NewCafe {
        NewCafe {
            name: name.to_string(),
            map_url: "https://maps.example/brew".to_string(),
            img_url: "https://img.example/brew.jpg".to_string(),
            location: location.to_string(),
            seats: "10-20".to_string(),
            has_toilet: true,
            has_wifi: false,
            has_sockets: false,
            can_take_calls: true,
            coffee_price: Some("£2".to_string()),
        }
    }

    async fn open_store() -> (tempfile::TempDir, SqliteStore) {
        let temp = tempdir().unwrap();
        let store = SqliteStore::new(temp.path().join("cafes.db")).await.unwrap();
        (temp, store)
    }

    #[tokio::test]
    async fn create_then_get_roundtrip() {
        let (_temp, store) = open_store().await;
        let cafe = sample_cafe("Brew", "Town");

        let created = store.create_cafe(&cafe).await.unwrap();
        let fetched = store.get_cafe(created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Brew");
        assert_eq!(fetched.coffee_price.as_deref(), Some("£2"));
        assert!(fetched.has_toilet);
        assert!(!fetched.has_wifi);
    }

    #[tokio::test]
    async fn ids_are_fresh_and_unique() {
        let (_temp, store) = open_store().await;

        let first = store.create_cafe(&sample_cafe("Brew", "Town")).await.unwrap();
        let second = store.create_cafe(&sample_cafe("Grind", "Town")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn duplicate_name_fails_and_store_is_unchanged() {
        let (_temp, store) = open_store().await;
        store.create_cafe(&sample_cafe("Brew", "Town")).await.unwrap();

        let err = store
            .create_cafe(&sample_cafe("Brew", "Elsewhere"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));

        let cafes = store.list_cafes().await.unwrap();
        assert_eq!(cafes.len(), 1);
        assert_eq!(cafes[0].location, "Town");
    }

    #[tokio::test]
    async fn update_price_changes_only_the_price() {
        let (_temp, store) = open_store().await;
        let created = store.create_cafe(&sample_cafe("Brew", "Town")).await.unwrap();

        store.update_price(created.id, "£3").await.unwrap();

        let updated = store.get_cafe(created.id).await.unwrap().unwrap();
        assert_eq!(updated.coffee_price.as_deref(), Some("£3"));
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.seats, created.seats);
    }

    #[tokio::test]
    async fn update_price_on_missing_id_is_not_found() {
        let (_temp, store) = open_store().await;

        let err = store.update_price(999, "£3").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert!(store.list_cafes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_row_and_second_delete_is_not_found() {
        let (_temp, store) = open_store().await;
        let created = store.create_cafe(&sample_cafe("Brew", "Town")).await.unwrap();

        store.delete_cafe(created.id).await.unwrap();
        assert!(store.get_cafe(created.id).await.unwrap().is_none());

        let err = store.delete_cafe(created.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn find_by_location_is_exact_match() {
        let (_temp, store) = open_store().await;
        store.create_cafe(&sample_cafe("Brew", "Town")).await.unwrap();
        store.create_cafe(&sample_cafe("Grind", "Town")).await.unwrap();
        store.create_cafe(&sample_cafe("Roast", "City")).await.unwrap();

        let hits = store.find_by_location("Town").await.unwrap();
        assert_eq!(hits.len(), 2);

        // Exact match only, no substring matching
        assert!(store.find_by_location("Tow").await.unwrap().is_empty());
        assert!(store.find_by_location("nowhere").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_is_in_primary_key_order() {
        let (_temp, store) = open_store().await;
        store.create_cafe(&sample_cafe("Brew", "Town")).await.unwrap();
        store.create_cafe(&sample_cafe("Grind", "City")).await.unwrap();

        let cafes = store.list_cafes().await.unwrap();
        assert_eq!(cafes.len(), 2);
        assert!(cafes[0].id < cafes[1].id);
    }

    #[tokio::test]
    async fn migrate_is_idempotent() {
        let (_temp, store) = open_store().await;
        store.create_cafe(&sample_cafe("Brew", "Town")).await.unwrap();

        store.migrate().await.unwrap();
        assert_eq!(store.list_cafes().await.unwrap().len(), 1);
    }
}
