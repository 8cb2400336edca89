//! # Collection Repository
//!
//! Each persisted collection is one row holding the whole collection as a
//! JSON document. A write replaces the previous document.
//!
//! ```text
//! ┌──────────┬──────────────────────────────────────┬──────────────────────┐
//! │ key      │ value                                │ updated_at           │
//! ├──────────┼──────────────────────────────────────┼──────────────────────┤
//! │ products │ [{"id":"1","name":"Aura Minimalist…  │ 2024-07-04T10:15:00Z │
//! │ cart     │ [{"id":"3",…,"quantity":2}]          │ 2024-07-04T10:16:12Z │
//! │ wishlist │ ["3","5"]                            │ 2024-07-04T10:16:40Z │
//! └──────────┴──────────────────────────────────────┴──────────────────────┘
//! ```
//!
//! A missing row and a row whose JSON doesn't decode are reported
//! differently: `Ok(None)` versus `Err(DbError::Serialization)`. The
//! storefront treats both as "use the seed value", but logs the second.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for the `collections` table.
#[derive(Debug, Clone)]
pub struct CollectionRepository {
    pool: SqlitePool,
}

impl CollectionRepository {
    /// Creates a new CollectionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CollectionRepository { pool }
    }

    /// Raw JSON text stored under `key`, if any.
    pub async fn get_raw(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM collections WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        debug!(key = %key, found = value.is_some(), "Read collection");
        Ok(value)
    }

    /// Stores raw JSON text under `key`, replacing any previous value.
    ///
    /// The table rejects text that isn't valid JSON.
    pub async fn put_raw(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO collections (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "Wrote collection");
        Ok(())
    }

    /// Decodes the collection under `key`.
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> DbResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| DbError::serialization(key, e)),
            None => Ok(None),
        }
    }

    /// Encodes and stores `value` under `key`.
    pub async fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> DbResult<()> {
        let raw = serde_json::to_string(value).map_err(|e| DbError::serialization(key, e))?;
        self.put_raw(key, &raw).await
    }

    /// Deletes the row under `key`. Returns whether one existed.
    pub async fn delete(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM collections WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All stored keys, sorted.
    pub async fn keys(&self) -> DbResult<Vec<String>> {
        let keys: Vec<String> = sqlx::query_scalar("SELECT key FROM collections ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }

    /// When `key` was last written, as stored (RFC 3339).
    pub async fn updated_at(&self, key: &str) -> DbResult<Option<String>> {
        let stamp: Option<String> =
            sqlx::query_scalar("SELECT updated_at FROM collections WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(stamp)
    }

    /// Number of stored collections.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM collections")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
