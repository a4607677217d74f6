//! Persistent collection store
//!
//! A durable string-keyed slot store. Each slot holds one JSON document;
//! collections are JSON arrays written and read as a whole. There are no
//! partial writes and no cross-call transactions: every write replaces the
//! full value, and the last writer wins.

use super::collection::{Collection, Record};
use super::{create_memory_pool, create_pool, seed};
use crate::error::Result;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sqlx::SqlitePool;
use std::path::Path;

/// Handle to the key-value store. Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Wrap an already-migrated pool. Does not seed.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (or create) the on-disk store and seed any missing collection
    pub async fn open(db_path: &Path) -> Result<Self> {
        let pool = create_pool(db_path).await?;
        let store = Self::new(pool);
        seed::ensure_seeded(&store).await?;
        Ok(store)
    }

    /// Open a private in-memory store and seed it
    pub async fn open_in_memory() -> Result<Self> {
        let store = Self::new(create_memory_pool().await?);
        seed::ensure_seeded(&store).await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Typed handle over one collection
    pub fn collection<T: Record>(&self) -> Collection<T> {
        Collection::new(self.clone())
    }

    /// Raw value stored under `key`, if any
    pub async fn get_value(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Store `value` under `key`, replacing whatever was there
    pub async fn set_value(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        tracing::debug!("Wrote key: {} ({} bytes)", key, value.len());
        Ok(())
    }

    /// Remove `key`. Removing an absent key is a no-op.
    pub async fn remove_value(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Removed key: {}", key);
        Ok(())
    }

    pub async fn contains_key(&self, key: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    /// Raw records stored under `key`.
    ///
    /// An absent key reads as an empty collection. So does a value that is
    /// not a JSON array; the next successful write overwrites it.
    pub async fn get_records(&self, key: &str) -> Result<Vec<Value>> {
        let Some(raw) = self.get_value(key).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(
                    "Collection {} holds unreadable data, treating as empty: {}",
                    key,
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Replace the array stored under `key` with `records`
    pub async fn set_records(&self, key: &str, records: &[Value]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.set_value(key, &json).await
    }

    /// Read the array stored under `key` as `T`.
    ///
    /// Records that do not fit `T` are skipped with a warning; they stay in
    /// storage untouched.
    pub async fn get_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let records = self.get_records(key).await?;

        Ok(records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value(record) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!("Skipping unreadable record {} in {}: {}", index, key, e);
                    None
                }
            })
            .collect())
    }

    /// Serialize `items` and replace the array stored under `key`
    pub async fn set_collection<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let json = serde_json::to_string(items)?;
        self.set_value(key, &json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::initialize_database;
    use serde::Deserialize;
    use sqlx::sqlite::SqlitePoolOptions;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
        label: String,
    }

    async fn create_test_store() -> Store {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        Store::new(pool)
    }

    fn item(id: &str) -> Item {
        Item {
            id: id.to_string(),
            label: format!("label {}", id),
        }
    }

    #[tokio::test]
    async fn test_absent_key_reads_empty() {
        let store = create_test_store().await;

        let items: Vec<Item> = store.get_collection("nothing").await.unwrap();
        assert!(items.is_empty());
        assert!(!store.contains_key("nothing").await.unwrap());
    }

    #[tokio::test]
    async fn test_set_then_get_collection() {
        let store = create_test_store().await;

        store
            .set_collection("items", &[item("a"), item("b")])
            .await
            .unwrap();

        let items: Vec<Item> = store.get_collection("items").await.unwrap();
        assert_eq!(items, vec![item("a"), item("b")]);
        assert!(store.contains_key("items").await.unwrap());
    }

    #[tokio::test]
    async fn test_write_replaces_whole_collection() {
        let store = create_test_store().await;

        store.set_collection("items", &[item("a"), item("b")]).await.unwrap();
        store.set_collection("items", &[item("c")]).await.unwrap();

        let items: Vec<Item> = store.get_collection("items").await.unwrap();
        assert_eq!(items, vec![item("c")]);
    }

    #[tokio::test]
    async fn test_corrupt_json_reads_empty_and_heals() {
        let store = create_test_store().await;

        store.set_value("items", "{not json").await.unwrap();
        let items: Vec<Item> = store.get_collection("items").await.unwrap();
        assert!(items.is_empty());

        store.set_collection("items", &[item("a")]).await.unwrap();
        let items: Vec<Item> = store.get_collection("items").await.unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_wrong_shape_reads_empty() {
        let store = create_test_store().await;

        store.set_value("items", r#"{"id":"a"}"#).await.unwrap();
        let items: Vec<Item> = store.get_collection("items").await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_record_is_skipped_not_dropped() {
        let store = create_test_store().await;

        store
            .set_value("items", r#"[{"id":"a","label":"A"},{"id":"b"},{"id":"c","label":"C"}]"#)
            .await
            .unwrap();

        let items: Vec<Item> = store.get_collection("items").await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "a");
        assert_eq!(items[1].id, "c");

        let records = store.get_records("items").await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], serde_json::json!({ "id": "b" }));
    }

    #[tokio::test]
    async fn test_raw_values() {
        let store = create_test_store().await;

        assert_eq!(store.get_value("token").await.unwrap(), None);

        store.set_value("token", "abc").await.unwrap();
        assert_eq!(store.get_value("token").await.unwrap(), Some("abc".to_string()));

        store.remove_value("token").await.unwrap();
        store.remove_value("token").await.unwrap();
        assert_eq!(store.get_value("token").await.unwrap(), None);
    }
}
