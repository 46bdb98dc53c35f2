//! SQLite store integration tests.

#[cfg(test)]
mod tests {
    use here2home_types::KeyValueStore;

    use crate::SqliteStore;

    async fn setup_store() -> SqliteStore {
        SqliteStore::new("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = setup_store().await;

        let value = store.get("rates.cache").await.unwrap();

        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = setup_store().await;

        store.put("settings", r#"{"home_currency":"AUD"}"#).await.unwrap();

        let value = store.get("settings").await.unwrap();
        assert_eq!(value.as_deref(), Some(r#"{"home_currency":"AUD"}"#));
    }

    #[tokio::test]
    async fn test_put_replaces_whole_value() {
        let store = setup_store().await;

        store.put("location", "first").await.unwrap();
        store.put("location", "second").await.unwrap();

        let value = store.get("location").await.unwrap();
        assert_eq!(value.as_deref(), Some("second"));

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM kv_store")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(count.0, 1);
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("nested").join("here2home.db").display()
        );

        {
            let store = SqliteStore::new(&url).await.unwrap();
            store.put("rates.cache", "cached").await.unwrap();
            store.pool().close().await;
        }

        let reopened = SqliteStore::new(&url).await.unwrap();
        let value = reopened.get("rates.cache").await.unwrap();
        assert_eq!(value.as_deref(), Some("cached"));
    }
}
