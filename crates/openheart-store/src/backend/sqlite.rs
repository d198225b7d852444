//! Embedded SQLite counter store.
//!
//! Backs onto a local single-file table keyed by `(slug, reaction)`.
//! Increments are a single atomic upsert, so concurrent increments to the
//! same counter are serialized by SQLite's own transactional unit of work
//! and never lost to read-modify-write races in application code.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use tracing::instrument;

use openheart_core::error::{StoreError, StoreResult};
use openheart_core::traits::CounterStore;
use openheart_core::value_objects::Slug;

/// SQLite implementation of `CounterStore`.
///
/// The namespace names the counter table; it is validated upstream by
/// `StoreConfig` and safe to interpolate into DDL.
pub struct SqliteStore {
    uri: String,
    namespace: String,
    conn: Option<SqliteConnection>,
}

impl SqliteStore {
    pub fn new(uri: &str, namespace: &str) -> Self {
        Self {
            uri: uri.to_string(),
            namespace: namespace.to_string(),
            conn: None,
        }
    }

    fn connection(&mut self) -> StoreResult<&mut SqliteConnection> {
        self.conn.as_mut().ok_or(StoreError::NotConnected)
    }

    fn connect_options(&self) -> StoreResult<SqliteConnectOptions> {
        let path = self
            .uri
            .strip_prefix("file:")
            .or_else(|| self.uri.strip_prefix("sqlite:"))
            .unwrap_or(&self.uri);
        if path == ":memory:" || path == "memory:" {
            return SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| {
                StoreError::backend("a database error occurred while connecting", e)
            });
        }
        Ok(SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true))
    }

    /// Create the counter table if it does not exist. Idempotent, and only
    /// invoked from the write path; reads must not create storage.
    async fn ensure_table(&mut self) -> StoreResult<()> {
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS \"{}\" ( \
                slug TEXT NOT NULL, \
                reaction TEXT NOT NULL, \
                count INTEGER NOT NULL DEFAULT 1, \
                PRIMARY KEY (slug, reaction) \
            )",
            self.namespace
        );
        let conn = self.connection()?;
        sqlx::query(&ddl)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                StoreError::backend("a database error occurred while setting up the table", e)
            })?;
        Ok(())
    }
}

#[async_trait]
impl CounterStore for SqliteStore {
    async fn connect(&mut self) -> StoreResult<()> {
        if self.conn.is_some() {
            self.disconnect().await?;
        }
        let options = self.connect_options()?;
        let conn = SqliteConnection::connect_with(&options)
            .await
            .map_err(|e| StoreError::backend("a database error occurred while connecting", e))?;
        self.conn = Some(conn);
        Ok(())
    }

    async fn disconnect(&mut self) -> StoreResult<()> {
        if let Some(conn) = self.conn.take() {
            conn.close()
                .await
                .map_err(|e| StoreError::backend("a database error occurred while closing", e))?;
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn increment(&mut self, slug: &Slug, reaction: &str) -> StoreResult<()> {
        self.ensure_table().await?;
        let sql = format!(
            "INSERT INTO \"{}\" (slug, reaction) VALUES (?1, ?2) \
             ON CONFLICT (slug, reaction) DO UPDATE SET count = count + 1",
            self.namespace
        );
        let conn = self.connection()?;
        sqlx::query(&sql)
            .bind(slug.as_str())
            .bind(reaction)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                StoreError::backend(
                    format!("a database error occurred while processing a reaction for '{slug}'"),
                    e,
                )
            })?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn enumerate(&mut self, slug: &Slug) -> StoreResult<Vec<(String, i64)>> {
        let sql = format!(
            "SELECT reaction, count FROM \"{}\" WHERE slug = ?1",
            self.namespace
        );
        let conn = self.connection()?;
        let rows: Result<Vec<(String, i64)>, sqlx::Error> = sqlx::query_as(&sql)
            .bind(slug.as_str())
            .fetch_all(&mut *conn)
            .await;
        match rows {
            Ok(rows) => Ok(rows),
            // Reading a slug before the first write must neither fail nor
            // create the table.
            Err(sqlx::Error::Database(db)) if db.message().contains("no such table") => {
                Ok(Vec::new())
            }
            Err(e) => Err(StoreError::backend(
                format!("a database error occurred while querying reactions for '{slug}'"),
                e,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn connected_store() -> SqliteStore {
        let mut store = SqliteStore::new("sqlite::memory:", "openheart");
        store.connect().await.unwrap();
        store
    }

    async fn table_exists(store: &mut SqliteStore, table: &str) -> bool {
        let conn = store.conn.as_mut().unwrap();
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
        )
        .bind(table)
        .fetch_optional(&mut *conn)
        .await
        .unwrap();
        row.is_some()
    }

    #[tokio::test]
    async fn data_operations_require_connect() {
        let mut store = SqliteStore::new("sqlite::memory:", "openheart");
        let slug = Slug::from("foo");
        assert!(matches!(
            store.enumerate(&slug).await,
            Err(StoreError::NotConnected)
        ));
        assert!(matches!(
            store.increment(&slug, "❤️").await,
            Err(StoreError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn enumerate_before_any_write_is_empty_and_creates_nothing() {
        let mut store = connected_store().await;
        let slug = Slug::from("foo");

        assert!(!table_exists(&mut store, "openheart").await);
        let rows = store.enumerate(&slug).await.unwrap();
        assert!(rows.is_empty());
        assert!(!table_exists(&mut store, "openheart").await);
    }

    #[tokio::test]
    async fn increment_counts_exactly() {
        let mut store = connected_store().await;
        let slug = Slug::from("foo");

        for _ in 0..3 {
            store.increment(&slug, "❤️").await.unwrap();
        }
        let rows = store.enumerate(&slug).await.unwrap();
        assert_eq!(rows, vec![("❤️".to_string(), 3)]);

        // A second, distinct reaction does not disturb the first.
        store.increment(&slug, "🥨").await.unwrap();
        let mut rows = store.enumerate(&slug).await.unwrap();
        rows.sort();
        assert_eq!(
            rows,
            vec![("❤️".to_string(), 3), ("🥨".to_string(), 1)]
        );
    }

    #[tokio::test]
    async fn slugs_are_isolated() {
        let mut store = connected_store().await;
        let foo = Slug::from("foo");
        let bar = Slug::from("bar");

        store.increment(&foo, "❤️").await.unwrap();
        store.increment(&foo, "❤️").await.unwrap();

        assert!(store.enumerate(&bar).await.unwrap().is_empty());
        assert_eq!(store.enumerate(&foo).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn write_creates_the_table_lazily() {
        let mut store = connected_store().await;
        let slug = Slug::from("foo");

        assert!(!table_exists(&mut store, "openheart").await);
        store.increment(&slug, "❤️").await.unwrap();
        assert!(table_exists(&mut store, "openheart").await);
    }

    #[tokio::test]
    async fn namespace_names_the_table() {
        let mut store = SqliteStore::new("sqlite::memory:", "reactions_test");
        store.connect().await.unwrap();
        store
            .increment(&Slug::from("foo"), "❤️")
            .await
            .unwrap();
        assert!(table_exists(&mut store, "reactions_test").await);
        assert!(!table_exists(&mut store, "openheart").await);
    }

    #[tokio::test]
    async fn counts_persist_across_connection_scopes() {
        let dir = tempfile::tempdir().unwrap();
        let uri = format!("file:{}", dir.path().join("counters.db").display());
        let slug = Slug::from("foo");

        let mut store = SqliteStore::new(&uri, "openheart");
        store.connect().await.unwrap();
        store.increment(&slug, "❤️").await.unwrap();
        store.disconnect().await.unwrap();

        let mut store = SqliteStore::new(&uri, "openheart");
        store.connect().await.unwrap();
        let rows = store.enumerate(&slug).await.unwrap();
        assert_eq!(rows, vec![("❤️".to_string(), 1)]);
        store.disconnect().await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_increments_are_all_applied() {
        let dir = tempfile::tempdir().unwrap();
        let uri = format!("file:{}", dir.path().join("counters.db").display());
        let slug = Slug::from("foo");

        // Two writers on separate connections; the upsert makes each
        // increment a single atomic statement, so none may be lost to a
        // read-modify-write race.
        let mut tasks = Vec::new();
        for _ in 0..2 {
            let uri = uri.clone();
            let slug = slug.clone();
            tasks.push(tokio::spawn(async move {
                let mut store = SqliteStore::new(&uri, "openheart");
                store.connect().await.unwrap();
                for _ in 0..5 {
                    store.increment(&slug, "❤️").await.unwrap();
                }
                store.disconnect().await.unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let mut store = SqliteStore::new(&uri, "openheart");
        store.connect().await.unwrap();
        let rows = store.enumerate(&slug).await.unwrap();
        assert_eq!(rows, vec![("❤️".to_string(), 10)]);
        store.disconnect().await.unwrap();
    }

    #[tokio::test]
    async fn disconnect_is_idempotent() {
        let mut store = connected_store().await;
        store.disconnect().await.unwrap();
        store.disconnect().await.unwrap();
        assert!(matches!(
            store.enumerate(&Slug::from("foo")).await,
            Err(StoreError::NotConnected)
        ));
    }
}
