//! Remote Redis/Valkey counter store.
//!
//! Counters live under keys of the literal form `{namespace}:{slug}:{reaction}`
//! holding a numeric integer. Increment maps to the server's atomic `INCR`;
//! enumerate is a `SCAN` over the `{namespace}:{slug}:` prefix followed by a
//! `GET` per key. The scan-then-get read is deliberately not atomic as a
//! whole: concurrent increments may or may not be reflected, and callers
//! must tolerate this weak-consistency enumerate.
//!
//! Slugs are interpolated into keys and the scan pattern verbatim. A slug
//! containing `:` or a glob metacharacter (`*`, `?`, `[`) would widen or
//! distort the scan window, so slugs fed to this store must stay free of
//! those characters (endpoint names and numeric discriminators are).

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::instrument;

use openheart_core::error::{StoreError, StoreResult};
use openheart_core::traits::CounterStore;
use openheart_core::value_objects::Slug;

/// Redis/Valkey implementation of `CounterStore`.
pub struct RedisStore {
    url: String,
    namespace: String,
    conn: Option<MultiplexedConnection>,
}

impl RedisStore {
    pub fn new(url: &str, namespace: &str) -> Self {
        Self {
            url: url.to_string(),
            namespace: namespace.to_string(),
            conn: None,
        }
    }

    fn connection(&mut self) -> StoreResult<&mut MultiplexedConnection> {
        self.conn.as_mut().ok_or(StoreError::NotConnected)
    }

    fn key_prefix(&self, slug: &Slug) -> String {
        format!("{}:{}:", self.namespace, slug)
    }
}

#[async_trait]
impl CounterStore for RedisStore {
    async fn connect(&mut self) -> StoreResult<()> {
        // Valkey speaks the Redis protocol; the driver accepts both URL
        // schemes.
        let url = self
            .url
            .strip_prefix("valkey:")
            .map(|rest| format!("redis:{rest}"))
            .unwrap_or_else(|| self.url.clone());
        let client = redis::Client::open(url.as_str())
            .map_err(|e| StoreError::backend("a database error occurred while connecting", e))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| StoreError::backend("a database error occurred while connecting", e))?;
        self.conn = Some(conn);
        Ok(())
    }

    async fn disconnect(&mut self) -> StoreResult<()> {
        // Dropping the handle releases the underlying connection.
        self.conn = None;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn increment(&mut self, slug: &Slug, reaction: &str) -> StoreResult<()> {
        let key = format!("{}{}", self.key_prefix(slug), reaction);
        let conn = self.connection()?;
        let _: i64 = conn.incr(&key, 1i64).await.map_err(|e| {
            StoreError::backend(
                format!("a database error occurred while processing a reaction for '{slug}'"),
                e,
            )
        })?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn enumerate(&mut self, slug: &Slug) -> StoreResult<Vec<(String, i64)>> {
        let prefix = self.key_prefix(slug);
        let pattern = format!("{prefix}*");
        let query_failed = |e: redis::RedisError| {
            StoreError::backend(
                format!("a database error occurred while querying reactions for '{slug}'"),
                e,
            )
        };

        let conn = self.connection()?;
        let mut keys = Vec::new();
        {
            let mut iter: redis::AsyncIter<'_, String> =
                conn.scan_match(&pattern).await.map_err(query_failed)?;
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
        }

        let mut reactions = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(reaction) = key.strip_prefix(&prefix) else {
                continue;
            };
            // The counter may have been removed between scan and fetch;
            // that is within the documented weak-consistency contract.
            let count: Option<i64> = conn.get(&key).await.map_err(query_failed)?;
            if let Some(count) = count {
                reactions.push((reaction.to_string(), count));
            }
        }
        Ok(reactions)
    }
}
