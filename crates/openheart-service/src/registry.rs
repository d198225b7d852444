//! Reaction registry.
//!
//! Composes the sanitizer, one counter store configuration, and a policy
//! into the two user-facing operations: read the reaction map, and add a
//! reaction.

use std::sync::Arc;

use tracing::warn;

use openheart_core::error::StoreResult;
use openheart_core::policy::Policy;
use openheart_core::traits::CounterStore;
use openheart_core::value_objects::{ReactionMap, Slug};
use openheart_lexicon::Lexicon;
use openheart_store::StoreConfig;

use crate::error::ServiceResult;

/// Read/react operations for one endpoint's reactions.
///
/// Immutable after construction; only the counts inside the store mutate.
/// Every operation opens its own store connection and releases it on every
/// exit path, including validation and backend failures.
#[derive(Debug, Clone)]
pub struct ReactionRegistry {
    lexicon: Arc<Lexicon>,
    store: StoreConfig,
    policy: Policy,
}

impl ReactionRegistry {
    pub fn new(lexicon: Arc<Lexicon>, store: StoreConfig, policy: Policy) -> Self {
        Self {
            lexicon,
            store,
            policy,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// The canonical reaction map for `slug`: store counts filtered by
    /// policy, defaults merged in additively.
    pub async fn reactions(&self, slug: &Slug) -> ServiceResult<ReactionMap> {
        let mut store = self.store.open();
        store.connect().await?;
        let stored = store.enumerate(slug).await;
        release(store).await;
        Ok(self.policy.apply(stored?))
    }

    /// Sanitize `raw`, check it against policy, record it, and answer with
    /// the same map [`reactions`](Self::reactions) would return.
    ///
    /// Rejections happen before any store connection is made, so invalid
    /// input can never mutate storage. Accepted writes are immediately
    /// re-read, so the caller observes its own increment.
    pub async fn react(&self, slug: &Slug, raw: &str) -> ServiceResult<ReactionMap> {
        let (reaction, _remainder) = self.lexicon.sanitize(raw)?;
        self.policy.admit(reaction)?;

        let mut store = self.store.open();
        store.connect().await?;
        let stored = record_and_read(store.as_mut(), slug, reaction).await;
        release(store).await;
        Ok(self.policy.apply(stored?))
    }
}

async fn record_and_read(
    store: &mut dyn CounterStore,
    slug: &Slug,
    reaction: &str,
) -> StoreResult<Vec<(String, i64)>> {
    store.increment(slug, reaction).await?;
    store.enumerate(slug).await
}

/// Best-effort release at the end of an operation scope. A close failure
/// must not mask the operation's own result.
async fn release(mut store: Box<dyn CounterStore>) {
    if let Err(err) = store.disconnect().await {
        warn!(error = %err, "failed to close counter store");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        _dir: tempfile::TempDir,
        store: StoreConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let uri = format!("file:{}", dir.path().join("reactions.db").display());
            let store = StoreConfig::from_uri(uri, "openheart").unwrap();
            Self { _dir: dir, store }
        }

        fn registry(&self, policy: Policy) -> ReactionRegistry {
            ReactionRegistry::new(Lexicon::builtin(), self.store.clone(), policy)
        }

        /// Seed counters directly through a store connection.
        async fn seed(&self, slug: &Slug, counts: &[(&str, i64)]) {
            let mut store = self.store.open();
            store.connect().await.unwrap();
            for (reaction, count) in counts {
                for _ in 0..*count {
                    store.increment(slug, reaction).await.unwrap();
                }
            }
            store.disconnect().await.unwrap();
        }

        /// Raw store contents, bypassing policy.
        async fn raw(&self, slug: &Slug) -> Vec<(String, i64)> {
            let mut store = self.store.open();
            store.connect().await.unwrap();
            let mut rows = store.enumerate(slug).await.unwrap();
            store.disconnect().await.unwrap();
            rows.sort();
            rows
        }
    }

    #[tokio::test]
    async fn reactions_reads_the_store_through_policy() {
        let fixture = Fixture::new();
        let slug = Slug::from("foo");
        fixture.seed(&slug, &[("❤️", 3), ("🥨", 1)]).await;

        let registry = fixture.registry(Policy::new());
        let map = registry.reactions(&slug).await.unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["❤️"], 3);
    }

    #[tokio::test]
    async fn policy_composition_shapes_the_visible_map() {
        let fixture = Fixture::new();
        let slug = Slug::from("foo");
        fixture.seed(&slug, &[("❤️", 3), ("🥨", 1)]).await;

        let registry = fixture.registry(
            Policy::new()
                .allow(["❤️", "🥨"])
                .block(["🥨"])
                .default_counts([("🥨", 5), ("😺", 2)]),
        );
        let map = registry.reactions(&slug).await.unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map["❤️"], 3);
        assert_eq!(map["🥨"], 5);
        assert_eq!(map["😺"], 2);
    }

    #[tokio::test]
    async fn empty_slug_reads_as_defaults_only() {
        let fixture = Fixture::new();
        let registry = fixture.registry(Policy::new().default_counts([("😺", 2)]));

        let map = registry.reactions(&Slug::from("untouched")).await.unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["😺"], 2);
        // The read must not have persisted anything.
        assert!(fixture.raw(&Slug::from("untouched")).await.is_empty());
    }

    #[tokio::test]
    async fn react_reads_its_own_write() {
        let fixture = Fixture::new();
        let registry = fixture.registry(Policy::new());
        let slug = Slug::from("foo");

        let map = registry.react(&slug, "❤️").await.unwrap();
        assert_eq!(map["❤️"], 1);
        let map = registry.react(&slug, "❤️").await.unwrap();
        assert_eq!(map["❤️"], 2);
    }

    #[tokio::test]
    async fn react_strips_trailing_data_before_storing() {
        let fixture = Fixture::new();
        let registry = fixture.registry(Policy::new());
        let slug = Slug::from("foo");

        registry.react(&slug, "❤️=extra").await.unwrap();
        assert_eq!(
            fixture.raw(&slug).await,
            vec![("❤️".to_string(), 1)]
        );
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_without_mutation() {
        let fixture = Fixture::new();
        let registry = fixture.registry(Policy::new());
        let slug = Slug::from("foo");

        let err = registry.react(&slug, "not an emoji").await.unwrap_err();
        assert!(matches!(err, crate::ServiceError::Invalid(_)));
        assert!(fixture.raw(&slug).await.is_empty());
    }

    #[tokio::test]
    async fn policy_rejection_is_invalid_and_writes_nothing() {
        let fixture = Fixture::new();
        let registry = fixture.registry(Policy::new().allow(["❤️"]));
        let slug = Slug::from("foo");

        let err = registry.react(&slug, "🥨").await.unwrap_err();
        assert!(matches!(err, crate::ServiceError::Invalid(_)));
        assert!(fixture.raw(&slug).await.is_empty());

        // Blocked reactions are equally unwritable.
        let registry = fixture.registry(Policy::new().block(["🥨"]));
        let err = registry.react(&slug, "🥨").await.unwrap_err();
        assert!(matches!(err, crate::ServiceError::Invalid(_)));
        assert!(fixture.raw(&slug).await.is_empty());
    }

    #[tokio::test]
    async fn slugs_stay_isolated_through_the_registry() {
        let fixture = Fixture::new();
        let registry = fixture.registry(Policy::new());

        registry.react(&Slug::from("foo"), "❤️").await.unwrap();
        let map = registry.reactions(&Slug::from("bar")).await.unwrap();
        assert!(map.is_empty());
    }
}
