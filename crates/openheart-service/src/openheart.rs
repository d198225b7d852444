//! The OpenHeart facade.
//!
//! One immutable object composing the lexicon, a validated store
//! configuration, the slug resolver, and a registry per reaction-enabled
//! endpoint. Applications build it once at setup time and thread it
//! explicitly to whatever composes routes; there is no ambient global
//! registry to look things up from.

use std::collections::HashMap;
use std::sync::Arc;

use openheart_core::error::ConfigError;
use openheart_core::policy::Policy;
use openheart_core::value_objects::{ReactionMap, Slug};
use openheart_lexicon::Lexicon;
use openheart_store::StoreConfig;

use crate::error::{ServiceError, ServiceResult};
use crate::registry::ReactionRegistry;
use crate::resolver::{RouteValues, SlugFn, SlugResolver};

/// Default embedded database next to the process.
pub const DEFAULT_DATABASE_URI: &str = "file:openheart.db";
/// Default namespace isolating this application's counters in the store.
pub const DEFAULT_NAMESPACE: &str = "openheart";

/// Per-endpoint registration options: the reaction policy and an optional
/// custom slug function.
#[derive(Clone, Default)]
pub struct EndpointOptions {
    policy: Policy,
    slug_fn: Option<SlugFn>,
}

impl EndpointOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Derive this endpoint's slug from its route values instead of
    /// grouping all parameterizations together. Returning `None` marks
    /// that parameterization as not reactable.
    #[must_use]
    pub fn slug_with<F>(mut self, slug_fn: F) -> Self
    where
        F: Fn(&RouteValues) -> Option<String> + Send + Sync + 'static,
    {
        self.slug_fn = Some(Arc::new(slug_fn));
        self
    }
}

/// Builder for [`OpenHeart`]. Backend selection happens in
/// [`build`](Self::build), so a bad database URI or namespace fails at
/// application setup, not on the first request.
pub struct OpenHeartBuilder {
    lexicon: Arc<Lexicon>,
    database_uri: String,
    namespace: String,
    endpoints: Vec<(String, EndpointOptions)>,
}

impl OpenHeartBuilder {
    #[must_use]
    pub fn database_uri(mut self, uri: impl Into<String>) -> Self {
        self.database_uri = uri.into();
        self
    }

    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Register a reaction-enabled endpoint.
    #[must_use]
    pub fn endpoint(mut self, name: impl Into<String>, options: EndpointOptions) -> Self {
        self.endpoints.push((name.into(), options));
        self
    }

    pub fn build(self) -> Result<OpenHeart, ConfigError> {
        let store = StoreConfig::from_uri(self.database_uri, self.namespace)?;
        let mut resolver = SlugResolver::new();
        let mut endpoints = HashMap::new();
        for (name, options) in self.endpoints {
            match options.slug_fn {
                Some(slug_fn) => resolver.register_with(name.clone(), slug_fn),
                None => resolver.register(name.clone()),
            }
            let registry =
                ReactionRegistry::new(Arc::clone(&self.lexicon), store.clone(), options.policy);
            endpoints.insert(name, registry);
        }
        Ok(OpenHeart {
            resolver,
            endpoints,
        })
    }
}

/// The composed reaction service for one application.
#[derive(Debug)]
pub struct OpenHeart {
    resolver: SlugResolver,
    endpoints: HashMap<String, ReactionRegistry>,
}

impl OpenHeart {
    /// Start building a service around a lexicon (usually
    /// [`Lexicon::builtin`]).
    #[must_use]
    pub fn builder(lexicon: Arc<Lexicon>) -> OpenHeartBuilder {
        OpenHeartBuilder {
            lexicon,
            database_uri: DEFAULT_DATABASE_URI.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            endpoints: Vec::new(),
        }
    }

    /// The slug for one parameterization of an endpoint, or `None` when
    /// reactions are disabled for it.
    pub fn slug_for(&self, endpoint: &str, values: &RouteValues) -> Option<Slug> {
        self.resolver.resolve(endpoint, values)
    }

    /// Whether reactions are enabled for this endpoint and parameterization.
    pub fn is_enabled_for(&self, endpoint: &str, values: &RouteValues) -> bool {
        self.resolver.is_enabled_for(endpoint, values)
    }

    /// The policy registered for an endpoint.
    pub fn policy_for(&self, endpoint: &str) -> Option<&Policy> {
        self.endpoints.get(endpoint).map(ReactionRegistry::policy)
    }

    /// Names of all reaction-enabled endpoints.
    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.resolver.endpoints()
    }

    /// All reactions for the given endpoint and route values.
    pub async fn reactions_for(
        &self,
        endpoint: &str,
        values: &RouteValues,
    ) -> ServiceResult<ReactionMap> {
        let (registry, slug) = self.route(endpoint, values)?;
        registry.reactions(&slug).await
    }

    /// Add a reaction for the given endpoint and route values, answering
    /// with the updated map.
    pub async fn react_to(
        &self,
        raw_reaction: &str,
        endpoint: &str,
        values: &RouteValues,
    ) -> ServiceResult<ReactionMap> {
        let (registry, slug) = self.route(endpoint, values)?;
        registry.react(&slug, raw_reaction).await
    }

    fn route(
        &self,
        endpoint: &str,
        values: &RouteValues,
    ) -> ServiceResult<(&ReactionRegistry, Slug)> {
        let slug = self
            .slug_for(endpoint, values)
            .ok_or_else(|| ServiceError::disabled(endpoint))?;
        let registry = self
            .endpoints
            .get(endpoint)
            .ok_or_else(|| ServiceError::disabled(endpoint))?;
        Ok((registry, slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> RouteValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn demo_service(uri: &str) -> OpenHeart {
        OpenHeart::builder(Lexicon::builtin())
            .database_uri(uri)
            .namespace("openheart")
            .endpoint("index", EndpointOptions::new())
            .endpoint(
                "page",
                EndpointOptions::new().slug_with(|values| {
                    let id: usize = values.get("page_id")?.parse().ok()?;
                    if id >= 3 {
                        return None;
                    }
                    Some(id.to_string())
                }),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn build_rejects_unknown_uri_prefix() {
        let result = OpenHeart::builder(Lexicon::builtin())
            .database_uri("mongodb://localhost")
            .build();
        assert!(matches!(result, Err(ConfigError::UnsupportedUri(_))));
    }

    #[test]
    fn slugs_follow_registration() {
        let dir = tempfile::tempdir().unwrap();
        let uri = format!("file:{}", dir.path().join("t.db").display());
        let service = demo_service(&uri);

        assert_eq!(
            service.slug_for("index", &RouteValues::new()),
            Some(Slug::from("index"))
        );
        assert_eq!(
            service.slug_for("page", &values(&[("page_id", "1")])),
            Some(Slug::from("page.1"))
        );
        assert_eq!(service.slug_for("page", &values(&[("page_id", "9")])), None);
        assert_eq!(service.slug_for("missing", &RouteValues::new()), None);
    }

    #[tokio::test]
    async fn disabled_parameterization_never_reaches_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let uri = format!("file:{}", dir.path().join("t.db").display());
        let service = demo_service(&uri);

        let out_of_range = values(&[("page_id", "9")]);
        assert!(!service.is_enabled_for("page", &out_of_range));
        assert!(matches!(
            service.reactions_for("page", &out_of_range).await,
            Err(ServiceError::Disabled { .. })
        ));
        assert!(matches!(
            service.react_to("❤️", "page", &out_of_range).await,
            Err(ServiceError::Disabled { .. })
        ));
    }

    #[tokio::test]
    async fn react_and_read_through_the_facade() {
        let dir = tempfile::tempdir().unwrap();
        let uri = format!("file:{}", dir.path().join("t.db").display());
        let service = demo_service(&uri);

        let page_one = values(&[("page_id", "1")]);
        let map = service.react_to("❤️", "page", &page_one).await.unwrap();
        assert_eq!(map["❤️"], 1);

        // Another page of the same endpoint has its own counters.
        let page_two = values(&[("page_id", "2")]);
        let map = service.reactions_for("page", &page_two).await.unwrap();
        assert!(map.is_empty());

        // The index endpoint groups everything under one slug.
        service.react_to("🥨", "index", &RouteValues::new()).await.unwrap();
        let map = service
            .reactions_for("index", &RouteValues::new())
            .await
            .unwrap();
        assert_eq!(map["🥨"], 1);
    }
}
