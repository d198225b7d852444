//! Slug resolution.
//!
//! Turns a logical endpoint identity plus its route parameter values into
//! the durable storage key that partitions reaction counters.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use openheart_core::value_objects::Slug;

/// The variable parts of a resource's address, by parameter name.
pub type RouteValues = HashMap<String, String>;

/// A user-supplied slug function: a pure function of the route values.
///
/// Returning `None` is the "not reactable" sentinel - it disables reactions
/// for that specific parameterization even though the endpoint in general
/// supports them (used, e.g., to 404 an out-of-range identifier while
/// still letting valid ones react).
pub type SlugFn = Arc<dyn Fn(&RouteValues) -> Option<String> + Send + Sync>;

/// Registry of reaction-enabled endpoints and their slug functions.
#[derive(Clone, Default)]
pub struct SlugResolver {
    endpoints: HashMap<String, Option<SlugFn>>,
}

impl SlugResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an endpoint with the default slug mapping: all parameter
    /// combinations share one slug, grouping counters per endpoint.
    pub fn register(&mut self, endpoint: impl Into<String>) {
        self.endpoints.insert(endpoint.into(), None);
    }

    /// Register an endpoint with a custom slug function.
    pub fn register_with(&mut self, endpoint: impl Into<String>, slug_fn: SlugFn) {
        self.endpoints.insert(endpoint.into(), Some(slug_fn));
    }

    /// Compute the slug for one parameterization of an endpoint.
    ///
    /// `None` means reactions are disabled: either the endpoint was never
    /// registered, or its slug function returned the sentinel for these
    /// values. Custom slugs are composed with the endpoint identity so two
    /// endpoints can never collide in storage.
    pub fn resolve(&self, endpoint: &str, values: &RouteValues) -> Option<Slug> {
        match self.endpoints.get(endpoint)? {
            None => Some(Slug::for_endpoint(endpoint)),
            Some(slug_fn) => {
                let discriminator = slug_fn(values)?;
                Some(Slug::for_endpoint_with(endpoint, &discriminator))
            }
        }
    }

    /// Whether reactions are enabled for this endpoint and parameterization.
    pub fn is_enabled_for(&self, endpoint: &str, values: &RouteValues) -> bool {
        self.resolve(endpoint, values).is_some()
    }

    /// Names of all registered endpoints.
    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.endpoints.keys().map(String::as_str)
    }
}

impl fmt::Debug for SlugResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlugResolver")
            .field("endpoints", &self.endpoints.keys().collect::<Vec<_>>())
            .finish()
    }
}
