//! Slug value object.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A durable string key partitioning reaction counters per logical resource.
///
/// Two requests for the "same" resource must always resolve to the same
/// slug. Absence of a slug (the resolver returning `None`) means reactions
/// are disabled for that resource; a `Slug` value is therefore always valid
/// to store under.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The default per-endpoint slug: the endpoint identity itself, so all
    /// parameterizations of the endpoint share one counter group.
    pub fn for_endpoint(endpoint: &str) -> Self {
        Self(endpoint.to_string())
    }

    /// A slug scoped to one parameterization of an endpoint, composed as
    /// `{endpoint}.{discriminator}`.
    pub fn for_endpoint_with(endpoint: &str, discriminator: &str) -> Self {
        Self(format!("{endpoint}.{discriminator}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Slug {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Slug {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_slug_is_the_endpoint_name() {
        assert_eq!(Slug::for_endpoint("page").as_str(), "page");
    }

    #[test]
    fn parameterized_slug_composes_endpoint_and_discriminator() {
        let slug = Slug::for_endpoint_with("page", "42");
        assert_eq!(slug.as_str(), "page.42");
        assert_eq!(slug.to_string(), "page.42");
    }
}
