//! Per-endpoint reaction policy.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::InvalidReactionError;
use crate::value_objects::ReactionMap;

/// Allow-list, block-list, and baseline defaults shaping the visible
/// reaction map for one endpoint.
///
/// Evaluation order: `allowed` filters first (when set), then `blocked`
/// removes from what `allowed` admitted, so block wins on overlap. Defaults
/// are merged in after filtering and are never themselves filtered; they
/// always appear in the visible result, added on top of any stored count.
#[derive(Debug, Clone, Default)]
pub struct Policy {
    allowed: Option<BTreeSet<String>>,
    blocked: Option<BTreeSet<String>>,
    defaults: BTreeMap<String, i64>,
}

impl Policy {
    /// A policy with no filtering and no defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict visible and writable reactions to this set.
    #[must_use]
    pub fn allow<I, S>(mut self, reactions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(reactions.into_iter().map(Into::into).collect());
        self
    }

    /// Hide and reject these reactions, even when allowed admits them.
    #[must_use]
    pub fn block<I, S>(mut self, reactions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocked = Some(reactions.into_iter().map(Into::into).collect());
        self
    }

    /// Baseline counts added to the visible map regardless of filtering.
    /// Defaults are additive-only and never stored.
    #[must_use]
    pub fn default_counts<I, S>(mut self, defaults: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        self.defaults = defaults.into_iter().map(|(r, c)| (r.into(), c)).collect();
        self
    }

    /// Whether a sanitized reaction may be written under this policy.
    ///
    /// A caller must not be able to write a counter that `apply` would
    /// immediately hide; the defaults path is additive-only and exempt.
    pub fn admit(&self, reaction: &str) -> Result<(), InvalidReactionError> {
        if let Some(allowed) = &self.allowed {
            if !allowed.contains(reaction) {
                return Err(InvalidReactionError::new(format!(
                    "the reaction '{reaction}' is not accepted here"
                )));
            }
        }
        if let Some(blocked) = &self.blocked {
            if blocked.contains(reaction) {
                return Err(InvalidReactionError::new(format!(
                    "the reaction '{reaction}' is not accepted here"
                )));
            }
        }
        Ok(())
    }

    /// Shape raw store output into the canonical user-visible map.
    #[must_use]
    pub fn apply(&self, stored: Vec<(String, i64)>) -> ReactionMap {
        let mut map = ReactionMap::new();
        for (reaction, count) in stored {
            if let Some(allowed) = &self.allowed {
                if !allowed.contains(&reaction) {
                    continue;
                }
            }
            if let Some(blocked) = &self.blocked {
                if blocked.contains(&reaction) {
                    continue;
                }
            }
            map.insert(reaction, count);
        }
        for (reaction, baseline) in &self.defaults {
            *map.entry(reaction.clone()).or_insert(0) += baseline;
        }
        map
    }
}
