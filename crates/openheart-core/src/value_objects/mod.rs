//! Value objects shared across layers.

mod slug;

use std::collections::BTreeMap;

pub use slug::Slug;

/// The canonical, user-visible reaction map: emoji -> count.
///
/// A `BTreeMap` keeps serialization order deterministic.
pub type ReactionMap = BTreeMap<String, i64>;
