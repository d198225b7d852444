//! # openheart-core
//!
//! Domain layer for the OpenHeart reaction service: error taxonomy, the
//! `CounterStore` trait, the `Slug` value object, and the per-endpoint
//! `Policy`. This crate has zero dependencies on infrastructure (database,
//! web framework, etc.).

pub mod error;
pub mod policy;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use error::{ConfigError, DataError, InvalidReactionError, StoreError, StoreResult};
pub use policy::Policy;
pub use traits::CounterStore;
pub use value_objects::{ReactionMap, Slug};
