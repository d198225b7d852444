//! Counter store trait (port) - the interface every backend implements.
//!
//! The domain layer defines what it needs from persistence; the storage
//! layer provides the implementations.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::value_objects::Slug;

/// Durable mapping from (slug, reaction) to a non-negative count.
///
/// A store is a scoped resource: `connect` acquires it, `disconnect`
/// releases it, and callers are expected to release on every exit path.
/// Data operations invoked outside that scope fail with
/// [`StoreError::NotConnected`](crate::error::StoreError::NotConnected).
///
/// Increments must be atomic at the backend (upsert or native numeric
/// increment, never read-modify-write in application code), so two
/// concurrent increments to the same counter are both durably applied.
/// `enumerate` is not required to observe a single consistent snapshot
/// while increments are in flight.
#[async_trait]
pub trait CounterStore: Send {
    /// Acquire the underlying connection. Reconnects if already connected.
    async fn connect(&mut self) -> StoreResult<()>;

    /// Release the underlying connection. A no-op when not connected.
    async fn disconnect(&mut self) -> StoreResult<()>;

    /// Atomically add one to the counter for `(slug, reaction)`, creating
    /// it at 1 if absent. `reaction` must already be lexicon-valid; raw
    /// user input never reaches the store.
    async fn increment(&mut self, slug: &Slug, reaction: &str) -> StoreResult<()>;

    /// All `(reaction, count)` pairs recorded for `slug`. A slug with no
    /// recorded reactions yields an empty vec and must not create any
    /// backing storage as a side effect.
    async fn enumerate(&mut self, slug: &Slug) -> StoreResult<Vec<(String, i64)>>;
}
