//! # openheart-store
//!
//! Counter store backends implementing the `CounterStore` trait from
//! `openheart-core`:
//!
//! - **SQLite** (`file:` / `sqlite:` URIs) - an embedded single-file
//!   relational table with atomic upsert increments.
//! - **Redis/Valkey** (`redis:` / `valkey:` URIs) - a remote key-value
//!   service using native `INCR` and prefix scans.
//!
//! The backend kind is resolved once at configuration time from the URI
//! prefix via [`StoreConfig::from_uri`]; unknown prefixes fail fast with a
//! configuration error rather than a late runtime error.

pub mod backend;

pub use backend::{BackendKind, StoreConfig};
pub use backend::keyvalue::RedisStore;
pub use backend::sqlite::SqliteStore;
