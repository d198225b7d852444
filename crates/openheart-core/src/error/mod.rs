//! Domain error taxonomy.
//!
//! Four distinct failure classes with different lifecycles: `DataError` is
//! fatal at lexicon load, `InvalidReactionError` is user-recoverable and
//! never mutates storage, `ConfigError` fails fast at composition time, and
//! `StoreError` covers everything behind the counter store boundary.

use thiserror::Error;

/// Errors raised while loading the emoji lexicon.
///
/// Any of these aborts startup; a process with a partial lexicon would
/// silently reject valid reactions.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("malformed lexicon line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("lexicon line {line}: unknown status '{status}'")]
    UnknownStatus { line: usize, status: String },

    #[error("lexicon line {line}: codepoint U+{codepoint} is not a valid scalar value")]
    InvalidCodepoint { line: usize, codepoint: String },

    #[error("lexicon line {line}: codepoint sequence does not match its literal emoji")]
    CodepointMismatch { line: usize },

    #[error("duplicate lexicon entry with conflicting metadata: {emoji:?}")]
    ConflictingDuplicate { emoji: String },
}

/// User input failed sanitization or a policy check.
///
/// The message is user-facing and reported verbatim by the HTTP layer.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct InvalidReactionError(pub String);

impl InvalidReactionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Composition-time configuration failures. These are raised once, when a
/// store or registry is built, never during request handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unrecognized database URI prefix: '{0}'")]
    UnsupportedUri(String),

    #[error("invalid namespace '{0}': only ASCII alphanumerics and '_' are allowed")]
    InvalidNamespace(String),
}

/// Errors from a counter store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A data operation was invoked outside the connect/disconnect scope.
    /// This is a programming error, not a recoverable data condition.
    #[error("counter store used before connect")]
    NotConnected,

    /// Any I/O, protocol, or driver fault, wrapped at the store boundary so
    /// no transport vocabulary leaks past the `CounterStore` trait.
    #[error("{message}")]
    Backend {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl StoreError {
    /// Wrap a driver error with a human-readable, slug-aware message.
    pub fn backend(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Backend {
            message: message.into(),
            source: source.into(),
        }
    }
}

/// Result type for counter store operations.
pub type StoreResult<T> = Result<T, StoreError>;
