//! Backend selection and store configuration.

pub mod keyvalue;
pub mod sqlite;

use openheart_core::error::ConfigError;
use openheart_core::traits::CounterStore;

use self::keyvalue::RedisStore;
use self::sqlite::SqliteStore;

/// The closed set of supported backend kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Sqlite,
    Redis,
}

impl BackendKind {
    /// Detect the backend kind from a database URI prefix.
    pub fn from_uri(uri: &str) -> Result<Self, ConfigError> {
        if uri.starts_with("file:") || uri.starts_with("sqlite:") {
            Ok(Self::Sqlite)
        } else if uri.starts_with("redis:") || uri.starts_with("valkey:") {
            Ok(Self::Redis)
        } else {
            Err(ConfigError::UnsupportedUri(uri.to_string()))
        }
    }
}

/// Validated store configuration, resolved once at composition time.
///
/// Opening a store from a validated config cannot fail; all fallible
/// classification happens in [`StoreConfig::from_uri`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    kind: BackendKind,
    uri: String,
    namespace: String,
}

impl StoreConfig {
    /// Classify `uri` and validate `namespace`.
    ///
    /// The namespace names the SQLite table and prefixes Redis keys, so it
    /// is restricted to ASCII alphanumerics and underscores.
    pub fn from_uri(
        uri: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let uri = uri.into();
        let namespace = namespace.into();
        let kind = BackendKind::from_uri(&uri)?;
        if namespace.is_empty()
            || !namespace
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ConfigError::InvalidNamespace(namespace));
        }
        Ok(Self {
            kind,
            uri,
            namespace,
        })
    }

    /// Build a fresh, not-yet-connected store for one logical operation.
    #[must_use]
    pub fn open(&self) -> Box<dyn CounterStore> {
        match self.kind {
            BackendKind::Sqlite => Box::new(SqliteStore::new(&self.uri, &self.namespace)),
            BackendKind::Redis => Box::new(RedisStore::new(&self.uri, &self.namespace)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_prefixes_select_the_backend() {
        assert_eq!(
            BackendKind::from_uri("file:openheart.db").unwrap(),
            BackendKind::Sqlite
        );
        assert_eq!(
            BackendKind::from_uri("sqlite::memory:").unwrap(),
            BackendKind::Sqlite
        );
        assert_eq!(
            BackendKind::from_uri("redis://localhost:6379").unwrap(),
            BackendKind::Redis
        );
        assert_eq!(
            BackendKind::from_uri("valkey://localhost:6379").unwrap(),
            BackendKind::Redis
        );
    }

    #[test]
    fn unknown_prefix_fails_at_configuration_time() {
        assert!(matches!(
            BackendKind::from_uri("mongodb://localhost"),
            Err(ConfigError::UnsupportedUri(_))
        ));
        assert!(matches!(
            StoreConfig::from_uri("openheart.db", "openheart"),
            Err(ConfigError::UnsupportedUri(_))
        ));
    }

    #[test]
    fn namespace_is_validated() {
        assert!(StoreConfig::from_uri("file:test.db", "openheart").is_ok());
        assert!(StoreConfig::from_uri("file:test.db", "open_heart_2").is_ok());
        assert!(matches!(
            StoreConfig::from_uri("file:test.db", ""),
            Err(ConfigError::InvalidNamespace(_))
        ));
        assert!(matches!(
            StoreConfig::from_uri("file:test.db", "drop table;"),
            Err(ConfigError::InvalidNamespace(_))
        ));
    }
}
