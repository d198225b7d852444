//! Server configuration
//!
//! Loads configuration from `OPENHEART_*` environment variables, with
//! working defaults for every knob.

use std::env;

use tracing::warn;

use openheart_service::{DEFAULT_DATABASE_URI, DEFAULT_NAMESPACE};

/// Default mount prefix for the reaction endpoints.
pub const DEFAULT_URL_PREFIX: &str = "/openheart";

const DEFAULT_PORT: u16 = 8080;

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Counter store URI (`file:`/`sqlite:` or `redis:`/`valkey:`).
    pub database_uri: String,
    /// Namespace isolating this application's counters.
    pub namespace: String,
    /// Prefix under which GET reaction routes are mounted.
    pub url_prefix: String,
    /// Prefix for POST reaction routes. Defaults to `url_prefix`.
    pub post_url_prefix: String,
    /// TCP port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_uri: DEFAULT_DATABASE_URI.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            url_prefix: DEFAULT_URL_PREFIX.to_string(),
            post_url_prefix: DEFAULT_URL_PREFIX.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `OPENHEART_DATABASE_URI`, `OPENHEART_NAMESPACE`,
    /// `OPENHEART_URL_PREFIX`, `OPENHEART_POST_URL_PREFIX`, `OPENHEART_PORT`.
    /// An unset `OPENHEART_POST_URL_PREFIX` falls back to the read prefix.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let url_prefix =
            env::var("OPENHEART_URL_PREFIX").unwrap_or(defaults.url_prefix);
        let post_url_prefix =
            env::var("OPENHEART_POST_URL_PREFIX").unwrap_or_else(|_| url_prefix.clone());
        let port = match env::var("OPENHEART_PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = %raw, "OPENHEART_PORT is not a valid port, using default");
                defaults.port
            }),
            Err(_) => defaults.port,
        };

        Self {
            database_uri: env::var("OPENHEART_DATABASE_URI").unwrap_or(defaults.database_uri),
            namespace: env::var("OPENHEART_NAMESPACE").unwrap_or(defaults.namespace),
            url_prefix,
            post_url_prefix,
            port,
        }
    }
}
