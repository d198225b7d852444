//! Route definitions
//!
//! Mounts a GET/POST pair per reaction-enabled endpoint under the
//! configured prefixes.

use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::config::ServerConfig;
use crate::handlers::{self, EndpointName};
use crate::state::AppState;

/// One endpoint-to-rule binding: the registered endpoint name and the
/// axum route rule its resources live under (e.g. `/page/:page_id`).
#[derive(Debug, Clone)]
pub struct ReactionRoute {
    pub endpoint: String,
    pub rule: String,
}

impl ReactionRoute {
    pub fn new(endpoint: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            rule: rule.into(),
        }
    }
}

/// Create the reaction router: `GET {url_prefix}{rule}` and
/// `POST {post_url_prefix}{rule}` for each binding.
///
/// The read and write prefixes may differ (e.g. to put writes behind a
/// separate proxy rule); by default they are the same and both methods
/// land on one path.
pub fn reaction_routes(config: &ServerConfig, bindings: &[ReactionRoute]) -> Router<AppState> {
    let mut router = Router::new();
    for binding in bindings {
        let name = Extension(EndpointName(binding.endpoint.clone()));
        router = router.route(
            &format!("{}{}", config.url_prefix, binding.rule),
            get(handlers::reactions).layer(name.clone()),
        );
        router = router.route(
            &format!("{}{}", config.post_url_prefix, binding.rule),
            post(handlers::react).layer(name),
        );
    }
    router
}
