//! Demo server entry point
//!
//! A small multi-page app showing slug control: all pages share one `page`
//! endpoint, with a slug function keeping each page's reactions distinct
//! and disabling reactions for out-of-range ids.
//!
//! Run with:
//! ```bash
//! cargo run -p openheart-api
//! ```
//!
//! Configuration is loaded from `OPENHEART_*` environment variables.

use std::net::SocketAddr;

use axum::{extract::Path, http::StatusCode, response::Html, routing::get, Router};
use tracing::{error, info};

use openheart_api::config::ServerConfig;
use openheart_api::routes::ReactionRoute;
use openheart_api::server::{create_app, run_server};
use openheart_api::state::AppState;
use openheart_api::telemetry::try_init_tracing;
use openheart_core::policy::Policy;
use openheart_lexicon::Lexicon;
use openheart_service::{EndpointOptions, OpenHeart};

const PAGES: &[&str] = &["My First Page", "Just some thoughts", "I have a lot to say"];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();
    info!(
        database_uri = %config.database_uri,
        port = config.port,
        "Configuration loaded"
    );

    let service = OpenHeart::builder(Lexicon::builtin())
        .database_uri(config.database_uri.clone())
        .namespace(config.namespace.clone())
        .endpoint("index", EndpointOptions::new())
        .endpoint(
            "page",
            EndpointOptions::new()
                .policy(Policy::new().default_counts([("❤️", 0)]))
                .slug_with(|values| {
                    let id: usize = values.get("page_id")?.parse().ok()?;
                    if id >= PAGES.len() {
                        return None;
                    }
                    Some(id.to_string())
                }),
        )
        .build()?;

    let bindings = [
        ReactionRoute::new("index", "/"),
        ReactionRoute::new("page", "/page/:page_id"),
    ];

    let state = AppState::new(service);
    let app = create_app(state, &config, &bindings).merge(page_routes());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    run_server(app, addr).await
}

/// The demo pages themselves, alongside the reaction API.
fn page_routes() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/page/:page_id", get(page))
}

async fn index() -> Html<String> {
    let items: String = PAGES
        .iter()
        .enumerate()
        .map(|(id, title)| format!("<li><a href=\"/page/{id}\">{title}</a></li>\n"))
        .collect();
    Html(format!("<h1>Pages</h1>\n<ul>\n{items}</ul>\n"))
}

async fn page(Path(page_id): Path<usize>) -> Result<Html<String>, StatusCode> {
    let title = PAGES.get(page_id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Html(format!("<h1>{title}</h1>\n")))
}
