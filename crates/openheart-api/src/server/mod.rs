//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::routes::{reaction_routes, ReactionRoute};
use crate::state::AppState;

/// Build the complete Axum application for the given endpoint bindings.
pub fn create_app(state: AppState, config: &ServerConfig, bindings: &[ReactionRoute]) -> Router {
    reaction_routes(config, bindings)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!("Server listening on http://{addr}");

    axum::serve(listener, app)
        .await
        .context("server error")?;

    Ok(())
}
