//! Application state
//!
//! Holds the shared reaction service for the Axum application.

use std::sync::Arc;

use openheart_service::OpenHeart;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service: Arc<OpenHeart>,
}

impl AppState {
    pub fn new(service: OpenHeart) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Get the reaction service
    pub fn service(&self) -> &OpenHeart {
        &self.service
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service", &"OpenHeart")
            .finish()
    }
}
