//! Service layer error type.

use thiserror::Error;

use openheart_core::error::{InvalidReactionError, StoreError};

/// Unified error for registry and facade operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The resource resolved to no slug; reactions are disabled for it.
    /// The routing layer answers this before the registry ever runs.
    #[error("reactions are not enabled for '{endpoint}'")]
    Disabled { endpoint: String },

    /// Sanitizer or policy rejection. Recoverable; the message is shown to
    /// the user and nothing was written.
    #[error(transparent)]
    Invalid(#[from] InvalidReactionError),

    /// A counter store fault, already wrapped at the store boundary.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn disabled(endpoint: impl Into<String>) -> Self {
        Self::Disabled {
            endpoint: endpoint.into(),
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
