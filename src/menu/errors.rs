//! Menu service errors.

use thiserror::Error;

/// Errors returned by a [`MenuService`](super::MenuService).
#[derive(Debug, Error)]
pub enum MenuServiceError {
    /// The menu could not be reached.
    #[error("menu service unavailable")]
    Unavailable,

    /// Any other failure reported by the service.
    #[error("menu service error: {0}")]
    Other(String),
}
