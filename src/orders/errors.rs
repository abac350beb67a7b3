//! Order service errors.

use thiserror::Error;

/// Errors returned by an [`OrderService`](super::OrderService).
#[derive(Debug, Error)]
pub enum OrderServiceError {
    /// The order is unknown to the service.
    #[error("order not found")]
    NotFound,

    /// An order with the same id was already accepted.
    #[error("order already exists")]
    AlreadyExists,

    /// The kitchen refused the order.
    #[error("order rejected: {0}")]
    Rejected(String),

    /// The order service could not be reached.
    #[error("order service unavailable")]
    Unavailable,
}
