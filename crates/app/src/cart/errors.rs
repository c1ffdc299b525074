//! Cart service errors.

use thiserror::Error;

/// Cart service error variants.
#[derive(Debug, Error)]
pub enum CartServiceError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The cart service returned a non-2xx response.
    #[error("unexpected response from cart service: {0}")]
    UnexpectedResponse(String),

    /// The cart service refused the change.
    #[error("cart service rejected the request: {0}")]
    Rejected(String),
}
