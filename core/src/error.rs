//! Error types for the checkout API boundary.

use thiserror::Error;

/// Errors returned by [`CheckoutApi`](crate::environment::CheckoutApi) operations.
///
/// The reducer stores the `Display` rendering of these in the per-field
/// `errors` slice; variants keep their messages short and user-presentable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network or transport failure (connection refused, timeout, ...)
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("request failed with status {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The response body could not be decoded into a cart snapshot
    #[error("failed to decode response: {0}")]
    Decode(String),
}
