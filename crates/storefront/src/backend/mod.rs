//! Storefront backend HTTP client.
//!
//! # Architecture
//!
//! - One `reqwest::Client` per storefront, built from [`StorefrontConfig`](crate::config::StorefrontConfig)
//! - Redirects are never followed: a `3xx` with a `Location` header comes back
//!   as [`ActionOutcome::Redirect`] so the UI can decide to navigate
//! - Non-success statuses are errors; there are no retries
//!
//! # Endpoints
//!
//! - `GET /add_to_wishlist/{product_id}`
//! - `POST /add_to_cart` (multipart: `product_id`, `size`, `quantity`)
//! - `POST /update_cart` (urlencoded: `quantity_{item_id}`)
//! - `GET /like_product/{product_id}` (JSON: `liked`, `likes_count`)

mod client;
pub mod types;

pub use client::StorefrontApi;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the storefront backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection refused, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Unexpected status {status}: {message}")]
    Status { status: u16, message: String },

    /// A redirect without a usable `Location` header.
    #[error("Invalid redirect: {0}")]
    InvalidRedirect(String),

    /// An endpoint path could not be joined onto the base URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_display() {
        let err = ClientError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Unexpected status 500: boom");

        let err = ClientError::InvalidRedirect("missing Location header".to_string());
        assert_eq!(err.to_string(), "Invalid redirect: missing Location header");
    }
}
