//! Unified error handling with Sentry integration.
//!
//! No error is fatal at the UI layer: failed actions are logged, reported to
//! Sentry when they are server-class, and surfaced to the user as a danger
//! toast by the caller.

use thiserror::Error;

use crate::backend::ClientError;
use crate::config::ConfigError;
use crate::services::storage::StorageError;

/// Storefront-level error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend request failed.
    #[error("Backend error: {0}")]
    Client(#[from] ClientError),

    /// Local storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Whether a backend failure points at the server or the network rather
/// than at the request (4xx statuses are expected, e.g. out of stock).
#[must_use]
pub const fn is_server_class(err: &ClientError) -> bool {
    match err {
        ClientError::Status { status, .. } => *status >= 500,
        ClientError::Http(_)
        | ClientError::InvalidRedirect(_)
        | ClientError::Url(_)
        | ClientError::Parse(_) => true,
    }
}

/// Log a failed backend action, capturing server-class failures to Sentry.
pub fn report(action: &str, err: &ClientError) {
    if is_server_class(err) {
        let event_id = sentry::capture_error(err);
        tracing::error!(
            action,
            error = %err,
            sentry_event_id = %event_id,
            "Backend action failed"
        );
    } else {
        tracing::error!(action, error = %err, "Backend action failed");
    }
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// let data = serde_json::json!({"product_id": 123});
/// add_breadcrumb("cart", "Quick add to cart", data.as_object());
/// ```
pub fn add_breadcrumb(
    category: &str,
    message: &str,
    data: Option<&serde_json::Map<String, serde_json::Value>>,
) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(fields) = data {
        for (key, value) in fields {
            breadcrumb.data.insert(key.clone(), value.clone());
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16) -> ClientError {
        ClientError::Status {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn test_error_display() {
        let err = Error::from(ConfigError::MissingEnvVar("SHOPSPHERE_BASE_URL".to_string()));
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing environment variable: SHOPSPHERE_BASE_URL"
        );

        let err = Error::from(status(502));
        assert_eq!(err.to_string(), "Backend error: Unexpected status 502: ");
    }

    #[test]
    fn test_server_class() {
        assert!(is_server_class(&status(500)));
        assert!(is_server_class(&ClientError::Parse("eof".to_string())));
        assert!(!is_server_class(&status(400)));
        assert!(!is_server_class(&status(404)));
    }

    #[test]
    fn test_report_captures_only_server_class() {
        let events = sentry::test::with_captured_events(|| {
            report("add_to_cart", &status(503));
            report("add_to_cart", &status(422));
        });
        assert_eq!(events.len(), 1);
    }
}
