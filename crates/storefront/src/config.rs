//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPSPHERE_BASE_URL` - Base URL of the storefront backend (e.g. `https://shop.example.in`)
//!
//! ## Optional
//! - `SHOPSPHERE_SEARCH_DEBOUNCE_MS` - Idle time before a search fires (default: 300)
//! - `SHOPSPHERE_SEARCH_MIN_CHARS` - Shortest query that is searched (default: 2)
//! - `SHOPSPHERE_NOTIFICATION_TIMEOUT_MS` - Toast auto-dismiss delay (default: 5000)
//! - `SHOPSPHERE_HTTP_TIMEOUT_SECS` - Request timeout (default: none)
//! - `SHOPSPHERE_STORAGE_PATH` - JSON file backing local storage (default: in-memory)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
const DEFAULT_SEARCH_MIN_CHARS: usize = 2;
const DEFAULT_NOTIFICATION_TIMEOUT_MS: u64 = 5000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront presentation layer configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL that backend paths (`/add_to_cart`, ...) are resolved against
    pub base_url: Url,
    /// Search box behaviour
    pub search: SearchConfig,
    /// How long a toast stays on screen before it is dismissed automatically
    pub notification_timeout: Duration,
    /// Optional request timeout; `None` leaves the client default in place
    pub http_timeout: Option<Duration>,
    /// File backing local storage; `None` keeps entries in memory
    pub storage_path: Option<PathBuf>,
    /// Error tracking configuration
    pub sentry: SentryConfig,
}

/// Search box configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Idle window after the last keystroke before a search fires
    pub debounce: Duration,
    /// Queries shorter than this (in characters) are not searched
    pub min_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            min_chars: DEFAULT_SEARCH_MIN_CHARS,
        }
    }
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone, Default)]
pub struct SentryConfig {
    /// Sentry DSN; tracking is disabled when absent
    pub dsn: Option<String>,
    /// Environment tag attached to events
    pub environment: Option<String>,
}

impl SentryConfig {
    /// Load only the Sentry settings, for hosts that start tracking before
    /// the rest of the configuration is needed.
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::read(&Lookup(|key: &str| std::env::var(key).ok()))
    }

    fn read<F>(env: &Lookup<F>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            dsn: env.optional("SENTRY_DSN"),
            environment: env.optional("SENTRY_ENVIRONMENT"),
        }
    }
}

impl StorefrontConfig {
    /// Build a configuration with default settings for the given backend URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            search: SearchConfig::default(),
            notification_timeout: Duration::from_millis(DEFAULT_NOTIFICATION_TIMEOUT_MS),
            http_timeout: None,
            storage_path: None,
            sentry: SentryConfig::default(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Lookup(lookup);

        let base_url = env.required("SHOPSPHERE_BASE_URL")?;
        let base_url = Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPSPHERE_BASE_URL".to_string(), e.to_string())
        })?;

        let search = SearchConfig {
            debounce: Duration::from_millis(
                env.parsed_or("SHOPSPHERE_SEARCH_DEBOUNCE_MS", DEFAULT_SEARCH_DEBOUNCE_MS)?,
            ),
            min_chars: env.parsed_or("SHOPSPHERE_SEARCH_MIN_CHARS", DEFAULT_SEARCH_MIN_CHARS)?,
        };
        let notification_timeout = Duration::from_millis(env.parsed_or(
            "SHOPSPHERE_NOTIFICATION_TIMEOUT_MS",
            DEFAULT_NOTIFICATION_TIMEOUT_MS,
        )?);
        let http_timeout = env
            .parsed::<u64>("SHOPSPHERE_HTTP_TIMEOUT_SECS")?
            .map(Duration::from_secs);
        let storage_path = env.optional("SHOPSPHERE_STORAGE_PATH").map(PathBuf::from);
        let sentry = SentryConfig::read(&env);

        Ok(Self {
            base_url,
            search,
            notification_timeout,
            http_timeout,
            storage_path,
            sentry,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Typed accessors over a variable lookup function.
struct Lookup<F>(F);

impl<F> Lookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable, treating empty values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Parse an optional variable.
    fn parsed<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key)
            .map(|value| {
                value
                    .trim()
                    .parse::<T>()
                    .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
            })
            .transpose()
    }

    /// Parse a variable, falling back to a default when unset.
    fn parsed_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        Ok(self.parsed(key)?.unwrap_or(default))
    }
}
