//! Notification severity levels.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity of a user-facing notification.
///
/// Each level maps onto an `alert-{level}` style class on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    #[default]
    Info,
    Warning,
    Danger,
}

impl Severity {
    /// The lowercase name used in style classes.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    /// The alert class for this severity (e.g. `alert-danger`).
    #[must_use]
    pub fn alert_class(&self) -> String {
        format!("alert-{}", self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown severity name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown severity: {0}")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            // "error" is accepted for callers used to log-level naming
            "danger" | "error" => Ok(Self::Danger),
            _ => Err(UnknownSeverity(s.to_owned())),
        }
    }
}
