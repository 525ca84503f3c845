//! Indian mobile number type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ASCII classes only: `\d` would also match non-ASCII digits.
static MOBILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[6-9][0-9]{9}$").expect("mobile number pattern is valid")
});

/// Errors that can occur when parsing an [`IndianMobile`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input does not match the ten digit mobile numbering plan.
    #[error("Please enter a valid 10-digit Indian phone number")]
    Invalid,
}

/// A ten digit Indian mobile number.
///
/// ## Constraints
///
/// - Exactly 10 ASCII digits
/// - The first digit is 6, 7, 8 or 9
/// - No spaces, country code or separators
///
/// ## Examples
///
/// ```
/// use shopsphere_core::IndianMobile;
///
/// assert!(IndianMobile::parse("9876543210").is_ok());
/// assert!(IndianMobile::parse("5876543210").is_err()); // bad leading digit
/// assert!(IndianMobile::parse("+919876543210").is_err()); // country code
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct IndianMobile(String);

impl IndianMobile {
    /// Parse an `IndianMobile` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::Invalid`] if the input is not exactly ten
    /// digits starting with 6-9.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if Self::is_valid(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(PhoneError::Invalid)
        }
    }

    /// Check whether a string is a valid mobile number without allocating.
    #[must_use]
    pub fn is_valid(s: &str) -> bool {
        MOBILE_PATTERN.is_match(s)
    }

    /// Returns the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IndianMobile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for IndianMobile {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
