//! Password confirmation and strength rules.
//!
//! The error messages double as the custom validity messages shown next to
//! form fields, so they are written for end users.

/// Characters accepted as the "special character" of a strong password.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length in characters.
pub const MAX_PASSWORD_LENGTH: usize = 20;

/// A failed password rule.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Passwords do not match")]
    Mismatch,
    #[error("Password must be between 8 and 20 characters")]
    Length,
    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,
    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,
    #[error("Password must contain at least one number")]
    MissingDigit,
    #[error("Password must contain at least one special character")]
    MissingSpecial,
}

/// Check that a confirmation field exactly equals the password.
///
/// # Errors
///
/// Returns [`PasswordError::Mismatch`] unless the strings are identical.
pub fn passwords_match(password: &str, confirmation: &str) -> Result<(), PasswordError> {
    if password == confirmation {
        Ok(())
    } else {
        Err(PasswordError::Mismatch)
    }
}

/// Check a new password against the account password policy.
///
/// Rules are checked in order and the first failure is returned: length,
/// lowercase, uppercase, digit, special character.
///
/// # Errors
///
/// Returns the first [`PasswordError`] rule the password breaks.
pub fn check_password_strength(password: &str) -> Result<(), PasswordError> {
    let length = password.chars().count();
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
        return Err(PasswordError::Length);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PasswordError::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordError::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordError::MissingDigit);
    }
    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        return Err(PasswordError::MissingSpecial);
    }
    Ok(())
}
