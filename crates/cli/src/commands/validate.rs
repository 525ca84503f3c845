//! Field rule checks.

#![allow(clippy::print_stdout)]

use shopsphere_core::{IndianMobile, PasswordError, PhoneError, check_password_strength, passwords_match};

/// Check an Indian mobile number.
///
/// # Errors
///
/// Returns error if the number is not a valid mobile number.
pub fn phone(number: &str) -> Result<(), PhoneError> {
    let number = IndianMobile::parse(number)?;
    println!("{number}: valid");
    Ok(())
}

/// Check password strength and, when given, the confirmation.
///
/// # Errors
///
/// Returns the first rule the password breaks.
pub fn password(password: &str, confirmation: Option<&str>) -> Result<(), PasswordError> {
    check_password_strength(password)?;
    if let Some(confirmation) = confirmation {
        passwords_match(password, confirmation)?;
    }
    println!("password: valid");
    Ok(())
}
