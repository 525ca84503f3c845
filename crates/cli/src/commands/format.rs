//! Formatting helpers.

#![allow(clippy::print_stdout)]

use std::str::FromStr;

use rust_decimal::Decimal;
use shopsphere_core::DateFormatError;
use shopsphere_storefront::Storefront;
use thiserror::Error;

/// Errors that can occur while formatting.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The amount is not a decimal number.
    #[error("Invalid amount {0:?}: {1}")]
    InvalidAmount(String, rust_decimal::Error),

    /// The date is not in a recognised format.
    #[error(transparent)]
    InvalidDate(#[from] DateFormatError),
}

/// Parse an amount, accepting plain and scientific notation.
fn parse_amount(amount: &str) -> Result<Decimal, FormatError> {
    let trimmed = amount.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| FormatError::InvalidAmount(amount.to_string(), e))
}

/// Print an amount formatted as Indian rupees.
///
/// # Errors
///
/// Returns error if the amount does not parse.
pub fn currency(amount: &str) -> Result<(), FormatError> {
    println!("{}", Storefront::format_currency(parse_amount(amount)?));
    Ok(())
}

/// Print a date in the `en-IN` short form.
///
/// # Errors
///
/// Returns error if the date does not parse.
pub fn date(date: &str) -> Result<(), FormatError> {
    println!("{}", Storefront::format_date_str(date)?);
    Ok(())
}
