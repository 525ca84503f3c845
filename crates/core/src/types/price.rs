//! Rupee price representation and `en-IN` currency formatting.
//!
//! Amounts are kept as [`Decimal`] so that formatting never goes through
//! binary floating point.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Rupee symbol used by the `en-IN` locale.
pub const RUPEE_SYMBOL: &str = "\u{20b9}";

/// A price in Indian rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of paise.
    #[must_use]
    pub fn from_paise(paise: i64) -> Self {
        Self(Decimal::new(paise, 2))
    }

    /// The amount in rupees.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_inr(self.0))
    }
}

/// Format an amount the way `Intl.NumberFormat('en-IN', {style: 'currency', currency: 'INR'})` does.
///
/// Two fraction digits (half away from zero), rupee symbol, and Indian digit
/// grouping: the last three integer digits form one group, the remaining
/// digits are grouped in pairs.
///
/// ```
/// use rust_decimal::Decimal;
/// use shopsphere_core::format_inr;
///
/// assert_eq!(format_inr(Decimal::new(1_234_567_891, 3)), "₹12,34,567.89");
/// assert_eq!(format_inr(Decimal::new(-500, 0)), "-₹500.00");
/// ```
#[must_use]
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = format!("{:.2}", rounded.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let sign = if negative { "-" } else { "" };
    format!("{sign}{RUPEE_SYMBOL}{}.{fraction}", group_indian(whole))
}

/// Insert Indian-style separators into a string of ASCII digits.
fn group_indian(whole: &str) -> String {
    if whole.len() <= 3 {
        return whole.to_owned();
    }

    let (head, last_three) = whole.split_at(whole.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = left;
    }
    groups.push(rest);
    groups.reverse();

    format!("{},{last_three}", groups.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_amounts_have_no_separator() {
        assert_eq!(format_inr(Decimal::ZERO), "₹0.00");
        assert_eq!(format_inr(Decimal::new(999, 0)), "₹999.00");
        assert_eq!(format_inr(Decimal::new(5, 1)), "₹0.50");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_inr(Decimal::new(1_000, 0)), "₹1,000.00");
        assert_eq!(format_inr(Decimal::new(12_345, 0)), "₹12,345.00");
        assert_eq!(format_inr(Decimal::new(123_456, 0)), "₹1,23,456.00");
        assert_eq!(format_inr(Decimal::new(1_234_567, 0)), "₹12,34,567.00");
        assert_eq!(format_inr(Decimal::new(123_456_789, 0)), "₹12,34,56,789.00");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(format_inr(Decimal::new(10_005, 3)), "₹10.01");
        assert_eq!(format_inr(Decimal::new(10_004, 3)), "₹10.00");
        assert_eq!(format_inr(Decimal::new(-10_005, 3)), "-₹10.01");
    }

    #[test]
    fn test_negative_zero_after_rounding_has_no_sign() {
        assert_eq!(format_inr(Decimal::new(-1, 3)), "₹0.00");
    }

    #[test]
    fn test_price_display() {
        let price = Price::from_paise(249_900);
        assert_eq!(price.to_string(), "₹2,499.00");
        assert_eq!(price.amount(), Decimal::new(2499, 0));
    }
}
