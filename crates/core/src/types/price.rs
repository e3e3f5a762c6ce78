//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product price in the shop currency.
///
/// Backed by `Decimal` so listing and admin form round-trips never lose
/// cents to floating point. The backend serializes prices as JSON numbers
/// or numeric strings; `Decimal`'s deserializer accepts either form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    /// Format for display with two decimal places, e.g. `₹12999.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimal_places() {
        let price = Price::new(Decimal::new(129_990, 1));
        assert_eq!(price.to_string(), "₹12999.00");
    }

    #[test]
    fn test_deserializes_numbers_and_numeric_strings() {
        let from_number: Price = serde_json::from_str("12999.5").expect("number form");
        let from_string: Price = serde_json::from_str("\"12999.5\"").expect("string form");
        assert_eq!(from_number, from_string);
    }
}
