//! Type-safe price representation using decimal arithmetic.
//!
//! Shopify returns money as a decimal string plus an ISO 4217 code. Parsing
//! into [`Price`] keeps the amount exact so sale detection and formatting
//! never go through floating point.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when parsing a price.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., euros, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Parse a price from Shopify's string representation.
    ///
    /// # Errors
    ///
    /// Returns `PriceError` if the amount is not a decimal number or the
    /// currency is not supported.
    pub fn parse(amount: &str, currency_code: &str) -> Result<Self, PriceError> {
        let amount = Decimal::from_str(amount.trim())
            .map_err(|_| PriceError::InvalidAmount(amount.to_string()))?;
        let currency_code = currency_code.parse()?;
        Ok(Self::new(amount, currency_code))
    }

    /// Format for display (e.g., "€24.90").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.amount.round_dp(2))
    }

    /// Multiply by a quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// Whether `self` is a compare-at price above `current` in the same currency.
    #[must_use]
    pub fn is_markdown_of(&self, current: &Self) -> bool {
        self.currency_code == current.currency_code && self.amount > current.amount
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    EUR,
    USD,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Currency symbol used when formatting prices.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::EUR => "€",
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::GBP => "£",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EUR => "EUR",
            Self::USD => "USD",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EUR" => Ok(Self::EUR),
            "USD" => Ok(Self::USD),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(PriceError::UnsupportedCurrency(s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let price = Price::parse("24.9", "EUR").unwrap();
        assert_eq!(price.display(), "€24.90");

        let price = Price::parse("19.99", "usd").unwrap();
        assert_eq!(price.to_string(), "$19.99");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Price::parse("abc", "EUR"),
            Err(PriceError::InvalidAmount(_))
        ));
        assert!(matches!(
            Price::parse("1.00", "XYZ"),
            Err(PriceError::UnsupportedCurrency(_))
        ));
    }

    #[test]
    fn test_times() {
        let price = Price::parse("12.50", "EUR").unwrap();
        assert_eq!(price.times(3).display(), "€37.50");
    }

    #[test]
    fn test_is_markdown_of() {
        let compare_at = Price::parse("30.00", "EUR").unwrap();
        let current = Price::parse("24.00", "EUR").unwrap();
        assert!(compare_at.is_markdown_of(&current));
        assert!(!current.is_markdown_of(&compare_at));

        let other_currency = Price::parse("30.00", "USD").unwrap();
        assert!(!other_currency.is_markdown_of(&current));
    }
}
