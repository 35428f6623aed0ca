//! Price representation using decimal arithmetic.
//!
//! The storefront trades in a single currency (USD), so a price is just a
//! decimal amount with dollar formatting.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A monetary amount in US dollars.
///
/// # Example
///
/// ```rust
/// # use gamehub_core::Money;
/// # use rust_decimal::Decimal;
/// assert_eq!(Money::new(Decimal::new(1999, 2)).to_string(), "$19.99");
/// assert_eq!(Money::new(Decimal::from(45)).to_string(), "$45.00");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wrap a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The raw amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "${cents:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(Money::ZERO.to_string(), "$0.00");
        assert_eq!(Money::new(Decimal::new(15, 0)).to_string(), "$15.00");
        assert_eq!(Money::new(Decimal::new(125, 1)).to_string(), "$12.50");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(Money::new(Decimal::new(10_005, 3)).to_string(), "$10.01");
        assert_eq!(Money::new(Decimal::new(10_004, 3)).to_string(), "$10.00");
    }
}
