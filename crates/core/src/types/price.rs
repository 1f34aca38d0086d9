//! Type-safe price representation using decimal arithmetic.
//!
//! Prices travel as plain JSON numbers (the cart cookie and the HTTP API
//! both carry `"price": 850`, with a fraction only when there is one), but
//! are held as [`Decimal`] so totals never pick up floating point drift.
//! Arithmetic saturates instead of overflowing, since prices can arrive in
//! an unsigned cookie.

use std::fmt;
use std::iter::Sum;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize, Serializer};

/// Currency symbol shown after every formatted amount (Georgian lari).
pub const CURRENCY_SYMBOL: &str = "₾";

/// A non-negative price in the storefront's single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(
    #[serde(
        serialize_with = "serialize_amount",
        deserialize_with = "rust_decimal::serde::float::deserialize"
    )]
    Decimal,
);

/// Whole amounts as JSON integers, anything else as a float.
fn serialize_amount<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    match amount.fract().is_zero().then(|| amount.to_i64()).flatten() {
        Some(whole) => serializer.serialize_i64(whole),
        None => rust_decimal::serde::float::serialize(amount, serializer),
    }
}

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// The decimal amount in currency units.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Price of `quantity` units at this unit price.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {CURRENCY_SYMBOL}", self.0.normalize())
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.fold(Decimal::ZERO, |sum, p| sum.saturating_add(p.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_serializes_as_number() {
        let json = serde_json::to_value(Price::from_units(850)).unwrap_or_default();
        assert!(json.is_number());
        assert_eq!(json.as_f64(), Some(850.0));
    }

    #[test]
    fn test_whole_price_serializes_without_fraction() {
        let whole = serde_json::to_string(&Price::from_units(850)).unwrap_or_default();
        assert_eq!(whole, "850");

        let fractional = serde_json::to_string(&Price::new(Decimal::new(1250, 2))).unwrap_or_default();
        assert_eq!(fractional, "12.5");
    }

    #[test]
    fn test_price_round_trips_through_cookie_json() {
        let price = Price::new(Decimal::new(125, 1));
        let json = serde_json::to_string(&price).unwrap_or_default();
        let back: Price = serde_json::from_str(&json).unwrap_or_default();
        assert_eq!(back, price);
    }

    #[test]
    fn test_price_deserializes_from_integer() {
        let price: Price = serde_json::from_str("1200").unwrap_or_default();
        assert_eq!(price, Price::from_units(1200));
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::from_units(850).times(2), Price::from_units(1200)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_units(2900));
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_panicking() {
        let huge = Price::new(Decimal::MAX);
        assert_eq!(huge.times(2), Price::new(Decimal::MAX));

        let total: Price = [huge, huge, Price::from_units(1)].into_iter().sum();
        assert_eq!(total, Price::new(Decimal::MAX));
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_units(950).to_string(), "950 ₾");
    }

    #[test]
    fn test_is_negative() {
        assert!(Price::new(Decimal::NEGATIVE_ONE).is_negative());
        assert!(!Price::ZERO.is_negative());
    }
}
