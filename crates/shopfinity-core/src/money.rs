//! # Money Module
//!
//! Provides the `Money` type for handling prices and order totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Catalog prices arrive as JSON numbers:                                │
//! │    22.3 * 3 = 66.89999999999999  ❌ WRONG!                              │
//! │                                                                         │
//! │  Shipping is decided by "subtotal > 100", so a sum that lands on       │
//! │  100.00000000000001 would wrongly make shipping free.                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Convert once at the boundary (22.3 → 2230 cents)                    │
//! │    All cart and order math happens on i64                              │
//! │    Convert back to a decimal only when writing records                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfinity_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let line_total = price * 2;          // $21.98
//! assert_eq!(line_total.cents(), 2198);
//!
//! // Boundary conversion from a catalog JSON number
//! let price = Money::from_decimal(109.95);
//! assert_eq!(price.cents(), 10995);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  ProductRecord.price ──► CartLine.price ──► line total                 │
/// │                                                                         │
/// │  Cart subtotal ──► ShippingPolicy ──► shipping fee ──► Order.total     │
/// │                                                                         │
/// │  OrderHistory ──► lifetime spend (profile statistics)                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use shopfinity_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount (as found in catalog JSON) to cents.
    ///
    /// Rounds half away from zero to the nearest cent. This is the only
    /// place a float enters the money path.
    ///
    /// ## Example
    /// ```rust
    /// use shopfinity_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(22.3).cents(), 2230);
    /// assert_eq!(Money::from_decimal(0.005).cents(), 1);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    /// Like [`Money::from_decimal`], but `None` when the amount is not finite
    /// or does not fit in i64 cents instead of clamping.
    ///
    /// ## Example
    /// ```rust
    /// use shopfinity_core::money::Money;
    ///
    /// assert_eq!(Money::try_from_decimal(15.99).map(|m| m.cents()), Some(1599));
    /// assert!(Money::try_from_decimal(1e18).is_none());
    /// assert!(Money::try_from_decimal(f64::NAN).is_none());
    /// ```
    pub fn try_from_decimal(amount: f64) -> Option<Self> {
        let cents = (amount * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, hence the strict bound.
        if !cents.is_finite() || cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Returns the value as a decimal number (for record serialization only).
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parses a decimal string such as `"100"`, `"9.5"` or `"10.00"`.
    ///
    /// ## Rules
    /// - Digits with an optional `.` and at most two fractional digits
    /// - No sign, no thousands separators
    ///
    /// ## Example
    /// ```rust
    /// use shopfinity_core::money::Money;
    ///
    /// assert_eq!(Money::parse("100.00").unwrap().cents(), 10000);
    /// assert_eq!(Money::parse("9.5").unwrap().cents(), 950);
    /// assert!(Money::parse("-1").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        let invalid = |reason: &str| ValidationError::invalid_format("amount", reason);

        if input.is_empty() {
            return Err(ValidationError::required("amount"));
        }

        let (major, minor) = match input.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (input, ""),
        };

        if major.is_empty() || !major.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected digits before the decimal point"));
        }
        if minor.len() > 2 || !minor.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected at most two decimal digits"));
        }

        let major: i64 = major
            .parse()
            .map_err(|_| invalid("amount is too large"))?;
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().map_err(|_| invalid("bad cents"))? * 10,
            _ => minor.parse().map_err(|_| invalid("bad cents"))?,
        };

        major
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(minor))
            .map(Money)
            .ok_or_else(|| invalid("amount is too large"))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use shopfinity_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).dollars(), 10);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies money by a quantity, saturating at the i64 bounds.
    ///
    /// Cart code checks its ceiling with [`Money::checked_multiply_quantity`]
    /// first, so saturation only shows up on records edited by hand.
    ///
    /// ## Example
    /// ```rust
    /// use shopfinity_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(6000);
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 12000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Price × quantity, or `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: u32) -> Option<Self> {
        match self.0.checked_mul(qty as i64) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Sum of two amounts, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Formats the amount with the given currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use shopfinity_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-550).format_with("€"), "-€5.50");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly display in dollars. UI code formats with its own symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Decimal Serde Helpers
// =============================================================================

/// Serializes `Money` as a JSON decimal number (`109.95`).
///
/// Persisted cart and order records use this representation so the stored
/// layout matches what the catalog API hands out. Use with
/// `#[serde(with = "crate::money::decimal")]`.
///
/// Prices and totals are never negative, so deserializing rejects negative
/// amounts along with non-finite and out-of-range ones.
pub mod decimal {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Money;

    pub fn serialize<S>(value: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(value.to_decimal())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() {
            return Err(serde::de::Error::custom("amount must be a finite number"));
        }
        if amount < 0.0 {
            return Err(serde::de::Error::custom("amount must not be negative"));
        }
        Money::try_from_decimal(amount)
            .ok_or_else(|| serde::de::Error::custom("amount is too large"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_decimal_rounds_to_cents() {
        assert_eq!(Money::from_decimal(109.95).cents(), 10995);
        assert_eq!(Money::from_decimal(22.3).cents(), 2230);
        assert_eq!(Money::from_decimal(7.95).cents(), 795);
        assert_eq!(Money::from_decimal(0.0).cents(), 0);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("100").unwrap().cents(), 10000);
        assert_eq!(Money::parse("100.00").unwrap().cents(), 10000);
        assert_eq!(Money::parse("9.5").unwrap().cents(), 950);
        assert_eq!(Money::parse(" 0.01 ").unwrap().cents(), 1);

        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.234").is_err());
        assert!(Money::parse("-5").is_err());
        assert!(Money::parse(".50").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3u32).cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        let price = Money::from_cents(5_000_000_000);
        assert_eq!(price.checked_multiply_quantity(3).map(|m| m.cents()), Some(15_000_000_000));
        assert!(price.checked_multiply_quantity(4_000_000_000).is_none());

        let big = Money::from_cents(i64::MAX - 1);
        assert!(big.checked_add(Money::from_cents(2)).is_none());
        assert_eq!(big.checked_add(Money::from_cents(1)).map(|m| m.cents()), Some(i64::MAX));
    }

    #[test]
    fn test_operators_saturate_instead_of_panicking() {
        let price = Money::from_cents(5_000_000_000);
        assert_eq!((price * 4_000_000_000u32).cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MAX) + Money::from_cents(1)).cents(), i64::MAX);

        let total: Money = vec![Money::from_cents(i64::MAX); 3].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_sum_of_float_prices_is_exact() {
        // 22.3 × 3 in f64 is 66.89999999999999; in cents it is exact.
        let line = Money::from_decimal(22.3) * 3u32;
        assert_eq!(line.cents(), 6690);
    }

    #[test]
    fn test_decimal_serde() {
        #[derive(Serialize, Deserialize)]
        struct Priced {
            #[serde(with = "decimal")]
            price: Money,
        }

        let json = serde_json::to_string(&Priced {
            price: Money::from_cents(10995),
        })
        .unwrap();
        assert_eq!(json, r#"{"price":109.95}"#);

        let back: Priced = serde_json::from_str(r#"{"price":15.99}"#).unwrap();
        assert_eq!(back.price.cents(), 1599);

        let whole: Priced = serde_json::from_str(r#"{"price":10}"#).unwrap();
        assert_eq!(whole.price.cents(), 1000);
    }

    #[test]
    fn test_decimal_rejects_negative_and_oversized_amounts() {
        #[derive(Debug, Deserialize)]
        struct Priced {
            #[serde(with = "decimal")]
            price: Money,
        }

        let err = serde_json::from_str::<Priced>(r#"{"price":-500.0}"#).unwrap_err();
        assert!(err.to_string().contains("must not be negative"));

        let err = serde_json::from_str::<Priced>(r#"{"price":1e300}"#).unwrap_err();
        assert!(err.to_string().contains("too large"));

        let free: Priced = serde_json::from_str(r#"{"price":0}"#).unwrap();
        assert!(free.price.is_zero());
    }
}
