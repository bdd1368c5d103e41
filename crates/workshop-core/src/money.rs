//! # Money Module
//!
//! Provides the `Money` type for purchase prices, sale prices and order totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004                                     │
//! │                                                                         │
//! │  A service order summing 2 × 10.10 + 1 × 5.20 with floats can end up   │
//! │  one cent away from what the customer is told.                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Prices are stored as cents (INTEGER columns) and summed exactly.    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use workshop_core::money::Money;
//!
//! let price: Money = "45.90".parse().unwrap();
//! assert_eq!(price.cents(), 4590);
//!
//! let line_total = price.multiply_quantity(2).unwrap();
//! assert_eq!(line_total.to_string(), "91.80");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// Signed, so a negative amount typed into a price field is carried through
/// unchanged rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use workshop_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use workshop_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1000);
    /// assert_eq!(unit_price.multiply_quantity(2).unwrap().cents(), 2000);
    /// ```
    ///
    /// ## Errors
    /// * `CoreError::AmountOutOfRange` - The product does not fit in `i64` cents
    pub fn multiply_quantity(&self, qty: i64) -> CoreResult<Self> {
        self.0
            .checked_mul(qty)
            .map(Money)
            .ok_or(CoreError::AmountOutOfRange)
    }

    /// Adds two amounts.
    ///
    /// ## Errors
    /// * `CoreError::AmountOutOfRange` - The sum does not fit in `i64` cents
    pub fn checked_add(self, other: Self) -> CoreResult<Self> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(CoreError::AmountOutOfRange)
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Coerces text typed into a price field.
///
/// Accepts an optional leading `-`, a major part, and up to two decimal
/// digits separated by `.` or `,` ("12", "12.3", "12,34", ".50").
impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidAmount {
            input: s.to_string(),
        };

        let raw = s.trim();
        let (negative, digits) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let normalized = digits.replace(',', ".");
        let mut parts = normalized.splitn(2, '.');
        let major_part = parts.next().unwrap_or_default();
        let minor_part = parts.next().unwrap_or_default();

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (major_part.is_empty() && minor_part.is_empty())
            || !all_digits(major_part)
            || !all_digits(minor_part)
            || minor_part.len() > 2
        {
            return Err(invalid());
        }

        let major: i64 = if major_part.is_empty() {
            0
        } else {
            major_part.parse().map_err(|_| invalid())?
        };
        let minor: i64 = match minor_part.len() {
            0 => 0,
            1 => minor_part.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => minor_part.parse().map_err(|_| invalid())?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(invalid)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering ("1234.50"); currency symbols belong to whatever
/// layer displays the value.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse_accepts_form_input() {
        assert_eq!("12".parse::<Money>().unwrap().cents(), 1200);
        assert_eq!("12.34".parse::<Money>().unwrap().cents(), 1234);
        assert_eq!("12,34".parse::<Money>().unwrap().cents(), 1234);
        assert_eq!("12.5".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!(" .50 ".parse::<Money>().unwrap().cents(), 50);
        assert_eq!("-3.10".parse::<Money>().unwrap().cents(), -310);
        assert_eq!("100.0".parse::<Money>().unwrap(), Money::from_cents(10000));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        for input in ["", "abc", "1.234", "1.2.3", "-", ".", "12a"] {
            let err = input.parse::<Money>().unwrap_err();
            assert!(matches!(err, CoreError::InvalidAmount { .. }), "{input}");
        }
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a.checked_add(b).unwrap().cents(), 1500);
        assert_eq!(a.multiply_quantity(3).unwrap().cents(), 3000);
        assert_eq!(b.multiply_quantity(-2).unwrap().cents(), -1000);
    }

    #[test]
    fn test_overflow_is_an_error() {
        let big = Money::from_cents(i64::MAX / 2 + 1);

        assert_eq!(big.multiply_quantity(2), Err(CoreError::AmountOutOfRange));
        assert_eq!(big.checked_add(big), Err(CoreError::AmountOutOfRange));
        assert_eq!(
            Money::from_cents(-1).multiply_quantity(i64::MIN),
            Err(CoreError::AmountOutOfRange)
        );
    }
}
