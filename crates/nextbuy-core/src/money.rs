//! # Money Module
//!
//! Provides the `Money` type used for cart totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing API prices as floats:                                          │
//! │    9.99 * 2 + 4.5 = 24.479999999999997                                  │
//! │                                                                         │
//! │  OUR SOLUTION: round each unit price to cents ONCE, then use integers   │
//! │    999 * 2 + 450 = 2448 cents = $24.48                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The listing API sends prices as JSON numbers, so `from_price` is the single
//! place a float enters. Everything downstream is integer cents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

/// A monetary value in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use nextbuy_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts an API price (major units) to cents, rounding half away
    /// from zero.
    ///
    /// Prices beyond the `i64` cent range clamp to its bounds; `NaN` is zero.
    ///
    /// ## Example
    /// ```rust
    /// use nextbuy_core::money::Money;
    ///
    /// assert_eq!(Money::from_price(9.99).cents(), 999);
    /// assert_eq!(Money::from_price(4.5).cents(), 450);
    /// assert_eq!(Money::from_price(0.005).cents(), 1);
    /// ```
    pub fn from_price(price: f64) -> Self {
        let cents = (price * 100.0).round();
        if cents.is_nan() {
            return Money::zero();
        }
        // float-to-int `as` saturates at i64::MIN / i64::MAX
        Money(cents as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies by a line quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use nextbuy_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// `$12.34`, with a leading `-` for negative values.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
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

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

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
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_price_rounds_float_noise() {
        assert_eq!(Money::from_price(9.99).cents(), 999);
        assert_eq!(Money::from_price(109.95).cents(), 10995);
        assert_eq!(Money::from_price(0.0).cents(), 0);
        assert_eq!(Money::from_price(10.0).cents(), 1000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_sum_and_multiply() {
        let total: Money = [Money::from_cents(999) * 2, Money::from_cents(450)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 2448);
        assert_eq!(total.to_string(), "$24.48");
    }

    #[test]
    fn test_out_of_range_prices_clamp() {
        assert_eq!(Money::from_price(1e300).cents(), i64::MAX);
        assert_eq!(Money::from_price(f64::INFINITY).cents(), i64::MAX);
        assert_eq!(Money::from_price(f64::NEG_INFINITY).cents(), i64::MIN);
        assert_eq!(Money::from_price(f64::NAN).cents(), 0);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!((max * 2).cents(), i64::MAX);
        assert_eq!((max + Money::from_cents(1)).cents(), i64::MAX);

        let mut total = Money::from_cents(i64::MAX - 1);
        total += Money::from_cents(5);
        assert_eq!(total.cents(), i64::MAX);
    }
}
