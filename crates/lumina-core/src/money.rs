//! # Money Module
//!
//! Provides the `Money` type for every price, discount, fee and total.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    199.99 × 3 = 599.9699999999999  ❌                                   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    19999 × 3 = 59997 cents = $599.97  ✅                                │
//! │                                                                         │
//! │  Percentages are applied once, at the cent, rounding half up.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lumina_core::money::Money;
//!
//! let price = Money::from_cents(19999); // $199.99
//! let line = price * 2u32;                // $399.98
//! let off = line.percentage_of(25);     // $100.00 (99.995 rounds up)
//! assert_eq!(off.cents(), 10000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: discounts are subtracted, never stored negative,
///   but intermediate arithmetic may dip below zero
/// - **Single field tuple struct**: zero-cost, serializes as a bare integer
///
/// ## Where Money Flows
/// ```text
/// Product.price_cents ──► CartItem line total ──► PriceBreakdown.subtotal
///                                                   │
///                         discount ◄── percentage ──┤
///                         shipping ◄── threshold ───┤
///                                                   ▼
///                                          Order.total_cents (frozen)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents.
    ///
    /// ```rust
    /// use lumina_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(129, 50).cents(), 12950);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
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

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use lumina_core::money::Money;
    ///
    /// let unit = Money::from_cents(4999); // Lumina Desk Lamp
    /// assert_eq!(unit.multiply_quantity(3).cents(), 14997);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns `percent`% of this amount, rounded half up at the cent.
    ///
    /// ## Implementation
    /// Integer math in i128: `(amount × percent + 50) / 100`.
    /// The +50 is the half-cent that makes the division round.
    ///
    /// ```rust
    /// use lumina_core::money::Money;
    ///
    /// // $200.00 at 25% = $50.00
    /// assert_eq!(Money::from_cents(20000).percentage_of(25).cents(), 5000);
    /// // $129.50 at 10% = $12.95
    /// assert_eq!(Money::from_cents(12950).percentage_of(10).cents(), 1295);
    /// // $1.05 at 10% = 10.5¢ → 11¢
    /// assert_eq!(Money::from_cents(105).percentage_of(10).cents(), 11);
    /// ```
    pub fn percentage_of(&self, percent: u32) -> Money {
        let amount = self.0 as i128 * percent as i128;
        let rounded = if amount >= 0 {
            (amount + 50) / 100
        } else {
            (amount - 50) / 100
        };
        Money::from_cents(rounded as i64)
    }

    /// Applies a percentage discount and returns the discounted amount.
    pub fn apply_percentage_discount(&self, percent: u32) -> Money {
        *self - self.percentage_of(percent)
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a dollar amount typed by an admin: `"199.99"`, `"$49"`, `"129.5"`.
///
/// More than two decimal places is rejected rather than silently rounded.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(ValidationError::Required {
                field: "price".to_string(),
            });
        }

        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (major, minor) = match digits.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (digits, ""),
        };

        if major.is_empty() && minor.is_empty() {
            return Err(invalid("no digits"));
        }
        if !major.chars().all(|c| c.is_ascii_digit()) || !minor.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a number like 199.99"));
        }
        if minor.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let major: i64 = if major.is_empty() {
            0
        } else {
            major.parse().map_err(|_| invalid("amount too large"))?
        };
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().map_err(|_| invalid("bad cents"))? * 10,
            _ => minor.parse().map_err(|_| invalid("bad cents"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("amount too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$199.99`.
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
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
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
    fn test_from_cents() {
        let money = Money::from_cents(19999);
        assert_eq!(money.cents(), 19999);
        assert_eq!(money.dollars(), 199);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(19999).to_string(), "$199.99");
        assert_eq!(Money::from_cents(4500).to_string(), "$45.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3u32).cents(), 3000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_percentage_of_rounds_half_up() {
        assert_eq!(Money::from_cents(20000).percentage_of(25).cents(), 5000);
        assert_eq!(Money::from_cents(105).percentage_of(10).cents(), 11);
        assert_eq!(Money::from_cents(104).percentage_of(10).cents(), 10);
        assert_eq!(Money::from_cents(12345).percentage_of(0).cents(), 0);
        assert_eq!(Money::from_cents(12345).percentage_of(100).cents(), 12345);
    }

    #[test]
    fn test_apply_percentage_discount() {
        let subtotal = Money::from_cents(10000);
        assert_eq!(subtotal.apply_percentage_discount(20).cents(), 8000);
    }

    #[test]
    fn test_parse_dollar_amounts() {
        assert_eq!("199.99".parse::<Money>().unwrap().cents(), 19999);
        assert_eq!("$49".parse::<Money>().unwrap().cents(), 4900);
        assert_eq!("129.5".parse::<Money>().unwrap().cents(), 12950);
        assert_eq!(" .75 ".parse::<Money>().unwrap().cents(), 75);
        assert_eq!("-5.50".parse::<Money>().unwrap().cents(), -550);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "".parse::<Money>(),
            Err(ValidationError::Required { .. })
        ));
        assert!("12.345".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
        assert!(".".parse::<Money>().is_err());
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_string(&Money::from_cents(4500)).unwrap();
        assert_eq!(json, "4500");
    }
}
