//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In binary floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004                                  │
//! │    25.00 × 0.07 = 1.7500000000000002                                │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Cents                                        │
//! │    Every amount is an i64 count of the smallest currency unit.      │
//! │    2500 cents × 700 bps = exactly 175 cents of tax, every time.     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use meridian_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let line = price * 2;                // $21.98
//!
//! // Exact decimal parsing for tender entry - no floats involved
//! let tendered: Money = "26.75".parse().unwrap();
//! assert_eq!(tendered.cents(), 2675);
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: change computation subtracts before the sign is known
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serde transparent derive**: serializes as a bare integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use meridian_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use meridian_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn major_units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion, always 0-99.
    #[inline]
    pub const fn minor_units(&self) -> i64 {
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax with round-half-up to the nearest cent.
    ///
    /// ## Rounding Rule
    /// A half cent always rounds away from zero toward the next cent:
    /// 3.5¢ of computed tax becomes 4¢. One rule, applied everywhere, so the
    /// same cart always prices to the same total.
    ///
    /// ## Implementation
    /// Integer math in i128 to rule out overflow:
    /// `(cents × bps + 5000) / 10000`, where the +5000 performs the rounding.
    ///
    /// ## Example
    /// ```rust
    /// use meridian_core::money::Money;
    /// use meridian_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(2500); // $25.00
    /// let rate = TaxRate::from_bps(700);      // 7%
    /// assert_eq!(subtotal.calculate_tax(rate).cents(), 175); // $1.75 exact
    ///
    /// let half = Money::from_cents(50);       // 50¢ × 7% = 3.5¢
    /// assert_eq!(half.calculate_tax(rate).cents(), 4); // rounds up
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Rounds up to the next whole major unit.
    ///
    /// Backs the register's quick-tender suggestion: a $26.75 total offers
    /// a $27.00 cash button.
    ///
    /// ## Example
    /// ```rust
    /// use meridian_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(2675).ceil_to_major().cents(), 2700);
    /// assert_eq!(Money::from_cents(2700).ceil_to_major().cents(), 2700);
    /// ```
    pub const fn ceil_to_major(&self) -> Money {
        let rem = self.0 % 100;
        if rem > 0 {
            Money(self.0 + (100 - rem))
        } else {
            Money(self.0)
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// This is for logs and the terminal register. Localized formatting belongs
/// to the display layer (`RegisterConfig::format_currency`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.major_units().abs(),
            self.minor_units()
        )
    }
}

/// Parses an exact decimal string ("12", "12.5", "12.50") into Money.
///
/// ## Why Not f64 Parsing?
/// Tender amounts are typed by a cashier; going through a float would
/// re-introduce the representation error this type exists to remove. The
/// parser works digit-by-digit on the string.
///
/// ## Rules
/// - Whole part required, fractional part optional
/// - At most two fractional digits (cents precision)
/// - No sign: tenders are never negative at entry
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: "expected a decimal amount like 12.50".to_string(),
        };

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };

        if whole.is_empty() || frac.len() > 2 {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let major: i64 = whole.parse().map_err(|_| invalid())?;
        // "12.5" means 50 cents, not 5
        let minor: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        Ok(Money::from_major_minor(major, minor))
    }
}

/// Default money is zero.
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

/// Multiplication by quantity (line totals).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
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
        assert_eq!(money.major_units(), 10);
        assert_eq!(money.minor_units(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
    }

    #[test]
    fn test_tax_exact_cents() {
        // $25.00 at 7% = $1.75 exactly, no rounding needed
        let tax = Money::from_cents(2500).calculate_tax(TaxRate::from_bps(700));
        assert_eq!(tax.cents(), 175);
    }

    #[test]
    fn test_tax_rounds_down() {
        // $10.01 at 7% = 70.07¢ -> 70¢
        let tax = Money::from_cents(1001).calculate_tax(TaxRate::from_bps(700));
        assert_eq!(tax.cents(), 70);
    }

    #[test]
    fn test_tax_half_rounds_up() {
        // 50¢ at 7% = 3.5¢ -> 4¢
        let tax = Money::from_cents(50).calculate_tax(TaxRate::from_bps(700));
        assert_eq!(tax.cents(), 4);
    }

    #[test]
    fn test_tax_zero_subtotal() {
        let tax = Money::zero().calculate_tax(TaxRate::from_bps(700));
        assert!(tax.is_zero());
    }

    #[test]
    fn test_ceil_to_major() {
        assert_eq!(Money::from_cents(2675).ceil_to_major().cents(), 2700);
        assert_eq!(Money::from_cents(2700).ceil_to_major().cents(), 2700);
        assert_eq!(Money::zero().ceil_to_major().cents(), 0);
    }

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!("12".parse::<Money>().unwrap().cents(), 1200);
        assert_eq!("12.5".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("12.50".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("0.07".parse::<Money>().unwrap().cents(), 7);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!(".50".parse::<Money>().is_err());
        assert!("12.505".parse::<Money>().is_err());
        assert!("-5".parse::<Money>().is_err());
        assert!("12,50".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
    }
}
