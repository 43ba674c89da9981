//! # Pricing Calculator
//!
//! Derives subtotal, tax, and total from a set of cart lines and a tax rate.
//!
//! ## Derivation Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Pricing Derivation                                 │
//! │                                                                         │
//! │  subtotal = Σ (unit_price × quantity)        exact integer cents        │
//! │  tax      = round_half_up(subtotal × rate)   one rule, everywhere       │
//! │  total    = subtotal + tax                                              │
//! │                                                                         │
//! │  Example: 2 × $10.00 + 1 × $5.00 at 7%                                  │
//! │    subtotal  2500¢                                                      │
//! │    tax        175¢   (2500 × 700 + 5000) / 10000                        │
//! │    total     2675¢                                                      │
//! │                                                                         │
//! │  Empty cart: subtotal = tax = total = 0                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived, Never Stored
//! A `PricingSnapshot` is recomputed from the live cart on every read. It is
//! never cached and never persisted on its own - the only pricing numbers
//! that outlive a cart are the ones frozen into a completed [`Sale`].
//!
//! [`Sale`]: crate::types::Sale

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{CartLine, TaxRate};

// =============================================================================
// Pricing Snapshot
// =============================================================================

/// The derived pricing of a cart at a single point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSnapshot {
    /// Sum of line totals, in cents.
    pub subtotal_cents: i64,

    /// The tax rate the snapshot was computed with, in basis points.
    pub tax_rate_bps: u32,

    /// Tax amount, in cents, round-half-up.
    pub tax_cents: i64,

    /// Amount due: subtotal + tax, in cents.
    pub total_cents: i64,
}

impl PricingSnapshot {
    /// Computes pricing for a set of cart lines.
    ///
    /// Pure function: same lines and rate always produce the same snapshot,
    /// regardless of how the cart arrived at that line set.
    ///
    /// ## Example
    /// ```rust
    /// use meridian_core::pricing::PricingSnapshot;
    /// use meridian_core::types::{CartLine, Product, TaxRate};
    ///
    /// let a = Product::new("a", "Widget", "Misc", 1000, 10);
    /// let lines = vec![CartLine::from_product(&a, 2)];
    ///
    /// let pricing = PricingSnapshot::compute(&lines, TaxRate::from_bps(700));
    /// assert_eq!(pricing.subtotal_cents, 2000);
    /// assert_eq!(pricing.tax_cents, 140);
    /// assert_eq!(pricing.total_cents, 2140);
    /// ```
    pub fn compute(lines: &[CartLine], rate: TaxRate) -> Self {
        let subtotal = lines
            .iter()
            .fold(Money::zero(), |acc, line| acc + line.line_total());
        let tax = subtotal.calculate_tax(rate);
        let total = subtotal + tax;

        PricingSnapshot {
            subtotal_cents: subtotal.cents(),
            tax_rate_bps: rate.bps(),
            tax_cents: tax.cents(),
            total_cents: total.cents(),
        }
    }

    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the tax amount as Money.
    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_cents(self.tax_cents)
    }

    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn line(id: &str, price_cents: i64, qty: i64) -> CartLine {
        let product = Product::new(id, format!("Product {}", id), "Test", price_cents, 10);
        CartLine::from_product(&product, qty)
    }

    #[test]
    fn test_empty_lines_price_to_zero() {
        let pricing = PricingSnapshot::compute(&[], TaxRate::from_bps(700));
        assert_eq!(pricing.subtotal_cents, 0);
        assert_eq!(pricing.tax_cents, 0);
        assert_eq!(pricing.total_cents, 0);
    }

    #[test]
    fn test_reference_basket() {
        // 2 × $10.00 + 1 × $5.00 at 7% = $25.00 / $1.75 / $26.75
        let lines = vec![line("a", 1000, 2), line("b", 500, 1)];
        let pricing = PricingSnapshot::compute(&lines, TaxRate::from_bps(700));

        assert_eq!(pricing.subtotal_cents, 2500);
        assert_eq!(pricing.tax_cents, 175);
        assert_eq!(pricing.total_cents, 2675);
    }

    #[test]
    fn test_total_is_subtotal_plus_tax() {
        for (price, qty) in [(999, 1), (1001, 3), (50, 1), (333, 7)] {
            let lines = vec![line("a", price, qty)];
            let p = PricingSnapshot::compute(&lines, TaxRate::from_bps(700));
            assert_eq!(p.total_cents, p.subtotal_cents + p.tax_cents);
        }
    }

    #[test]
    fn test_rounding_cases() {
        let rate = TaxRate::from_bps(700);

        // Exact: $25.00 × 7% = $1.75
        let p = PricingSnapshot::compute(&[line("a", 2500, 1)], rate);
        assert_eq!(p.tax_cents, 175);

        // Rounds down: $10.01 × 7% = 70.07¢ -> 70¢
        let p = PricingSnapshot::compute(&[line("a", 1001, 1)], rate);
        assert_eq!(p.tax_cents, 70);

        // Exact half rounds up: 50¢ × 7% = 3.5¢ -> 4¢
        let p = PricingSnapshot::compute(&[line("a", 50, 1)], rate);
        assert_eq!(p.tax_cents, 4);
    }

    #[test]
    fn test_subtotal_is_order_independent() {
        let rate = TaxRate::from_bps(700);
        let forward = vec![line("a", 1000, 2), line("b", 500, 1), line("c", 250, 4)];
        let reversed: Vec<CartLine> = forward.iter().rev().cloned().collect();

        assert_eq!(
            PricingSnapshot::compute(&forward, rate),
            PricingSnapshot::compute(&reversed, rate)
        );
    }

    #[test]
    fn test_zero_rate() {
        let p = PricingSnapshot::compute(&[line("a", 1234, 2)], TaxRate::zero());
        assert_eq!(p.subtotal_cents, 2468);
        assert_eq!(p.tax_cents, 0);
        assert_eq!(p.total_cents, 2468);
    }
}
