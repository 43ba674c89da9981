//! # Cart Aggregate
//!
//! The in-progress sale's line items, with the invariants that keep a
//! register display coherent.
//!
//! ## Invariants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Invariants                                  │
//! │                                                                         │
//! │  1. At most ONE line per product id                                     │
//! │     add_line("cola") twice ──► one line, quantity summed               │
//! │                                                                         │
//! │  2. Every line has quantity >= 1                                        │
//! │     set_quantity(id, 0) ──► line removed, never stored at zero         │
//! │                                                                         │
//! │  3. Insertion order preserved                                           │
//! │     Lines display in the order products were first added               │
//! │                                                                         │
//! │  4. Bounded size                                                        │
//! │     At most 100 lines, at most 999 units per line                       │
//! │                                                                         │
//! │  No operation can produce a cart that violates these - failed           │
//! │  operations leave the cart exactly as it was.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! One cart instance belongs to one register session. It is an explicit
//! value with its own transition methods, so the same logic is testable
//! headlessly - no UI harness, no shared module state. Multiple registers
//! mean multiple independent `Cart` values, never a shared singleton.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::pricing::PricingSnapshot;
use crate::types::{CartLine, Product, TaxRate};
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart
// =============================================================================

/// The in-progress sale.
///
/// Created empty when a sale begins, mutated only through its own
/// operations, and reset to empty when the sale completes or the cashier
/// clears it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    /// Lines in the cart, insertion order preserved for display.
    lines: Vec<CartLine>,

    /// When the cart was created/last cleared.
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// ## Behavior
    /// - If product already in cart: increases quantity by `quantity`
    /// - If product not in cart: appends a new line with frozen name/price
    ///
    /// ## Errors
    /// - `InvalidQuantity` if `quantity < 1`
    /// - `QuantityTooLarge` if the merged quantity would exceed 999
    /// - `CartTooLarge` if a new line would exceed 100 lines
    ///
    /// Stock is NOT checked here - it is informational only, and whether a
    /// zero-stock product may be sold is a catalog policy, not a cart rule.
    pub fn add_line(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        if quantity < 1 {
            return Err(CoreError::InvalidQuantity(quantity));
        }

        // Merge into an existing line for the same product
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            let merged = line.quantity + quantity;
            if merged > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: merged,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = merged;
            return Ok(());
        }

        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines.push(CartLine::from_product(product, quantity));
        Ok(())
    }

    /// Removes a line from the cart by product id.
    ///
    /// Removing a product that is not in the cart is a no-op, not an error:
    /// the cashier's intent ("this product should not be in the cart") is
    /// already satisfied.
    pub fn remove_line(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Sets the quantity of a line in place, preserving its position.
    ///
    /// ## Behavior
    /// - `quantity < 1`: behaves as [`remove_line`](Cart::remove_line)
    /// - Product not in cart: no-op (there is no line to update)
    ///
    /// ## Errors
    /// - `QuantityTooLarge` if `quantity` exceeds 999; the line keeps its
    ///   previous quantity
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity < 1 {
            self.remove_line(product_id);
            return Ok(());
        }

        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        }
        Ok(())
    }

    /// Clears all lines from the cart. Always succeeds.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Read-only ordered view of the lines.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of distinct lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Derives the current pricing of the cart.
    ///
    /// Recomputed from the live lines on every call - the cart never caches
    /// a stale total.
    pub fn pricing(&self, rate: TaxRate) -> PricingSnapshot {
        PricingSnapshot::compute(&self.lines, rate)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
