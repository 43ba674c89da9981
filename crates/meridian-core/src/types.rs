//! # Domain Types
//!
//! Core domain types used throughout Meridian POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartLine     │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  product_id     │   │  id (UUID)      │       │
//! │  │  name, category │   │  name (frozen)  │   │  lines (frozen) │       │
//! │  │  barcode        │   │  unit_price     │   │  totals         │       │
//! │  │  unit_price     │   │  quantity       │   │  tender, change │       │
//! │  │  stock          │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    TaxRate      │   │     Tender      │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  bps (u32)      │   │  Cash { amount }│                             │
//! │  │  700 = 7%       │   │  Card           │                             │
//! │  └─────────────────┘   │  Wallet / Upi   │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `CartLine` freezes the product name and unit price at the moment the
//! product is added; `Sale` freezes the full line set at the moment of
//! settlement. A catalog price change after either point never alters what
//! the customer was charged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 700 bps = 7.00% (the demo store's flat rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Read-only to the checkout core: the cart freezes what it needs from a
/// product at add time and never writes back. `stock` is informational only -
/// there are no reservation semantics in the checkout path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Business identifier, also accepted at the scan prompt.
    pub id: String,

    /// Display name shown to cashier and on receipt.
    pub name: String,

    /// Category for register browse tabs (Beverages, Snacks, ...).
    pub category: String,

    /// Barcode (EAN-13, UPC-A, etc.), if the product carries one.
    pub barcode: Option<String>,

    /// Price in cents (smallest currency unit).
    pub unit_price_cents: i64,

    /// Current stock level (advisory; selling is not blocked at zero).
    pub stock: i64,

    /// Whether product is active (soft delete).
    pub is_active: bool,
}

impl Product {
    /// Creates an active product without a barcode.
    ///
    /// Mainly a convenience for seed data and tests; real catalogs
    /// construct the struct directly.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        unit_price_cents: i64,
        stock: i64,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            barcode: None,
            unit_price_cents,
            stock,
            is_active: true,
        }
    }

    /// Sets the barcode (builder style, for seed data).
    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Whether the given scan code refers to this product.
    ///
    /// Matches the business id exactly, or the barcode when present.
    pub fn matches_code(&self, code: &str) -> bool {
        self.id == code || self.barcode.as_deref() == Some(code)
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// A line item in the cart.
/// Uses snapshot pattern to freeze product data at time of adding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product id (for catalog/inventory lookup).
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price in cents at time of adding (frozen).
    /// This is critical: we lock in the price when added to cart.
    pub unit_price_cents: i64,

    /// Quantity in cart, always >= 1.
    pub quantity: i64,
}

impl CartLine {
    /// Creates a new cart line from a product and quantity.
    ///
    /// ## Price Freezing
    /// The price is captured at this moment. If the product price changes
    /// in the catalog, this line retains the original price.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price_cents: product.unit_price_cents,
            quantity,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price() * self.quantity
    }
}

// =============================================================================
// Tender
// =============================================================================

/// A payment offered by the customer to settle the sale.
///
/// Only cash carries an amount: the cashier types what was handed over and
/// the session computes change. Card, wallet, and UPI settle for exactly the
/// amount due on confirmation (authorization is a stub in this system).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Tender {
    /// Physical cash payment.
    Cash { amount_received: Money },
    /// Card payment on external terminal.
    Card,
    /// Mobile wallet payment.
    Wallet,
    /// UPI transfer.
    Upi,
}

impl Tender {
    /// Returns the data-free method tag recorded on the sale.
    pub fn method(&self) -> TenderMethod {
        match self {
            Tender::Cash { .. } => TenderMethod::Cash,
            Tender::Card => TenderMethod::Card,
            Tender::Wallet => TenderMethod::Wallet,
            Tender::Upi => TenderMethod::Upi,
        }
    }
}

/// The tender method, without amounts. Recorded on the finalized sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenderMethod {
    Cash,
    Card,
    Wallet,
    Upi,
}

impl std::fmt::Display for TenderMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TenderMethod::Cash => "Cash",
            TenderMethod::Card => "Card",
            TenderMethod::Wallet => "Wallet",
            TenderMethod::Upi => "UPI",
        };
        write!(f, "{}", label)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// The immutable, finalized record of a completed checkout.
///
/// Created exactly once, at the moment the payment session completes. The
/// line set and totals are frozen at commit time; later cart activity can
/// never reach back into a sale. This is the authoritative record handed to
/// the inventory and journal collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    /// Unique identifier (UUID v4), stamped at finalization.
    pub id: String,

    /// Line items at commit time (frozen).
    pub lines: Vec<CartLine>,

    /// Sum of line totals, before tax.
    pub subtotal_cents: i64,

    /// Tax applied, per the store's flat rate.
    pub tax_cents: i64,

    /// Amount due: subtotal + tax.
    pub total_cents: i64,

    /// How the sale was settled.
    pub tender_method: TenderMethod,

    /// For cash: amount customer gave (to calculate change).
    pub amount_received_cents: Option<i64>,

    /// Change returned to customer (zero for non-cash tenders).
    pub change_cents: i64,

    /// When the payment completed.
    pub completed_at: DateTime<Utc>,
}

impl Sale {
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

    /// Returns the change as Money.
    #[inline]
    pub fn change(&self) -> Money {
        Money::from_cents(self.change_cents)
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
