//! # meridian-core: Pure Business Logic for Meridian POS
//!
//! This crate is the **heart** of Meridian POS. It contains all checkout
//! business logic as pure functions and value types with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Meridian POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  apps/register (Terminal UI)                    │   │
//! │  │    scan ──► cart ──► checkout ──► cash/card ──► receipt         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  meridian-checkout (Engine)                     │   │
//! │  │    TransactionEngine + catalog/inventory/journal adapters       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ meridian-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │ pricing │ │ session │  │   │
//! │  │   │ Product │ │  Money  │ │  Cart   │ │ Snapshot│ │ Payment │  │   │
//! │  │   │  Sale   │ │ TaxCalc │ │CartLine │ │  rules  │ │ Session │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Tender, Sale, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart aggregate with line-merge invariants
//! - [`pricing`] - Subtotal/tax/total derivation
//! - [`session`] - Payment session state machine
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use meridian_core::cart::Cart;
//! use meridian_core::types::{Product, TaxRate};
//!
//! let cola = Product::new("prod-001", "Cola 330ml", "Beverages", 250, 40);
//!
//! let mut cart = Cart::new();
//! cart.add_line(&cola, 2).unwrap();
//!
//! // $5.00 at 7% = $0.35 tax, $5.35 total
//! let pricing = cart.pricing(TaxRate::from_bps(700));
//! assert_eq!(pricing.total_cents, 535);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use meridian_core::Money` instead of
// `use meridian_core::money::Money`

pub use cart::Cart;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::PricingSnapshot;
pub use session::{AuthorizationOutcome, PaymentSession, SessionState, Settlement};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
/// Can be made configurable per-store in future versions.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in the cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
/// Configurable per-store in future versions.
pub const MAX_LINE_QUANTITY: i64 = 999;
