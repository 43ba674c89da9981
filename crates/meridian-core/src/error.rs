//! # Error Types
//!
//! Domain-specific error types for meridian-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  meridian-core errors (this file)                                       │
//! │  ├── CoreError        - Checkout domain errors                          │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  meridian-checkout errors (separate crate)                              │
//! │  └── SinkError        - Best-effort collaborator failures               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → register display                   │
//! │        SinkError is logged at the engine boundary, never surfaced       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, amounts, etc.)
//! 3. Errors are enum variants, never String
//! 4. Every variant is recoverable and maps to a user-facing message -
//!    nothing here is fatal to the register process

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core checkout errors.
///
/// These errors represent business rule violations in the cart and payment
/// path. They should be caught and translated to user-friendly messages;
/// none of them leaves the register in a partially-committed state.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Requested quantity was below one on an add/set operation.
    ///
    /// ## When This Occurs
    /// - `add_line` called with quantity 0 or negative
    ///
    /// Note: `set_quantity` treats quantity < 1 as a removal instead.
    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),

    /// Product cannot be found.
    ///
    /// ## When This Occurs
    /// - Scanned code matches no product id or barcode
    /// - Product was removed from the catalog between display and add
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product exists but has been soft-disabled.
    #[error("Product is not available for sale: {0}")]
    ProductInactive(String),

    /// Checkout attempted on an empty cart.
    ///
    /// ## User Workflow
    /// ```text
    /// Press Checkout (cart: 0 lines)
    ///      │
    ///      ▼
    /// EmptyCart - no payment session is opened
    ///      │
    ///      ▼
    /// UI shows: "Cart is empty"
    /// ```
    #[error("Cart is empty")]
    EmptyCart,

    /// Cash tendered is less than the amount due.
    ///
    /// The payment session stays open; the cashier may retry with a
    /// corrected amount.
    #[error("Insufficient tender: received {received}, total due {required}")]
    InsufficientTender { required: Money, received: Money },

    /// A card/wallet/UPI tender was declined by the authorizer.
    ///
    /// The payment session stays open; another tender may be attempted.
    #[error("Tender was declined")]
    TenderDeclined,

    /// A tender, cancel, or scan resolution arrived after the session was
    /// already completed or cancelled. The operation is discarded with no
    /// state change.
    #[error("Payment session is no longer active")]
    StaleSession,

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Whether the operation may be retried against the same session.
    ///
    /// Used by the register to decide between "try again" and "start over"
    /// messaging.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CoreError::InsufficientTender { .. } | CoreError::TenderDeclined
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed amount, bad scan code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientTender {
            required: Money::from_cents(2675),
            received: Money::from_cents(2000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient tender: received $20.00, total due $26.75"
        );

        let err = CoreError::ProductNotFound("prod-999".to_string());
        assert_eq!(err.to_string(), "Product not found: prod-999");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "code".to_string(),
        };
        assert_eq!(err.to_string(), "code is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "code".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(CoreError::TenderDeclined.is_retryable());
        assert!(CoreError::InsufficientTender {
            required: Money::from_cents(100),
            received: Money::from_cents(50),
        }
        .is_retryable());

        assert!(!CoreError::EmptyCart.is_retryable());
        assert!(!CoreError::StaleSession.is_retryable());
    }
}
