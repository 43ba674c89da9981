//! # Sink Error Types
//!
//! Failures from the best-effort collaborators (inventory, journal).
//!
//! ## Why a Separate Error Type?
//! Sink failures are deliberately NOT part of [`CoreError`]: by the time a
//! sink runs, the sale has already committed. The engine logs these at
//! `warn` and moves on - they never surface to the cashier and never roll
//! back the completed sale. Keeping them in their own type makes that
//! one-way boundary explicit.
//!
//! [`CoreError`]: meridian_core::CoreError

use thiserror::Error;

/// Errors from the inventory and journal sinks.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Inventory has no record for the product being decremented.
    #[error("Product not found in inventory: {0}")]
    UnknownProduct(String),

    /// Decrement would take the on-hand level below zero.
    ///
    /// The level is left unchanged; the mismatch is a reconciliation
    /// problem, not a checkout problem.
    #[error("Stock for {product_id} would go negative: on hand {on_hand}, requested {requested}")]
    StockUnderflow {
        product_id: String,
        on_hand: i64,
        requested: i64,
    },

    /// Journal export could not be serialized.
    #[error("Failed to serialize journal: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results with SinkError.
pub type SinkResult<T> = Result<T, SinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SinkError::StockUnderflow {
            product_id: "prod-001".to_string(),
            on_hand: 1,
            requested: 3,
        };
        assert_eq!(
            err.to_string(),
            "Stock for prod-001 would go negative: on hand 1, requested 3"
        );
    }
}
