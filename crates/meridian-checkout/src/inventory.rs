//! # Inventory Sink
//!
//! Stock decrement on sale completion.
//!
//! ## Best-Effort Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Inventory Decrement on Completion                       │
//! │                                                                         │
//! │  Sale commits (cart cleared, sale record built)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  decrement_stock(product_id, qty)   ── once per sale line               │
//! │       │                                                                 │
//! │       ├── Ok  ──────────► on-hand level reduced                         │
//! │       │                                                                 │
//! │       └── Err ──────────► logged at warn, NOT retried, and the          │
//! │                           already-completed sale is NOT rolled back     │
//! │                                                                         │
//! │  A failed decrement is a stock-reconciliation problem for the           │
//! │  back office, never a checkout failure. Known limitation.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use meridian_core::types::Product;
use tracing::debug;

use crate::error::{SinkError, SinkResult};

// =============================================================================
// Inventory Sink Trait
// =============================================================================

/// Receives stock decrements for completed sales.
pub trait InventorySink {
    /// Reduces the on-hand level of `product_id` by `quantity`.
    async fn decrement_stock(&self, product_id: &str, quantity: i64) -> SinkResult<()>;
}

// =============================================================================
// In-Memory Inventory
// =============================================================================

/// On-hand stock levels keyed by product id.
///
/// Cheap to clone: the levels live behind an `Arc`, so the register can
/// hold a handle for stock display while the engine holds another for
/// decrements.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventory {
    levels: Arc<Mutex<HashMap<String, i64>>>,
}

impl InMemoryInventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds levels from a product list, using each product's stock field.
    pub fn from_products(products: &[Product]) -> Self {
        let levels = products
            .iter()
            .map(|p| (p.id.clone(), p.stock))
            .collect::<HashMap<_, _>>();
        InMemoryInventory {
            levels: Arc::new(Mutex::new(levels)),
        }
    }

    /// Sets the on-hand level for a product.
    pub fn set_level(&self, product_id: &str, level: i64) {
        self.levels
            .lock()
            .expect("Inventory mutex poisoned")
            .insert(product_id.to_string(), level);
    }

    /// Current on-hand level, if the product is tracked.
    pub fn level_of(&self, product_id: &str) -> Option<i64> {
        self.levels
            .lock()
            .expect("Inventory mutex poisoned")
            .get(product_id)
            .copied()
    }
}

impl InventorySink for InMemoryInventory {
    async fn decrement_stock(&self, product_id: &str, quantity: i64) -> SinkResult<()> {
        let mut levels = self.levels.lock().expect("Inventory mutex poisoned");

        let level = levels
            .get_mut(product_id)
            .ok_or_else(|| SinkError::UnknownProduct(product_id.to_string()))?;

        if *level < quantity {
            return Err(SinkError::StockUnderflow {
                product_id: product_id.to_string(),
                on_hand: *level,
                requested: quantity,
            });
        }

        *level -= quantity;
        debug!(product_id = %product_id, quantity = %quantity, on_hand = %*level, "Stock decremented");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_decrement_reduces_level() {
        let inventory = InMemoryInventory::new();
        inventory.set_level("prod-001", 10);

        inventory.decrement_stock("prod-001", 3).await.unwrap();
        assert_eq!(inventory.level_of("prod-001"), Some(7));
    }

    #[tokio::test]
    async fn test_decrement_unknown_product() {
        let inventory = InMemoryInventory::new();
        let err = inventory.decrement_stock("ghost", 1).await.unwrap_err();
        assert!(matches!(err, SinkError::UnknownProduct(_)));
    }

    #[tokio::test]
    async fn test_decrement_underflow_leaves_level_unchanged() {
        let inventory = InMemoryInventory::new();
        inventory.set_level("prod-001", 2);

        let err = inventory.decrement_stock("prod-001", 5).await.unwrap_err();
        assert!(matches!(err, SinkError::StockUnderflow { .. }));
        assert_eq!(inventory.level_of("prod-001"), Some(2));
    }

    #[tokio::test]
    async fn test_from_products_seeds_levels() {
        let products = vec![
            Product::new("a", "A", "Test", 100, 12),
            Product::new("b", "B", "Test", 200, 0),
        ];
        let inventory = InMemoryInventory::from_products(&products);

        assert_eq!(inventory.level_of("a"), Some(12));
        assert_eq!(inventory.level_of("b"), Some(0));
    }
}
