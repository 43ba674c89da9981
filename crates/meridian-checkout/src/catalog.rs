//! # Catalog Source
//!
//! Read-only product resolution for the register.
//!
//! ## Scan Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Scan Resolution Works                            │
//! │                                                                         │
//! │  Cashier scans: "5449000000996"                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resolve() checks: product id first, then barcode                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │ id index      prod-001 │ prod-002 │ ... │                            │
//! │  │ barcode index 54490... │ 04963... │ ... │ ← MATCH!                   │
//! │  └─────────────────────────────────────────┘                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Some(Cola 330ml) - or None, which the engine surfaces as               │
//! │  ProductNotFound without touching the cart                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The trait is async because a real catalog is a storage or network round
//! trip; the in-memory adapter resolves immediately. Either way the engine
//! applies optimistic-cancel semantics around the await (see
//! `TransactionEngine::scan`).

use std::collections::HashMap;
use std::sync::Arc;

use meridian_core::types::Product;

// =============================================================================
// Catalog Source Trait
// =============================================================================

/// Resolves identifiers and queries to product data. Pure read: a catalog
/// source must not mutate cart or product state.
pub trait CatalogSource {
    /// Resolves a scan code (product id or barcode) to a product.
    ///
    /// Returns `None` on a miss; a miss is terminal for that scan attempt
    /// and must be re-issued by the cashier.
    async fn resolve(&self, code: &str) -> Option<Product>;

    /// Lists active products in a category, for the register's browse tabs.
    async fn list_by_category(&self, category: &str) -> Vec<Product>;

    /// Case-insensitive name search over active products.
    async fn search(&self, term: &str) -> Vec<Product>;
}

// =============================================================================
// In-Memory Catalog
// =============================================================================

/// Seeded, immutable catalog backed by id and barcode indexes.
///
/// ## Usage
/// ```rust,ignore
/// let catalog = InMemoryCatalog::new(vec![
///     Product::new("prod-001", "Cola 330ml", "Beverages", 250, 40)
///         .with_barcode("5449000000996"),
/// ]);
///
/// assert!(catalog.resolve("5449000000996").await.is_some());
/// assert!(catalog.resolve("prod-999").await.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    inner: Arc<CatalogIndex>,
}

#[derive(Debug)]
struct CatalogIndex {
    products: Vec<Product>,
    /// product id -> index into `products`
    by_id: HashMap<String, usize>,
    /// barcode -> index into `products`
    by_barcode: HashMap<String, usize>,
}

impl InMemoryCatalog {
    /// Builds the catalog and its lookup indexes from a product list.
    ///
    /// Later entries win on duplicate ids/barcodes; seed data is expected
    /// to be unique.
    pub fn new(products: Vec<Product>) -> Self {
        let mut by_id = HashMap::with_capacity(products.len());
        let mut by_barcode = HashMap::new();

        for (idx, product) in products.iter().enumerate() {
            by_id.insert(product.id.clone(), idx);
            if let Some(barcode) = &product.barcode {
                by_barcode.insert(barcode.clone(), idx);
            }
        }

        InMemoryCatalog {
            inner: Arc::new(CatalogIndex {
                products,
                by_id,
                by_barcode,
            }),
        }
    }

    /// Number of products in the catalog (active or not).
    pub fn len(&self) -> usize {
        self.inner.products.len()
    }

    /// Whether the catalog holds no products.
    pub fn is_empty(&self) -> bool {
        self.inner.products.is_empty()
    }

    /// Distinct categories carried by active products, in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for product in self.inner.products.iter().filter(|p| p.is_active) {
            if !seen.contains(&product.category) {
                seen.push(product.category.clone());
            }
        }
        seen
    }
}

impl CatalogSource for InMemoryCatalog {
    async fn resolve(&self, code: &str) -> Option<Product> {
        let idx = self
            .inner
            .by_id
            .get(code)
            .or_else(|| self.inner.by_barcode.get(code))?;
        self.inner.products.get(*idx).cloned()
    }

    async fn list_by_category(&self, category: &str) -> Vec<Product> {
        self.inner
            .products
            .iter()
            .filter(|p| p.is_active && p.category.eq_ignore_ascii_case(category))
            .cloned()
            .collect()
    }

    async fn search(&self, term: &str) -> Vec<Product> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return self
                .inner
                .products
                .iter()
                .filter(|p| p.is_active)
                .cloned()
                .collect();
        }

        self.inner
            .products
            .iter()
            .filter(|p| {
                p.is_active
                    && (p.name.to_lowercase().contains(&term)
                        || p.id.to_lowercase().starts_with(&term))
            })
            .cloned()
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            Product::new("prod-001", "Cola 330ml", "Beverages", 250, 40)
                .with_barcode("5449000000996"),
            Product::new("prod-002", "Cola 500ml", "Beverages", 350, 24),
            Product::new("prod-003", "Salted Chips", "Snacks", 199, 60),
            Product {
                is_active: false,
                ..Product::new("prod-004", "Retired Item", "Snacks", 100, 0)
            },
        ])
    }

    #[tokio::test]
    async fn test_resolve_by_id_and_barcode() {
        let catalog = seeded();

        let by_id = catalog.resolve("prod-001").await.unwrap();
        assert_eq!(by_id.name, "Cola 330ml");

        let by_barcode = catalog.resolve("5449000000996").await.unwrap();
        assert_eq!(by_barcode.id, "prod-001");
    }

    #[tokio::test]
    async fn test_resolve_miss() {
        let catalog = seeded();
        assert!(catalog.resolve("prod-999").await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_returns_inactive() {
        // The engine decides how to refuse inactive products; the catalog
        // just reports what it knows.
        let catalog = seeded();
        let retired = catalog.resolve("prod-004").await.unwrap();
        assert!(!retired.is_active);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_skips_inactive() {
        let catalog = seeded();

        let hits = catalog.search("COLA").await;
        assert_eq!(hits.len(), 2);

        let hits = catalog.search("retired").await;
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_list_by_category() {
        let catalog = seeded();

        let beverages = catalog.list_by_category("beverages").await;
        assert_eq!(beverages.len(), 2);

        // Inactive products stay off the browse tabs
        let snacks = catalog.list_by_category("Snacks").await;
        assert_eq!(snacks.len(), 1);
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        let catalog = seeded();
        assert_eq!(catalog.categories(), vec!["Beverages", "Snacks"]);
    }
}
