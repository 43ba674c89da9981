//! # Demo Catalog Seed
//!
//! A small, deterministic product set for the demo register, spread across
//! the store's five browse categories:
//! - Beverages (sodas, water, juice)
//! - Snacks (chips, candy, cookies)
//! - Dairy (milk, cheese, yogurt)
//! - Frozen (ice cream, frozen meals)
//! - Grocery (bread, pasta, rice)
//!
//! Each product has a stable `prod-NNN` id; the fast movers also carry a
//! barcode so the scan path can be exercised end to end. Prices and stock
//! are fixed so demo walkthroughs and docs stay reproducible.

use meridian_core::types::Product;

/// Builds the demo catalog.
pub fn demo_catalog() -> Vec<Product> {
    vec![
        // Beverages
        Product::new("prod-001", "Cola 330ml", "Beverages", 250, 40).with_barcode("5449000000996"),
        Product::new("prod-002", "Cola 1.5L", "Beverages", 550, 24).with_barcode("5449000054227"),
        Product::new("prod-003", "Orange Juice 1L", "Beverages", 425, 18),
        Product::new("prod-004", "Still Water 500ml", "Beverages", 120, 96).with_barcode("3068320055008"),
        // Snacks
        Product::new("prod-005", "Salted Chips 150g", "Snacks", 199, 60).with_barcode("5000328355029"),
        Product::new("prod-006", "Chocolate Bar", "Snacks", 175, 80).with_barcode("7622210449283"),
        Product::new("prod-007", "Butter Cookies 200g", "Snacks", 349, 30),
        Product::new("prod-008", "Trail Mix 250g", "Snacks", 499, 22),
        // Dairy
        Product::new("prod-009", "Whole Milk 1L", "Dairy", 310, 36).with_barcode("0070852993743"),
        Product::new("prod-010", "Greek Yogurt 500g", "Dairy", 385, 20),
        Product::new("prod-011", "Cheddar Block 400g", "Dairy", 725, 15),
        // Frozen
        Product::new("prod-012", "Vanilla Ice Cream 1L", "Frozen", 650, 12),
        Product::new("prod-013", "Margherita Pizza", "Frozen", 799, 16).with_barcode("4088600276670"),
        Product::new("prod-014", "Mixed Vegetables 1kg", "Frozen", 420, 25),
        // Grocery
        Product::new("prod-015", "White Bread Loaf", "Grocery", 280, 28),
        Product::new("prod-016", "Spaghetti 500g", "Grocery", 165, 50).with_barcode("8076809513722"),
        Product::new("prod-017", "Basmati Rice 1kg", "Grocery", 540, 32),
        Product::new("prod-018", "Canned Tomatoes 400g", "Grocery", 135, 44),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_and_barcodes_are_unique() {
        let products = demo_catalog();

        let ids: HashSet<_> = products.iter().map(|p| &p.id).collect();
        assert_eq!(ids.len(), products.len());

        let barcodes: Vec<_> = products.iter().filter_map(|p| p.barcode.as_ref()).collect();
        let unique: HashSet<_> = barcodes.iter().collect();
        assert_eq!(unique.len(), barcodes.len());
    }

    #[test]
    fn test_seed_covers_five_categories() {
        let products = demo_catalog();
        let categories: HashSet<_> = products.iter().map(|p| p.category.as_str()).collect();
        assert_eq!(
            categories,
            HashSet::from(["Beverages", "Snacks", "Dairy", "Frozen", "Grocery"])
        );
    }

    #[test]
    fn test_seed_products_are_sellable() {
        use meridian_core::validation::{validate_price_cents, validate_scan_code};

        for product in demo_catalog() {
            assert!(product.is_active);
            assert!(product.unit_price_cents > 0);
            assert!(product.stock >= 0);
            validate_price_cents(product.unit_price_cents).unwrap();
            // Every seeded id and barcode must survive the scan prompt
            validate_scan_code(&product.id).unwrap();
            if let Some(barcode) = &product.barcode {
                validate_scan_code(barcode).unwrap();
            }
        }
    }
}
