//! # Validation Module
//!
//! Input validation for values arriving at the register boundary.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Register input parsing                                        │
//! │  ├── Command shape (scan needs a code, cash needs an amount)            │
//! │  └── Immediate cashier feedback                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Scan code / search term shape                                      │
//! │  └── Numeric ranges (tax rate, prices)                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Domain invariants (cart, session)                             │
//! │  └── Quantity bounds, tender sufficiency                                │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a scan code (product id or barcode).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ## Returns
/// The trimmed code.
///
/// ## Example
/// ```rust
/// use meridian_core::validation::validate_scan_code;
///
/// assert_eq!(validate_scan_code(" prod-001 ").unwrap(), "prod-001");
/// assert!(validate_scan_code("").is_err());
/// assert!(validate_scan_code("has space").is_err());
/// ```
pub fn validate_scan_code(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 50,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(code.to_string())
}

/// Validates a catalog search term.
///
/// ## Rules
/// - Can be empty (returns all/default results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed term.
pub fn validate_search_term(term: &str) -> ValidationResult<String> {
    let term = term.trim();

    if term.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(term.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
/// - Most tax rates are 0-2500 (0% to 25%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_scan_code() {
        assert_eq!(validate_scan_code("prod-001").unwrap(), "prod-001");
        assert_eq!(validate_scan_code("5449000000996").unwrap(), "5449000000996");
        assert_eq!(validate_scan_code("  BEV_12 ").unwrap(), "BEV_12");

        assert!(validate_scan_code("").is_err());
        assert!(validate_scan_code("   ").is_err());
        assert!(validate_scan_code("has space").is_err());
        assert!(validate_scan_code(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_search_term() {
        assert_eq!(validate_search_term("cola").unwrap(), "cola");
        assert_eq!(validate_search_term("").unwrap(), "");
        assert!(validate_search_term(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(700).is_ok());
        assert!(validate_tax_rate_bps(10000).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
    }
}
