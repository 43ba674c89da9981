//! # Register Configuration
//!
//! Stores register configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`MERIDIAN_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.
//! If hot-reloading is added later, we'd wrap in `RwLock`.

use meridian_core::session::AuthorizationOutcome;
use meridian_core::types::TaxRate;
use meridian_core::validation::validate_tax_rate_bps;
use serde::{Deserialize, Serialize};

/// Register configuration.
///
/// ## Fields
/// Most fields have sensible defaults for the demo store.
/// Production deployments should configure these properly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterConfig {
    /// Store name (displayed on receipts)
    pub store_name: String,

    /// Store address lines (for receipts)
    pub store_address: Vec<String>,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Flat tax rate in basis points
    /// e.g., 700 = 7.00%
    pub tax_rate_bps: u32,

    /// Fixed outcome of the stub authorizer for card/wallet/UPI tenders
    pub auth_outcome: AuthorizationOutcome,
}

impl Default for RegisterConfig {
    /// Returns default configuration suitable for the demo register.
    ///
    /// ## Default Values
    /// - Store: "Meridian Demo Store"
    /// - Currency: USD ($)
    /// - Tax: 7.00% flat
    /// - Authorizer: always approve
    fn default() -> Self {
        RegisterConfig {
            store_name: "Meridian Demo Store".to_string(),
            store_address: vec!["42 Market Street".to_string(), "Springfield, ST 04201".to_string()],
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            tax_rate_bps: 700, // 7.00%
            auth_outcome: AuthorizationOutcome::Approve,
        }
    }
}

impl RegisterConfig {
    /// Creates a RegisterConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `MERIDIAN_STORE_NAME`: Override store name
    /// - `MERIDIAN_TAX_RATE`: Override tax rate as a percentage (e.g., "7.5")
    /// - `MERIDIAN_AUTH_OUTCOME`: "approve" or "decline" for the stub
    ///   authorizer
    pub fn from_env() -> Self {
        let mut config = RegisterConfig::default();

        if let Ok(store_name) = std::env::var("MERIDIAN_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(tax_rate_str) = std::env::var("MERIDIAN_TAX_RATE") {
            if let Ok(rate) = tax_rate_str.parse::<f64>() {
                let bps = TaxRate::from_percentage(rate).bps();
                // A nonsense rate keeps the default rather than pricing with it
                if validate_tax_rate_bps(bps).is_ok() {
                    config.tax_rate_bps = bps;
                }
            }
        }

        if let Ok(outcome) = std::env::var("MERIDIAN_AUTH_OUTCOME") {
            config.auth_outcome = match outcome.to_lowercase().as_str() {
                "decline" => AuthorizationOutcome::Decline,
                _ => AuthorizationOutcome::Approve,
            };
        }

        config
    }

    /// The configured tax rate as a TaxRate.
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = RegisterConfig::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}
