//! # Meridian Register Entry Point
//!
//! The terminal register binary.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Register Startup                                  │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: INFO, can be overridden with RUST_LOG                    │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • Defaults + MERIDIAN_* environment overrides                       │
//! │                                                                         │
//! │  3. Seed Demo Data ───────────────────────────────────────────────────► │
//! │     • In-memory catalog across five categories                          │
//! │     • Inventory levels taken from the seeded products                   │
//! │                                                                         │
//! │  4. Build the Engine ─────────────────────────────────────────────────► │
//! │     • One cart, one register, adapters injected                         │
//! │                                                                         │
//! │  5. Run the Command Loop ─────────────────────────────────────────────► │
//! │     • scan / cart / checkout / tender / receipt                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod receipt;
mod repl;
mod seed;

use tracing::info;
use tracing_subscriber::EnvFilter;

use meridian_checkout::{
    InMemoryCatalog, InMemoryInventory, InMemoryJournal, TransactionEngine,
};

use config::RegisterConfig;
use repl::ConsoleNotifier;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let config = RegisterConfig::from_env();
    info!(store = %config.store_name, tax_bps = config.tax_rate_bps, "Starting Meridian register");

    let products = seed::demo_catalog();
    let inventory = InMemoryInventory::from_products(&products);
    let journal = InMemoryJournal::new();
    let catalog = InMemoryCatalog::new(products);
    info!(products = catalog.len(), "Demo catalog seeded");

    let engine = TransactionEngine::new(
        catalog,
        inventory.clone(),
        journal.clone(),
        ConsoleNotifier,
        config.tax_rate(),
        config.auth_outcome,
    );

    repl::run(&engine, &journal, &inventory, &config).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=meridian=trace` - Show trace for meridian crates only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,meridian=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
