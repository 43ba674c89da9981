//! # meridian-checkout: Transaction Engine for Meridian POS
//!
//! This crate orchestrates the pure logic in `meridian-core` against the
//! register's collaborators, all expressed as injected capabilities.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Transaction Engine Architecture                     │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                 TransactionEngine (Facade)                       │  │
//! │  │                                                                  │  │
//! │  │  Owns the single active Cart + PaymentSession per register.      │  │
//! │  │  All mutation serialized behind one mutex; the lock is never     │  │
//! │  │  held across an await.                                           │  │
//! │  └──────┬──────────────┬──────────────┬──────────────┬──────────────┘  │
//! │         │              │              │              │                  │
//! │         ▼              ▼              ▼              ▼                  │
//! │  ┌────────────┐ ┌────────────┐ ┌────────────┐ ┌──────────────────┐    │
//! │  │ Catalog    │ │ Inventory  │ │ SaleSink   │ │ Notification     │    │
//! │  │ Source     │ │ Sink       │ │ (journal)  │ │ Surface          │    │
//! │  │            │ │            │ │            │ │                  │    │
//! │  │ resolve    │ │ decrement  │ │ record     │ │ advisory user    │    │
//! │  │ search     │ │ stock per  │ │ completed  │ │ display signals  │    │
//! │  │ browse     │ │ sale line  │ │ sales      │ │                  │    │
//! │  └────────────┘ └────────────┘ └────────────┘ └──────────────────┘    │
//! │                                                                         │
//! │  Catalog is a pure read. The three right-hand collaborators are         │
//! │  BEST-EFFORT: a failure after the sale commits is logged at warn        │
//! │  and never rolls the sale back.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - The `TransactionEngine` facade
//! - [`catalog`] - `CatalogSource` trait + in-memory adapter
//! - [`inventory`] - `InventorySink` trait + in-memory adapter
//! - [`journal`] - `SaleSink` trait + in-memory journal with JSON export
//! - [`notify`] - `NotificationSurface` trait, notices, tracing adapter
//! - [`error`] - Sink error types

pub mod catalog;
pub mod engine;
pub mod error;
pub mod inventory;
pub mod journal;
pub mod notify;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{CatalogSource, InMemoryCatalog};
pub use engine::{CartView, TransactionEngine};
pub use error::{SinkError, SinkResult};
pub use inventory::{InMemoryInventory, InventorySink};
pub use journal::{InMemoryJournal, SaleSink};
pub use notify::{CollectingNotifier, Notice, NotificationSurface, TracingNotifier};
