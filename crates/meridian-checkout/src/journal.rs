//! # Sale Journal
//!
//! Historical storage for completed sales.
//!
//! The core does not depend on the journal's durability: a sale that fails
//! to record is logged and lost, and the checkout that produced it is
//! unaffected. The in-memory adapter retains sales in completion order and
//! exports them as JSON for the register's reporting commands.

use std::sync::{Arc, Mutex};

use meridian_core::types::Sale;
use tracing::debug;

use crate::error::SinkResult;

// =============================================================================
// Sale Sink Trait
// =============================================================================

/// Accepts completed sales for historical/reporting storage.
pub trait SaleSink {
    /// Records a finalized sale. Best-effort; the caller logs failures and
    /// never retries.
    async fn record(&self, sale: &Sale) -> SinkResult<()>;
}

// =============================================================================
// In-Memory Journal
// =============================================================================

/// Completed sales in completion order.
///
/// Cheap to clone: the register keeps a handle for its `sales`/`export`
/// commands while the engine records through another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJournal {
    sales: Arc<Mutex<Vec<Sale>>>,
}

impl InMemoryJournal {
    /// Creates an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sales recorded.
    pub fn len(&self) -> usize {
        self.sales.lock().expect("Journal mutex poisoned").len()
    }

    /// Whether any sales have been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all recorded sales, oldest first.
    pub fn sales(&self) -> Vec<Sale> {
        self.sales.lock().expect("Journal mutex poisoned").clone()
    }

    /// Exports the journal as pretty-printed JSON.
    pub fn export_json(&self) -> SinkResult<String> {
        let sales = self.sales.lock().expect("Journal mutex poisoned");
        Ok(serde_json::to_string_pretty(&*sales)?)
    }
}

impl SaleSink for InMemoryJournal {
    async fn record(&self, sale: &Sale) -> SinkResult<()> {
        let mut sales = self.sales.lock().expect("Journal mutex poisoned");
        sales.push(sale.clone());
        debug!(sale_id = %sale.id, total = %sale.total(), "Sale journaled");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
