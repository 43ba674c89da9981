//! # Transaction Engine
//!
//! The facade that sequences catalog lookup, cart mutation, pricing, and
//! payment settlement for one register.
//!
//! ## One Sale, One Direction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Flow of a Single Sale                              │
//! │                                                                         │
//! │  scan / add ──► Cart mutation ──► pricing recomputed ──► cart view      │
//! │                     ▲                                        │          │
//! │                     │ (repeat until the basket is complete)  │          │
//! │                     └────────────────────────────────────────┘          │
//! │                                                                         │
//! │  begin_checkout ──► PaymentSession opened (cart must be non-empty)      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  submit_tender ──► validated against CURRENT total                      │
//! │         │                                                               │
//! │         ├── invalid ──► specific error, session stays open, NO side     │
//! │         │               effects                                         │
//! │         │                                                               │
//! │         └── valid ──► Sale built from commit-time snapshot              │
//! │                       Cart cleared, epoch bumped                        │
//! │                       ─ ─ ─ ─ lock released ─ ─ ─ ─                     │
//! │                       inventory decremented per line (best-effort)      │
//! │                       sale journaled (best-effort)                      │
//! │                       PaymentAccepted notice emitted                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency Model
//! Single active register: one cart, at most one payment session. Every
//! mutation runs under one `Mutex` and completes before the next is
//! accepted; the lock is never held across an await.
//!
//! The only async gap is catalog resolution during [`scan`]. The engine
//! captures the register **epoch** before awaiting and re-checks it after:
//! a clear, completion, or cancellation in the interim bumps the epoch, and
//! the late resolution is discarded as [`StaleSession`] instead of mutating
//! a cart it no longer belongs to (optimistic cancel, not fire-and-forget).
//!
//! [`scan`]: TransactionEngine::scan
//! [`StaleSession`]: CoreError::StaleSession

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use meridian_core::cart::Cart;
use meridian_core::error::{CoreError, CoreResult};
use meridian_core::pricing::PricingSnapshot;
use meridian_core::session::{AuthorizationOutcome, PaymentSession};
use meridian_core::types::{CartLine, Product, Sale, TaxRate, Tender};
use meridian_core::validation::{validate_scan_code, validate_search_term};

use crate::catalog::CatalogSource;
use crate::inventory::InventorySink;
use crate::journal::SaleSink;
use crate::notify::{Notice, NotificationSurface};

// =============================================================================
// Cart View
// =============================================================================

/// What the register renders after any cart operation: the ordered lines
/// plus pricing recomputed from them at this instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub pricing: PricingSnapshot,
}

// =============================================================================
// Register State
// =============================================================================

/// The mutable state of one register, guarded by the engine's mutex.
#[derive(Debug)]
struct RegisterState {
    cart: Cart,
    session: Option<PaymentSession>,
    /// Bumped on clear, completion, and cancellation; in-flight scan
    /// resolutions from an older epoch are discarded.
    epoch: u64,
}

// =============================================================================
// Transaction Engine
// =============================================================================

/// Orchestrates one register's checkout flow over injected capabilities.
///
/// Generic over its collaborators so the same engine runs against the
/// in-memory adapters (demo register, tests) or real implementations,
/// without trait objects.
///
/// ## Usage
/// ```rust,ignore
/// let engine = TransactionEngine::new(
///     catalog, inventory, journal, TracingNotifier,
///     TaxRate::from_bps(700),
///     AuthorizationOutcome::Approve,
/// );
///
/// engine.scan("5449000000996").await?;
/// let due = engine.begin_checkout()?;
/// let sale = engine.submit_tender(&Tender::Cash { amount_received }).await?;
/// ```
#[derive(Debug)]
pub struct TransactionEngine<C, I, J, N> {
    catalog: C,
    inventory: I,
    journal: J,
    notifier: N,
    tax_rate: TaxRate,
    auth: AuthorizationOutcome,
    register: Mutex<RegisterState>,
}

impl<C, I, J, N> TransactionEngine<C, I, J, N>
where
    C: CatalogSource,
    I: InventorySink,
    J: SaleSink,
    N: NotificationSurface,
{
    /// Creates an engine with an empty cart and no open session.
    pub fn new(
        catalog: C,
        inventory: I,
        journal: J,
        notifier: N,
        tax_rate: TaxRate,
        auth: AuthorizationOutcome,
    ) -> Self {
        TransactionEngine {
            catalog,
            inventory,
            journal,
            notifier,
            tax_rate,
            auth,
            register: Mutex::new(RegisterState {
                cart: Cart::new(),
                session: None,
                epoch: 0,
            }),
        }
    }

    /// The flat tax rate this register prices with.
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    fn lock(&self) -> MutexGuard<'_, RegisterState> {
        self.register.lock().expect("Register mutex poisoned")
    }

    fn view(state: &RegisterState, rate: TaxRate) -> CartView {
        CartView {
            lines: state.cart.lines().to_vec(),
            pricing: state.cart.pricing(rate),
        }
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// Current lines and freshly computed pricing.
    pub fn cart_view(&self) -> CartView {
        Self::view(&self.lock(), self.tax_rate)
    }

    /// Resolves a scan code and adds one unit of the product to the cart.
    ///
    /// The catalog await happens OUTSIDE the register lock. The resolution
    /// is applied only if the register epoch is unchanged - otherwise the
    /// cart was cleared or the session ended mid-flight, and the result is
    /// discarded with `StaleSession`.
    ///
    /// ## Errors
    /// - `Validation` - malformed scan code
    /// - `ProductNotFound` - no catalog match; cart untouched
    /// - `ProductInactive` - product exists but is soft-disabled
    /// - `StaleSession` - resolution arrived after a clear/completion/cancel
    pub async fn scan(&self, code: &str) -> CoreResult<CartView> {
        let code = validate_scan_code(code)?;
        debug!(code = %code, "scan");

        let epoch = self.lock().epoch;
        let resolved = self.catalog.resolve(&code).await;

        let mut state = self.lock();
        if state.epoch != epoch {
            debug!(code = %code, "Discarding stale scan resolution");
            return Err(CoreError::StaleSession);
        }

        let product = match resolved {
            Some(product) => product,
            None => {
                drop(state);
                self.notifier
                    .notify(&Notice::ProductNotFound { code: code.clone() });
                return Err(CoreError::ProductNotFound(code));
            }
        };

        if !product.is_active {
            return Err(CoreError::ProductInactive(product.id));
        }

        state.cart.add_line(&product, 1)?;
        let view = Self::view(&state, self.tax_rate);
        drop(state);

        self.notifier.notify(&Notice::LineAdded {
            name: product.name,
            quantity: 1,
        });
        Ok(view)
    }

    /// Resolves a code without touching the cart (pure read).
    ///
    /// Backs the register's tap-to-add path: look the product up once,
    /// show it, then [`add_product`](TransactionEngine::add_product) it
    /// with a chosen quantity.
    pub async fn lookup(&self, code: &str) -> CoreResult<Product> {
        let code = validate_scan_code(code)?;
        self.catalog
            .resolve(&code)
            .await
            .ok_or(CoreError::ProductNotFound(code))
    }

    /// Adds an already-resolved product to the cart (tap-to-add).
    pub fn add_product(&self, product: &Product, quantity: i64) -> CoreResult<CartView> {
        if !product.is_active {
            return Err(CoreError::ProductInactive(product.id.clone()));
        }

        let mut state = self.lock();
        state.cart.add_line(product, quantity)?;
        let view = Self::view(&state, self.tax_rate);
        drop(state);

        self.notifier.notify(&Notice::LineAdded {
            name: product.name.clone(),
            quantity,
        });
        Ok(view)
    }

    /// Sets a line's quantity in place; quantity below one removes it.
    pub fn set_quantity(&self, product_id: &str, quantity: i64) -> CoreResult<CartView> {
        let mut state = self.lock();
        state.cart.set_quantity(product_id, quantity)?;
        Ok(Self::view(&state, self.tax_rate))
    }

    /// Removes a line; no-op if the product is not in the cart.
    pub fn remove_line(&self, product_id: &str) -> CartView {
        let mut state = self.lock();
        state.cart.remove_line(product_id);
        Self::view(&state, self.tax_rate)
    }

    /// Clears the cart and abandons any open payment session.
    ///
    /// Bumps the epoch, so in-flight scan resolutions for the old cart are
    /// discarded.
    pub fn clear_cart(&self) -> CartView {
        let mut state = self.lock();
        state.cart.clear();
        state.session = None;
        state.epoch += 1;
        let view = Self::view(&state, self.tax_rate);
        drop(state);

        self.notifier.notify(&Notice::CartCleared);
        view
    }

    // =========================================================================
    // Catalog Passthrough (pure reads)
    // =========================================================================

    /// Case-insensitive catalog search for the register's find command.
    pub async fn search_products(&self, term: &str) -> CoreResult<Vec<Product>> {
        let term = validate_search_term(term)?;
        Ok(self.catalog.search(&term).await)
    }

    /// Active products in a category, for the register's browse tabs.
    pub async fn products_in_category(&self, category: &str) -> Vec<Product> {
        self.catalog.list_by_category(category).await
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Opens a payment session and returns the amount due.
    ///
    /// Idempotent while a session is already awaiting its tender: calling
    /// again just returns the current pricing.
    ///
    /// ## Errors
    /// - `EmptyCart` - no lines to sell; no session is opened
    pub fn begin_checkout(&self) -> CoreResult<PricingSnapshot> {
        let mut state = self.lock();
        if state.cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        if state.session.is_none() {
            state.session = Some(PaymentSession::open());
            debug!("Payment session opened");
        }
        Ok(state.cart.pricing(self.tax_rate))
    }

    /// Submits a tender to the open session.
    ///
    /// On success the sale is built from the commit-time cart snapshot, the
    /// cart is cleared, and the sale is emitted to the inventory and
    /// journal sinks best-effort - a sink failure is logged at `warn` and
    /// never rolls back the committed sale.
    ///
    /// On validation failure the specific error is returned with no side
    /// effects: cart, session, and sinks are all untouched.
    ///
    /// ## Errors
    /// - `StaleSession` - no session is open
    /// - `InsufficientTender` / `TenderDeclined` - retryable, session stays
    ///   open
    pub async fn submit_tender(&self, tender: &Tender) -> CoreResult<Sale> {
        let committed = {
            let mut state = self.lock();
            let session = state.session.as_mut().ok_or(CoreError::StaleSession)?;
            let pricing = state.cart.pricing(self.tax_rate);

            match session.submit(tender, pricing.total(), self.auth) {
                Ok(settlement) => {
                    let sale = Sale {
                        id: Uuid::new_v4().to_string(),
                        lines: state.cart.lines().to_vec(),
                        subtotal_cents: pricing.subtotal_cents,
                        tax_cents: pricing.tax_cents,
                        total_cents: pricing.total_cents,
                        tender_method: settlement.method,
                        amount_received_cents: settlement.amount_received.map(|m| m.cents()),
                        change_cents: settlement.change.cents(),
                        completed_at: Utc::now(),
                    };
                    state.cart.clear();
                    state.session = None;
                    state.epoch += 1;
                    Ok(sale)
                }
                Err(err) => Err(err),
            }
        };

        let sale = match committed {
            Ok(sale) => sale,
            Err(err) => {
                if err.is_retryable() {
                    self.notifier.notify(&Notice::TenderRejected {
                        reason: err.to_string(),
                    });
                }
                return Err(err);
            }
        };

        // The sale is committed; everything below is best-effort.
        for line in &sale.lines {
            if let Err(err) = self
                .inventory
                .decrement_stock(&line.product_id, line.quantity)
                .await
            {
                warn!(product_id = %line.product_id, error = %err, "Inventory decrement failed");
            }
        }

        if let Err(err) = self.journal.record(&sale).await {
            warn!(sale_id = %sale.id, error = %err, "Journal record failed");
        }

        self.notifier.notify(&Notice::PaymentAccepted {
            method: sale.tender_method,
            change_cents: sale.change_cents,
        });
        info!(
            sale_id = %sale.id,
            total = %sale.total(),
            lines = sale.lines.len(),
            "Sale completed"
        );
        Ok(sale)
    }

    /// Abandons the open payment session. The cart remains intact for
    /// further editing; in-flight scans are invalidated.
    ///
    /// ## Errors
    /// - `StaleSession` - no session is open
    pub fn cancel_checkout(&self) -> CoreResult<()> {
        let mut state = self.lock();
        let mut session = state.session.take().ok_or(CoreError::StaleSession)?;
        session.cancel()?;
        state.epoch += 1;
        drop(state);

        self.notifier.notify(&Notice::CheckoutCancelled);
        info!("Checkout cancelled, cart retained");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::Notify;

    use meridian_core::money::Money;

    use crate::catalog::InMemoryCatalog;
    use crate::inventory::InMemoryInventory;
    use crate::journal::InMemoryJournal;
    use crate::notify::CollectingNotifier;

    type TestEngine =
        TransactionEngine<InMemoryCatalog, InMemoryInventory, InMemoryJournal, CollectingNotifier>;

    fn demo_products() -> Vec<Product> {
        vec![
            Product::new("prod-a", "Widget A", "Misc", 1000, 10).with_barcode("111111"),
            Product::new("prod-b", "Widget B", "Misc", 500, 5),
            Product {
                is_active: false,
                ..Product::new("prod-x", "Retired", "Misc", 100, 0)
            },
        ]
    }

    struct Harness {
        engine: TestEngine,
        inventory: InMemoryInventory,
        journal: InMemoryJournal,
        notifier: CollectingNotifier,
    }

    fn harness_with_auth(auth: AuthorizationOutcome) -> Harness {
        let products = demo_products();
        let inventory = InMemoryInventory::from_products(&products);
        let journal = InMemoryJournal::new();
        let notifier = CollectingNotifier::new();
        let engine = TransactionEngine::new(
            InMemoryCatalog::new(products),
            inventory.clone(),
            journal.clone(),
            notifier.clone(),
            TaxRate::from_bps(700),
            auth,
        );
        Harness {
            engine,
            inventory,
            journal,
            notifier,
        }
    }

    fn harness() -> Harness {
        harness_with_auth(AuthorizationOutcome::Approve)
    }

    fn cash(cents: i64) -> Tender {
        Tender::Cash {
            amount_received: Money::from_cents(cents),
        }
    }

    #[tokio::test]
    async fn test_scan_adds_and_merges() {
        let h = harness();

        h.engine.scan("prod-a").await.unwrap();
        let view = h.engine.scan("111111").await.unwrap(); // barcode, same product

        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].quantity, 2);
        assert_eq!(view.pricing.subtotal_cents, 2000);
    }

    #[tokio::test]
    async fn test_scan_unknown_code_leaves_cart_empty() {
        let h = harness();

        let err = h.engine.scan("prod-999").await.unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(_)));
        assert!(h.engine.cart_view().lines.is_empty());
        assert!(h
            .notifier
            .notices()
            .iter()
            .any(|n| matches!(n, Notice::ProductNotFound { code } if code == "prod-999")));
    }

    #[tokio::test]
    async fn test_scan_inactive_product_is_refused() {
        let h = harness();

        let err = h.engine.scan("prod-x").await.unwrap_err();
        assert!(matches!(err, CoreError::ProductInactive(_)));
        assert!(h.engine.cart_view().lines.is_empty());
    }

    #[tokio::test]
    async fn test_begin_checkout_on_empty_cart() {
        let h = harness();

        let err = h.engine.begin_checkout().unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
        // No session was opened: a tender now is stale
        let err = h.engine.submit_tender(&cash(1000)).await.unwrap_err();
        assert!(matches!(err, CoreError::StaleSession));
    }

    #[tokio::test]
    async fn test_full_cash_sale() {
        let h = harness();

        // A (10.00) × 2, B (5.00) × 1 at 7% -> 25.00 / 1.75 / 26.75
        h.engine.scan("prod-a").await.unwrap();
        h.engine.scan("prod-a").await.unwrap();
        h.engine.scan("prod-b").await.unwrap();

        let due = h.engine.begin_checkout().unwrap();
        assert_eq!(due.subtotal_cents, 2500);
        assert_eq!(due.tax_cents, 175);
        assert_eq!(due.total_cents, 2675);

        // total + 5.00 -> change 5.00
        let sale = h.engine.submit_tender(&cash(3175)).await.unwrap();
        assert_eq!(sale.change_cents, 500);
        assert_eq!(sale.amount_received_cents, Some(3175));
        assert_eq!(sale.total_quantity(), 3);

        // Cart emptied, exactly one sale journaled with the commit snapshot
        assert!(h.engine.cart_view().lines.is_empty());
        let journaled = h.journal.sales();
        assert_eq!(journaled.len(), 1);
        assert_eq!(journaled[0].lines, sale.lines);

        // Inventory decremented once per line
        assert_eq!(h.inventory.level_of("prod-a"), Some(8));
        assert_eq!(h.inventory.level_of("prod-b"), Some(4));

        assert!(h.notifier.notices().iter().any(|n| matches!(
            n,
            Notice::PaymentAccepted { change_cents: 500, .. }
        )));
    }

    #[tokio::test]
    async fn test_exact_cash_gives_zero_change() {
        let h = harness();
        h.engine.scan("prod-a").await.unwrap();
        h.engine.begin_checkout().unwrap();

        // 10.00 + 7% = 10.70
        let sale = h.engine.submit_tender(&cash(1070)).await.unwrap();
        assert_eq!(sale.change_cents, 0);
    }

    #[tokio::test]
    async fn test_insufficient_tender_is_retryable() {
        let h = harness();
        h.engine.scan("prod-a").await.unwrap();
        h.engine.begin_checkout().unwrap();

        let err = h.engine.submit_tender(&cash(1000)).await.unwrap_err();
        assert!(matches!(err, CoreError::InsufficientTender { .. }));

        // No side effects: cart intact, nothing journaled, stock untouched
        assert_eq!(h.engine.cart_view().lines.len(), 1);
        assert!(h.journal.is_empty());
        assert_eq!(h.inventory.level_of("prod-a"), Some(10));

        // Session is still open: a corrected tender settles the sale
        let sale = h.engine.submit_tender(&cash(1100)).await.unwrap();
        assert_eq!(sale.change_cents, 30);
    }

    #[tokio::test]
    async fn test_card_settles_for_amount_due() {
        let h = harness();
        h.engine.scan("prod-b").await.unwrap();
        h.engine.begin_checkout().unwrap();

        let sale = h.engine.submit_tender(&Tender::Card).await.unwrap();
        assert_eq!(sale.amount_received_cents, None);
        assert_eq!(sale.change_cents, 0);
        assert_eq!(sale.total_cents, 535);
    }

    #[tokio::test]
    async fn test_declined_authorization_keeps_session_open() {
        let h = harness_with_auth(AuthorizationOutcome::Decline);
        h.engine.scan("prod-a").await.unwrap();
        h.engine.begin_checkout().unwrap();

        let err = h.engine.submit_tender(&Tender::Wallet).await.unwrap_err();
        assert!(matches!(err, CoreError::TenderDeclined));
        assert_eq!(h.engine.cart_view().lines.len(), 1);
        assert!(h.journal.is_empty());

        // Cash is not gated by the authorizer
        let sale = h.engine.submit_tender(&cash(1070)).await.unwrap();
        assert_eq!(sale.change_cents, 0);
    }

    #[tokio::test]
    async fn test_cancel_checkout_keeps_cart() {
        let h = harness();
        h.engine.scan("prod-a").await.unwrap();
        h.engine.begin_checkout().unwrap();

        h.engine.cancel_checkout().unwrap();

        // Cart intact for further editing; session gone
        assert_eq!(h.engine.cart_view().lines.len(), 1);
        let err = h.engine.submit_tender(&cash(5000)).await.unwrap_err();
        assert!(matches!(err, CoreError::StaleSession));

        // And checkout can be reopened
        let due = h.engine.begin_checkout().unwrap();
        assert_eq!(due.total_cents, 1070);
    }

    #[tokio::test]
    async fn test_cancel_without_session_is_stale() {
        let h = harness();
        let err = h.engine.cancel_checkout().unwrap_err();
        assert!(matches!(err, CoreError::StaleSession));
    }

    #[tokio::test]
    async fn test_begin_checkout_is_idempotent() {
        let h = harness();
        h.engine.scan("prod-a").await.unwrap();

        let first = h.engine.begin_checkout().unwrap();
        let second = h.engine.begin_checkout().unwrap();
        assert_eq!(first, second);

        // The one open session still settles normally
        h.engine.submit_tender(&cash(1070)).await.unwrap();
        assert_eq!(h.journal.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_cart_abandons_session() {
        let h = harness();
        h.engine.scan("prod-a").await.unwrap();
        h.engine.begin_checkout().unwrap();

        h.engine.clear_cart();

        let err = h.engine.submit_tender(&cash(5000)).await.unwrap_err();
        assert!(matches!(err, CoreError::StaleSession));
        assert!(h.engine.cart_view().lines.is_empty());
    }

    #[tokio::test]
    async fn test_sink_failure_does_not_roll_back_sale() {
        let h = harness();
        // Remove prod-a from inventory tracking to force a sink error
        let products = demo_products();
        let engine = TransactionEngine::new(
            InMemoryCatalog::new(products),
            InMemoryInventory::new(), // tracks nothing -> UnknownProduct on decrement
            h.journal.clone(),
            h.notifier.clone(),
            TaxRate::from_bps(700),
            AuthorizationOutcome::Approve,
        );

        engine.scan("prod-a").await.unwrap();
        engine.begin_checkout().unwrap();
        let sale = engine.submit_tender(&cash(1070)).await.unwrap();

        // The sale committed and journaled despite the inventory failure
        assert_eq!(sale.total_cents, 1070);
        assert_eq!(h.journal.len(), 1);
    }

    /// Catalog wrapper that parks `resolve` until the test releases it,
    /// so a cart mutation can be interleaved mid-scan.
    #[derive(Clone)]
    struct GatedCatalog {
        inner: InMemoryCatalog,
        reached: Arc<Notify>,
        release: Arc<Notify>,
    }

    impl CatalogSource for GatedCatalog {
        async fn resolve(&self, code: &str) -> Option<Product> {
            self.reached.notify_one();
            self.release.notified().await;
            self.inner.resolve(code).await
        }

        async fn list_by_category(&self, category: &str) -> Vec<Product> {
            self.inner.list_by_category(category).await
        }

        async fn search(&self, term: &str) -> Vec<Product> {
            self.inner.search(term).await
        }
    }

    #[tokio::test]
    async fn test_stale_scan_resolution_is_discarded() {
        let reached = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let catalog = GatedCatalog {
            inner: InMemoryCatalog::new(demo_products()),
            reached: reached.clone(),
            release: release.clone(),
        };
        let engine = TransactionEngine::new(
            catalog,
            InMemoryInventory::new(),
            InMemoryJournal::new(),
            CollectingNotifier::new(),
            TaxRate::from_bps(700),
            AuthorizationOutcome::Approve,
        );

        // Clear the cart while the scan is parked inside catalog resolution
        let (scan_result, _) = tokio::join!(engine.scan("prod-a"), async {
            reached.notified().await;
            engine.clear_cart();
            release.notify_one();
        });

        let err = scan_result.unwrap_err();
        assert!(matches!(err, CoreError::StaleSession));
        assert!(engine.cart_view().lines.is_empty());
    }
}
