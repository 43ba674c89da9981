//! # Notification Surface
//!
//! Advisory success/failure signals for user display.
//!
//! Notices are NOT part of the state machine: dropping every one of them on
//! the floor changes nothing about what the engine commits. They exist so a
//! front end (terminal, screen, customer display) can mirror what just
//! happened without polling the cart.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use meridian_core::types::TenderMethod;

// =============================================================================
// Notice
// =============================================================================

/// A user-display signal emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// A product was added to the cart (scan or tap).
    LineAdded { name: String, quantity: i64 },

    /// The cart was cleared by the cashier.
    CartCleared,

    /// A scan code matched nothing in the catalog.
    ProductNotFound { code: String },

    /// A tender validated and the sale completed.
    PaymentAccepted {
        method: TenderMethod,
        change_cents: i64,
    },

    /// A tender failed validation (insufficient cash, declined card).
    TenderRejected { reason: String },

    /// The checkout was cancelled; the cart is intact.
    CheckoutCancelled,
}

// =============================================================================
// Notification Surface Trait
// =============================================================================

/// Receives advisory notices. Implementations must be non-blocking and
/// must not fail - there is nothing for the engine to do about a display
/// that cannot display.
pub trait NotificationSurface {
    fn notify(&self, notice: &Notice);
}

// =============================================================================
// Tracing Notifier
// =============================================================================

/// Routes notices into the tracing pipeline.
///
/// The default surface for headless use: successes at `info`, rejections
/// at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSurface for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        match notice {
            Notice::LineAdded { name, quantity } => {
                info!(name = %name, quantity = %quantity, "Added to cart");
            }
            Notice::CartCleared => info!("Cart cleared"),
            Notice::ProductNotFound { code } => warn!(code = %code, "Product not found"),
            Notice::PaymentAccepted {
                method,
                change_cents,
            } => {
                info!(method = %method, change_cents = %change_cents, "Payment successful");
            }
            Notice::TenderRejected { reason } => warn!(reason = %reason, "Tender rejected"),
            Notice::CheckoutCancelled => info!("Checkout cancelled"),
        }
    }
}

// =============================================================================
// Collecting Notifier
// =============================================================================

/// Test double that retains every notice in order.
#[derive(Debug, Clone, Default)]
pub struct CollectingNotifier {
    notices: std::sync::Arc<std::sync::Mutex<Vec<Notice>>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the notices emitted so far.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("Notifier mutex poisoned").clone()
    }

    /// Drains and returns the collected notices.
    pub fn take(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock().expect("Notifier mutex poisoned"))
    }
}

impl NotificationSurface for CollectingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices
            .lock()
            .expect("Notifier mutex poisoned")
            .push(notice.clone());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_notifier_retains_order() {
        let notifier = CollectingNotifier::new();
        notifier.notify(&Notice::CartCleared);
        notifier.notify(&Notice::ProductNotFound {
            code: "prod-999".to_string(),
        });

        let notices = notifier.take();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0], Notice::CartCleared);
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_notice_serializes_with_kind_tag() {
        let notice = Notice::PaymentAccepted {
            method: TenderMethod::Cash,
            change_cents: 325,
        };
        let json = serde_json::to_string(&notice).unwrap();
        assert!(json.contains("\"kind\":\"payment_accepted\""));
    }
}
