//! # Payment Session
//!
//! The state machine that settles a sale.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Payment Session Lifecycle                            │
//! │                                                                         │
//! │                    ┌────────────────┐                                   │
//! │   begin_checkout   │ AwaitingTender │◄──────┐                           │
//! │  ────────────────► │                │       │ failed validation         │
//! │  (non-empty cart)  └───────┬────────┘       │ (insufficient cash,       │
//! │                            │                │  declined card)           │
//! │                 ┌──────────┼────────────────┘                           │
//! │                 │          │                                            │
//! │        cancel() │          │ submit() ok                                │
//! │                 ▼          ▼                                            │
//! │          ┌───────────┐  ┌───────────┐                                   │
//! │          │ Cancelled │  │ Completed │   both TERMINAL: any further      │
//! │          └───────────┘  └───────────┘   submit/cancel → StaleSession    │
//! │                                                                         │
//! │  "Idle" is the absence of a session on the engine - an empty cart       │
//! │  never gets this far (EmptyCart is raised before construction).         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tender Validation
//! - **Cash**: amount received must cover the total; change is the excess.
//! - **Card / Wallet / UPI**: no amount comparison - settlement is exactly
//!   the amount due, gated only by the injected [`AuthorizationOutcome`]
//!   stub. The stub has a single fixed outcome, no retry or timeout logic;
//!   real gateway semantics are out of scope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Tender, TenderMethod};

// =============================================================================
// Authorization Stub
// =============================================================================

/// Fixed outcome of the stub authorizer for card/wallet/UPI tenders.
///
/// Injected at engine construction. `Approve` mirrors the demo register's
/// always-approve behavior; `Decline` exists so rejection paths can be
/// exercised in tests and demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationOutcome {
    #[default]
    Approve,
    Decline,
}

// =============================================================================
// Session State
// =============================================================================

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Open and ready to accept one tender submission.
    AwaitingTender,
    /// Terminal: a tender validated and the sale is being finalized.
    Completed,
    /// Terminal: the cashier abandoned the checkout. Nothing was finalized,
    /// so there is nothing to void - the cart is left as it was.
    Cancelled,
}

// =============================================================================
// Settlement
// =============================================================================

/// The result of a successful tender submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// How the sale was settled.
    pub method: TenderMethod,

    /// For cash: what the customer handed over.
    pub amount_received: Option<Money>,

    /// Change due back to the customer. Always zero for non-cash tenders.
    pub change: Money,
}

// =============================================================================
// Payment Session
// =============================================================================

/// A single checkout attempt against the current cart.
///
/// Owned by the engine; at most one session is live per register. The
/// session validates tenders against the total it is handed at submit time -
/// it holds no copy of the cart and no cached pricing.
#[derive(Debug, Clone)]
pub struct PaymentSession {
    state: SessionState,
    opened_at: DateTime<Utc>,
}

impl PaymentSession {
    /// Opens a session awaiting its tender.
    ///
    /// The engine is responsible for the non-empty-cart precondition; see
    /// `TransactionEngine::begin_checkout`.
    pub fn open() -> Self {
        PaymentSession {
            state: SessionState::AwaitingTender,
            opened_at: Utc::now(),
        }
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the session has reached a terminal state.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.state != SessionState::AwaitingTender
    }

    /// When the session was opened.
    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Submits a tender against the amount currently due.
    ///
    /// Exactly one submission can succeed. Failed validation returns the
    /// specific error and leaves the session in `AwaitingTender` so the
    /// cashier can retry; it never auto-cancels.
    ///
    /// ## Errors
    /// - `InsufficientTender` - cash below the total due
    /// - `TenderDeclined` - stub authorizer declined a non-cash tender
    /// - `StaleSession` - session already completed or cancelled
    pub fn submit(
        &mut self,
        tender: &Tender,
        total: Money,
        auth: AuthorizationOutcome,
    ) -> CoreResult<Settlement> {
        if self.is_terminal() {
            return Err(CoreError::StaleSession);
        }

        let settlement = match tender {
            Tender::Cash { amount_received } => {
                if *amount_received < total {
                    return Err(CoreError::InsufficientTender {
                        required: total,
                        received: *amount_received,
                    });
                }
                Settlement {
                    method: TenderMethod::Cash,
                    amount_received: Some(*amount_received),
                    change: *amount_received - total,
                }
            }
            Tender::Card | Tender::Wallet | Tender::Upi => {
                if auth == AuthorizationOutcome::Decline {
                    return Err(CoreError::TenderDeclined);
                }
                Settlement {
                    method: tender.method(),
                    amount_received: None,
                    change: Money::zero(),
                }
            }
        };

        self.state = SessionState::Completed;
        Ok(settlement)
    }

    /// Abandons the checkout.
    ///
    /// Terminal: a cancelled session accepts nothing further. The cart is
    /// untouched - cancellation abandons the payment attempt, not the sale
    /// in progress.
    ///
    /// ## Errors
    /// - `StaleSession` - session already completed or cancelled
    pub fn cancel(&mut self) -> CoreResult<()> {
        if self.is_terminal() {
            return Err(CoreError::StaleSession);
        }
        self.state = SessionState::Cancelled;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cash(cents: i64) -> Tender {
        Tender::Cash {
            amount_received: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_cash_exact_tender_yields_zero_change() {
        let mut session = PaymentSession::open();
        let settlement = session
            .submit(&cash(2675), Money::from_cents(2675), AuthorizationOutcome::Approve)
            .unwrap();

        assert_eq!(settlement.method, TenderMethod::Cash);
        assert_eq!(settlement.change, Money::zero());
        assert_eq!(settlement.amount_received, Some(Money::from_cents(2675)));
        assert_eq!(session.state(), SessionState::Completed);
    }

    #[test]
    fn test_cash_overpayment_yields_change() {
        let mut session = PaymentSession::open();
        // total + $5.00 back as change
        let settlement = session
            .submit(&cash(3175), Money::from_cents(2675), AuthorizationOutcome::Approve)
            .unwrap();

        assert_eq!(settlement.change, Money::from_cents(500));
    }

    #[test]
    fn test_cash_underpayment_is_retryable() {
        let mut session = PaymentSession::open();
        let err = session
            .submit(&cash(2000), Money::from_cents(2675), AuthorizationOutcome::Approve)
            .unwrap_err();

        assert!(matches!(err, CoreError::InsufficientTender { .. }));
        // Session stays open; a corrected tender succeeds
        assert_eq!(session.state(), SessionState::AwaitingTender);

        session
            .submit(&cash(2700), Money::from_cents(2675), AuthorizationOutcome::Approve)
            .unwrap();
        assert_eq!(session.state(), SessionState::Completed);
    }

    #[test]
    fn test_card_approves_with_zero_change() {
        let mut session = PaymentSession::open();
        let settlement = session
            .submit(&Tender::Card, Money::from_cents(2675), AuthorizationOutcome::Approve)
            .unwrap();

        assert_eq!(settlement.method, TenderMethod::Card);
        assert_eq!(settlement.amount_received, None);
        assert_eq!(settlement.change, Money::zero());
    }

    #[test]
    fn test_declined_tender_keeps_session_open() {
        let mut session = PaymentSession::open();
        let err = session
            .submit(&Tender::Upi, Money::from_cents(1000), AuthorizationOutcome::Decline)
            .unwrap_err();

        assert!(matches!(err, CoreError::TenderDeclined));
        assert_eq!(session.state(), SessionState::AwaitingTender);
    }

    #[test]
    fn test_submit_after_completion_is_stale() {
        let mut session = PaymentSession::open();
        session
            .submit(&cash(1000), Money::from_cents(1000), AuthorizationOutcome::Approve)
            .unwrap();

        let err = session
            .submit(&cash(1000), Money::from_cents(1000), AuthorizationOutcome::Approve)
            .unwrap_err();
        assert!(matches!(err, CoreError::StaleSession));
        assert_eq!(session.state(), SessionState::Completed);
    }

    #[test]
    fn test_cancel_is_terminal() {
        let mut session = PaymentSession::open();
        session.cancel().unwrap();
        assert_eq!(session.state(), SessionState::Cancelled);

        assert!(matches!(session.cancel(), Err(CoreError::StaleSession)));
        let err = session
            .submit(&cash(1000), Money::from_cents(500), AuthorizationOutcome::Approve)
            .unwrap_err();
        assert!(matches!(err, CoreError::StaleSession));
    }
}
