//! Payment confirmation.

use tracing::info;

use crate::domain::Bill;
use crate::error::DomainResult;

/// Confirms payment for a bill before the facility releases the slot.
///
/// Real gateway integration stays outside the core; an implementation only
/// decides whether the payment is confirmed. A decline must surface as
/// [`crate::error::DomainError::PaymentFailed`].
pub trait PaymentProcessor: Send + Sync {
    fn process(&self, bill: &Bill) -> DomainResult<()>;
}

/// Accepts every payment immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPayment;

impl PaymentProcessor for InstantPayment {
    fn process(&self, bill: &Bill) -> DomainResult<()> {
        info!(
            bill = %bill.id,
            amount = %bill.amount,
            method = %bill.payment_method,
            "payment confirmed"
        );
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
