//! Bill issued at exit.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::ticket::Ticket;

/// Payment methods accepted at exit gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::Card => write!(f, "Card"),
            Self::Upi => write!(f, "Upi"),
        }
    }
}

/// Record of a completed stay and its payment.
///
/// Created at exit initiation with the closed ticket moved in; once the paid
/// flag is set the bill never changes again.
#[derive(Debug, Clone)]
pub struct Bill {
    pub id: Uuid,
    pub ticket: Ticket,
    pub exited_at: DateTime<Utc>,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub exit_gate_id: String,
    paid: bool,
}

impl Bill {
    pub fn new(
        ticket: Ticket,
        amount: Decimal,
        payment_method: PaymentMethod,
        exit_gate_id: impl Into<String>,
        exited_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            ticket,
            exited_at,
            amount,
            payment_method,
            exit_gate_id: exit_gate_id.into(),
            paid: false,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.paid
    }

    pub(crate) fn mark_paid(&mut self) {
        self.paid = true;
    }

    /// Whole hours covered by this bill, entry to exit.
    pub fn total_hours(&self) -> i64 {
        (self.exited_at - self.ticket.entered_at).num_hours().max(0)
    }
}

// ── Tests ──────────────────────────────────────────────────────
