//! Invoice model and lifecycle.

use super::{ClientSnapshot, LineItem};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storable invoice status.
///
/// `Overdue` is deliberately absent: it is derived at read time and never
/// written back (see [`EffectiveStatus`]). Transitions between the storable
/// statuses are unrestricted and happen only on explicit user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "sent" => InvoiceStatus::Sent,
            "paid" => InvoiceStatus::Paid,
            _ => InvoiceStatus::Draft,
        }
    }
}

/// Read-time status projection: the stored status, or `Overdue` when the
/// invoice is unpaid and past its due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
}

/// Invoice payload. Identity, owner and timestamps live in the store
/// envelope; `client` is the snapshot taken when the invoice was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_number: String,
    pub client_id: Uuid,
    pub client: ClientSnapshot,
    pub items: Vec<LineItem>,
    /// Decimal fraction (0.18 = 18%). Rendered as a percentage only at the
    /// display boundary.
    pub tax_rate: Decimal,
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
    pub status: InvoiceStatus,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
}

impl Invoice {
    /// Unpaid and past the due date. Derived at read time; the stored
    /// status is untouched.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != InvoiceStatus::Paid && today > self.due_date
    }

    pub fn effective_status(&self, today: NaiveDate) -> EffectiveStatus {
        if self.is_overdue(today) {
            return EffectiveStatus::Overdue;
        }
        match self.status {
            InvoiceStatus::Draft => EffectiveStatus::Draft,
            InvoiceStatus::Sent => EffectiveStatus::Sent,
            InvoiceStatus::Paid => EffectiveStatus::Paid,
        }
    }
}

/// Input for creating or replacing an invoice. Totals are recomputed
/// server-side; anything a caller supplies for them is ignored.
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    pub invoice_number: String,
    pub client_id: Uuid,
    pub items: Vec<LineItem>,
    pub tax_rate: Decimal,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
}
