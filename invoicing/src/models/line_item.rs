//! Line item model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One billable row on an invoice.
///
/// `amount` is derived from `quantity * rate`. The editor recomputes it in
/// the same call that changes either factor, so a stored amount is never
/// stale at any observable point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: Uuid,
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
}

impl LineItem {
    /// A blank row: quantity 1, rate 0, amount 0.
    pub fn blank() -> Self {
        Self {
            id: Uuid::new_v4(),
            description: String::new(),
            quantity: Decimal::ONE,
            rate: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }

    pub fn new(description: impl Into<String>, quantity: Decimal, rate: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            quantity,
            rate,
            amount: quantity * rate,
        }
    }
}
