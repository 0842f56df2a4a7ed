//! In-memory line item editing state for invoice composition.

use crate::models::LineItem;
use rust_decimal::Decimal;

/// Ordered working set of line items during invoice create/edit.
///
/// Every quantity or rate change recomputes the row amount in the same
/// call; no intermediate state with a stale amount is ever exposed. An
/// invoice keeps at least one row, so removing the last one is a no-op
/// guard rather than an error. Out-of-range indices are a programming
/// error and panic like any slice access.
#[derive(Debug, Clone)]
pub struct LineItemEditor {
    items: Vec<LineItem>,
}

impl LineItemEditor {
    /// Start a new invoice with a single blank row.
    pub fn new() -> Self {
        Self {
            items: vec![LineItem::blank()],
        }
    }

    /// Resume editing an existing item list. An empty seed falls back to a
    /// single blank row.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        if items.is_empty() {
            return Self::new();
        }
        Self { items }
    }

    /// Append a blank row. Rows keep their append order.
    pub fn add_item(&mut self) -> &LineItem {
        self.items.push(LineItem::blank());
        let index = self.items.len() - 1;
        &self.items[index]
    }

    pub fn set_description(&mut self, index: usize, description: impl Into<String>) {
        self.items[index].description = description.into();
    }

    /// Update the quantity and recompute the row amount in the same step.
    pub fn set_quantity(&mut self, index: usize, quantity: Decimal) {
        let item = &mut self.items[index];
        item.quantity = quantity;
        item.amount = item.quantity * item.rate;
    }

    /// Update the rate and recompute the row amount in the same step.
    pub fn set_rate(&mut self, index: usize, rate: Decimal) {
        let item = &mut self.items[index];
        item.rate = rate;
        item.amount = item.quantity * item.rate;
    }

    /// Remove the row at `index`; a no-op when only one row remains.
    pub fn remove_item(&mut self, index: usize) {
        if self.items.len() <= 1 {
            return;
        }
        self.items.remove(index);
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for LineItemEditor {
    fn default() -> Self {
        Self::new()
    }
}
