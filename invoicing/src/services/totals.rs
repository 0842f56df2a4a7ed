//! Invoice totals arithmetic.

use crate::models::LineItem;
use rust_decimal::Decimal;

/// Derived monetary totals for a set of line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

/// Sum the stored line amounts and apply the tax rate.
///
/// `tax_rate` is a decimal fraction (0.18 = 18%). The stored `amount` field
/// is trusted as-is; keeping it in sync with quantity and rate is the
/// editor's responsibility, not this function's.
pub fn compute_totals(items: &[LineItem], tax_rate: Decimal) -> Totals {
    let subtotal: Decimal = items.iter().map(|item| item.amount).sum();
    let tax_amount = subtotal * tax_rate;
    Totals {
        subtotal,
        tax_amount,
        total: subtotal + tax_amount,
    }
}

/// Tax rate as a display percentage (0.18 -> 18).
pub fn as_percent(tax_rate: Decimal) -> Decimal {
    tax_rate * Decimal::ONE_HUNDRED
}
