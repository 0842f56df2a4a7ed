//! Totals calculator tests.

use invoicing::models::LineItem;
use invoicing::services::totals::{as_percent, compute_totals};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().expect("decimal literal")
}

#[test]
fn subtotal_sums_stored_amounts_in_any_order() {
    let design = LineItem::new("Design", dec("10"), dec("500"));
    let hosting = LineItem::new("Hosting", dec("1"), dec("250"));
    let support = LineItem::new("Support", dec("3"), dec("80"));

    let forward = compute_totals(
        &[design.clone(), hosting.clone(), support.clone()],
        dec("0.1"),
    );
    let reversed = compute_totals(&[support, hosting, design], dec("0.1"));

    assert_eq!(forward.subtotal, dec("5490"));
    assert_eq!(forward.subtotal, reversed.subtotal);
    assert_eq!(forward.total, reversed.total);
}

#[test]
fn empty_items_yield_zero_totals() {
    let totals = compute_totals(&[], dec("0.18"));

    assert_eq!(totals.subtotal, Decimal::ZERO);
    assert_eq!(totals.tax_amount, Decimal::ZERO);
    assert_eq!(totals.total, Decimal::ZERO);
}

#[test]
fn eighteen_percent_on_design_work() {
    let items = vec![LineItem::new("Design", dec("10"), dec("500"))];

    let totals = compute_totals(&items, dec("0.18"));

    assert_eq!(totals.subtotal, dec("5000"));
    assert_eq!(totals.tax_amount, dec("900"));
    assert_eq!(totals.total, dec("5900"));
}

#[test]
fn zero_rate_leaves_subtotal_untouched() {
    let items = vec![
        LineItem::new("Widgets", dec("2"), dec("100")),
        LineItem::new("Bolts", dec("1"), dec("50")),
    ];

    let totals = compute_totals(&items, Decimal::ZERO);

    assert_eq!(totals.subtotal, dec("250"));
    assert_eq!(totals.tax_amount, Decimal::ZERO);
    assert_eq!(totals.total, dec("250"));
}

#[test]
fn calculator_trusts_stored_amounts() {
    // A stale amount is summed as-is; keeping it fresh is the editor's job.
    let mut item = LineItem::new("Design", dec("10"), dec("500"));
    item.amount = dec("1");

    let totals = compute_totals(&[item], Decimal::ZERO);

    assert_eq!(totals.subtotal, dec("1"));
}

#[test]
fn percent_conversion_happens_only_at_display() {
    assert_eq!(as_percent(dec("0.18")), dec("18"));
    assert_eq!(as_percent(dec("0.0825")), dec("8.25"));
    assert_eq!(as_percent(Decimal::ZERO), Decimal::ZERO);
}
