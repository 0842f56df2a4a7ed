//! Lifecycle tests: overdue derivation and submission validation.

use app_core::AppError;
use chrono::NaiveDate;
use invoicing::models::{
    ClientSnapshot, EffectiveStatus, Invoice, InvoiceDraft, InvoiceStatus, LineItem,
};
use invoicing::services::{compute_totals, validate_draft};
use rust_decimal::Decimal;
use uuid::Uuid;

fn dec(s: &str) -> Decimal {
    s.parse().expect("decimal literal")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn snapshot() -> ClientSnapshot {
    ClientSnapshot {
        name: "Acme Design Studio".to_string(),
        email: "billing@acme.example".to_string(),
        phone: None,
        address: "14 MG Road, Bengaluru".to_string(),
        gstin: None,
    }
}

fn invoice(status: InvoiceStatus, due_date: NaiveDate) -> Invoice {
    let items = vec![LineItem::new("Design", dec("10"), dec("500"))];
    let totals = compute_totals(&items, dec("0.18"));
    Invoice {
        invoice_number: "INV-001".to_string(),
        client_id: Uuid::new_v4(),
        client: snapshot(),
        items,
        tax_rate: dec("0.18"),
        subtotal: totals.subtotal,
        tax_amount: totals.tax_amount,
        total: totals.total,
        status,
        issue_date: date(2026, 1, 5),
        due_date,
        notes: None,
    }
}

#[test]
fn unpaid_past_due_is_overdue() {
    let invoice = invoice(InvoiceStatus::Sent, date(2026, 1, 10));

    assert!(invoice.is_overdue(date(2026, 1, 11)));
    assert_eq!(
        invoice.effective_status(date(2026, 1, 11)),
        EffectiveStatus::Overdue
    );
}

#[test]
fn paid_is_never_overdue() {
    let invoice = invoice(InvoiceStatus::Paid, date(2026, 1, 10));

    assert!(!invoice.is_overdue(date(2026, 3, 1)));
    assert_eq!(
        invoice.effective_status(date(2026, 3, 1)),
        EffectiveStatus::Paid
    );
}

#[test]
fn not_overdue_on_or_before_the_due_date() {
    let invoice = invoice(InvoiceStatus::Sent, date(2026, 1, 10));

    assert!(!invoice.is_overdue(date(2026, 1, 10)));
    assert!(!invoice.is_overdue(date(2026, 1, 9)));
}

#[test]
fn a_forgotten_draft_goes_overdue_too() {
    let invoice = invoice(InvoiceStatus::Draft, date(2026, 1, 10));

    assert!(invoice.is_overdue(date(2026, 2, 1)));
}

#[test]
fn effective_status_mirrors_stored_status_when_current() {
    let invoice = invoice(InvoiceStatus::Sent, date(2026, 1, 10));

    assert_eq!(
        invoice.effective_status(date(2026, 1, 8)),
        EffectiveStatus::Sent
    );
}

#[test]
fn status_labels_round_trip() {
    for status in [
        InvoiceStatus::Draft,
        InvoiceStatus::Sent,
        InvoiceStatus::Paid,
    ] {
        assert_eq!(InvoiceStatus::from_string(status.as_str()), status);
    }
}

fn valid_draft() -> InvoiceDraft {
    InvoiceDraft {
        invoice_number: "INV-001".to_string(),
        client_id: Uuid::new_v4(),
        items: vec![LineItem::new("Design", dec("10"), dec("500"))],
        tax_rate: dec("0.18"),
        issue_date: date(2026, 1, 5),
        due_date: date(2026, 2, 5),
        notes: None,
    }
}

#[test]
fn complete_draft_passes_validation() {
    assert!(validate_draft(&valid_draft()).is_ok());
}

#[test]
fn draft_without_a_client_fails_validation() {
    let mut draft = valid_draft();
    draft.client_id = Uuid::nil();

    assert!(matches!(
        validate_draft(&draft),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn draft_without_items_fails_validation() {
    let mut draft = valid_draft();
    draft.items.clear();

    assert!(matches!(
        validate_draft(&draft),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn blank_description_fails_validation() {
    let mut draft = valid_draft();
    draft.items[0].description = "   ".to_string();

    assert!(matches!(
        validate_draft(&draft),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn zero_quantity_fails_validation() {
    let mut draft = valid_draft();
    draft.items[0].quantity = Decimal::ZERO;

    assert!(matches!(
        validate_draft(&draft),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn zero_rate_fails_validation() {
    let mut draft = valid_draft();
    draft.items[0].rate = Decimal::ZERO;

    assert!(matches!(
        validate_draft(&draft),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn negative_tax_rate_fails_validation() {
    let mut draft = valid_draft();
    draft.tax_rate = dec("-0.05");

    assert!(matches!(
        validate_draft(&draft),
        Err(AppError::Validation(_))
    ));
}
