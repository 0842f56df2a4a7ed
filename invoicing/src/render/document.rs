//! Projection of an invoice into a printable document structure.
//!
//! Pure: the PDF writer lays out exactly what is composed here, and tests
//! assert against this structure without touching PDF bytes. Stored totals
//! are rendered as-is; their consistency is the calculator's concern.

use crate::models::{Invoice, IssuerProfile};
use crate::services::totals::as_percent;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Fixed currency prefix for rendered amounts. Not locale-derived.
pub const CURRENCY_PREFIX: &str = "$";

/// One row of the rendered item table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub description: String,
    pub quantity: String,
    pub rate: String,
    pub amount: String,
}

/// The borderless right-aligned totals block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsBlock {
    pub subtotal: String,
    pub tax_label: String,
    pub tax_amount: String,
    pub total: String,
}

/// Everything the PDF writer needs, in display form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDocument {
    pub business_name: String,
    pub invoice_label: String,
    pub from_lines: Vec<String>,
    pub to_lines: Vec<String>,
    pub issue_date: String,
    pub due_date: String,
    pub rows: Vec<ItemRow>,
    pub totals: TotalsBlock,
    pub notes: Option<String>,
}

/// Project an invoice and its issuer profile into the printable structure.
pub fn compose(invoice: &Invoice, issuer: &IssuerProfile) -> InvoiceDocument {
    let mut from_lines = vec![issuer.business_name.clone()];
    push_present(&mut from_lines, &issuer.address);
    push_present(&mut from_lines, &issuer.phone);
    push_present(&mut from_lines, &issuer.email);
    push_present(&mut from_lines, &issuer.website);
    push_labeled(&mut from_lines, "GSTIN", &issuer.gstin);

    let client = &invoice.client;
    let mut to_lines = vec![client.name.clone()];
    if !client.address.trim().is_empty() {
        to_lines.push(client.address.trim().to_string());
    }
    if !client.email.trim().is_empty() {
        to_lines.push(client.email.trim().to_string());
    }
    push_present(&mut to_lines, &client.phone);
    push_labeled(&mut to_lines, "GSTIN", &client.gstin);

    let rows = invoice
        .items
        .iter()
        .map(|item| ItemRow {
            description: item.description.clone(),
            quantity: format_decimal(item.quantity),
            rate: format_currency(item.rate),
            amount: format_currency(item.amount),
        })
        .collect();

    let totals = TotalsBlock {
        subtotal: format_currency(invoice.subtotal),
        tax_label: format!("Tax ({}%)", format_decimal(as_percent(invoice.tax_rate))),
        tax_amount: format_currency(invoice.tax_amount),
        total: format_currency(invoice.total),
    };

    let notes = invoice
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|notes| !notes.is_empty())
        .map(str::to_string);

    InvoiceDocument {
        business_name: issuer.business_name.clone(),
        invoice_label: format!("Invoice #{}", invoice.invoice_number),
        from_lines,
        to_lines,
        issue_date: format_date(invoice.issue_date),
        due_date: format_date(invoice.due_date),
        rows,
        totals,
        notes,
    }
}

/// Format a monetary value: fixed currency prefix, thousands separators,
/// exactly two decimal places.
pub fn format_currency(value: Decimal) -> String {
    let fixed = format!("{:.2}", value.round_dp(2));
    let (int_part, dec_part) = match fixed.split_once('.') {
        Some((int_part, dec_part)) => (int_part.to_string(), dec_part.to_string()),
        None => (fixed, "00".to_string()),
    };

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    let mut count = 0;
    for i in (0..digits.len()).rev() {
        if count == 3 && digits[i].is_ascii_digit() {
            grouped.push(',');
            count = 0;
        }
        grouped.push(digits[i]);
        count += 1;
    }
    let int_with_sep: String = grouped.chars().rev().collect();

    format!("{}{}.{}", CURRENCY_PREFIX, int_with_sep, dec_part)
}

/// Format a decimal with trailing zeros trimmed (10 not 10.00, 2.5 stays).
pub fn format_decimal(value: Decimal) -> String {
    let s = value.to_string();
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn push_present(lines: &mut Vec<String>, value: &Option<String>) {
    if let Some(value) = value {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
}

fn push_labeled(lines: &mut Vec<String>, label: &str, value: &Option<String>) {
    if let Some(value) = value {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            lines.push(format!("{}: {}", label, trimmed));
        }
    }
}
