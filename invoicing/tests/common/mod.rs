//! Shared helpers for invoicing integration tests.

use app_core::notify::MockNotifier;
use app_core::store::MemoryStore;
use app_core::UserContext;
use chrono::NaiveDate;
use invoicing::models::{CreateClient, InvoiceDraft, IssuerProfile, LineItem};
use invoicing::services::{ClientService, InvoiceService};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

pub struct TestApp {
    pub clients: ClientService<MemoryStore>,
    pub invoices: InvoiceService<MemoryStore>,
    pub notifier: Arc<MockNotifier>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let notifier = Arc::new(MockNotifier::new());
        Self {
            clients: ClientService::new(store.clone()),
            invoices: InvoiceService::with_notifier(store, notifier.clone()),
            notifier,
        }
    }
}

pub fn test_user() -> UserContext {
    UserContext::new(Uuid::new_v4())
}

pub fn dec(s: &str) -> Decimal {
    s.parse().expect("decimal literal")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn sample_client() -> CreateClient {
    CreateClient {
        name: "Acme Design Studio".to_string(),
        email: "billing@acme.example".to_string(),
        phone: Some("+91 98765 43210".to_string()),
        address: "14 MG Road, Bengaluru".to_string(),
        gstin: Some("29ABCDE1234F1Z5".to_string()),
    }
}

pub fn sample_issuer() -> IssuerProfile {
    IssuerProfile {
        business_name: "Northwind Consulting".to_string(),
        address: Some("221B Baker Street, London".to_string()),
        phone: Some("+44 20 7946 0958".to_string()),
        email: Some("hello@northwind.example".to_string()),
        website: Some("northwind.example".to_string()),
        gstin: None,
    }
}

pub fn draft(client_id: Uuid, items: Vec<LineItem>, tax_rate: Decimal) -> InvoiceDraft {
    InvoiceDraft {
        invoice_number: "INV-001".to_string(),
        client_id,
        items,
        tax_rate,
        issue_date: date(2026, 1, 5),
        due_date: date(2026, 2, 5),
        notes: None,
    }
}
