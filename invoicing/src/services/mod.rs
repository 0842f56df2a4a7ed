//! Services for the invoicing core.

pub mod clients;
pub mod editor;
pub mod invoices;
pub mod metrics;
pub mod totals;

pub use clients::ClientService;
pub use editor::LineItemEditor;
pub use invoices::{validate_draft, InvoiceService};
pub use totals::{compute_totals, Totals};
