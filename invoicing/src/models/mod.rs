//! Domain models for the invoicing core.

mod client;
mod invoice;
mod line_item;
mod profile;

pub use client::{Client, ClientSnapshot, CreateClient, UpdateClient};
pub use invoice::{EffectiveStatus, Invoice, InvoiceDraft, InvoiceStatus};
pub use line_item::LineItem;
pub use profile::IssuerProfile;
