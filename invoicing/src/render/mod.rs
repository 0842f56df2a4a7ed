//! Document rendering: structured projection and PDF serialization.

pub mod document;
pub mod pdf;

pub use document::{compose, InvoiceDocument};
pub use pdf::render_pdf;
