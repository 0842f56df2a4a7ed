//! Invoicing core: clients, invoices, totals, lifecycle and document
//! rendering for a single-issuer billing application.
//!
//! Storage and email live behind the collaborator traits in `app-core`;
//! this crate owns the domain model and the arithmetic that keeps an
//! invoice internally consistent.

pub mod models;
pub mod render;
pub mod services;
