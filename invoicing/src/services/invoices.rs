//! Invoice management service.

use crate::models::{
    Client, ClientSnapshot, Invoice, InvoiceDraft, InvoiceStatus, IssuerProfile,
};
use crate::render::document::format_currency;
use crate::services::clients::CLIENTS_COLLECTION;
use crate::services::metrics::{ERRORS_TOTAL, INVOICES_TOTAL};
use crate::services::totals::compute_totals;
use app_core::notify::Notifier;
use app_core::store::{RawRecord, RecordStore, Stored};
use app_core::{AppError, UserContext};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

pub const INVOICES_COLLECTION: &str = "invoices";

/// Check a draft before anything is written: a client must be selected and
/// every line item needs a description, a positive quantity and a positive
/// rate. Violations fail the operation before any persistence call.
pub fn validate_draft(draft: &InvoiceDraft) -> Result<(), AppError> {
    if draft.client_id.is_nil() {
        return Err(AppError::Validation("A client must be selected".to_string()));
    }
    if draft.items.is_empty() {
        return Err(AppError::Validation(
            "An invoice needs at least one line item".to_string(),
        ));
    }
    for (pos, item) in draft.items.iter().enumerate() {
        if item.description.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "Line item {} is missing a description",
                pos + 1
            )));
        }
        if item.quantity <= Decimal::ZERO {
            return Err(AppError::Validation(format!(
                "Line item {} needs a quantity greater than zero",
                pos + 1
            )));
        }
        if item.rate <= Decimal::ZERO {
            return Err(AppError::Validation(format!(
                "Line item {} needs a rate greater than zero",
                pos + 1
            )));
        }
    }
    if draft.tax_rate < Decimal::ZERO {
        return Err(AppError::Validation(
            "Tax rate cannot be negative".to_string(),
        ));
    }
    Ok(())
}

/// Invoice operations: validation, client snapshotting, server-side totals
/// and status handling, all scoped to the owning user.
pub struct InvoiceService<S: RecordStore> {
    store: Arc<S>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl<S: RecordStore> InvoiceService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            notifier: None,
        }
    }

    pub fn with_notifier(store: Arc<S>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier: Some(notifier),
        }
    }

    #[instrument(skip(self, draft), fields(user_id = %ctx.user_id))]
    pub async fn create_invoice(
        &self,
        ctx: &UserContext,
        draft: InvoiceDraft,
    ) -> Result<Stored<Invoice>, AppError> {
        let result = self.create_invoice_inner(ctx, draft).await;
        if let Err(ref err) = result {
            ERRORS_TOTAL.with_label_values(&[err.kind()]).inc();
        }
        result
    }

    async fn create_invoice_inner(
        &self,
        ctx: &UserContext,
        draft: InvoiceDraft,
    ) -> Result<Stored<Invoice>, AppError> {
        validate_draft(&draft)?;

        let client = self.fetch_client(ctx, draft.client_id).await?;
        let invoice = build_invoice(draft, ClientSnapshot::from(&client.data), InvoiceStatus::Draft);

        let data = serde_json::to_value(&invoice)
            .map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;
        let record = self
            .store
            .create_record(INVOICES_COLLECTION, ctx.user_id, data)
            .await?;

        INVOICES_TOTAL
            .with_label_values(&[invoice.status.as_str()])
            .inc();
        info!(
            invoice_id = %record.meta.id,
            invoice_number = %invoice.invoice_number,
            total = %invoice.total,
            "Invoice created"
        );

        Ok(record.decode()?)
    }

    #[instrument(skip(self), fields(user_id = %ctx.user_id, invoice_id = %invoice_id))]
    pub async fn get_invoice(
        &self,
        ctx: &UserContext,
        invoice_id: Uuid,
    ) -> Result<Stored<Invoice>, AppError> {
        let record = self.fetch_owned(ctx, invoice_id).await?;
        Ok(record.decode()?)
    }

    /// All invoices of the user, newest first.
    #[instrument(skip(self), fields(user_id = %ctx.user_id))]
    pub async fn list_invoices(&self, ctx: &UserContext) -> Result<Vec<Stored<Invoice>>, AppError> {
        let records = self
            .store
            .query_records(INVOICES_COLLECTION, ctx.user_id)
            .await?;
        records
            .into_iter()
            .map(|record| record.decode().map_err(AppError::from))
            .collect()
    }

    /// Replace an invoice's editable content. The stored status is kept;
    /// totals are recomputed; the client snapshot is preserved unless the
    /// client reference changed.
    #[instrument(skip(self, draft), fields(user_id = %ctx.user_id, invoice_id = %invoice_id))]
    pub async fn update_invoice(
        &self,
        ctx: &UserContext,
        invoice_id: Uuid,
        draft: InvoiceDraft,
    ) -> Result<Stored<Invoice>, AppError> {
        let result = self.update_invoice_inner(ctx, invoice_id, draft).await;
        if let Err(ref err) = result {
            ERRORS_TOTAL.with_label_values(&[err.kind()]).inc();
        }
        result
    }

    async fn update_invoice_inner(
        &self,
        ctx: &UserContext,
        invoice_id: Uuid,
        draft: InvoiceDraft,
    ) -> Result<Stored<Invoice>, AppError> {
        validate_draft(&draft)?;

        let existing = self.fetch_owned(ctx, invoice_id).await?.decode::<Invoice>()?;
        let snapshot = if draft.client_id == existing.data.client_id {
            existing.data.client
        } else {
            let client = self.fetch_client(ctx, draft.client_id).await?;
            ClientSnapshot::from(&client.data)
        };
        let invoice = build_invoice(draft, snapshot, existing.data.status);

        let patch = serde_json::to_value(&invoice)
            .map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;
        let record = self
            .store
            .update_record(INVOICES_COLLECTION, invoice_id, patch)
            .await?;

        info!(invoice_number = %invoice.invoice_number, "Invoice updated");

        Ok(record.decode()?)
    }

    /// Set the stored status. Any storable status may follow any other;
    /// transitions happen only on explicit user action.
    #[instrument(skip(self), fields(user_id = %ctx.user_id, invoice_id = %invoice_id))]
    pub async fn set_status(
        &self,
        ctx: &UserContext,
        invoice_id: Uuid,
        status: InvoiceStatus,
    ) -> Result<Stored<Invoice>, AppError> {
        self.fetch_owned(ctx, invoice_id).await?;

        let patch = serde_json::json!({ "status": status });
        let record = self
            .store
            .update_record(INVOICES_COLLECTION, invoice_id, patch)
            .await?;

        INVOICES_TOTAL.with_label_values(&[status.as_str()]).inc();
        info!(status = status.as_str(), "Invoice status updated");

        Ok(record.decode()?)
    }

    #[instrument(skip(self), fields(user_id = %ctx.user_id, invoice_id = %invoice_id))]
    pub async fn delete_invoice(&self, ctx: &UserContext, invoice_id: Uuid) -> Result<(), AppError> {
        self.fetch_owned(ctx, invoice_id).await?;
        self.store
            .delete_record(INVOICES_COLLECTION, invoice_id)
            .await?;

        info!("Invoice deleted");

        Ok(())
    }

    /// Mark the invoice sent and notify the client by email. The email is
    /// fire-and-forget: a notifier failure is logged, not surfaced, and the
    /// status change stands.
    #[instrument(skip(self, issuer), fields(user_id = %ctx.user_id, invoice_id = %invoice_id))]
    pub async fn send_invoice(
        &self,
        ctx: &UserContext,
        invoice_id: Uuid,
        issuer: &IssuerProfile,
    ) -> Result<Stored<Invoice>, AppError> {
        let updated = self.set_status(ctx, invoice_id, InvoiceStatus::Sent).await?;

        if let Some(notifier) = &self.notifier {
            let invoice = &updated.data;
            let subject = format!(
                "Invoice {} from {}",
                invoice.invoice_number, issuer.business_name
            );
            let body = format!(
                "Hi {},\n\nInvoice {} for {} is due on {}.\n\nThank you,\n{}",
                invoice.client.name,
                invoice.invoice_number,
                format_currency(invoice.total),
                invoice.due_date.format("%b %-d, %Y"),
                issuer.business_name,
            );
            if let Err(err) = notifier
                .notify(&invoice.client.email, &subject, &body)
                .await
            {
                warn!(error = %err, "Invoice notification failed");
            }
        }

        Ok(updated)
    }

    async fn fetch_owned(
        &self,
        ctx: &UserContext,
        invoice_id: Uuid,
    ) -> Result<RawRecord, AppError> {
        let record = self
            .store
            .get_record(INVOICES_COLLECTION, invoice_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(anyhow::anyhow!("Invoice {} not found", invoice_id))
            })?;
        if record.meta.owner_id != ctx.user_id {
            return Err(AppError::Permission(anyhow::anyhow!(
                "Invoice {} does not belong to the requesting user",
                invoice_id
            )));
        }
        Ok(record)
    }

    async fn fetch_client(
        &self,
        ctx: &UserContext,
        client_id: Uuid,
    ) -> Result<Stored<Client>, AppError> {
        let record = self
            .store
            .get_record(CLIENTS_COLLECTION, client_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Client {} not found", client_id)))?;
        if record.meta.owner_id != ctx.user_id {
            return Err(AppError::Permission(anyhow::anyhow!(
                "Client {} does not belong to the requesting user",
                client_id
            )));
        }
        Ok(record.decode()?)
    }
}

fn build_invoice(draft: InvoiceDraft, client: ClientSnapshot, status: InvoiceStatus) -> Invoice {
    let totals = compute_totals(&draft.items, draft.tax_rate);
    Invoice {
        invoice_number: draft.invoice_number,
        client_id: draft.client_id,
        client,
        items: draft.items,
        tax_rate: draft.tax_rate,
        subtotal: totals.subtotal,
        tax_amount: totals.tax_amount,
        total: totals.total,
        status,
        issue_date: draft.issue_date,
        due_date: draft.due_date,
        notes: draft.notes,
    }
}
