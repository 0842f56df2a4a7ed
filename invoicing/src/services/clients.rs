//! Client management service.

use crate::models::{Client, CreateClient, UpdateClient};
use crate::services::metrics::ERRORS_TOTAL;
use app_core::store::{RecordStore, Stored};
use app_core::{AppError, UserContext};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

pub const CLIENTS_COLLECTION: &str = "clients";

/// CRUD over client records, scoped to the owning user.
pub struct ClientService<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> ClientService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, input), fields(user_id = %ctx.user_id))]
    pub async fn create_client(
        &self,
        ctx: &UserContext,
        input: CreateClient,
    ) -> Result<Stored<Client>, AppError> {
        let result = self.create_client_inner(ctx, input).await;
        if let Err(ref err) = result {
            ERRORS_TOTAL.with_label_values(&[err.kind()]).inc();
        }
        result
    }

    async fn create_client_inner(
        &self,
        ctx: &UserContext,
        input: CreateClient,
    ) -> Result<Stored<Client>, AppError> {
        let client = Client {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            phone: input.phone,
            address: input.address,
            gstin: input.gstin,
        };
        validate_client(&client)?;

        let data = serde_json::to_value(&client)
            .map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;
        let record = self
            .store
            .create_record(CLIENTS_COLLECTION, ctx.user_id, data)
            .await?;

        info!(client_id = %record.meta.id, "Client created");

        Ok(record.decode()?)
    }

    #[instrument(skip(self), fields(user_id = %ctx.user_id, client_id = %client_id))]
    pub async fn get_client(
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

    /// All clients of the user, newest first.
    #[instrument(skip(self), fields(user_id = %ctx.user_id))]
    pub async fn list_clients(&self, ctx: &UserContext) -> Result<Vec<Stored<Client>>, AppError> {
        let records = self
            .store
            .query_records(CLIENTS_COLLECTION, ctx.user_id)
            .await?;
        records
            .into_iter()
            .map(|record| record.decode().map_err(AppError::from))
            .collect()
    }

    #[instrument(skip(self, input), fields(user_id = %ctx.user_id, client_id = %client_id))]
    pub async fn update_client(
        &self,
        ctx: &UserContext,
        client_id: Uuid,
        input: UpdateClient,
    ) -> Result<Stored<Client>, AppError> {
        let existing = self.get_client(ctx, client_id).await?;

        let mut client = existing.data;
        if let Some(name) = input.name {
            client.name = name.trim().to_string();
        }
        if let Some(email) = input.email {
            client.email = email.trim().to_string();
        }
        if let Some(phone) = input.phone {
            client.phone = Some(phone);
        }
        if let Some(address) = input.address {
            client.address = address;
        }
        if let Some(gstin) = input.gstin {
            client.gstin = Some(gstin);
        }
        validate_client(&client)?;

        let patch = serde_json::to_value(&client)
            .map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;
        let record = self
            .store
            .update_record(CLIENTS_COLLECTION, client_id, patch)
            .await?;

        info!("Client updated");

        Ok(record.decode()?)
    }

    /// Delete a client record. Invoices that embedded a snapshot of it are
    /// historical records and are left untouched.
    #[instrument(skip(self), fields(user_id = %ctx.user_id, client_id = %client_id))]
    pub async fn delete_client(&self, ctx: &UserContext, client_id: Uuid) -> Result<(), AppError> {
        self.get_client(ctx, client_id).await?;
        self.store
            .delete_record(CLIENTS_COLLECTION, client_id)
            .await?;

        info!("Client deleted");

        Ok(())
    }
}

fn validate_client(client: &Client) -> Result<(), AppError> {
    if client.name.is_empty() {
        return Err(AppError::Validation("Client name is required".to_string()));
    }
    if client.email.is_empty() {
        return Err(AppError::Validation("Client email is required".to_string()));
    }
    Ok(())
}
