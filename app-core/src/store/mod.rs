//! Record store boundary.
//!
//! Durable storage is an external collaborator. The core only relies on a
//! generic document store: create/read/update/delete plus an owner-scoped
//! query ordered by creation time, newest first. Timestamps are assigned by
//! the store at write time.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryStore;

/// Errors surfaced by a store backend. Mapped into `AppError` at the
/// service boundary; backend-specific error objects stop here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Identity and bookkeeping fields assigned by the store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RecordMeta {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored document together with its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    pub meta: RecordMeta,
    pub data: Value,
}

/// A record decoded into a typed payload.
#[derive(Debug, Clone)]
pub struct Stored<T> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub data: T,
}

impl RawRecord {
    /// Decode the JSON payload into a typed record.
    pub fn decode<T: DeserializeOwned>(self) -> Result<Stored<T>, StoreError> {
        let data = serde_json::from_value(self.data)?;
        Ok(Stored {
            id: self.meta.id,
            owner_id: self.meta.owner_id,
            created_at: self.meta.created_at,
            updated_at: self.meta.updated_at,
            data,
        })
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a new document and return it with store-assigned metadata.
    async fn create_record(
        &self,
        collection: &str,
        owner_id: Uuid,
        data: Value,
    ) -> Result<RawRecord, StoreError>;

    /// Fetch a record by id, `None` when absent.
    async fn get_record(&self, collection: &str, id: Uuid) -> Result<Option<RawRecord>, StoreError>;

    /// All records of one owner, newest first.
    async fn query_records(
        &self,
        collection: &str,
        owner_id: Uuid,
    ) -> Result<Vec<RawRecord>, StoreError>;

    /// Shallow-merge `patch` into the stored document. Top-level keys in
    /// `patch` replace their counterparts; `updated_at` is refreshed.
    async fn update_record(
        &self,
        collection: &str,
        id: Uuid,
        patch: Value,
    ) -> Result<RawRecord, StoreError>;

    /// Remove a record. `NotFound` when it does not exist.
    async fn delete_record(&self, collection: &str, id: Uuid) -> Result<(), StoreError>;
}
