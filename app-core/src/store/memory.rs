//! In-memory record store backing tests and embedded setups.

use super::{RawRecord, RecordMeta, RecordStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

struct Entry {
    record: RawRecord,
    // Insertion sequence; breaks ties between equal creation timestamps so
    // query order stays deterministic.
    seq: u64,
}

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Entry>>>,
    next_seq: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create_record(
        &self,
        collection: &str,
        owner_id: Uuid,
        data: Value,
    ) -> Result<RawRecord, StoreError> {
        let now = Utc::now();
        let record = RawRecord {
            meta: RecordMeta {
                id: Uuid::new_v4(),
                owner_id,
                created_at: now,
                updated_at: now,
            },
            data,
        };

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Entry {
                record: record.clone(),
                seq: self.next_seq.fetch_add(1, Ordering::SeqCst),
            });

        Ok(record)
    }

    async fn get_record(&self, collection: &str, id: Uuid) -> Result<Option<RawRecord>, StoreError> {
        let collections = self.collections.read().await;
        let record = collections
            .get(collection)
            .and_then(|entries| entries.iter().find(|entry| entry.record.meta.id == id))
            .map(|entry| entry.record.clone());
        Ok(record)
    }

    async fn query_records(
        &self,
        collection: &str,
        owner_id: Uuid,
    ) -> Result<Vec<RawRecord>, StoreError> {
        let collections = self.collections.read().await;
        let mut entries: Vec<&Entry> = collections
            .get(collection)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|entry| entry.record.meta.owner_id == owner_id)
                    .collect()
            })
            .unwrap_or_default();

        entries.sort_by(|a, b| {
            (b.record.meta.created_at, b.seq).cmp(&(a.record.meta.created_at, a.seq))
        });

        Ok(entries.into_iter().map(|entry| entry.record.clone()).collect())
    }

    async fn update_record(
        &self,
        collection: &str,
        id: Uuid,
        patch: Value,
    ) -> Result<RawRecord, StoreError> {
        let mut collections = self.collections.write().await;
        let entry = collections
            .get_mut(collection)
            .and_then(|entries| entries.iter_mut().find(|entry| entry.record.meta.id == id))
            .ok_or(StoreError::NotFound)?;

        match (&mut entry.record.data, patch) {
            (Value::Object(base), Value::Object(changes)) => {
                for (key, value) in changes {
                    base.insert(key, value);
                }
            }
            (data, patch) => *data = patch,
        }
        entry.record.meta.updated_at = Utc::now();

        Ok(entry.record.clone())
    }

    async fn delete_record(&self, collection: &str, id: Uuid) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let entries = collections
            .get_mut(collection)
            .ok_or(StoreError::NotFound)?;
        let before = entries.len();
        entries.retain(|entry| entry.record.meta.id != id);
        if entries.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
