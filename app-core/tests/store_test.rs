//! Record store behavior tests against the in-memory backend.

use app_core::store::{MemoryStore, RecordStore, StoreError};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn create_assigns_identity_and_timestamps() {
    let store = MemoryStore::new();
    let owner = Uuid::new_v4();

    let record = store
        .create_record("things", owner, json!({ "name": "alpha" }))
        .await
        .expect("create failed");

    assert!(!record.meta.id.is_nil());
    assert_eq!(record.meta.owner_id, owner);
    assert_eq!(record.meta.created_at, record.meta.updated_at);
    assert_eq!(record.data["name"], "alpha");
}

#[tokio::test]
async fn get_returns_the_stored_record() {
    let store = MemoryStore::new();
    let owner = Uuid::new_v4();

    let created = store
        .create_record("things", owner, json!({ "name": "alpha" }))
        .await
        .expect("create failed");

    let fetched = store
        .get_record("things", created.meta.id)
        .await
        .expect("get failed")
        .expect("record missing");
    assert_eq!(fetched.meta.id, created.meta.id);
    assert_eq!(fetched.data, created.data);

    let absent = store
        .get_record("things", Uuid::new_v4())
        .await
        .expect("get failed");
    assert!(absent.is_none());
}

#[tokio::test]
async fn update_merges_top_level_keys_and_refreshes_updated_at() {
    let store = MemoryStore::new();
    let owner = Uuid::new_v4();

    let created = store
        .create_record("things", owner, json!({ "name": "alpha", "color": "blue" }))
        .await
        .expect("create failed");

    let updated = store
        .update_record("things", created.meta.id, json!({ "color": "red" }))
        .await
        .expect("update failed");

    assert_eq!(updated.data["name"], "alpha");
    assert_eq!(updated.data["color"], "red");
    assert!(updated.meta.updated_at >= created.meta.created_at);
    assert_eq!(updated.meta.created_at, created.meta.created_at);
}

#[tokio::test]
async fn query_is_owner_scoped_and_newest_first() {
    let store = MemoryStore::new();
    let owner = Uuid::new_v4();
    let other = Uuid::new_v4();

    let first = store
        .create_record("things", owner, json!({ "n": 1 }))
        .await
        .expect("create failed");
    let second = store
        .create_record("things", owner, json!({ "n": 2 }))
        .await
        .expect("create failed");
    store
        .create_record("things", other, json!({ "n": 3 }))
        .await
        .expect("create failed");

    let records = store
        .query_records("things", owner)
        .await
        .expect("query failed");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].meta.id, second.meta.id);
    assert_eq!(records[1].meta.id, first.meta.id);
}

#[tokio::test]
async fn delete_removes_the_record() {
    let store = MemoryStore::new();
    let owner = Uuid::new_v4();

    let created = store
        .create_record("things", owner, json!({ "name": "alpha" }))
        .await
        .expect("create failed");

    store
        .delete_record("things", created.meta.id)
        .await
        .expect("delete failed");

    let gone = store
        .get_record("things", created.meta.id)
        .await
        .expect("get failed");
    assert!(gone.is_none());

    let again = store.delete_record("things", created.meta.id).await;
    assert!(matches!(again, Err(StoreError::NotFound)));
}

#[tokio::test]
async fn update_of_a_missing_record_is_not_found() {
    let store = MemoryStore::new();

    let result = store
        .update_record("things", Uuid::new_v4(), json!({ "name": "beta" }))
        .await;
    assert!(matches!(result, Err(StoreError::NotFound)));
}

#[tokio::test]
async fn records_decode_into_typed_payloads() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Thing {
        name: String,
        count: u32,
    }

    let store = MemoryStore::new();
    let owner = Uuid::new_v4();

    let record = store
        .create_record("things", owner, json!({ "name": "alpha", "count": 3 }))
        .await
        .expect("create failed");

    let stored = record.decode::<Thing>().expect("decode failed");
    assert_eq!(stored.owner_id, owner);
    assert_eq!(
        stored.data,
        Thing {
            name: "alpha".to_string(),
            count: 3
        }
    );
}
