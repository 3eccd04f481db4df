//! Integration test contracts for KeyValueStore trait
//!
//! These tests verify that all KeyValueStore implementations comply with the expected contract.

use wayfarer::storage::{KeyValueStore, API_KEY_KEY, MESSAGES_KEY};
use wayfarer::{Context, FileStore, InMemoryStore, Message};

async fn check_get_set_contract(store: &dyn KeyValueStore) {
    // Absent key reads as None
    let result = store.get(API_KEY_KEY).await;
    assert!(result.is_ok(), "KeyValueStore::get should not return error");
    assert!(
        result.unwrap().is_none(),
        "KeyValueStore::get should return None for an absent key"
    );

    store
        .set(API_KEY_KEY, "first")
        .await
        .expect("KeyValueStore::set should succeed");
    assert_eq!(
        store.get(API_KEY_KEY).await.unwrap().as_deref(),
        Some("first")
    );

    // Writing again replaces the value
    store.set(API_KEY_KEY, "second").await.unwrap();
    assert_eq!(
        store.get(API_KEY_KEY).await.unwrap().as_deref(),
        Some("second"),
        "KeyValueStore::set should replace the previous value"
    );
}

async fn check_remove_contract(store: &dyn KeyValueStore) {
    store.set(MESSAGES_KEY, "[]").await.unwrap();
    assert!(store.contains(MESSAGES_KEY).await.unwrap());

    store
        .remove(MESSAGES_KEY)
        .await
        .expect("KeyValueStore::remove should succeed");
    assert!(
        !store.contains(MESSAGES_KEY).await.unwrap(),
        "Removed entry should no longer exist"
    );

    // Removing again is not an error
    assert!(
        store.remove(MESSAGES_KEY).await.is_ok(),
        "KeyValueStore::remove should succeed for an absent key"
    );
}

async fn check_keys_are_independent(store: &dyn KeyValueStore) {
    store.set(MESSAGES_KEY, "[]").await.unwrap();
    store.set(API_KEY_KEY, "key").await.unwrap();

    store.remove(MESSAGES_KEY).await.unwrap();
    assert_eq!(
        store.get(API_KEY_KEY).await.unwrap().as_deref(),
        Some("key"),
        "Removing one entry should leave others untouched"
    );
}

async fn check_history_round_trip(store: &dyn KeyValueStore) {
    let mut context = Context::new();
    context.add_message(Message::user("Plan a week in Bali"));
    context.add_message(Message::assistant("Here is your plan"));

    store
        .set(MESSAGES_KEY, &context.to_json().unwrap())
        .await
        .unwrap();

    let json = store.get(MESSAGES_KEY).await.unwrap().unwrap();
    let restored = Context::from_json(&json).unwrap();
    assert_eq!(restored.messages(), context.messages());
}

/// Test the get/set contract
///
/// This test verifies that:
/// - Absent keys read as None
/// - A written value can be read back
/// - Writing replaces the previous value
#[tokio::test]
async fn test_key_value_store_get_set_contract() {
    check_get_set_contract(&InMemoryStore::new()).await;

    let dir = tempfile::tempdir().unwrap();
    check_get_set_contract(&FileStore::new(dir.path())).await;
}

/// Test the remove contract
#[tokio::test]
async fn test_key_value_store_remove_contract() {
    check_remove_contract(&InMemoryStore::new()).await;

    let dir = tempfile::tempdir().unwrap();
    check_remove_contract(&FileStore::new(dir.path())).await;
}

#[tokio::test]
async fn test_key_value_store_keys_are_independent() {
    check_keys_are_independent(&InMemoryStore::new()).await;

    let dir = tempfile::tempdir().unwrap();
    check_keys_are_independent(&FileStore::new(dir.path())).await;
}

/// Test that conversation history survives a store round trip
#[tokio::test]
async fn test_key_value_store_history_round_trip() {
    check_history_round_trip(&InMemoryStore::new()).await;

    let dir = tempfile::tempdir().unwrap();
    check_history_round_trip(&FileStore::new(dir.path())).await;
}

/// Test that clones of the in-memory store share their entries
#[tokio::test]
async fn test_in_memory_store_clones_share_state() {
    let store = InMemoryStore::new();
    let handle = store.clone();

    handle.set(API_KEY_KEY, "shared").await.unwrap();
    assert_eq!(store.get(API_KEY_KEY).await.unwrap().as_deref(), Some("shared"));
    assert_eq!(store.len().await, 1);
}

/// Test concurrent writers against one store
#[tokio::test]
async fn test_key_value_store_concurrent_writes() {
    let store = InMemoryStore::new();
    let mut handles = Vec::new();

    for i in 0..10 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.set(&format!("entry-{}", i), "value").await
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    assert_eq!(store.len().await, 10, "All concurrent writes should land");
}
