use std::sync::Arc;

use serde_json::json;

use super::*;
use crate::storage::{KeyValueStore, MemoryStore, MockKeyValueStore, StorageError};

const KEY: &str = "chat-messages";

#[test]
fn test_legacy_load_missing_key() {
    let legacy = LegacyStore::new(Arc::new(MemoryStore::default()), KEY);
    assert_eq!(legacy.load(), LegacyDocument::default());
}

#[test]
fn test_legacy_load_corrupt_document() {
    let store = Arc::new(MemoryStore::default().with_entry(KEY, "{not json"));
    let legacy = LegacyStore::new(store, KEY);
    assert_eq!(legacy.load(), LegacyDocument::default());
}

#[test]
fn test_legacy_load_partial_document() {
    let raw = json!({ "messages": [{ "id": "u1", "role": "user", "content": "Hi" }] });
    let store = Arc::new(MemoryStore::default().with_entry(KEY, raw.to_string()));
    let legacy = LegacyStore::new(store, KEY);

    let doc = legacy.load();
    assert_eq!(doc.messages.len(), 1);
    assert_eq!(doc.messages[0].text(), Some("Hi"));
    assert!(doc.durations.is_empty());
}

#[test]
fn test_legacy_save_and_load() {
    let store = Arc::new(MemoryStore::default());
    let legacy = LegacyStore::new(store.clone(), KEY);

    let messages = vec![Message::user("u1", "Hi"), Message::assistant("a1", "Hello")];
    let durations = DurationMap::from([("a1".to_string(), 830.0)]);
    legacy.save(&messages, &durations);

    let raw: serde_json::Value =
        serde_json::from_str(&store.get(KEY).unwrap().expect("document written"))
            .expect("valid json");
    assert_eq!(raw["durations"], json!({ "a1": 830.0 }));
    assert_eq!(raw["messages"][1]["id"], "a1");

    let doc = legacy.load();
    assert_eq!(doc.messages, messages);
    assert_eq!(doc.durations, durations);

    legacy.clear();
    assert_eq!(legacy.load(), LegacyDocument::default());
    assert_eq!(
        store.get(KEY).unwrap().as_deref(),
        Some(r#"{"messages":[],"durations":{}}"#)
    );
}

#[test]
fn test_legacy_save_quota_exceeded_is_swallowed() {
    let store = Arc::new(MemoryStore::default().with_quota(16));
    let legacy = LegacyStore::new(store.clone(), KEY);

    legacy.save(&[Message::user("u1", "a rather long message")], &DurationMap::new());
    assert_eq!(store.get(KEY).unwrap(), None);
}

#[test]
fn test_legacy_read_failure_is_swallowed() {
    let mut mock = MockKeyValueStore::new();
    mock.expect_get()
        .times(1)
        .returning(|_| Err(StorageError::Poisoned));
    let legacy = LegacyStore::new(Arc::new(mock), KEY);
    assert_eq!(legacy.load(), LegacyDocument::default());
}

#[test]
fn test_legacy_load_skips_unreadable_messages() {
    let raw = json!({
        "messages": [
            { "id": "u1", "role": "user", "content": "Hi" },
            { "id": "x", "content": "no role" },
            { "id": "d1", "role": "data", "parts": [{ "type": "data", "value": 1 }] }
        ],
        "durations": { "d1": 10.5 }
    });
    let store = Arc::new(MemoryStore::default().with_entry(KEY, raw.to_string()));
    let legacy = LegacyStore::new(store, KEY);

    let doc = legacy.load();
    let ids: Vec<&str> = doc.messages.iter().map(|m| m.id()).collect();
    assert_eq!(ids, vec!["u1", "d1"]);
    assert_eq!(doc.messages[1].role().as_str(), "data");
    assert_eq!(doc.durations.get("d1"), Some(&10.5));
}
