use serde_json::json;

use super::*;

#[test]
fn test_message_from_parts() {
    let msg: Message = serde_json::from_value(json!({
        "id": "m1",
        "role": "user",
        "parts": [
            { "type": "step-start" },
            { "type": "text", "text": "Hello", "state": "done" },
            { "type": "text", "text": "ignored" }
        ]
    }))
    .expect("failed to parse message");

    assert_eq!(msg.id(), "m1");
    assert_eq!(msg.role(), &Role::User);
    assert!(msg.is_user());
    assert_eq!(msg.text(), Some("Hello"));
    match msg.content() {
        MessageContent::Parts(parts) => {
            assert_eq!(parts.len(), 3);
            assert!(!parts[0].is_text());
            assert!(parts[1].is_text());
        }
        other => panic!("unexpected content: {other:?}"),
    }
}

#[test]
fn test_message_from_legacy_content() {
    let msg: Message = serde_json::from_value(json!({
        "id": "m1",
        "role": "assistant",
        "content": "Hi there"
    }))
    .expect("failed to parse message");

    assert_eq!(msg.content(), &MessageContent::Text("Hi there".to_string()));
    assert_eq!(msg.text(), Some("Hi there"));
}

#[test]
fn test_message_flat_content_used_when_parts_have_no_text() {
    let raw = json!({
        "id": "m1",
        "role": "user",
        "parts": [{ "type": "file", "url": "a.png" }],
        "content": "caption"
    });
    let msg: Message = serde_json::from_value(raw.clone()).expect("failed to parse message");
    assert_eq!(msg.text(), Some("caption"));

    let back = serde_json::to_value(&msg).expect("failed to serialize message");
    assert_eq!(back, raw);
}

#[test]
fn test_message_malformed_parts() {
    let msg: Message = serde_json::from_value(json!({
        "id": "m1",
        "role": "user",
        "parts": [null, 42, "text", { "type": "text", "text": 7 }, { "text": "no type" }]
    }))
    .expect("failed to parse message");

    assert_eq!(msg.text(), None);
    match msg.content() {
        MessageContent::Parts(parts) => assert!(parts.iter().all(|p| !p.is_text())),
        other => panic!("unexpected content: {other:?}"),
    }
}

#[test]
fn test_message_keeps_unknown_fields() {
    let raw = json!({
        "id": "m1",
        "role": "assistant",
        "parts": [{ "type": "text", "text": "Answer", "providerMetadata": { "x": 1 } }],
        "metadata": { "model": "gpt" },
        "content": { "legacy": true }
    });
    let msg: Message = serde_json::from_value(raw.clone()).expect("failed to parse message");
    assert_eq!(msg.extra().get("metadata"), Some(&json!({ "model": "gpt" })));

    let back = serde_json::to_value(&msg).expect("failed to serialize message");
    assert_eq!(back, raw);
}

#[test]
fn test_message_without_body() {
    let msg: Message =
        serde_json::from_value(json!({ "role": "system" })).expect("failed to parse message");
    assert_eq!(msg.id(), "");
    assert_eq!(msg.content(), &MessageContent::Empty);
    assert_eq!(msg.text(), None);

    let back = serde_json::to_value(&msg).expect("failed to serialize message");
    assert_eq!(back, json!({ "id": "", "role": "system" }));
}

#[test]
fn test_message_keeps_unknown_role() {
    let raw = json!({ "id": "m1", "role": "tool", "content": "42" });
    let msg: Message = serde_json::from_value(raw.clone()).expect("failed to parse message");
    assert_eq!(msg.role(), &Role::Other("tool".to_string()));
    assert_eq!(msg.role().as_str(), "tool");
    assert!(!msg.is_user());

    let back = serde_json::to_value(&msg).expect("failed to serialize message");
    assert_eq!(back, raw);
}

#[test]
fn test_message_requires_a_role() {
    let result = serde_json::from_value::<Message>(json!({ "id": "m1", "content": "hi" }));
    assert!(result.is_err());
}

#[test]
fn test_message_constructors_serialize_as_parts() {
    let msg = Message::assistant("welcome-1", "Hello!");
    let value = serde_json::to_value(&msg).expect("failed to serialize message");
    assert_eq!(
        value,
        json!({
            "id": "welcome-1",
            "role": "assistant",
            "parts": [{ "type": "text", "text": "Hello!" }]
        })
    );
}
