use super::*;
use crate::test_utils::SequentialIds;

#[test]
fn test_local_transcript() {
    let mut engine = LocalTranscript::default();
    assert_eq!(engine.status(), Status::Ready);
    assert!(engine.messages().is_empty());

    engine.send("Hi");
    let messages = engine.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].is_user());
    assert_eq!(messages[0].text(), Some("Hi"));
    assert!(!messages[0].id().is_empty());

    engine.set_messages(vec![]);
    assert!(engine.messages().is_empty());

    engine.stop();
    assert_eq!(engine.status(), Status::Ready);
}

#[test]
fn test_status_wire_names() {
    let names: Vec<String> = [Status::Ready, Status::Submitted, Status::Streaming, Status::Error]
        .iter()
        .map(|s| serde_json::to_string(s).expect("serialize status"))
        .collect();
    assert_eq!(
        names,
        vec!["\"ready\"", "\"submitted\"", "\"streaming\"", "\"error\""]
    );
}

#[test]
fn test_local_transcript_uses_injected_ids() {
    let mut engine = LocalTranscript::new(Arc::new(SequentialIds::default()));
    engine.send("one");
    engine.send("two");

    let ids: Vec<String> = engine.messages().iter().map(|m| m.id().to_string()).collect();
    assert_eq!(ids, vec!["conv-1", "conv-2"]);
}
