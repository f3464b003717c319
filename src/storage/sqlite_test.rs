use super::*;

fn temp_db(prefix: &str) -> std::path::PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time should be monotonic")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "chatty_sessions_{prefix}_{}_{}.db",
        std::process::id(),
        nanos
    ))
}

#[test]
fn test_sqlite_store_in_memory() {
    let store = SqliteStore::open(None).expect("failed to open store");
    assert_eq!(store.get("missing").unwrap(), None);

    store.set("chat-messages", r#"{"messages":[]}"#).unwrap();
    assert_eq!(
        store.get("chat-messages").unwrap().as_deref(),
        Some(r#"{"messages":[]}"#)
    );

    store.set("chat-messages", "{}").unwrap();
    assert_eq!(store.get("chat-messages").unwrap().as_deref(), Some("{}"));
}

#[test]
fn test_sqlite_store_persists_across_reopen() {
    let path = temp_db("reopen");
    let path_str = path.to_string_lossy().to_string();

    {
        let store = SqliteStore::open(Some(&path_str)).expect("failed to open store");
        store.set("chat-conversations-v1", r#"{"conversations":[]}"#).unwrap();
    }

    let store = SqliteStore::open(Some(&path_str)).expect("failed to reopen store");
    assert_eq!(
        store.get("chat-conversations-v1").unwrap().as_deref(),
        Some(r#"{"conversations":[]}"#)
    );

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_sqlite_store_open_bad_path() {
    let result = SqliteStore::open(Some("/nonexistent-dir/for/sure/sessions.db"));
    let err = result.err().expect("opening should fail");
    assert_eq!(
        err.to_string(),
        "opening database path: /nonexistent-dir/for/sure/sessions.db"
    );
}
