#[cfg(test)]
#[path = "sqlite_test.rs"]
mod tests;

use std::sync::Mutex;

use eyre::{Context, Result};
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};

use super::{KeyValueStore, StorageError};

const MIGRATION: &str = r#"
    CREATE TABLE IF NOT EXISTS kv (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
"#;

/// Key-value documents in a single SQLite table.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens the database at `path`, or an in-memory one when `path` is None.
    pub fn open(path: Option<&str>) -> Result<Self> {
        let conn = match path {
            Some(path) => Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
            )
            .wrap_err(format!("opening database path: {}", path))?,
            None => Connection::open_in_memory().wrap_err("opening in-memory database")?,
        };

        conn.execute_batch(MIGRATION)
            .wrap_err("running migration")?;
        log::debug!("sqlite store opened at {}", path.unwrap_or(":memory:"));

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::Poisoned)?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::Poisoned)?;
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}
