pub mod error;
pub mod legacy;
pub mod memory;
pub mod repository;
pub mod sqlite;

use std::sync::Arc;

use eyre::{Context, Result};
#[cfg(test)]
use mockall::automock;
use serde::{Serialize, de::DeserializeOwned};

use crate::config::{StorageConfig, init_parent_dir, resolve_path};

pub use error::StorageError;
pub use legacy::{LegacyDocument, LegacyStore};
pub use memory::MemoryStore;
pub use repository::ConversationRepository;
pub use sqlite::SqliteStore;

/// A string key-value medium shared by every logical store of the client.
#[cfg_attr(test, automock)]
pub trait KeyValueStore {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> std::result::Result<(), StorageError>;
}

pub type ArcStore = Arc<dyn KeyValueStore + Send + Sync>;

pub fn new_storage(config: &StorageConfig) -> Result<ArcStore> {
    let storage: ArcStore = match config {
        StorageConfig::Sqlite(sqlite) => {
            let path = match sqlite.path.as_deref() {
                Some(path) => {
                    let path = resolve_path(path)
                        .wrap_err(format!("resolving database path {}", path))?;
                    init_parent_dir(&path)?;
                    Some(path)
                }
                None => None,
            };
            Arc::new(SqliteStore::open(path.as_deref())?)
        }
        StorageConfig::Memory(memory) => {
            let store = match memory.quota_bytes {
                Some(quota) => MemoryStore::default().with_quota(quota),
                None => MemoryStore::default(),
            };
            Arc::new(store)
        }
    };
    Ok(storage)
}

/// Reads the JSON document under `key`. A missing key, a failed read or a
/// document that does not parse all give `T::default()`.
pub(crate) fn read_document<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(err) => {
            log::error!("Failed to read {}: {}", key, err);
            return T::default();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|err| {
        log::error!("Failed to parse {}: {}", key, err);
        T::default()
    })
}

/// Writes `value` as JSON under `key`. Failures are logged and reported as
/// false; the in-memory state stays authoritative.
pub(crate) fn write_document<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> bool
where
    T: Serialize + ?Sized,
{
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(err) => {
            log::error!("Failed to serialize {}: {}", key, err);
            return false;
        }
    };

    match store.set(key, &raw) {
        Ok(()) => true,
        Err(err) => {
            log::error!("Failed to save {}: {}", key, err);
            false
        }
    }
}
