use eyre::Result;
use serde::{Deserialize, Serialize};

use super::constants::{
    CONVERSATIONS_STORAGE_KEY, DEFAULT_TITLE, LEGACY_STORAGE_KEY, LOG_FILE_PATH, MIGRATED_TITLE,
    SQLITE_DB_PATH, WELCOME_MESSAGE,
};
use super::defaults::*;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Configuration {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct GeneralConfig {
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogConfig {
    #[serde(default = "log_level")]
    pub level: Option<String>,

    #[serde(default)]
    pub filters: Option<Vec<LogFilter>>,

    #[serde(default)]
    pub file: LogFile,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogFilter {
    #[serde(default)]
    pub module: Option<String>,

    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogFile {
    #[serde(default = "log_file_path")]
    pub path: String,

    #[serde(default)]
    pub append: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub enum StorageConfig {
    #[serde(rename = "sqlite")]
    Sqlite(SqliteStorage),

    #[serde(rename = "memory")]
    Memory(MemoryStorage),
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SqliteStorage {
    /// Database file. `None` opens an in-memory database.
    pub path: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct MemoryStorage {
    /// Upper bound of the stored bytes, keys included.
    pub quota_bytes: Option<usize>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SessionConfig {
    #[serde(default = "welcome_message")]
    pub welcome_message: String,

    #[serde(default = "default_title")]
    pub default_title: String,

    #[serde(default = "migrated_title")]
    pub migrated_title: String,

    #[serde(default = "legacy_key")]
    pub legacy_key: String,

    #[serde(default = "conversations_key")]
    pub conversations_key: String,
}

#[cfg(not(test))]
static CONFIG: std::sync::OnceLock<Configuration> = std::sync::OnceLock::new();

// One configuration per test thread.
#[cfg(test)]
thread_local! {
    static TEST_CONFIG: std::cell::Cell<&'static Configuration> =
        std::cell::Cell::new(Box::leak(Box::default()));
}

impl Configuration {
    /// The configuration installed by [`Configuration::init`].
    #[cfg(not(test))]
    pub fn instance() -> &'static Configuration {
        CONFIG.get().expect("Config not initialized")
    }

    #[cfg(not(test))]
    pub fn init(config: Configuration) -> Result<()> {
        CONFIG
            .set(config)
            .map_err(|_| eyre::eyre!("Config already initialized"))
    }

    #[cfg(test)]
    pub fn instance() -> &'static Configuration {
        TEST_CONFIG.with(std::cell::Cell::get)
    }

    #[cfg(test)]
    pub fn init(config: Configuration) -> Result<()> {
        TEST_CONFIG.with(|current| current.set(Box::leak(Box::new(config))));
        Ok(())
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Some("info".to_string()),
            file: LogFile::default(),
            filters: None,
        }
    }
}

impl Default for LogFile {
    fn default() -> Self {
        Self {
            path: LOG_FILE_PATH.to_string(),
            append: false,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::Sqlite(SqliteStorage {
            path: Some(SQLITE_DB_PATH.to_string()),
        })
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            welcome_message: WELCOME_MESSAGE.to_string(),
            default_title: DEFAULT_TITLE.to_string(),
            migrated_title: MIGRATED_TITLE.to_string(),
            legacy_key: LEGACY_STORAGE_KEY.to_string(),
            conversations_key: CONVERSATIONS_STORAGE_KEY.to_string(),
        }
    }
}
