#[cfg(test)]
#[path = "legacy_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

use crate::models::{DurationMap, Message};

use super::{ArcStore, read_document, write_document};

/// The single-conversation document written by clients that predate
/// multiple conversations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyDocument {
    #[serde(default, deserialize_with = "crate::models::lenient::skip_invalid")]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub durations: DurationMap,
}

#[derive(Serialize)]
struct LegacyDocumentRef<'a> {
    messages: &'a [Message],
    durations: &'a DurationMap,
}

#[derive(Clone)]
pub struct LegacyStore {
    store: ArcStore,
    key: String,
}

impl LegacyStore {
    pub fn new(store: ArcStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Never fails: a missing or unreadable document is an empty one.
    pub fn load(&self) -> LegacyDocument {
        read_document(&*self.store, &self.key)
    }

    pub fn save(&self, messages: &[Message], durations: &DurationMap) {
        let document = LegacyDocumentRef {
            messages,
            durations,
        };
        if write_document(&*self.store, &self.key, &document) {
            log::trace!("legacy document saved with {} messages", messages.len());
        }
    }

    pub fn clear(&self) {
        self.save(&[], &DurationMap::new());
    }
}
