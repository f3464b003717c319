#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::constants::UNTITLED_TITLE;

use super::Message;

/// Elapsed generation time in milliseconds, keyed by assistant message id.
pub type DurationMap = BTreeMap<String, f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default, deserialize_with = "crate::models::lenient::skip_invalid")]
    messages: Vec<Message>,
    #[serde(default)]
    durations: DurationMap,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(id: impl Into<String>, title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            messages: vec![],
            durations: DurationMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_durations(mut self, durations: DurationMap) -> Self {
        self.durations = durations;
        self
    }

    pub fn with_updated_at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.updated_at = timestamp.max(self.created_at);
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replaces the transcript and its durations.
    pub fn set_content(&mut self, messages: Vec<Message>, durations: DurationMap) {
        self.messages = messages;
        self.durations = durations;
    }

    /// Moves `updated_at` forward to `now`. It never goes backwards.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = self.updated_at.max(now);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn durations(&self) -> &DurationMap {
        &self.durations
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn has_content(&self, messages: &[Message], durations: &DurationMap) -> bool {
        self.messages == messages && &self.durations == durations
    }

    pub fn summary(&self) -> ConversationSummary {
        ConversationSummary {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }
}

/// What the sidebar shows for a conversation. The transcript is withheld.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: String,
    pub title: String,
}

impl ConversationSummary {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED_TITLE
        } else {
            &self.title
        }
    }
}
