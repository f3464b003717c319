#[cfg(test)]
#[path = "conversations_test.rs"]
mod tests;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Conversation, ConversationSummary, DurationMap, Message, derive_title};

/// The multi-conversation aggregate: conversations ordered newest first and
/// a pointer to the active one.
///
/// Every transition keeps `active_id` either `None` or equal to the id of a
/// conversation in the list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversations {
    #[serde(default, deserialize_with = "crate::models::lenient::skip_invalid")]
    conversations: Vec<Conversation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    active_id: Option<String>,
}

impl Conversations {
    pub fn new(conversations: Vec<Conversation>, active_id: Option<String>) -> Self {
        let mut state = Self {
            conversations,
            active_id,
        };
        state.normalize();
        state
    }

    /// Drops duplicate ids (first one wins) and a dangling active pointer,
    /// and lifts `updated_at` back to `created_at` where it fell behind.
    /// Returns true when a conversation or the pointer was dropped.
    pub fn normalize(&mut self) -> bool {
        let before = self.conversations.len();
        let mut seen = HashSet::new();
        self.conversations
            .retain(|convo| seen.insert(convo.id().to_string()));
        let deduped = before != self.conversations.len();
        if deduped {
            log::warn!(
                "dropped {} conversations with duplicate ids",
                before - self.conversations.len()
            );
        }

        for convo in self.conversations.iter_mut() {
            let created_at = convo.created_at();
            convo.touch(created_at);
        }

        let dangling = matches!(&self.active_id, Some(id) if !self.contains(id));
        if dangling {
            log::warn!(
                "active conversation {} does not exist",
                self.active_id.as_deref().unwrap_or_default()
            );
            self.active_id = None;
        }
        deduped || dangling
    }

    pub fn iter(&self) -> impl Iterator<Item = &Conversation> {
        self.conversations.iter()
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.conversations.iter().any(|convo| convo.id() == id)
    }

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|convo| convo.id() == id)
    }

    pub fn head(&self) -> Option<&Conversation> {
        self.conversations.first()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    pub fn summaries(&self) -> Vec<ConversationSummary> {
        self.conversations.iter().map(Conversation::summary).collect()
    }

    /// Puts `conversation` at the head. An id that is already taken is
    /// refused and false is returned.
    pub fn insert(&mut self, conversation: Conversation) -> bool {
        if self.contains(conversation.id()) {
            return false;
        }
        self.conversations.insert(0, conversation);
        true
    }

    /// Points the active pointer at `id`. An unknown id clears it.
    pub fn select(&mut self, id: &str) -> bool {
        if self.contains(id) {
            self.active_id = Some(id.to_string());
            true
        } else {
            self.active_id = None;
            false
        }
    }

    /// Removes `id`. When it was the active one the new head becomes active.
    pub fn delete(&mut self, id: &str) -> Option<Conversation> {
        let idx = self.conversations.iter().position(|convo| convo.id() == id)?;
        let removed = self.conversations.remove(idx);
        if self.active_id.as_deref() == Some(id) {
            self.active_id = self.head().map(|convo| convo.id().to_string());
        }
        Some(removed)
    }

    /// Writes a transcript into conversation `id`, creating it at the head
    /// when it does not exist yet. The title is derived again on every call.
    pub fn upsert(
        &mut self,
        id: &str,
        messages: Vec<Message>,
        durations: DurationMap,
        default_title: &str,
        now: DateTime<Utc>,
    ) {
        match self.conversations.iter_mut().find(|convo| convo.id() == id) {
            Some(convo) => {
                let title = derive_title(&messages, convo.title());
                convo.set_title(title);
                convo.set_content(messages, durations);
                convo.touch(now);
            }
            None => {
                let title = derive_title(&messages, default_title);
                self.conversations.insert(
                    0,
                    Conversation::new(id, title, now)
                        .with_messages(messages)
                        .with_durations(durations),
                );
            }
        }
    }
}
