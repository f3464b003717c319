#[cfg(test)]
#[path = "repository_test.rs"]
mod tests;

use crate::config::constants::DEFAULT_TITLE;
use crate::models::{
    ArcClock, ArcIdGenerator, Conversation, Conversations, DurationMap, Message,
};

use super::{ArcStore, LegacyStore, read_document, write_document};

/// Owns the in-memory conversation aggregate and writes it, as one
/// document, to the store.
pub struct ConversationRepository {
    store: ArcStore,
    key: String,
    legacy: LegacyStore,
    ids: ArcIdGenerator,
    clock: ArcClock,
    default_title: String,
    state: Conversations,
}

impl ConversationRepository {
    pub fn new(
        store: ArcStore,
        key: impl Into<String>,
        legacy: LegacyStore,
        ids: ArcIdGenerator,
        clock: ArcClock,
    ) -> Self {
        Self {
            store,
            key: key.into(),
            legacy,
            ids,
            clock,
            default_title: DEFAULT_TITLE.to_string(),
            state: Conversations::default(),
        }
    }

    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    /// Reads the stored aggregate. Missing or corrupt documents give an
    /// empty one; duplicate ids and a dangling active id are dropped.
    pub fn load(&self) -> Conversations {
        let mut state: Conversations = read_document(&*self.store, &self.key);
        state.normalize();
        state
    }

    /// Writes `state` as a single document so the list and the active
    /// pointer always land together.
    pub fn save(&self, state: &Conversations) {
        if write_document(&*self.store, &self.key, state) {
            log::trace!("saved {} conversations", state.len());
        }
    }

    /// Writes the in-memory aggregate.
    pub fn persist(&self) {
        self.save(&self.state);
    }

    pub fn state(&self) -> &Conversations {
        &self.state
    }

    pub fn replace(&mut self, state: Conversations) {
        self.state = state;
    }

    pub fn active_id(&self) -> Option<&str> {
        self.state.active_id()
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.state.active()
    }

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.state.get(id)
    }

    pub fn default_title(&self) -> &str {
        &self.default_title
    }

    /// Adds an empty conversation at the head and returns its id. It is not
    /// selected.
    pub fn create(&mut self, title: &str) -> String {
        self.create_with(title, vec![], DurationMap::new())
    }

    pub fn create_with(
        &mut self,
        title: &str,
        messages: Vec<Message>,
        durations: DurationMap,
    ) -> String {
        let id = self.unique_id();
        let convo = Conversation::new(&id, title, self.clock.now())
            .with_messages(messages)
            .with_durations(durations);
        self.state.insert(convo);
        log::debug!("created conversation {}", id);
        id
    }

    /// Selects `id`. An unknown id leaves no conversation active.
    pub fn select(&mut self, id: &str) -> bool {
        let found = self.state.select(id);
        if !found {
            log::warn!("conversation {} not found, nothing is active", id);
        }
        found
    }

    /// Removes `id` and writes the result right away. Removing the last
    /// conversation also empties the legacy document so the next migration
    /// does not bring it back.
    pub fn delete(&mut self, id: &str) -> Option<Conversation> {
        let removed = self.state.delete(id)?;
        log::debug!(
            "deleted conversation {}, active is now {:?}",
            id,
            self.state.active_id()
        );
        if self.state.is_empty() {
            self.legacy.clear();
        }
        self.persist();
        Some(removed)
    }

    pub fn upsert(&mut self, id: &str, messages: Vec<Message>, durations: DurationMap) {
        let now = self.clock.now();
        self.state
            .upsert(id, messages, durations, &self.default_title, now);
    }

    fn unique_id(&self) -> String {
        let id = self.ids.next_id();
        let mut candidate = id.clone();
        let mut n = 1;
        while self.state.contains(&candidate) {
            candidate = format!("{id}-{n}");
            n += 1;
        }
        candidate
    }
}
