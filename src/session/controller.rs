#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;

use std::sync::Arc;

use crate::config::SessionConfig;
use crate::config::constants::WELCOME_ID_PREFIX;
use crate::models::{
    ArcClock, ArcIdGenerator, Conversation, ConversationSummary, DurationMap, Message,
    SystemClock, UuidGenerator,
};
use crate::storage::{ArcStore, ConversationRepository, LegacyStore};

use super::bootstrap::{BootstrapOutcome, bootstrap};
use super::engine::{Status, StreamingEngine};

/// The last state written through to storage.
#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    active_id: String,
    messages: Vec<Message>,
    durations: DurationMap,
}

/// Binds a streaming engine's transcript to the conversation repository.
///
/// The engine owns the visible transcript. Every operation ends with a
/// refresh: an empty transcript gets the welcome greeting, then whatever
/// is visible is written to the active conversation and mirrored to the
/// legacy document.
pub struct Session<E: StreamingEngine> {
    engine: E,
    repository: ConversationRepository,
    legacy: LegacyStore,
    clock: ArcClock,
    config: SessionConfig,
    durations: DurationMap,
    initialized: bool,
    // Active id the greeting was last injected for.
    welcomed: Option<Option<String>>,
    synced: Option<Snapshot>,
}

impl<E: StreamingEngine> Session<E> {
    pub fn new(engine: E, store: ArcStore, config: SessionConfig) -> Self {
        Self::with_capabilities(
            engine,
            store,
            config,
            Arc::new(UuidGenerator),
            Arc::new(SystemClock),
        )
    }

    pub fn with_capabilities(
        engine: E,
        store: ArcStore,
        config: SessionConfig,
        ids: ArcIdGenerator,
        clock: ArcClock,
    ) -> Self {
        let legacy = LegacyStore::new(store.clone(), config.legacy_key.as_str());
        let repository = ConversationRepository::new(
            store,
            config.conversations_key.as_str(),
            legacy.clone(),
            ids,
            clock.clone(),
        )
        .with_default_title(config.default_title.as_str());

        Self {
            engine,
            repository,
            legacy,
            clock,
            config,
            durations: DurationMap::new(),
            initialized: false,
            welcomed: None,
            synced: None,
        }
    }

    /// Restores or migrates the stored conversations and shows the active
    /// one. Nothing is written before this runs.
    pub fn initialize(&mut self) -> BootstrapOutcome {
        let before = self.repository.active_id().map(str::to_string);
        let outcome = bootstrap(
            &mut self.repository,
            &self.legacy,
            &self.config.migrated_title,
        );
        log::info!("session bootstrap: {:?}", outcome);

        // With nothing stored the engine keeps whatever it shows.
        let changed = self.repository.active_id() != before.as_deref();
        if self.repository.active().is_some() && (!self.initialized || changed) {
            self.load_active();
        }
        self.initialized = true;
        self.refresh();
        outcome
    }

    /// Creates an empty conversation, makes it active and returns its id.
    pub fn new_conversation(&mut self) -> String {
        let id = self.repository.create(&self.config.default_title);
        self.repository.select(&id);
        self.engine.set_messages(vec![]);
        self.durations.clear();
        self.legacy.clear();
        self.refresh();
        id
    }

    /// Shows conversation `id`. An unknown id leaves nothing active and an
    /// empty transcript.
    pub fn select_conversation(&mut self, id: &str) -> bool {
        let found = self.repository.select(id);
        self.load_active();
        self.refresh();
        found
    }

    pub fn delete_conversation(&mut self, id: &str) -> bool {
        let before = self.repository.active_id().map(str::to_string);
        if self.repository.delete(id).is_none() {
            return false;
        }
        if self.repository.active_id() != before.as_deref() {
            self.load_active();
        }
        self.refresh();
        true
    }

    /// Stores how long the reply `message_id` took, replacing any earlier
    /// value. Negative and non-finite values are refused.
    pub fn record_duration(&mut self, message_id: &str, ms: f64) -> bool {
        if !ms.is_finite() || ms < 0.0 {
            log::warn!("ignoring duration {} for message {}", ms, message_id);
            return false;
        }
        self.durations.insert(message_id.to_string(), ms);
        self.refresh();
        true
    }

    /// Forwards `text` to the engine. A first message with no active
    /// conversation creates one so the exchange is kept.
    pub fn send(&mut self, text: &str) {
        if self.initialized && self.repository.active_id().is_none() {
            let id = self.repository.create(&self.config.default_title);
            self.repository.select(&id);
            self.welcomed = Some(Some(id));
        }
        self.engine.send(text);
        self.refresh();
    }

    pub fn stop(&mut self) {
        self.engine.stop();
    }

    /// Called by the host whenever the engine's transcript changed.
    pub fn handle_engine_update(&mut self) {
        self.refresh();
    }

    pub fn conversations(&self) -> Vec<ConversationSummary> {
        self.repository.state().summaries()
    }

    pub fn conversation(&self, id: &str) -> Option<&Conversation> {
        self.repository.get(id)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.repository.active_id()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.engine.messages()
    }

    pub fn durations(&self) -> &DurationMap {
        &self.durations
    }

    pub fn status(&self) -> Status {
        self.engine.status()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    fn load_active(&mut self) {
        match self.repository.active() {
            Some(convo) => {
                self.engine.set_messages(convo.messages().to_vec());
                self.durations = convo.durations().clone();
            }
            None => {
                self.engine.set_messages(vec![]);
                self.durations.clear();
            }
        }
    }

    fn refresh(&mut self) {
        if !self.initialized {
            return;
        }
        self.apply_welcome();
        self.sync();
    }

    fn apply_welcome(&mut self) {
        let active = self.repository.active_id().map(str::to_string);
        if self.welcomed.as_ref() == Some(&active) || !self.engine.messages().is_empty() {
            return;
        }
        let id = format!(
            "{}{}",
            WELCOME_ID_PREFIX,
            self.clock.now().timestamp_millis()
        );
        log::debug!("greeting conversation {:?} with {}", active, id);
        self.engine
            .set_messages(vec![Message::assistant(id, &self.config.welcome_message)]);
        self.durations.clear();
        self.welcomed = Some(active);
    }

    fn sync(&mut self) {
        let Some(active_id) = self.repository.active_id().map(str::to_string) else {
            return;
        };
        let snapshot = Snapshot {
            active_id,
            messages: self.engine.messages(),
            durations: self.durations.clone(),
        };
        if self.synced.as_ref() == Some(&snapshot) {
            return;
        }

        let unchanged = self
            .repository
            .get(&snapshot.active_id)
            .is_some_and(|convo| convo.has_content(&snapshot.messages, &snapshot.durations));
        if !unchanged {
            self.repository.upsert(
                &snapshot.active_id,
                snapshot.messages.clone(),
                snapshot.durations.clone(),
            );
        }
        self.repository.persist();
        self.legacy.save(&snapshot.messages, &snapshot.durations);
        log::trace!(
            "synced {} messages into {}",
            snapshot.messages.len(),
            snapshot.active_id
        );
        self.synced = Some(snapshot);
    }
}
