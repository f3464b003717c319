#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod tests;

use crate::models::derive_title;
use crate::storage::{ConversationRepository, LegacyStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Stored conversations were found; the id is the one made active.
    Restored(String),
    /// The legacy document became the first conversation.
    Migrated(String),
    /// Nothing stored anywhere.
    Empty,
}

/// Reconciles the legacy document with the conversation repository at
/// session start.
///
/// Conversations already held in memory win over storage, so running this
/// again in the same session never migrates twice, even when the first
/// write did not reach the store.
pub fn bootstrap(
    repository: &mut ConversationRepository,
    legacy: &LegacyStore,
    migrated_title: &str,
) -> BootstrapOutcome {
    if repository.state().is_empty() {
        let stored = repository.load();
        repository.replace(stored);
    }

    let restored = repository
        .active()
        .or_else(|| repository.state().head())
        .map(|convo| convo.id().to_string());
    if let Some(id) = restored {
        repository.select(&id);
        return BootstrapOutcome::Restored(id);
    }

    let document = legacy.load();
    if document.messages.is_empty() {
        return BootstrapOutcome::Empty;
    }

    let title = derive_title(&document.messages, migrated_title);
    let message_count = document.messages.len();
    let id = repository.create_with(&title, document.messages, document.durations);
    repository.select(&id);
    repository.persist();
    log::info!(
        "migrated {} legacy messages into conversation {}",
        message_count,
        id
    );
    BootstrapOutcome::Migrated(id)
}
