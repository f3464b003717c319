#[cfg(test)]
#[path = "title_test.rs"]
mod tests;

use crate::config::constants::TITLE_MAX_CHARS;

use super::Message;

/// Derives a display title from the first user message of a transcript.
///
/// The first text fragment (or the flat string of a legacy message) is cut
/// to [`TITLE_MAX_CHARS`] characters. A transcript without a user message,
/// or whose first user message carries no text, gets `fallback`.
pub fn derive_title(messages: &[Message], fallback: &str) -> String {
    messages
        .iter()
        .find(|msg| msg.is_user())
        .and_then(Message::text)
        .map(|text| text.chars().take(TITLE_MAX_CHARS).collect())
        .unwrap_or_else(|| fallback.to_string())
}
