/// Greeting injected into an empty transcript
pub const WELCOME_MESSAGE: &str = "Hello! How can I help you? 😊";

/// Title of a conversation created from scratch
pub const DEFAULT_TITLE: &str = "New chat";

/// Fallback title of the conversation synthesized from the legacy document
pub const MIGRATED_TITLE: &str = "First chat";

/// Rendered in place of an empty title
pub const UNTITLED_TITLE: &str = "Untitled chat";

/// Derived titles keep at most this many characters
pub const TITLE_MAX_CHARS: usize = 40;

/// Single-conversation document kept for pre multi-conversation clients
pub const LEGACY_STORAGE_KEY: &str = "chat-messages";

pub const CONVERSATIONS_STORAGE_KEY: &str = "chat-conversations-v1";

/// Prefix of the synthetic welcome message id, followed by unix millis
pub const WELCOME_ID_PREFIX: &str = "welcome-";

pub const LOG_FILE_PATH: &str = "/tmp/chatty-sessions.log";

pub const SQLITE_DB_PATH: &str = "${HOME}/.chatty-sessions/sessions.db";
