use super::constants::*;

pub(crate) fn welcome_message() -> String {
    WELCOME_MESSAGE.to_string()
}

pub(crate) fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

pub(crate) fn migrated_title() -> String {
    MIGRATED_TITLE.to_string()
}

pub(crate) fn legacy_key() -> String {
    LEGACY_STORAGE_KEY.to_string()
}

pub(crate) fn conversations_key() -> String {
    CONVERSATIONS_STORAGE_KEY.to_string()
}

pub(crate) fn log_level() -> Option<String> {
    Some("info".to_string())
}

pub(crate) fn log_file_path() -> String {
    LOG_FILE_PATH.to_string()
}
