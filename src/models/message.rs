#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Author of a message. Roles written by other clients (`tool`, `data`, ...)
/// are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    User,
    Assistant,
    System,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
            Role::Other(role) => role,
        }
    }
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            "system" => Role::System,
            _ => Role::Other(role),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(role) => role,
            known => known.as_str().to_string(),
        }
    }
}

/// One fragment of a message body. Anything that is not a well formed
/// text fragment is kept as raw JSON so it is written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Part {
    Text(TextPart),
    Other(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextPart {
    text: String,
    extra: Map<String, Value>,
}

/// Message body, resolved once when the message is read.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MessageContent {
    /// Ordered typed fragments.
    Parts(Vec<Part>),
    /// Flat string written by older clients.
    Text(String),
    #[default]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MessageRecord", into = "MessageRecord")]
pub struct Message {
    id: String,
    role: Role,
    content: MessageContent,
    extra: Map<String, Value>,
}

impl Message {
    pub fn new(id: impl Into<String>, role: Role, content: MessageContent) -> Self {
        Self {
            id: id.into(),
            role,
            content,
            extra: Map::new(),
        }
    }

    pub fn user(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, Role::User, MessageContent::text_parts(text))
    }

    pub fn assistant(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, Role::Assistant, MessageContent::text_parts(text))
    }

    pub fn system(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, Role::System, MessageContent::text_parts(text))
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    /// Fields this crate does not interpret.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// The first text fragment, or the flat string of a legacy message.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Parts(parts) => parts.iter().find_map(Part::as_text),
            MessageContent::Text(text) => Some(text),
            MessageContent::Empty => None,
        }
    }
}

impl MessageContent {
    pub fn text_parts(text: impl Into<String>) -> Self {
        MessageContent::Parts(vec![Part::text(text)])
    }
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text(TextPart {
            text: text.into(),
            extra: Map::new(),
        })
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text(part) => Some(&part.text),
            Part::Other(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Part::Text(_))
    }
}

impl From<Value> for Part {
    fn from(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Part::Other(value);
        };
        if map.get("type").and_then(Value::as_str) != Some("text") {
            return Part::Other(Value::Object(map));
        }
        match map.remove("text") {
            Some(Value::String(text)) => {
                map.remove("type");
                Part::Text(TextPart { text, extra: map })
            }
            Some(other) => {
                map.insert("text".to_string(), other);
                Part::Other(Value::Object(map))
            }
            None => Part::Other(Value::Object(map)),
        }
    }
}

impl From<Part> for Value {
    fn from(part: Part) -> Self {
        match part {
            Part::Text(TextPart { text, mut extra }) => {
                extra.insert("type".to_string(), Value::String("text".to_string()));
                extra.insert("text".to_string(), Value::String(text));
                Value::Object(extra)
            }
            Part::Other(value) => value,
        }
    }
}

/// Wire shape of a message as written by any client generation.
#[derive(Serialize, Deserialize)]
struct MessageRecord {
    #[serde(default)]
    id: String,
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parts: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn parts_to_value(parts: Vec<Part>) -> Value {
    Value::Array(parts.into_iter().map(Value::from).collect())
}

impl From<MessageRecord> for Message {
    fn from(record: MessageRecord) -> Self {
        let MessageRecord {
            id,
            role,
            parts,
            content,
            mut extra,
        } = record;

        let parts = match parts {
            Some(Value::Array(items)) => Some(items.into_iter().map(Part::from).collect::<Vec<_>>()),
            Some(other) => {
                extra.insert("parts".to_string(), other);
                None
            }
            None => None,
        };

        // A flat string only wins when the fragments carry no text.
        let content = match (parts, content) {
            (Some(parts), Some(Value::String(text))) if !parts.iter().any(Part::is_text) => {
                extra.insert("parts".to_string(), parts_to_value(parts));
                MessageContent::Text(text)
            }
            (Some(parts), content) => {
                if let Some(content) = content {
                    extra.insert("content".to_string(), content);
                }
                MessageContent::Parts(parts)
            }
            (None, Some(Value::String(text))) => MessageContent::Text(text),
            (None, Some(content)) => {
                extra.insert("content".to_string(), content);
                MessageContent::Empty
            }
            (None, None) => MessageContent::Empty,
        };

        Self {
            id,
            role,
            content,
            extra,
        }
    }
}

impl From<Message> for MessageRecord {
    fn from(message: Message) -> Self {
        let Message {
            id,
            role,
            content,
            mut extra,
        } = message;

        let (parts, content) = match content {
            MessageContent::Parts(parts) => (Some(parts_to_value(parts)), extra.remove("content")),
            MessageContent::Text(text) => (extra.remove("parts"), Some(Value::String(text))),
            MessageContent::Empty => (extra.remove("parts"), extra.remove("content")),
        };

        Self {
            id,
            role,
            parts,
            content,
            extra,
        }
    }
}
