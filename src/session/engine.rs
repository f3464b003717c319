#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::models::{ArcIdGenerator, Message, UuidGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Ready,
    Submitted,
    Streaming,
    Error,
}

/// The collaborator that owns message generation. The session only reads
/// and replaces its transcript wholesale and forwards send/stop intents.
#[cfg_attr(test, automock)]
pub trait StreamingEngine {
    fn messages(&self) -> Vec<Message>;
    fn set_messages(&mut self, messages: Vec<Message>);
    fn status(&self) -> Status;
    fn send(&mut self, text: &str);
    fn stop(&mut self);
}

/// An engine with no backend: sent text is appended as a user message and
/// nothing is ever generated.
pub struct LocalTranscript {
    ids: ArcIdGenerator,
    messages: Vec<Message>,
    status: Status,
}

impl LocalTranscript {
    pub fn new(ids: ArcIdGenerator) -> Self {
        Self {
            ids,
            messages: vec![],
            status: Status::default(),
        }
    }
}

impl Default for LocalTranscript {
    fn default() -> Self {
        Self::new(Arc::new(UuidGenerator))
    }
}

impl StreamingEngine for LocalTranscript {
    fn messages(&self) -> Vec<Message> {
        self.messages.clone()
    }

    fn set_messages(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    fn status(&self) -> Status {
        self.status
    }

    fn send(&mut self, text: &str) {
        let id = self.ids.next_id();
        self.messages.push(Message::user(id, text));
    }

    fn stop(&mut self) {
        self.status = Status::Ready;
    }
}
