pub mod conversation;
pub mod conversations;
pub mod ids;
pub(crate) mod lenient;
pub mod message;
pub mod title;

pub use conversation::{Conversation, ConversationSummary, DurationMap};
pub use conversations::Conversations;
pub use ids::{ArcClock, ArcIdGenerator, Clock, IdGenerator, SystemClock, UuidGenerator};
pub use message::{Message, MessageContent, Part, Role};
pub use title::derive_title;
