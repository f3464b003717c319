use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Source of conversation ids.
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

pub type ArcIdGenerator = Arc<dyn IdGenerator + Send + Sync>;

#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub type ArcClock = Arc<dyn Clock + Send + Sync>;

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
