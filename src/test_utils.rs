use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Duration, Utc};

use crate::models::{Clock, IdGenerator};

/// Hands out `conv-1`, `conv-2`, ...
#[derive(Debug, Default)]
pub(crate) struct SequentialIds {
    next: AtomicUsize,
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format!("conv-{n}")
    }
}

/// Always returns the same id.
pub(crate) struct FixedId(pub &'static str);

impl IdGenerator for FixedId {
    fn next_id(&self) -> String {
        self.0.to_string()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub(crate) struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub(crate) fn at(secs: i64) -> Self {
        Self {
            now: Mutex::new(ts(secs)),
        }
    }

    pub(crate) fn advance(&self, secs: i64) {
        let mut now = self.now.lock().expect("clock lock");
        *now += Duration::seconds(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

pub(crate) fn ts(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).expect("valid timestamp")
}
