//! Element id generation and timestamps.

use chrono::Utc;

/// Milliseconds since the UNIX epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Produces `<prefix>-<timestamp>` ids whose timestamps strictly increase.
///
/// Two ids requested within the same millisecond (or after the clock stepped
/// backwards) still differ: the timestamp is bumped past the last one issued.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last_stamp: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, prefix: &str) -> String {
        self.next_at(prefix, now_millis())
    }

    pub fn next_at(&mut self, prefix: &str, millis: i64) -> String {
        let stamp = if millis > self.last_stamp {
            millis
        } else {
            self.last_stamp + 1
        };
        self.last_stamp = stamp;
        format!("{prefix}-{stamp}")
    }
}

/// Synthetic id for an element loaded without one.
pub fn backfill_id(index: usize, load_millis: i64) -> String {
    format!("el-{index}-{load_millis}")
}
