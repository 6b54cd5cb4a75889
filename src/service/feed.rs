//! Bounded in-memory feed of recent delivery attempts.

use std::collections::VecDeque;

use tokio::sync::RwLock;

use crate::model::message::MessageRecord;

/// How many records the dashboard keeps.
pub const FEED_CAPACITY: usize = 25;

/// Recent message records, newest first.
///
/// Ephemeral: the feed lives in process memory only and starts empty after a
/// restart. The dashboard polls it on a timer and overwrites its displayed
/// list with whatever this returns.
pub struct MessageFeed {
    records: RwLock<VecDeque<MessageRecord>>,
    capacity: usize,
}

impl MessageFeed {
    pub fn new() -> Self {
        Self::with_capacity(FEED_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Records a delivery attempt, evicting the oldest entry when full.
    pub async fn push(&self, record: MessageRecord) {
        let mut records = self.records.write().await;
        records.push_front(record);
        records.truncate(self.capacity);
    }

    /// Snapshot of the feed, newest first.
    pub async fn recent(&self) -> Vec<MessageRecord> {
        self.records.read().await.iter().cloned().collect()
    }
}

impl Default for MessageFeed {
    fn default() -> Self {
        Self::new()
    }
}
