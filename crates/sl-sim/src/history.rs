//! Bounded FIFO of recent tick records.

use crate::state::TickRecord;
use std::collections::VecDeque;

/// Number of records kept for display.
pub const HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryBuffer {
    records: VecDeque<TickRecord>,
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl HistoryBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a record, evicting the oldest once full.
    pub fn push(&mut self, record: TickRecord) {
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&TickRecord> {
        self.records.back()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TickRecord> {
        self.records.iter()
    }

    pub fn to_vec(&self) -> Vec<TickRecord> {
        self.records.iter().copied().collect()
    }
}
