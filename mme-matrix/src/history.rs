//! Bounded undo history

use std::collections::VecDeque;
use tracing::trace;

use crate::types::Matrix;

/// FIFO of matrix snapshots, oldest at the front.
///
/// Pushing past `capacity` evicts the oldest snapshot.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Matrix>,
    capacity: usize,
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn push(&mut self, snapshot: Matrix) {
        self.entries.push_back(snapshot);
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            trace!(capacity = self.capacity, "evicted oldest snapshot");
        }
        trace!(len = self.entries.len(), "snapshot stored");
    }

    /// Take the most recent snapshot
    pub fn pop(&mut self) -> Option<Matrix> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
