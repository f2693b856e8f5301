//! Undo/redo history for the job board
//!
//! Keeps immutable snapshots of the whole job list with a cursor pointing at
//! the current one. Pushing after an undo discards the redo tail. The oldest
//! snapshots are evicted once the history is full.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::types::Job;

const DEFAULT_HISTORY_SIZE: usize = 50;

pub type Snapshot = Arc<[Job]>;

#[derive(Debug, Clone)]
pub struct JobHistory {
    snapshots: VecDeque<Snapshot>,
    cursor: usize,
    capacity: usize,
}

impl Default for JobHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_SIZE)
    }
}

impl JobHistory {
    /// History starting with an empty job list. `capacity` is clamped to at least 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut snapshots = VecDeque::with_capacity(capacity);
        snapshots.push_back(Snapshot::from(Vec::new()));
        Self {
            snapshots,
            cursor: 0,
            capacity,
        }
    }

    pub fn current(&self) -> Snapshot {
        // cursor always points into `snapshots`
        Arc::clone(&self.snapshots[self.cursor])
    }

    /// Record a new job list as the current state.
    pub fn push(&mut self, jobs: Vec<Job>) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(Snapshot::from(jobs));
        while self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
        self.cursor = self.snapshots.len() - 1;
    }

    pub fn undo(&mut self) -> Option<Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn redo(&mut self) -> Option<Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of stored snapshots, including the current one.
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }
}
