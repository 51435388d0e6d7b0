//! Bounded linear undo/redo history.
//!
//! The history is an ordered log of full tree snapshots plus a cursor pointing
//! at the snapshot that is currently live. Committing after an undo discards
//! the redoable future; once the log is full the oldest snapshot is evicted.
//!
//! # Architecture
//!
//! ```text
//!   [s0] [s1] [s2] [s3]
//!              ^
//!            cursor      undo -> s1, redo -> s3
//!
//!   commit(s4) at cursor 2:  [s0] [s1] [s2] [s4]   (s3 dropped)
//! ```
//!
//! Expand/collapse changes are presentation state and are never recorded here.

use crate::document::tree::JsonTree;
use std::collections::VecDeque;

/// Default number of snapshots kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Snapshot log with a cursor.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<JsonTree>,
    index: usize,
    limit: usize,
}

impl History {
    /// Creates a history whose only entry is `initial`.
    ///
    /// A limit of zero is treated as one: the live state is always retained.
    pub fn new(initial: JsonTree, limit: usize) -> Self {
        let mut snapshots = VecDeque::with_capacity(limit.clamp(1, DEFAULT_HISTORY_LIMIT));
        snapshots.push_back(initial);
        Self {
            snapshots,
            index: 0,
            limit: limit.max(1),
        }
    }

    /// Position of the live snapshot.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> Option<&JsonTree> {
        self.snapshots.get(self.index)
    }

    /// Records a new state after the cursor.
    ///
    /// # Example
    ///
    /// ```
    /// use jsonsmith::document::tree::JsonTree;
    /// use jsonsmith::editor::undo::History;
    ///
    /// let mut history = History::new(JsonTree::default(), 2);
    /// history.commit(JsonTree::default());
    /// history.commit(JsonTree::default());
    ///
    /// assert_eq!(history.len(), 2);
    /// assert_eq!(history.index(), 1);
    /// ```
    pub fn commit(&mut self, tree: JsonTree) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push_back(tree);

        if self.snapshots.len() > self.limit {
            self.snapshots.pop_front();
        }

        self.index = self.snapshots.len() - 1;
    }

    /// Steps back one snapshot.
    ///
    /// Returns the snapshot to restore, or None if already at the oldest one.
    pub fn undo(&mut self) -> Option<&JsonTree> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.snapshots.get(self.index)
    }

    /// Steps forward one snapshot.
    ///
    /// Returns the snapshot to restore, or None if already at the newest one.
    pub fn redo(&mut self) -> Option<&JsonTree> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.snapshots.get(self.index)
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Drops every snapshot and starts over from `initial`.
    pub fn reset(&mut self, initial: JsonTree) {
        self.snapshots.clear();
        self.snapshots.push_back(initial);
        self.index = 0;
    }
}
