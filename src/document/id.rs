//! Node identity generation.
//!
//! Ids are sequence numbers handed out by an `IdGenerator` owned by the editor
//! state. Resetting the generator on a full re-import makes ids reproducible per
//! import; history snapshots carry whole nodes, so ids never need to be unique
//! across imports.

use super::node::NodeId;

/// Issues node ids that are distinct since the last `reset()`.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    issued: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an id never issued since the last reset.
    ///
    /// # Example
    ///
    /// ```
    /// use jsonsmith::document::id::IdGenerator;
    ///
    /// let mut ids = IdGenerator::new();
    /// let a = ids.next_id();
    /// let b = ids.next_id();
    /// assert_ne!(a, b);
    /// assert_eq!(a.to_string(), "node_1");
    /// ```
    pub fn next_id(&mut self) -> NodeId {
        self.issued += 1;
        NodeId(self.issued)
    }

    /// Returns the generator to its initial state.
    pub fn reset(&mut self) {
        self.issued = 0;
    }

    /// Moves the sequence past `id` so later ids cannot collide with it.
    ///
    /// Used after restoring a snapshot that was built before the last reset.
    pub fn advance_past(&mut self, id: NodeId) {
        self.issued = self.issued.max(id.as_u64());
    }

    /// Number of ids issued since the last reset.
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic() {
        let mut ids = IdGenerator::new();
        let first = ids.next_id();
        let second = ids.next_id();
        assert!(second > first);
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn test_reset_reproduces_sequence() {
        let mut ids = IdGenerator::new();
        let before: Vec<_> = (0..3).map(|_| ids.next_id()).collect();
        ids.reset();
        let after: Vec<_> = (0..3).map(|_| ids.next_id()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_advance_past_skips_existing_ids() {
        let mut ids = IdGenerator::new();
        ids.advance_past(NodeId(10));
        assert_eq!(ids.next_id(), NodeId(11));

        ids.advance_past(NodeId(3));
        assert_eq!(ids.next_id(), NodeId(12));
    }
}
