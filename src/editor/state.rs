//! Editor state management.
//!
//! This module provides the `EditorState` struct that owns everything a host
//! (a UI, the CLI, a test) needs to edit one document: the live tree, its id
//! index, the id generator, the undo history, the last validation error and
//! the current search term.
//!
//! Every structural edit goes through the same path: resolve ids through the
//! index, let a `Mutator` produce a new tree, then commit it. Committing swaps
//! the live tree, rebuilds the index and records a history snapshot. A refused
//! edit changes nothing and records nothing.
//!
//! Expand/collapse changes are applied to the live tree directly and bypass
//! the history.
//!
//! # Example
//!
//! ```
//! use jsonsmith::config::Config;
//! use jsonsmith::document::node::NodeType;
//! use jsonsmith::editor::state::EditorState;
//!
//! let mut state = EditorState::new(&Config::default());
//! state.import_json("[]").unwrap();
//!
//! let root = state.tree().root().unwrap().id();
//! assert!(state.add_child(root, NodeType::Boolean));
//! assert_eq!(state.get_json(), "[\n  false\n]");
//!
//! assert!(state.undo());
//! assert_eq!(state.get_json(), "[]");
//! ```

use super::mutation::{Mutator, NodeUpdate};
use super::undo::History;
use crate::config::Config;
use crate::document::codec::{decode_root, default_document};
use crate::document::id::IdGenerator;
use crate::document::index::NodeIndex;
use crate::document::node::{JsonNode, NodeId, NodeType};
use crate::document::tree::JsonTree;
use crate::error::ImportError;
use crate::file::loader::{parse_document, read_import_file};
use crate::file::saver::serialize_tree;
use std::path::Path;
use tracing::info;

/// The single owned store for one editing session.
#[derive(Debug, Clone)]
pub struct EditorState {
    tree: JsonTree,
    index: NodeIndex,
    ids: IdGenerator,
    history: History,
    validation_error: Option<String>,
    search_term: String,
    indent_size: usize,
    max_import_bytes: u64,
}

impl EditorState {
    /// Creates an editor seeded with the default document.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonsmith::config::Config;
    /// use jsonsmith::editor::state::EditorState;
    ///
    /// let state = EditorState::new(&Config::default());
    ///
    /// assert!(!state.can_undo());
    /// assert_eq!(state.tree().root().unwrap().key(), "root");
    /// assert!(state.get_json().contains("\"name\": \"JSON Editor\""));
    /// ```
    pub fn new(config: &Config) -> Self {
        let mut ids = IdGenerator::new();
        let tree = seed_tree(&mut ids);
        let index = NodeIndex::build(&tree);
        let history = History::new(tree.clone(), config.undo_limit);

        Self {
            tree,
            index,
            ids,
            history,
            validation_error: None,
            search_term: String::new(),
            indent_size: config.indent_size,
            max_import_bytes: config.max_import_bytes,
        }
    }

    /// Clears the history and the search, and reseeds the default document.
    pub fn reset(&mut self) {
        self.ids.reset();
        self.tree = seed_tree(&mut self.ids);
        self.index = NodeIndex::build(&self.tree);
        self.history.reset(self.tree.clone());
        self.validation_error = None;
        self.search_term.clear();
    }

    /// Replaces the document with parsed JSON text.
    ///
    /// On success the id generator restarts, the new tree becomes a single
    /// history entry after the current one (so an import can be undone), and
    /// any previous validation error is cleared. On failure the tree and the
    /// history are untouched and the error message is kept for display.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonsmith::config::Config;
    /// use jsonsmith::editor::state::EditorState;
    ///
    /// let mut state = EditorState::new(&Config::default());
    /// let before = state.get_json();
    ///
    /// assert!(state.import_json("{\"a\": }").is_err());
    /// assert!(state.validation_error().is_some());
    /// assert_eq!(state.get_json(), before);
    /// ```
    pub fn import_json(&mut self, text: &str) -> Result<(), ImportError> {
        let mut ids = IdGenerator::new();
        match parse_document(text, &mut ids) {
            Ok(tree) => {
                self.ids = ids;
                self.validation_error = None;
                info!(nodes = tree.node_count(), "imported document");
                self.commit(tree);
                Ok(())
            }
            Err(err) => {
                self.validation_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Reads a file (gzip-aware, size-limited) and imports it.
    pub fn import_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ImportError> {
        let text = match read_import_file(path, self.max_import_bytes) {
            Ok(text) => text,
            Err(err) => {
                self.validation_error = Some(err.to_string());
                return Err(err);
            }
        };
        self.import_json(&text)
    }

    /// Applies a partial update. Returns false if the update was refused.
    pub fn update_node(&mut self, id: NodeId, update: &NodeUpdate) -> bool {
        let edited = self.mutator().update(id, update);
        self.commit_if_some(edited)
    }

    pub fn delete_node(&mut self, id: NodeId) -> bool {
        let edited = self.mutator().delete(id);
        self.commit_if_some(edited)
    }

    pub fn duplicate_node(&mut self, id: NodeId) -> bool {
        let edited = Mutator::new(&self.tree)
            .with_index(&self.index)
            .duplicate(id, &mut self.ids);
        self.commit_if_some(edited)
    }

    /// Appends a default-valued child of `node_type` to a container.
    pub fn add_child(&mut self, parent_id: NodeId, node_type: NodeType) -> bool {
        let edited = Mutator::new(&self.tree)
            .with_index(&self.index)
            .add_child(parent_id, node_type, &mut self.ids);
        self.commit_if_some(edited)
    }

    /// Reorders `active_id` onto `over_id`'s position. Both must share a parent.
    pub fn move_node(&mut self, active_id: NodeId, over_id: NodeId) -> bool {
        let edited = self.mutator().move_node(active_id, over_id);
        self.commit_if_some(edited)
    }

    pub fn toggle_expand(&mut self, id: NodeId) -> bool {
        let edited = self.mutator().toggle_expanded(id);
        self.replace_untracked(edited)
    }

    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) -> bool {
        let edited = self.mutator().set_expanded(id, expanded);
        self.replace_untracked(edited)
    }

    pub fn expand_all(&mut self) {
        self.tree = self.mutator().set_all_expanded(true);
    }

    pub fn collapse_all(&mut self) {
        self.tree = self.mutator().set_all_expanded(false);
    }

    /// Undoes the last committed change.
    ///
    /// Returns true if undo succeeded, false if already at the oldest state.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                let snapshot = snapshot.clone();
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Redoes the last undone change.
    ///
    /// Returns true if redo succeeded, false if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                let snapshot = snapshot.clone();
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Serializes the document with the configured indentation.
    ///
    /// An empty document serializes to `{}`.
    pub fn get_json(&self) -> String {
        serialize_tree(&self.tree, self.indent_size)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Message from the last failed import, cleared by the next success.
    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    pub fn tree(&self) -> &JsonTree {
        &self.tree
    }

    pub fn index(&self) -> &NodeIndex {
        &self.index
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Looks a node up by id through the index.
    pub fn find_node(&self, id: NodeId) -> Option<&JsonNode> {
        self.index.get(&self.tree, id)
    }

    fn mutator(&self) -> Mutator<'_> {
        Mutator::new(&self.tree).with_index(&self.index)
    }

    fn commit_if_some(&mut self, edited: Option<JsonTree>) -> bool {
        match edited {
            Some(tree) => {
                self.commit(tree);
                true
            }
            None => false,
        }
    }

    fn commit(&mut self, tree: JsonTree) {
        self.history.commit(tree.clone());
        self.tree = tree;
        self.index = NodeIndex::build(&self.tree);
    }

    /// Swaps the live tree without touching the history.
    ///
    /// Node ids and paths are unchanged by expansion edits, so the index stays
    /// valid.
    fn replace_untracked(&mut self, edited: Option<JsonTree>) -> bool {
        match edited {
            Some(tree) => {
                self.tree = tree;
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, snapshot: JsonTree) {
        self.tree = snapshot;
        self.index = NodeIndex::build(&self.tree);
        // Snapshots from before an import may hold ids above the restarted sequence.
        if let Some(max) = self.index.ids().max() {
            self.ids.advance_past(max);
        }
    }
}

fn seed_tree(ids: &mut IdGenerator) -> JsonTree {
    JsonTree::from_root(decode_root(&default_document(), ids))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refused_edit_records_nothing() {
        let mut state = EditorState::new(&Config::default());
        let root = state.tree().root().unwrap().id();

        assert!(!state.move_node(root, root));
        assert!(!state.delete_node(NodeId(9_999)));
        assert!(!state.can_undo());
    }

    #[test]
    fn test_index_rebuilt_after_commit() {
        let mut state = EditorState::new(&Config::default());
        state.import_json("{\"a\": [1]}").unwrap();
        let array = state.tree().get_node(&[0, 0]).unwrap().id();

        assert!(state.add_child(array, NodeType::Null));
        let added = state.tree().get_node(&[0, 0, 1]).unwrap().id();
        assert_eq!(state.index().path_of(added), Some(&[0, 0, 1][..]));
        assert_eq!(state.find_node(added).unwrap().key(), "1");
    }

    #[test]
    fn test_ids_stay_unique_after_undoing_an_import() {
        let mut state = EditorState::new(&Config::default());
        state.import_json("[1]").unwrap();
        assert!(state.undo());

        let root = state.tree().root().unwrap().id();
        assert!(state.duplicate_node(root));

        let mut seen: Vec<NodeId> = state.index().ids().collect();
        let total = seen.len();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), total);
    }

    #[test]
    fn test_reset_reseeds() {
        let mut state = EditorState::new(&Config::default());
        let seeded = state.get_json();
        state.import_json("[]").unwrap();
        state.set_search_term("x");

        state.reset();

        assert_eq!(state.get_json(), seeded);
        assert!(!state.can_undo());
        assert_eq!(state.search_term(), "");
    }
}
