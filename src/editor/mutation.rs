//! Pure structural edits over a `JsonTree`.
//!
//! Every operation reads the input tree and returns a new one; the input is
//! never touched, so snapshots held by the undo history stay valid. A request
//! that cannot be applied (unknown id, adding a child to a scalar, moving across
//! parents, ...) returns `None` and the caller keeps its current tree.
//!
//! Any edit that changes the children of an array re-derives their keys from
//! their positions before returning.
//!
//! # Example
//!
//! ```
//! use jsonsmith::document::codec::{decode_root, encode};
//! use jsonsmith::document::id::IdGenerator;
//! use jsonsmith::document::tree::JsonTree;
//! use jsonsmith::editor::mutation::Mutator;
//! use serde_json::json;
//!
//! let mut ids = IdGenerator::new();
//! let tree = JsonTree::from_root(decode_root(&json!({"b": [true, null]}), &mut ids));
//! let first = tree.get_node(&[0, 0, 0]).unwrap().id();
//!
//! let edited = Mutator::new(&tree).delete(first).unwrap();
//! let remaining = edited.get_node(&[0, 0, 0]).unwrap();
//! assert_eq!(remaining.key(), "0");
//! assert_eq!(encode(edited.root().unwrap()), json!({"b": [null]}));
//! ```

use crate::document::codec::{new_node, NEW_KEY};
use crate::document::id::IdGenerator;
use crate::document::index::NodeIndex;
use crate::document::node::{JsonNode, NodeId, NodeType, NodeValue};
use crate::document::tree::JsonTree;
use serde_json::Value;
use tracing::debug;

/// A partial update of a node's attributes. Unset fields are left alone.
///
/// # Example
///
/// ```
/// use jsonsmith::document::node::NodeType;
/// use jsonsmith::editor::mutation::NodeUpdate;
/// use serde_json::json;
///
/// let update = NodeUpdate::new().node_type(NodeType::Number).value(json!(7));
/// assert_eq!(update.node_type, Some(NodeType::Number));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeUpdate {
    pub key: Option<String>,
    pub value: Option<Value>,
    pub node_type: Option<NodeType>,
    pub expanded: Option<bool>,
}

impl NodeUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn node_type(mut self, node_type: NodeType) -> Self {
        self.node_type = Some(node_type);
        self
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = Some(expanded);
        self
    }
}

/// Applies edits to a tree, resolving ids by recursive search or, when one is
/// supplied, through a prebuilt `NodeIndex`.
///
/// The index must have been built from the same tree.
#[derive(Debug, Clone, Copy)]
pub struct Mutator<'a> {
    tree: &'a JsonTree,
    index: Option<&'a NodeIndex>,
}

impl<'a> Mutator<'a> {
    pub fn new(tree: &'a JsonTree) -> Self {
        Self { tree, index: None }
    }

    pub fn with_index(mut self, index: &'a NodeIndex) -> Self {
        self.index = Some(index);
        self
    }

    fn locate(&self, id: NodeId) -> Option<Vec<usize>> {
        match self.index {
            Some(index) => index.path_of(id).map(<[usize]>::to_vec),
            None => self.tree.path_of(id),
        }
    }

    fn parent(&self, id: NodeId) -> Option<&'a JsonNode> {
        match self.index {
            Some(index) => index.find_parent(self.tree, id),
            None => self.tree.find_parent(id),
        }
    }

    /// Replaces the listed attributes of a node.
    ///
    /// Changing the type resets the payload to the new type's default; a
    /// container target gets empty children and is expanded. A value is applied
    /// after any type change: it is ignored on containers and refused when its
    /// kind does not match the node's scalar type. Renaming is refused for array
    /// children and for object children whose new key a sibling already uses.
    pub fn update(&self, id: NodeId, update: &NodeUpdate) -> Option<JsonTree> {
        let path = self.locate(id)?;
        let current = self.tree.get_node(&path)?;
        let target_type = update.node_type.unwrap_or_else(|| current.node_type());

        if let Some(key) = update.key.as_deref().filter(|k| *k != current.key()) {
            if let Some(parent) = self.parent(id) {
                match parent.value() {
                    NodeValue::Array(_) => {
                        debug!(%id, "refusing to rename an array element");
                        return None;
                    }
                    NodeValue::Object(siblings)
                        if siblings.iter().any(|s| s.id() != id && s.key() == key) =>
                    {
                        debug!(%id, key, "refusing rename onto an existing sibling key");
                        return None;
                    }
                    _ => {}
                }
            }
        }

        let new_payload = match &update.value {
            Some(value) if !target_type.is_container() => match NodeValue::from_scalar(value) {
                Some(payload) if payload.node_type() == target_type => Some(payload),
                _ => {
                    debug!(%id, %target_type, "refusing value that does not match node type");
                    return None;
                }
            },
            _ => None,
        };

        let mut tree = self.tree.clone();
        let node = tree.get_node_mut(&path)?;

        if let Some(key) = &update.key {
            node.key = key.clone();
        }
        if let Some(expanded) = update.expanded {
            node.expanded = expanded;
        }
        if target_type != node.node_type() {
            node.value = NodeValue::default_for(target_type);
            if target_type.is_container() {
                node.expanded = true;
            }
        }
        if let Some(payload) = new_payload {
            node.value = payload;
        }

        Some(tree)
    }

    /// Removes a node and its subtree.
    pub fn delete(&self, id: NodeId) -> Option<JsonTree> {
        let path = self.locate(id)?;
        let position = *path.last()?;

        let mut tree = self.tree.clone();
        tree.siblings_mut(&path)?.remove(position);
        reindex_parent(&mut tree, &path);
        Some(tree)
    }

    /// Deep-clones a node with fresh ids and inserts the clone right after it.
    ///
    /// A top-level node's clone is appended to the top-level list.
    pub fn duplicate(&self, id: NodeId, ids: &mut IdGenerator) -> Option<JsonTree> {
        let path = self.locate(id)?;
        let original = self.tree.get_node(&path)?;
        let clone = clone_with_fresh_ids(original, original.parent_id(), ids);

        let mut tree = self.tree.clone();
        if path.len() == 1 {
            tree.nodes_mut().push(clone);
        } else {
            let position = *path.last()?;
            tree.siblings_mut(&path)?.insert(position + 1, clone);
            reindex_parent(&mut tree, &path);
        }
        Some(tree)
    }

    /// Appends a default-valued child of the given type to a container.
    pub fn add_child(
        &self,
        parent_id: NodeId,
        node_type: NodeType,
        ids: &mut IdGenerator,
    ) -> Option<JsonTree> {
        let path = self.locate(parent_id)?;

        let key = match self.tree.get_node(&path)?.value() {
            NodeValue::Array(children) => children.len().to_string(),
            NodeValue::Object(_) => NEW_KEY.to_string(),
            _ => {
                debug!(%parent_id, "refusing to add a child to a scalar");
                return None;
            }
        };

        let child = new_node(key, node_type, Some(parent_id), ids);
        let mut tree = self.tree.clone();
        tree.get_node_mut(&path)?.children_mut()?.push(child);
        Some(tree)
    }

    /// Moves `active_id` to the position `over_id` holds among their siblings.
    ///
    /// Both nodes must share the same parent; top-level nodes cannot be moved.
    pub fn move_node(&self, active_id: NodeId, over_id: NodeId) -> Option<JsonTree> {
        if active_id == over_id {
            return None;
        }

        let active_path = self.locate(active_id)?;
        let over_path = self.locate(over_id)?;
        let (&from, active_parent) = active_path.split_last()?;
        let (&to, over_parent) = over_path.split_last()?;

        if active_parent.is_empty() || over_parent.is_empty() {
            debug!(%active_id, %over_id, "refusing to move a top-level node");
            return None;
        }
        if active_parent != over_parent {
            debug!(%active_id, %over_id, "refusing to move across parents");
            return None;
        }

        let mut tree = self.tree.clone();
        let siblings = tree.siblings_mut(&active_path)?;
        let node = siblings.remove(from);
        siblings.insert(to, node);
        reindex_parent(&mut tree, &active_path);
        Some(tree)
    }

    /// Sets the expanded flag of one node.
    pub fn set_expanded(&self, id: NodeId, expanded: bool) -> Option<JsonTree> {
        let path = self.locate(id)?;
        let mut tree = self.tree.clone();
        tree.get_node_mut(&path)?.expanded = expanded;
        Some(tree)
    }

    /// Flips the expanded flag of one node.
    pub fn toggle_expanded(&self, id: NodeId) -> Option<JsonTree> {
        let path = self.locate(id)?;
        let mut tree = self.tree.clone();
        let node = tree.get_node_mut(&path)?;
        node.expanded = !node.expanded;
        Some(tree)
    }

    /// Sets the expanded flag of every container; scalars keep theirs.
    pub fn set_all_expanded(&self, expanded: bool) -> JsonTree {
        fn apply(nodes: &mut [JsonNode], expanded: bool) {
            for node in nodes {
                if let Some(children) = node.children_mut() {
                    apply(children, expanded);
                    node.expanded = expanded;
                }
            }
        }

        let mut tree = self.tree.clone();
        apply(tree.nodes_mut(), expanded);
        tree
    }
}

/// Returns a copy of `node` whose array children are keyed by position.
///
/// Non-array nodes are returned unchanged.
pub fn reindex_array_children(node: &JsonNode) -> JsonNode {
    let mut node = node.clone();
    reindex_in_place(&mut node);
    node
}

fn reindex_in_place(node: &mut JsonNode) {
    if let NodeValue::Array(children) = &mut node.value {
        for (position, child) in children.iter_mut().enumerate() {
            child.key = position.to_string();
        }
    }
}

/// Reindexes the parent of the node at `path`, if it is an array.
fn reindex_parent(tree: &mut JsonTree, path: &[usize]) {
    if let Some((_, parent_path)) = path.split_last().filter(|(_, p)| !p.is_empty()) {
        if let Some(parent) = tree.get_node_mut(parent_path) {
            reindex_in_place(parent);
        }
    }
}

fn clone_children(children: &[JsonNode], parent: NodeId, ids: &mut IdGenerator) -> Vec<JsonNode> {
    children
        .iter()
        .map(|child| clone_with_fresh_ids(child, Some(parent), ids))
        .collect()
}

/// Deep clone with a fresh id on every node, keeping keys, values, and
/// expansion state.
fn clone_with_fresh_ids(
    node: &JsonNode,
    parent_id: Option<NodeId>,
    ids: &mut IdGenerator,
) -> JsonNode {
    let id = ids.next_id();
    let value = match node.value() {
        NodeValue::Object(children) => NodeValue::Object(clone_children(children, id, ids)),
        NodeValue::Array(children) => NodeValue::Array(clone_children(children, id, ids)),
        scalar => scalar.clone(),
    };

    JsonNode {
        id,
        key: node.key.clone(),
        value,
        parent_id,
        expanded: node.expanded,
    }
}
