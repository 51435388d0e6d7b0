//! The node collection being edited and recursive lookups over it.
//!
//! A `JsonTree` owns an ordered list of top-level nodes. A decoded document has
//! exactly one of them (the root); duplicating the root appends a second.
//!
//! Nodes can be addressed two ways:
//! - by id, through the recursive `find_node` / `find_parent` / `path_of`
//! - by path, a sequence of child indices where the first index selects the
//!   top-level node
//!
//! # Example
//!
//! ```
//! use jsonsmith::document::codec::decode_root;
//! use jsonsmith::document::id::IdGenerator;
//! use jsonsmith::document::tree::JsonTree;
//! use serde_json::json;
//!
//! let mut ids = IdGenerator::new();
//! let tree = JsonTree::from_root(decode_root(&json!({"items": [1, 2]}), &mut ids));
//!
//! // root -> items -> second element
//! let node = tree.get_node(&[0, 0, 1]).unwrap();
//! assert_eq!(node.key(), "1");
//!
//! let parent = tree.find_parent(node.id()).unwrap();
//! assert_eq!(parent.key(), "items");
//! assert_eq!(tree.path_of(node.id()), Some(vec![0, 0, 1]));
//! ```

use super::node::{JsonNode, NodeId};

/// An ordered collection of top-level nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonTree {
    nodes: Vec<JsonNode>,
}

impl JsonTree {
    pub fn new(nodes: Vec<JsonNode>) -> Self {
        Self { nodes }
    }

    /// Creates a tree holding a single root node.
    pub fn from_root(root: JsonNode) -> Self {
        Self { nodes: vec![root] }
    }

    /// The top-level nodes.
    pub fn nodes(&self) -> &[JsonNode] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut Vec<JsonNode> {
        &mut self.nodes
    }

    /// The first top-level node, which is what gets serialized.
    pub fn root(&self) -> Option<&JsonNode> {
        self.nodes.first()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of nodes at every depth.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().map(JsonNode::subtree_len).sum()
    }

    /// Gets the node at a path.
    ///
    /// Returns `None` when an index is out of bounds or the path tries to
    /// descend into a scalar.
    pub fn get_node(&self, path: &[usize]) -> Option<&JsonNode> {
        let (&first, rest) = path.split_first()?;
        let mut current = self.nodes.get(first)?;

        for &index in rest {
            current = current.children()?.get(index)?;
        }

        Some(current)
    }

    /// Gets a mutable reference to the node at a path.
    pub(crate) fn get_node_mut(&mut self, path: &[usize]) -> Option<&mut JsonNode> {
        let (&first, rest) = path.split_first()?;
        let mut current = self.nodes.get_mut(first)?;

        for &index in rest {
            current = current.children_mut()?.get_mut(index)?;
        }

        Some(current)
    }

    /// Gets the sibling list that the node at `path` lives in.
    ///
    /// For a single-element path this is the top-level list.
    pub(crate) fn siblings_mut(&mut self, path: &[usize]) -> Option<&mut Vec<JsonNode>> {
        match path.split_last()? {
            (_, []) => Some(&mut self.nodes),
            (_, parent_path) => self.get_node_mut(parent_path)?.children_mut(),
        }
    }

    /// Finds a node by id with a depth-first search.
    pub fn find_node(&self, id: NodeId) -> Option<&JsonNode> {
        fn search(nodes: &[JsonNode], id: NodeId) -> Option<&JsonNode> {
            for node in nodes {
                if node.id() == id {
                    return Some(node);
                }
                if let Some(found) = node.children().and_then(|c| search(c, id)) {
                    return Some(found);
                }
            }
            None
        }
        search(&self.nodes, id)
    }

    /// Finds the node whose children directly contain `child_id`.
    ///
    /// Returns `None` for top-level nodes and for unknown ids.
    pub fn find_parent(&self, child_id: NodeId) -> Option<&JsonNode> {
        fn search(nodes: &[JsonNode], child_id: NodeId) -> Option<&JsonNode> {
            for node in nodes {
                if let Some(children) = node.children() {
                    if children.iter().any(|c| c.id() == child_id) {
                        return Some(node);
                    }
                    if let Some(found) = search(children, child_id) {
                        return Some(found);
                    }
                }
            }
            None
        }
        search(&self.nodes, child_id)
    }

    /// Returns the path of the node with the given id.
    pub fn path_of(&self, id: NodeId) -> Option<Vec<usize>> {
        fn search(nodes: &[JsonNode], id: NodeId, path: &mut Vec<usize>) -> bool {
            for (index, node) in nodes.iter().enumerate() {
                path.push(index);
                if node.id() == id {
                    return true;
                }
                if let Some(children) = node.children() {
                    if search(children, id, path) {
                        return true;
                    }
                }
                path.pop();
            }
            false
        }

        let mut path = Vec::new();
        search(&self.nodes, id, &mut path).then_some(path)
    }
}
