//! Precomputed id lookup for large trees.
//!
//! `NodeIndex` is built in one traversal and maps every id to its location.
//! Parent lookups are O(1); node lookups cost one descent along the stored path.
//! The index holds no borrows, so it can live next to the tree it describes; it
//! must be rebuilt whenever that tree's structure changes.

use super::node::{JsonNode, NodeId};
use super::tree::JsonTree;
use indexmap::IndexMap;

/// Where a node sits in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLocation {
    /// Child indices from the top-level list down to the node
    pub path: Vec<usize>,
    /// Id of the containing node, `None` at top level
    pub parent: Option<NodeId>,
}

impl NodeLocation {
    /// Depth of the node; top-level nodes are at depth 0.
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Flat `id -> location` map in document order.
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    entries: IndexMap<NodeId, NodeLocation>,
}

impl NodeIndex {
    /// Builds the index for a tree.
    ///
    /// # Example
    ///
    /// ```
    /// use jsonsmith::document::codec::decode_root;
    /// use jsonsmith::document::id::IdGenerator;
    /// use jsonsmith::document::index::NodeIndex;
    /// use jsonsmith::document::tree::JsonTree;
    /// use serde_json::json;
    ///
    /// let mut ids = IdGenerator::new();
    /// let tree = JsonTree::from_root(decode_root(&json!({"a": [1]}), &mut ids));
    /// let index = NodeIndex::build(&tree);
    ///
    /// assert_eq!(index.len(), 3);
    /// let leaf = tree.get_node(&[0, 0, 0]).unwrap();
    /// assert_eq!(index.get(&tree, leaf.id()), Some(leaf));
    /// assert_eq!(index.find_parent(&tree, leaf.id()).unwrap().key(), "a");
    /// ```
    pub fn build(tree: &JsonTree) -> Self {
        fn traverse(
            nodes: &[JsonNode],
            parent: Option<NodeId>,
            path: &mut Vec<usize>,
            entries: &mut IndexMap<NodeId, NodeLocation>,
        ) {
            for (position, node) in nodes.iter().enumerate() {
                path.push(position);
                entries.insert(
                    node.id(),
                    NodeLocation {
                        path: path.clone(),
                        parent,
                    },
                );
                if let Some(children) = node.children() {
                    traverse(children, Some(node.id()), path, entries);
                }
                path.pop();
            }
        }

        let mut entries = IndexMap::new();
        traverse(tree.nodes(), None, &mut Vec::new(), &mut entries);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn location(&self, id: NodeId) -> Option<&NodeLocation> {
        self.entries.get(&id)
    }

    pub fn path_of(&self, id: NodeId) -> Option<&[usize]> {
        self.entries.get(&id).map(|loc| loc.path.as_slice())
    }

    /// Id of the node containing `id`, `None` for top-level or unknown ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.entries.get(&id)?.parent
    }

    /// Resolves an id against the tree this index was built from.
    ///
    /// Finding the path is a hash lookup; following it costs one step per
    /// level of depth.
    pub fn get<'t>(&self, tree: &'t JsonTree, id: NodeId) -> Option<&'t JsonNode> {
        tree.get_node(self.path_of(id)?)
    }

    /// Resolves the parent of an id against the tree this index was built from.
    pub fn find_parent<'t>(&self, tree: &'t JsonTree, id: NodeId) -> Option<&'t JsonNode> {
        self.get(tree, self.parent_of(id)?)
    }

    /// Ids in document (pre-)order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::codec::decode_root;
    use crate::document::id::IdGenerator;
    use serde_json::json;

    #[test]
    fn test_index_agrees_with_recursive_lookup() {
        let mut ids = IdGenerator::new();
        let tree = JsonTree::from_root(decode_root(
            &json!({"a": {"b": [1, {"c": null}]}, "d": "x"}),
            &mut ids,
        ));
        let index = NodeIndex::build(&tree);

        assert_eq!(index.len(), tree.node_count());
        for id in index.ids() {
            assert_eq!(index.get(&tree, id), tree.find_node(id));
            assert_eq!(index.find_parent(&tree, id), tree.find_parent(id));
            assert_eq!(index.path_of(id), tree.path_of(id).as_deref());
        }
    }

    #[test]
    fn test_index_order_is_preorder() {
        let mut ids = IdGenerator::new();
        let tree = JsonTree::from_root(decode_root(&json!({"a": [1], "b": 2}), &mut ids));
        let index = NodeIndex::build(&tree);
        let order: Vec<u64> = index.ids().map(|id| id.as_u64()).collect();
        assert_eq!(order, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_depth() {
        let mut ids = IdGenerator::new();
        let tree = JsonTree::from_root(decode_root(&json!({"a": [1]}), &mut ids));
        let index = NodeIndex::build(&tree);
        let leaf = tree.get_node(&[0, 0, 0]).unwrap();
        assert_eq!(index.location(leaf.id()).unwrap().depth(), 2);
        assert_eq!(index.location(tree.root().unwrap().id()).unwrap().depth(), 0);
    }

    #[test]
    fn test_unknown_id() {
        let index = NodeIndex::build(&JsonTree::default());
        assert!(index.is_empty());
        assert!(!index.contains(NodeId(1)));
        assert_eq!(index.parent_of(NodeId(1)), None);
    }
}
