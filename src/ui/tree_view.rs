//! Tree view data structures for displaying JSON as an expandable tree.
//!
//! This module provides:
//! - `FlatNode`: A single displayable line in the tree view
//! - `flatten_visible_nodes`: The visible lines of a forest, in document order
//! - `matches_search`: The search predicate hosts use to highlight lines
//! - `render_outline`: A plain-text rendering of the visible lines

use crate::document::node::{JsonNode, NodeId, NodeValue};
use std::fmt::Write;

/// Represents a single line in the tree view display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatNode<'a> {
    pub node: &'a JsonNode,
    /// Indentation depth (0 for top-level nodes)
    pub depth: usize,
    /// Whether this node is a container (object/array), even an empty one
    pub has_children: bool,
    pub is_expanded: bool,
}

impl FlatNode<'_> {
    pub fn id(&self) -> NodeId {
        self.node.id()
    }
}

/// Lists the visible nodes in pre-order.
///
/// Children of a collapsed container are skipped along with their whole
/// subtree.
///
/// # Example
///
/// ```
/// use jsonsmith::document::codec::decode_root;
/// use jsonsmith::document::id::IdGenerator;
/// use jsonsmith::document::tree::JsonTree;
/// use jsonsmith::ui::tree_view::flatten_visible_nodes;
/// use serde_json::json;
///
/// let tree = JsonTree::from_root(decode_root(&json!({"a": [1, 2]}), &mut IdGenerator::new()));
/// let lines = flatten_visible_nodes(tree.nodes());
///
/// let keys: Vec<_> = lines.iter().map(|l| l.node.key()).collect();
/// assert_eq!(keys, vec!["root", "a", "0", "1"]);
/// assert_eq!(lines[2].depth, 2);
/// ```
pub fn flatten_visible_nodes(nodes: &[JsonNode]) -> Vec<FlatNode<'_>> {
    fn walk<'a>(nodes: &'a [JsonNode], depth: usize, out: &mut Vec<FlatNode<'a>>) {
        for node in nodes {
            out.push(FlatNode {
                node,
                depth,
                has_children: node.is_container(),
                is_expanded: node.is_expanded(),
            });
            if node.is_expanded() {
                if let Some(children) = node.children() {
                    walk(children, depth + 1, out);
                }
            }
        }
    }

    let mut out = Vec::new();
    walk(nodes, 0, &mut out);
    out
}

/// Counts every node, visible or not.
pub fn count_nodes(nodes: &[JsonNode]) -> usize {
    nodes.iter().map(JsonNode::subtree_len).sum()
}

/// Ids of a node's direct children; empty for scalars.
pub fn child_ids(node: &JsonNode) -> Vec<NodeId> {
    node.children()
        .map(|children| children.iter().map(JsonNode::id).collect())
        .unwrap_or_default()
}

/// Case-insensitive substring match on the key or the displayed value.
///
/// An empty term matches nothing, so clearing the search clears highlights.
pub fn matches_search(node: &JsonNode, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    let term = term.to_lowercase();
    node.key().to_lowercase().contains(&term)
        || node.display_value().to_lowercase().contains(&term)
}

/// Renders visible lines as an indented outline.
///
/// Containers are marked `+` when collapsed and `-` when expanded; lines
/// matching `term` are flagged with `*` in the first column.
///
/// ```
/// use jsonsmith::document::codec::decode_root;
/// use jsonsmith::document::id::IdGenerator;
/// use jsonsmith::document::tree::JsonTree;
/// use jsonsmith::ui::tree_view::{flatten_visible_nodes, render_outline};
/// use serde_json::json;
///
/// let tree = JsonTree::from_root(decode_root(&json!({"name": "x"}), &mut IdGenerator::new()));
/// let outline = render_outline(&flatten_visible_nodes(tree.nodes()), "name");
/// assert_eq!(outline, "  - root: {1}\n*     name: \"x\"\n");
/// ```
pub fn render_outline(lines: &[FlatNode<'_>], term: &str) -> String {
    let mut out = String::new();
    for line in lines {
        let flag = if matches_search(line.node, term) { '*' } else { ' ' };
        let marker = match (line.has_children, line.is_expanded) {
            (false, _) => ' ',
            (true, true) => '-',
            (true, false) => '+',
        };
        let value = match line.node.value() {
            NodeValue::String(s) => serde_json::Value::String(s.clone()).to_string(),
            _ => line.node.display_value(),
        };
        let _ = writeln!(
            out,
            "{} {}{} {}: {}",
            flag,
            "  ".repeat(line.depth),
            marker,
            line.node.key(),
            value
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::codec::decode_root;
    use crate::document::id::IdGenerator;
    use crate::document::tree::JsonTree;
    use crate::editor::mutation::Mutator;
    use serde_json::json;

    #[test]
    fn test_collapsed_subtree_is_hidden() {
        let tree = JsonTree::from_root(decode_root(
            &json!({"a": {"b": 1}, "c": 2}),
            &mut IdGenerator::new(),
        ));
        let a = tree.get_node(&[0, 0]).unwrap().id();
        let tree = Mutator::new(&tree).set_expanded(a, false).unwrap();

        let lines = flatten_visible_nodes(tree.nodes());
        let keys: Vec<_> = lines.iter().map(|l| l.node.key()).collect();
        assert_eq!(keys, vec!["root", "a", "c"]);
        assert!(lines[1].has_children);
        assert!(!lines[1].is_expanded);
        assert_eq!(count_nodes(tree.nodes()), 4);
        assert_eq!(count_nodes(tree.nodes()), tree.node_count());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let tree = JsonTree::from_root(decode_root(
            &json!({"Title": "Hello World"}),
            &mut IdGenerator::new(),
        ));
        let title = tree.get_node(&[0, 0]).unwrap();
        assert!(matches_search(title, "title"));
        assert!(matches_search(title, "WORLD"));
        assert!(!matches_search(title, "missing"));
        assert!(!matches_search(title, ""));
    }

    #[test]
    fn test_child_ids() {
        let tree = JsonTree::from_root(decode_root(&json!([true, 1]), &mut IdGenerator::new()));
        let root = tree.root().unwrap();
        let ids = child_ids(root);
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], root.children().unwrap()[0].id());
        assert!(child_ids(&root.children().unwrap()[0]).is_empty());
    }
}
