//! JSON node representation with identity tracking.
//!
//! This module provides the core data structures for representing JSON documents
//! in jsonsmith. Every value in a document is wrapped in a `JsonNode` that carries
//! a stable `NodeId`, the key it lives under in its parent, a back-reference to
//! that parent, and the presentation flag `expanded`.
//!
//! The node's type, scalar payload, and children live together in `NodeValue`,
//! so a container always owns a children sequence and a scalar never does.
//!
//! # Example
//!
//! ```
//! use jsonsmith::document::id::IdGenerator;
//! use jsonsmith::document::node::{JsonNode, NodeType, NodeValue};
//!
//! let mut ids = IdGenerator::new();
//! let node = JsonNode::new(ids.next_id(), "greeting", NodeValue::String("hello".to_string()), None);
//!
//! assert_eq!(node.key(), "greeting");
//! assert_eq!(node.node_type(), NodeType::String);
//! assert!(node.children().is_none());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;

/// Opaque identifier of a node within a tree's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

impl NodeId {
    /// Returns the raw sequence number behind this id.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node_{}", self.0)
    }
}

/// The six JSON value types a node can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl NodeType {
    /// Every type, in the order the editor offers them.
    pub const ALL: [NodeType; 6] = [
        NodeType::Object,
        NodeType::Array,
        NodeType::String,
        NodeType::Number,
        NodeType::Boolean,
        NodeType::Null,
    ];

    /// Returns true for `object` and `array`.
    pub fn is_container(&self) -> bool {
        matches!(self, NodeType::Object | NodeType::Array)
    }

    /// Classifies a native JSON value.
    ///
    /// # Example
    ///
    /// ```
    /// use jsonsmith::document::node::NodeType;
    /// use serde_json::json;
    ///
    /// assert_eq!(NodeType::of(&json!(null)), NodeType::Null);
    /// assert_eq!(NodeType::of(&json!([1, 2])), NodeType::Array);
    /// assert_eq!(NodeType::of(&json!({"a": 1})), NodeType::Object);
    /// assert_eq!(NodeType::of(&json!(2.5)), NodeType::Number);
    /// ```
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => NodeType::Null,
            Value::Array(_) => NodeType::Array,
            Value::Object(_) => NodeType::Object,
            Value::String(_) => NodeType::String,
            Value::Number(_) => NodeType::Number,
            Value::Bool(_) => NodeType::Boolean,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Object => "object",
            NodeType::Array => "array",
            NodeType::String => "string",
            NodeType::Number => "number",
            NodeType::Boolean => "boolean",
            NodeType::Null => "null",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown node type '{}'", s))
    }
}

/// A node's payload: scalar data for leaves, child nodes for containers.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    /// A JSON object; children carry their property names as keys
    Object(Vec<JsonNode>),
    /// A JSON array; children carry their positions as keys
    Array(Vec<JsonNode>),
    String(String),
    Number(Number),
    Boolean(bool),
    Null,
}

impl NodeValue {
    /// Returns the type tag of this payload.
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeValue::Object(_) => NodeType::Object,
            NodeValue::Array(_) => NodeType::Array,
            NodeValue::String(_) => NodeType::String,
            NodeValue::Number(_) => NodeType::Number,
            NodeValue::Boolean(_) => NodeType::Boolean,
            NodeValue::Null => NodeType::Null,
        }
    }

    /// The canonical zero value for a type. Containers start empty.
    pub fn default_for(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Object => NodeValue::Object(Vec::new()),
            NodeType::Array => NodeValue::Array(Vec::new()),
            NodeType::String => NodeValue::String(String::new()),
            NodeType::Number => NodeValue::Number(Number::from(0)),
            NodeType::Boolean => NodeValue::Boolean(false),
            NodeType::Null => NodeValue::Null,
        }
    }

    /// Builds a scalar payload from a native JSON value.
    ///
    /// Returns `None` for objects and arrays, which need decoding into nodes.
    pub fn from_scalar(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(NodeValue::Null),
            Value::Bool(b) => Some(NodeValue::Boolean(*b)),
            Value::Number(n) => Some(NodeValue::Number(n.clone())),
            Value::String(s) => Some(NodeValue::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, NodeValue::Object(_) | NodeValue::Array(_))
    }
}

/// One entry in the editable tree.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonNode {
    pub(crate) id: NodeId,
    pub(crate) key: String,
    pub(crate) value: NodeValue,
    pub(crate) parent_id: Option<NodeId>,
    pub(crate) expanded: bool,
}

impl JsonNode {
    /// Creates a node. New nodes start expanded.
    pub fn new(
        id: NodeId,
        key: impl Into<String>,
        value: NodeValue,
        parent_id: Option<NodeId>,
    ) -> Self {
        Self {
            id,
            key: key.into(),
            value,
            parent_id,
            expanded: true,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &NodeValue {
        &self.value
    }

    pub fn node_type(&self) -> NodeType {
        self.value.node_type()
    }

    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent_id
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_container(&self) -> bool {
        self.value.is_container()
    }

    /// Returns the child nodes of a container, `None` for scalars.
    pub fn children(&self) -> Option<&[JsonNode]> {
        match &self.value {
            NodeValue::Object(children) | NodeValue::Array(children) => Some(children),
            _ => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<JsonNode>> {
        match &mut self.value {
            NodeValue::Object(children) | NodeValue::Array(children) => Some(children),
            _ => None,
        }
    }

    /// Returns the scalar payload as a native JSON value, `None` for containers.
    ///
    /// # Example
    ///
    /// ```
    /// use jsonsmith::document::id::IdGenerator;
    /// use jsonsmith::document::node::{JsonNode, NodeValue};
    /// use serde_json::json;
    ///
    /// let mut ids = IdGenerator::new();
    /// let flag = JsonNode::new(ids.next_id(), "enabled", NodeValue::Boolean(true), None);
    /// assert_eq!(flag.scalar(), Some(json!(true)));
    /// ```
    pub fn scalar(&self) -> Option<Value> {
        match &self.value {
            NodeValue::String(s) => Some(Value::String(s.clone())),
            NodeValue::Number(n) => Some(Value::Number(n.clone())),
            NodeValue::Boolean(b) => Some(Value::Bool(*b)),
            NodeValue::Null => Some(Value::Null),
            NodeValue::Object(_) | NodeValue::Array(_) => None,
        }
    }

    /// Number of nodes in this subtree, the node itself included.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children()
            .map(|children| children.iter().map(JsonNode::subtree_len).sum())
            .unwrap_or(0)
    }

    /// Text shown for the node's value in an outline or search.
    pub fn display_value(&self) -> String {
        match &self.value {
            NodeValue::Object(children) => format!("{{{}}}", children.len()),
            NodeValue::Array(children) => format!("[{}]", children.len()),
            NodeValue::String(s) => s.clone(),
            NodeValue::Number(n) => n.to_string(),
            NodeValue::Boolean(b) => b.to_string(),
            NodeValue::Null => "null".to_string(),
        }
    }
}
