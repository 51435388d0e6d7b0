//! Conversion between native JSON values and node trees.
//!
//! `decode` walks a `serde_json::Value` and builds a `JsonNode` tree, assigning a
//! fresh id to every node in pre-order. `encode` is the inverse: objects are
//! rebuilt from their children's keys in order, arrays from their children's
//! positions (stored array keys are ignored), and scalars return their payload.
//!
//! # Example
//!
//! ```
//! use jsonsmith::document::codec::{decode_root, encode};
//! use jsonsmith::document::id::IdGenerator;
//! use serde_json::json;
//!
//! let value = json!({"a": 1, "b": [true, null]});
//! let mut ids = IdGenerator::new();
//! let root = decode_root(&value, &mut ids);
//!
//! assert_eq!(root.key(), "root");
//! assert_eq!(root.children().unwrap().len(), 2);
//! assert_eq!(encode(&root), value);
//! ```

use super::id::IdGenerator;
use super::node::{JsonNode, NodeId, NodeType, NodeValue};
use serde_json::{Map, Number, Value};

/// Key given to the top-level node of a decoded document.
pub const ROOT_KEY: &str = "root";

/// Key given to children added to an object.
pub const NEW_KEY: &str = "newKey";

/// Decodes a JSON value into a node tree.
///
/// Object entries keep their enumeration order; array elements are keyed by
/// their position. Every node starts expanded.
pub fn decode(
    value: &Value,
    key: &str,
    parent_id: Option<NodeId>,
    ids: &mut IdGenerator,
) -> JsonNode {
    let id = ids.next_id();

    let payload = match value {
        Value::Object(entries) => NodeValue::Object(
            entries
                .iter()
                .map(|(child_key, child)| decode(child, child_key, Some(id), ids))
                .collect(),
        ),
        Value::Array(items) => NodeValue::Array(
            items
                .iter()
                .enumerate()
                .map(|(index, child)| decode(child, &index.to_string(), Some(id), ids))
                .collect(),
        ),
        Value::String(s) => NodeValue::String(s.clone()),
        Value::Number(n) => NodeValue::Number(n.clone()),
        Value::Bool(b) => NodeValue::Boolean(*b),
        Value::Null => NodeValue::Null,
    };

    JsonNode::new(id, key, payload, parent_id)
}

/// Decodes a whole document under the `"root"` key with no parent.
pub fn decode_root(value: &Value, ids: &mut IdGenerator) -> JsonNode {
    decode(value, ROOT_KEY, None, ids)
}

/// Encodes a node tree back into a native JSON value.
///
/// A repeated object key keeps the position of its first occurrence and the
/// value of its last one.
pub fn encode(node: &JsonNode) -> Value {
    match node.value() {
        NodeValue::Object(children) => {
            let mut map = Map::with_capacity(children.len());
            for child in children {
                map.insert(child.key().to_string(), encode(child));
            }
            Value::Object(map)
        }
        NodeValue::Array(children) => Value::Array(children.iter().map(encode).collect()),
        NodeValue::String(s) => Value::String(s.clone()),
        NodeValue::Number(n) => Value::Number(n.clone()),
        NodeValue::Boolean(b) => Value::Bool(*b),
        NodeValue::Null => Value::Null,
    }
}

/// Largest integer a double holds exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Encodes a node tree for output, writing numbers the way a browser's
/// `JSON.stringify` does.
///
/// Integral floats within 2^53 are written without a fraction and negative
/// zero is written as `0`. `encode` keeps numbers exactly as decoded.
///
/// # Example
///
/// ```
/// use jsonsmith::document::codec::{decode_root, export};
/// use jsonsmith::document::id::IdGenerator;
///
/// let value: serde_json::Value = serde_json::from_str("[1.0, 1e2, -0, 2.50]").unwrap();
/// let root = decode_root(&value, &mut IdGenerator::new());
/// assert_eq!(export(&root).to_string(), "[1,100,0,2.5]");
/// ```
pub fn export(node: &JsonNode) -> Value {
    let mut value = encode(node);
    normalize_numbers(&mut value);
    value
}

fn normalize_numbers(value: &mut Value) {
    match value {
        Value::Object(map) => map.values_mut().for_each(normalize_numbers),
        Value::Array(items) => items.iter_mut().for_each(normalize_numbers),
        Value::Number(n) => {
            if let Some(f) = n.as_f64().filter(|_| n.is_f64()) {
                if f.fract() == 0.0 && f.abs() <= MAX_EXACT_INTEGER {
                    // -0.0 casts to 0
                    *n = Number::from(f as i64);
                }
            }
        }
        _ => {}
    }
}

/// Returns the canonical zero value for a type.
///
/// # Example
///
/// ```
/// use jsonsmith::document::codec::default_value;
/// use jsonsmith::document::node::NodeType;
/// use serde_json::json;
///
/// assert_eq!(default_value(NodeType::String), json!(""));
/// assert_eq!(default_value(NodeType::Number), json!(0));
/// assert_eq!(default_value(NodeType::Array), json!([]));
/// ```
pub fn default_value(node_type: NodeType) -> Value {
    match node_type {
        NodeType::String => Value::String(String::new()),
        NodeType::Number => Value::Number(Number::from(0)),
        NodeType::Boolean => Value::Bool(false),
        NodeType::Null => Value::Null,
        NodeType::Object => Value::Object(Map::new()),
        NodeType::Array => Value::Array(Vec::new()),
    }
}

/// Creates a default-valued node of the given type with a fresh id.
pub fn new_node(
    key: impl Into<String>,
    node_type: NodeType,
    parent_id: Option<NodeId>,
    ids: &mut IdGenerator,
) -> JsonNode {
    JsonNode::new(
        ids.next_id(),
        key,
        NodeValue::default_for(node_type),
        parent_id,
    )
}

/// Interprets text typed into a value field.
///
/// `null`, `true`, and `false` become those literals and a finite number
/// becomes a number; anything else is kept as the trimmed string. Unlike a
/// JavaScript `Number(...)` conversion, hex literals such as `0x10`,
/// `Infinity`, and out-of-range values such as `1e400` stay strings, since
/// none of them is a valid JSON number.
///
/// # Example
///
/// ```
/// use jsonsmith::document::codec::parse_scalar_input;
/// use serde_json::json;
///
/// assert_eq!(parse_scalar_input(" 42 "), json!(42));
/// assert_eq!(parse_scalar_input("true"), json!(true));
/// assert_eq!(parse_scalar_input("hello"), json!("hello"));
/// ```
pub fn parse_scalar_input(input: &str) -> Value {
    let trimmed = input.trim();

    match trimmed {
        "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "" => return Value::String(String::new()),
        _ => {}
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Number(Number::from(i));
    }

    // f64 parsing accepts "inf" and "NaN"; only finite values are JSON numbers
    if let Some(n) = trimmed
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(Number::from_f64)
    {
        return Value::Number(n);
    }

    Value::String(trimmed.to_string())
}

/// The document shown before anything has been imported.
pub fn default_document() -> Value {
    serde_json::json!({
        "name": "JSON Editor",
        "version": "1.0.0",
        "features": ["Tree editing", "Drag to reorder", "Live preview"],
        "settings": {
            "theme": "dark",
            "autoSave": true,
            "indentSize": 2
        },
        "count": 42,
        "enabled": true,
        "metadata": null
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_assigns_parent_ids() {
        let mut ids = IdGenerator::new();
        let root = decode_root(&json!({"list": [1]}), &mut ids);
        let list = &root.children().unwrap()[0];
        let item = &list.children().unwrap()[0];

        assert_eq!(root.parent_id(), None);
        assert_eq!(list.parent_id(), Some(root.id()));
        assert_eq!(item.parent_id(), Some(list.id()));
        assert_eq!(item.key(), "0");
    }

    #[test]
    fn test_decode_is_preorder() {
        let mut ids = IdGenerator::new();
        let root = decode_root(&json!({"a": {"b": 1}, "c": 2}), &mut ids);
        let a = &root.children().unwrap()[0];
        let b = &a.children().unwrap()[0];
        let c = &root.children().unwrap()[1];

        assert_eq!(root.id().as_u64(), 1);
        assert_eq!(a.id().as_u64(), 2);
        assert_eq!(b.id().as_u64(), 3);
        assert_eq!(c.id().as_u64(), 4);
    }

    #[test]
    fn test_encode_ignores_stored_array_keys() {
        let mut ids = IdGenerator::new();
        let mut root = decode_root(&json!(["x", "y"]), &mut ids);
        if let Some(children) = root.children_mut() {
            children[0].key = "stale".to_string();
        }
        assert_eq!(encode(&root), json!(["x", "y"]));
    }

    #[test]
    fn test_encode_repeated_object_key_keeps_first_position() {
        let mut ids = IdGenerator::new();
        let mut root = decode_root(&json!({"a": 1, "b": 2}), &mut ids);
        if let Some(children) = root.children_mut() {
            children[1].key = "a".to_string();
        }
        assert_eq!(encode(&root), json!({"a": 2}));
    }

    #[test]
    fn test_new_node_is_expanded_container() {
        let mut ids = IdGenerator::new();
        let node = new_node("items", NodeType::Array, None, &mut ids);
        assert!(node.is_expanded());
        assert_eq!(node.children().map(|c| c.len()), Some(0));
        assert_eq!(encode(&node), default_value(NodeType::Array));
    }

    #[test]
    fn test_parse_scalar_input_numbers() {
        assert_eq!(parse_scalar_input("-3"), json!(-3));
        assert_eq!(parse_scalar_input("2.5"), json!(2.5));
        assert_eq!(parse_scalar_input("1e3"), json!(1000.0));
        assert_eq!(parse_scalar_input("NaN"), json!("NaN"));
        assert_eq!(parse_scalar_input("inf"), json!("inf"));
        assert_eq!(parse_scalar_input("0x10"), json!("0x10"));
        assert_eq!(parse_scalar_input("Infinity"), json!("Infinity"));
        assert_eq!(parse_scalar_input("1e400"), json!("1e400"));
    }

    #[test]
    fn test_export_normalizes_float_numbers() {
        let value: Value = serde_json::from_str(r#"{"a": 1.0, "b": [-0.0, 1e2, 0.5], "c": 1e300}"#).unwrap();
        let root = decode_root(&value, &mut IdGenerator::new());

        let exported = export(&root);
        assert_eq!(exported.to_string(), r#"{"a":1,"b":[0,100,0.5],"c":1e300}"#);
        // decode/encode keep the original representation
        assert_eq!(encode(&root), value);
    }

    #[test]
    fn test_parse_scalar_input_literals_and_strings() {
        assert_eq!(parse_scalar_input("null"), Value::Null);
        assert_eq!(parse_scalar_input(" false "), json!(false));
        assert_eq!(parse_scalar_input("   "), json!(""));
        assert_eq!(parse_scalar_input("  two words "), json!("two words"));
    }

    #[test]
    fn test_default_document_keys() {
        let doc = default_document();
        let keys: Vec<_> = doc.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec!["name", "version", "features", "settings", "count", "enabled", "metadata"]
        );
    }
}
