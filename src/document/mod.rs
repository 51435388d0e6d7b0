//! Document model: nodes, ids, the JSON codec, lookups, and validation.
//!
//! # Modules
//!
//! - `node`: node, id, and type definitions
//! - `id`: node id generation
//! - `codec`: JSON value <-> node tree conversion
//! - `tree`: the editable node collection and recursive lookups
//! - `index`: precomputed id lookup for large trees
//! - `validation`: JSON well-formedness checks

pub mod codec;
pub mod id;
pub mod index;
pub mod node;
pub mod tree;
pub mod validation;
