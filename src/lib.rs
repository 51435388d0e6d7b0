//! jsonsmith - a structural JSON tree editor core.
//!
//! The crate turns JSON text into an editable tree of identified nodes,
//! applies structural edits that keep the tree consistent (array keys always
//! match positions, type changes never leave stale children), and keeps a
//! bounded undo/redo history of every committed edit.
//!
//! # Example
//!
//! ```
//! use jsonsmith::config::Config;
//! use jsonsmith::editor::state::EditorState;
//!
//! let mut state = EditorState::new(&Config::default());
//! state.import_json(r#"{"a": 1, "b": [true, null]}"#).unwrap();
//!
//! let first = state.tree().root().unwrap().children().unwrap()[1].children().unwrap()[0].id();
//! assert!(state.delete_node(first));
//! assert_eq!(state.get_json(), "{\n  \"a\": 1,\n  \"b\": [\n    null\n  ]\n}");
//!
//! assert!(state.undo());
//! assert!(state.can_redo());
//! ```

pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod file;
pub mod theme;
pub mod ui;
