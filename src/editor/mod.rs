//! Editing: structural mutations, undo history, and the owned editor state.
//!
//! # Modules
//!
//! - `mutation`: Pure tree edits that keep array keys and types consistent
//! - `undo`: Bounded linear snapshot history
//! - `state`: The editor state that ties the tree, index, and history together
//!
//! # Example
//!
//! ```
//! use jsonsmith::config::Config;
//! use jsonsmith::editor::state::EditorState;
//!
//! let state = EditorState::new(&Config::default());
//! assert!(!state.can_undo());
//! assert!(!state.can_redo());
//! ```

pub mod mutation;
pub mod state;
pub mod undo;
