//! Presentation helpers for hosts that display a document.
//!
//! Nothing here renders to a terminal directly; `tree_view` turns a tree into
//! the flat, visibility-aware line list a host draws, plus a plain-text
//! outline used by the command line tool.

pub mod tree_view;
