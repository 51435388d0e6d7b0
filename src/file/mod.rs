//! File I/O for JSON documents.
//!
//! This module provides size-bounded loading from disk or stdin, and saving
//! trees back to files with atomic writes and optional backups.

pub mod loader;
pub mod saver;
