//! Error types for importing documents.

use crate::document::validation::Position;
use thiserror::Error;

/// Reasons an import can be rejected. The current document is never touched
/// when one of these is returned.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Input was empty or whitespace only
    #[error("{0}")]
    Empty(String),

    /// Input is not well-formed JSON
    #[error("Invalid JSON: {message}")]
    Invalid {
        message: String,
        position: Option<Position>,
    },

    /// Input exceeds the configured size limit; nothing was parsed
    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl ImportError {
    /// Location of a syntax error, when the parser reported one.
    pub fn position(&self) -> Option<Position> {
        match self {
            ImportError::Invalid { position, .. } => *position,
            _ => None,
        }
    }
}
