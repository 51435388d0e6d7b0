//! JSON document loading.
//!
//! This module reads import text from files or stdin and turns it into a
//! `JsonTree`. Every source is size-checked before it is parsed: files by their
//! metadata, streams by reading at most one byte past the limit. Gzip input
//! (a `.gz` extension, or the gzip magic bytes on stdin) is decompressed
//! transparently, and the limit applies to the decompressed text as well.

use crate::document::codec::decode_root;
use crate::document::id::IdGenerator;
use crate::document::tree::JsonTree;
use crate::document::validation::validate;
use crate::error::ImportError;
use flate2::read::GzDecoder;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::info;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Validates and decodes import text into a single-root tree.
///
/// Ids are drawn from `ids`; callers reset it first when they want ids to be
/// reproducible per import.
///
/// # Example
///
/// ```
/// use jsonsmith::document::id::IdGenerator;
/// use jsonsmith::error::ImportError;
/// use jsonsmith::file::loader::parse_document;
///
/// let mut ids = IdGenerator::new();
/// let tree = parse_document(r#"{"a": [1, 2]}"#, &mut ids).unwrap();
/// assert_eq!(tree.node_count(), 4);
///
/// let err = parse_document("{\"a\": }", &mut ids).unwrap_err();
/// assert!(matches!(err, ImportError::Invalid { .. }));
/// ```
pub fn parse_document(text: &str, ids: &mut IdGenerator) -> Result<JsonTree, ImportError> {
    let result = validate(text);
    if !result.valid {
        let message = result.error.unwrap_or_default();
        return Err(match result.position {
            None if text.trim().is_empty() => ImportError::Empty(message),
            position => ImportError::Invalid { message, position },
        });
    }

    let value: serde_json::Value = serde_json::from_str(text).map_err(|err| ImportError::Invalid {
        message: err.to_string(),
        position: None,
    })?;

    Ok(JsonTree::from_root(decode_root(&value, ids)))
}

/// Reads a file for import, rejecting it before reading if it is larger than
/// `max_bytes`.
///
/// # Errors
///
/// - `ImportError::TooLarge` if the file (or its decompressed content) exceeds the limit
/// - `ImportError::Io` if the file cannot be read, decompressed, or is not UTF-8
pub fn read_import_file<P: AsRef<Path>>(path: P, max_bytes: u64) -> Result<String, ImportError> {
    let path = path.as_ref();

    let size = fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(ImportError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let is_gzipped = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_limited(GzDecoder::new(fs::File::open(path)?), max_bytes)?
    } else {
        fs::read_to_string(path)?
    };

    info!(path = %path.display(), bytes = content.len(), "read import file");
    Ok(content)
}

/// Reads import text from standard input.
pub fn read_import_stdin(max_bytes: u64) -> Result<String, ImportError> {
    read_import_stream(io::stdin().lock(), max_bytes)
}

/// Reads import text from any stream, decompressing gzip data.
pub fn read_import_stream<R: Read>(reader: R, max_bytes: u64) -> Result<String, ImportError> {
    let mut buffer = Vec::new();
    let read = reader.take(max_bytes.saturating_add(1)).read_to_end(&mut buffer)? as u64;
    if read > max_bytes {
        return Err(ImportError::TooLarge {
            size: read,
            limit: max_bytes,
        });
    }

    if buffer.starts_with(&GZIP_MAGIC) {
        return read_limited(GzDecoder::new(buffer.as_slice()), max_bytes);
    }

    String::from_utf8(buffer)
        .map_err(|err| ImportError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}

/// Reads a whole stream as UTF-8, failing once it passes `max_bytes`.
fn read_limited<R: Read>(reader: R, max_bytes: u64) -> Result<String, ImportError> {
    let mut content = String::new();
    let read = reader.take(max_bytes.saturating_add(1)).read_to_string(&mut content)? as u64;
    if read > max_bytes {
        return Err(ImportError::TooLarge {
            size: read,
            limit: max_bytes,
        });
    }
    Ok(content)
}
