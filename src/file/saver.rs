//! JSON document saving.
//!
//! This module serializes `JsonTree` structures and writes them to files with
//! atomic write operations, optional backup creation, and gzip compression when
//! the target ends in `.gz`.

use crate::config::Config;
use crate::document::codec::export;
use crate::document::tree::JsonTree;
use crate::document::validation::to_pretty_string;
use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Serializes the tree's root with `indent` spaces per level.
///
/// An empty tree serializes to `{}`. Numbers are written in their shortest
/// form, so `1.0` comes out as `1`.
///
/// # Example
///
/// ```
/// use jsonsmith::document::codec::decode_root;
/// use jsonsmith::document::id::IdGenerator;
/// use jsonsmith::document::tree::JsonTree;
/// use jsonsmith::file::saver::serialize_tree;
/// use serde_json::json;
///
/// let tree = JsonTree::from_root(decode_root(&json!({"a": 1}), &mut IdGenerator::new()));
/// assert_eq!(serialize_tree(&tree, 2), "{\n  \"a\": 1\n}");
/// assert_eq!(serialize_tree(&JsonTree::default(), 2), "{}");
/// ```
pub fn serialize_tree(tree: &JsonTree, indent: usize) -> String {
    match tree.root() {
        Some(root) => to_pretty_string(&export(root), indent),
        None => "{}".to_string(),
    }
}

/// Saves a JSON tree to a file.
///
/// # Errors
///
/// This function will return an error if:
/// - Backup creation fails (if requested)
/// - Writing to the temp file fails
/// - Renaming the temp file to the target fails
///
/// ```no_run
/// use jsonsmith::config::Config;
/// use jsonsmith::document::tree::JsonTree;
/// use jsonsmith::file::saver::save_json_file;
///
/// save_json_file("output.json", &JsonTree::default(), &Config::default()).unwrap();
/// ```
pub fn save_json_file<P: AsRef<Path>>(path: P, tree: &JsonTree, config: &Config) -> Result<()> {
    let mut json_str = serialize_tree(tree, config.indent_size);
    json_str.push('\n');
    save_serialized(path, &json_str, config)
}

/// Writes already-serialized JSON text to a file.
///
/// The text is checked to be valid JSON before anything touches the disk.
pub fn save_serialized<P: AsRef<Path>>(path: P, json_str: &str, config: &Config) -> Result<()> {
    let path = path.as_ref();

    serde_json::from_str::<serde_json::Value>(json_str)
        .context("Refusing to write text that is not valid JSON")?;

    if config.create_backup && path.exists() {
        let backup = backup_path(path);
        fs::copy(path, &backup)
            .with_context(|| format!("Cannot back up {} to {}", path.display(), backup.display()))?;
    }

    let compress = path.to_string_lossy().ends_with(".gz");
    replace_file(path, json_str.as_bytes(), compress)?;

    info!(path = %path.display(), bytes = json_str.len(), compressed = compress, "saved document");
    Ok(())
}

/// `doc.json` -> `doc.json.bak`, next to the original.
fn backup_path(path: &Path) -> PathBuf {
    sibling_with_suffix(path, ".bak")
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Writes `data` beside `path` and renames it into place, so readers see either
/// the old document or the complete new one.
fn replace_file(path: &Path, data: &[u8], compress: bool) -> Result<()> {
    let staging = sibling_with_suffix(path, ".tmp");
    let mut file = fs::File::create(&staging)
        .with_context(|| format!("Cannot create {}", staging.display()))?;

    if compress {
        let mut encoder = GzEncoder::new(&mut file, Compression::default());
        encoder.write_all(data)?;
        encoder.finish().context("Cannot finish gzip stream")?;
    } else {
        file.write_all(data)
            .with_context(|| format!("Cannot write {}", staging.display()))?;
    }
    file.sync_all()?;
    drop(file);

    fs::rename(&staging, path)
        .with_context(|| format!("Cannot move {} into place", staging.display()))
}
