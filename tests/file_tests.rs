use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use jsonsmith::config::Config;
use jsonsmith::document::codec::{decode_root, encode};
use jsonsmith::document::id::IdGenerator;
use jsonsmith::document::tree::JsonTree;
use jsonsmith::editor::state::EditorState;
use jsonsmith::error::ImportError;
use jsonsmith::file::loader::{parse_document, read_import_file};
use jsonsmith::file::saver::{save_json_file, save_serialized};
use serde_json::json;
use std::fs;
use std::io::{Read, Write};
use tempfile::TempDir;

fn sample_tree() -> JsonTree {
    JsonTree::from_root(decode_root(
        &json!({"name": "Alice", "tags": ["a", "b"], "age": 30}),
        &mut IdGenerator::new(),
    ))
}

#[test]
fn test_save_and_reload_plain() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doc.json");

    save_json_file(&path, &sample_tree(), &Config::default()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n  \"name\": \"Alice\""));
    assert!(text.ends_with("}\n"));
    assert!(!dir.path().join("doc.json.tmp").exists());

    let reloaded = parse_document(&text, &mut IdGenerator::new()).unwrap();
    assert_eq!(reloaded, sample_tree());
}

#[test]
fn test_save_gzip_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doc.json.gz");

    save_json_file(&path, &sample_tree(), &Config::default()).unwrap();

    let mut decoder = GzDecoder::new(fs::File::open(&path).unwrap());
    let mut text = String::new();
    decoder.read_to_string(&mut text).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value, encode(sample_tree().root().unwrap()));

    let loaded = read_import_file(&path, 1024 * 1024).unwrap();
    assert_eq!(loaded, text);
}

#[test]
fn test_no_backup_by_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doc.json");
    fs::write(&path, "[]").unwrap();

    save_serialized(&path, "[1]", &Config::default()).unwrap();
    assert!(!dir.path().join("doc.json.bak").exists());
    assert_eq!(fs::read_to_string(&path).unwrap(), "[1]");
}

#[test]
fn test_oversize_file_rejected_before_reading() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("big.json");
    fs::write(&path, format!("[{}]", "1,".repeat(100) + "1")).unwrap();

    let err = read_import_file(&path, 50).unwrap_err();
    match err {
        ImportError::TooLarge { size, limit } => {
            assert_eq!(size, 203);
            assert_eq!(limit, 50);
        }
        other => panic!("expected TooLarge, got {other:?}"),
    }
}

#[test]
fn test_gzip_file_limit_applies_to_decompressed_size() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bomb.json.gz");
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&vec![b' '; 100_000]).unwrap();
    fs::write(&path, encoder.finish().unwrap()).unwrap();

    let err = read_import_file(&path, 10_000).unwrap_err();
    assert!(matches!(err, ImportError::TooLarge { .. }));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = read_import_file(dir.path().join("absent.json"), 100).unwrap_err();
    assert!(matches!(err, ImportError::Io(_)));
}

#[test]
fn test_state_import_file_honors_config_limit() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doc.json");
    fs::write(&path, "{\"a\": [1, 2, 3]}").unwrap();

    let small = Config {
        max_import_bytes: 4,
        ..Config::default()
    };
    let mut state = EditorState::new(&small);
    let before = state.get_json();
    assert!(matches!(
        state.import_file(&path),
        Err(ImportError::TooLarge { .. })
    ));
    assert_eq!(state.get_json(), before);
    assert!(state.validation_error().unwrap().contains("too large"));

    let mut state = EditorState::new(&Config::default());
    state.import_file(&path).unwrap();
    assert_eq!(state.get_json(), "{\n  \"a\": [\n    1,\n    2,\n    3\n  ]\n}");
}
