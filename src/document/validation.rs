//! Syntactic JSON validation with error localization.
//!
//! `validate` never fails: it always returns a `ValidationResult` describing
//! whether the text is well-formed JSON and, if not, what went wrong and where.
//!
//! # Example
//!
//! ```
//! use jsonsmith::document::validation::{validate, Position};
//!
//! assert!(validate(r#"{"ok": true}"#).valid);
//!
//! let result = validate("{\n  \"a\": 1,\n  \"b\": }");
//! assert!(!result.valid);
//! assert_eq!(result.position, Some(Position { line: 3, column: 8 }));
//! ```

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

/// Message reported for empty or whitespace-only input.
pub const EMPTY_INPUT_MESSAGE: &str = "JSON cannot be empty";

/// A 1-based line/column location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Converts a byte offset into a line and column by counting newlines
    /// before it. Columns count characters.
    ///
    /// Offsets past the end are clamped to the end of the text.
    pub fn at_offset(text: &str, offset: usize) -> Self {
        let mut end = offset.min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let before = &text[..end];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        Self { line, column }
    }
}

/// Outcome of validating a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl ValidationResult {
    fn ok() -> Self {
        Self {
            valid: true,
            error: None,
            position: None,
        }
    }

    fn failed(error: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
            position,
        }
    }
}

/// Checks that `text` is well-formed JSON.
pub fn validate(text: &str) -> ValidationResult {
    if text.trim().is_empty() {
        return ValidationResult::failed(EMPTY_INPUT_MESSAGE, None);
    }

    match serde_json::from_str::<Value>(text) {
        Ok(_) => ValidationResult::ok(),
        Err(err) => {
            let position = error_offset(text, &err).map(|offset| Position::at_offset(text, offset));
            ValidationResult::failed(err.to_string(), position)
        }
    }
}

/// Byte offset of the character the parser stopped at.
///
/// serde_json reports a line and a 1-based column counted in bytes; line 0
/// means the error carries no location.
fn error_offset(text: &str, err: &serde_json::Error) -> Option<usize> {
    if err.line() == 0 {
        return None;
    }

    let line_start = if err.line() == 1 {
        0
    } else {
        text.match_indices('\n')
            .nth(err.line() - 2)
            .map(|(i, _)| i + 1)?
    };

    Some(line_start + err.column().saturating_sub(1))
}

/// Serializes a value with the given number of spaces per indentation level.
pub fn to_pretty_string(value: &Value, indent: usize) -> String {
    let indent = " ".repeat(indent);
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    // Writing into a Vec cannot fail and `Value` always serializes
    if value.serialize(&mut serializer).is_err() {
        return value.to_string();
    }
    String::from_utf8(out).unwrap_or_else(|_| value.to_string())
}

/// Re-indents JSON text, returning it unchanged if it does not parse.
pub fn format_json(text: &str, indent: usize) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => to_pretty_string(&value, indent),
        Err(_) => text.to_string(),
    }
}

/// Strips insignificant whitespace, returning the text unchanged if it does
/// not parse.
pub fn minify_json(text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => value.to_string(),
        Err(_) => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        for text in ["", "   ", "\n\t "] {
            let result = validate(text);
            assert!(!result.valid);
            assert_eq!(result.error.as_deref(), Some(EMPTY_INPUT_MESSAGE));
            assert_eq!(result.position, None);
        }
    }

    #[test]
    fn test_valid_input_has_no_error() {
        let result = validate("[1, 2, 3]");
        assert_eq!(
            result,
            ValidationResult {
                valid: true,
                error: None,
                position: None
            }
        );
    }

    #[test]
    fn test_error_on_first_line() {
        let result = validate("[1, 2,, 3]");
        assert!(!result.valid);
        assert_eq!(result.position, Some(Position { line: 1, column: 7 }));
    }

    #[test]
    fn test_position_at_offset() {
        let text = "ab\ncd\nef";
        assert_eq!(Position::at_offset(text, 0), Position { line: 1, column: 1 });
        assert_eq!(Position::at_offset(text, 4), Position { line: 2, column: 2 });
        assert_eq!(Position::at_offset(text, 6), Position { line: 3, column: 1 });
        assert_eq!(Position::at_offset(text, 100), Position { line: 3, column: 3 });
    }

    #[test]
    fn test_position_counts_characters() {
        let text = "é\u{00e9}x";
        assert_eq!(Position::at_offset(text, 4), Position { line: 1, column: 3 });
        // Inside a multi-byte character rounds down to its start
        assert_eq!(Position::at_offset(text, 1), Position { line: 1, column: 1 });
    }

    #[test]
    fn test_format_and_minify() {
        assert_eq!(format_json("{\"a\":[1]}", 2), "{\n  \"a\": [\n    1\n  ]\n}");
        assert_eq!(format_json("{\"a\":1}", 4), "{\n    \"a\": 1\n}");
        assert_eq!(minify_json("{ \"a\" : [ 1 , 2 ] }"), "{\"a\":[1,2]}");
        assert_eq!(minify_json("{oops"), "{oops");
        assert_eq!(format_json("{oops", 2), "{oops");
    }
}
