//! Error types for ESENS parsing

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which stage rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    /// A character matched no lexical pattern.
    Tokenization,
    /// The tokens were well formed but the grammar or a value was not.
    Validation,
}

impl ParseErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseErrorKind::Tokenization => "tokenization",
            ParseErrorKind::Validation => "validation",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parse failure with enough context to point at the offending character.
///
/// `offset` is a byte offset into the original notation. `snippet` holds the
/// notation itself so the error can be rendered without the caller keeping the
/// input around.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind} error: {message}{}", position_suffix(.offset))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub offset: Option<usize>,
    pub snippet: Option<String>,
}

fn position_suffix(offset: &Option<usize>) -> String {
    match offset {
        Some(offset) => format!(" at position {}", offset),
        None => String::new(),
    }
}

impl ParseError {
    pub fn tokenization(message: impl Into<String>, offset: usize, source: &str) -> Self {
        Self {
            kind: ParseErrorKind::Tokenization,
            message: message.into(),
            offset: Some(offset),
            snippet: Some(source.to_string()),
        }
    }

    pub fn validation(message: impl Into<String>, offset: usize, source: &str) -> Self {
        Self {
            kind: ParseErrorKind::Validation,
            message: message.into(),
            offset: Some(offset),
            snippet: Some(source.to_string()),
        }
    }

    pub fn is_tokenization(&self) -> bool {
        self.kind == ParseErrorKind::Tokenization
    }

    pub fn is_validation(&self) -> bool {
        self.kind == ParseErrorKind::Validation
    }

    /// Render the message plus, when the offset is known, the input line and a
    /// caret line underneath it.
    pub fn diagnostic(&self) -> String {
        let mut output = self.to_string();
        if let (Some(offset), Some(snippet)) = (self.offset, self.snippet.as_deref()) {
            // Offsets are bytes; the caret column is counted in characters.
            let column = snippet
                .get(..offset)
                .map(|prefix| prefix.chars().count())
                .unwrap_or_else(|| snippet.chars().count());
            output.push_str(&format!("\n  {}\n  {}^", snippet, " ".repeat(column)));
        }
        output
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_position() {
        let err = ParseError::validation("expected target", 0, "");
        assert_eq!(err.to_string(), "validation error: expected target at position 0");
    }

    #[test]
    fn test_display_without_offset() {
        let err = ParseError {
            kind: ParseErrorKind::Tokenization,
            message: "bad input".to_string(),
            offset: None,
            snippet: None,
        };
        assert_eq!(err.to_string(), "tokenization error: bad input");
        assert_eq!(err.diagnostic(), "tokenization error: bad input");
    }

    #[test]
    fn test_diagnostic_points_caret_at_offset() {
        let err = ParseError::tokenization("invalid character '@'", 3, "P+S@");
        let rendered = err.diagnostic();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "  P+S@");
        assert_eq!(lines[2], "     ^");
    }

    #[test]
    fn test_diagnostic_counts_characters_not_bytes() {
        let err = ParseError::tokenization("invalid character '@'", 5, "Pé+S@");
        let rendered = err.diagnostic();
        assert!(rendered.ends_with("\n      ^"));
    }
}
