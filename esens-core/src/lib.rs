//! ESENS - Enhanced Status Effect Notation System
//!
//! This crate turns compact status-effect strings such as `P+S10%3T.ST`
//! into a typed [`EffectRecord`] and renders records back out as structured
//! JSON, English sentences, or canonical notation.
//!
//! Architecture:
//! ```text
//! Notation string
//!     ↓
//! Lexer (mode-selected priority tables)
//!     ↓
//! Core-clause parser (prefix, magnitude, duration, trigger, element)
//!     ↓
//! Extended-clause parser ('.' sections)
//!     ↓
//! EffectRecord
//!     ↓
//! to_structured / to_text / to_notation
//! ```
//!
//! Every call is independent; the only shared state is the read-only
//! pattern tables compiled on first use.

#[macro_use]
mod macros;

pub mod error;
pub mod lexer;
pub mod parser;
pub mod record;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use parser::{parse_tokens, Parser};
pub use record::*;

use serde::{Deserialize, Serialize};

/// Result of [`parse`]: the structured form plus an optional explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseOutput {
    pub record: EffectRecord,
    pub structured: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Tokenize and parse a notation into an [`EffectRecord`].
pub fn parse_record(notation: &str) -> ParseResult<EffectRecord> {
    let tokens = tokenize(notation)?;
    let result = parse_tokens(&tokens, notation);
    match &result {
        Ok(_) => tracing::debug!(notation, tokens = tokens.len(), "parsed notation"),
        Err(err) => tracing::debug!(notation, error = %err, "rejected notation"),
    }
    result
}

/// Parse a notation, optionally rendering the English explanation.
pub fn parse(notation: &str, explain: bool) -> ParseResult<ParseOutput> {
    let record = parse_record(notation)?;
    let structured = record.to_structured();
    let explanation = explain.then(|| record.to_text());
    Ok(ParseOutput {
        record,
        structured,
        explanation,
    })
}

/// Check a notation without rendering anything.
pub fn validate(notation: &str) -> ParseResult<()> {
    parse_record(notation).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_explanation() -> ParseResult<()> {
        let output = parse("P+S10%3T", true)?;
        assert_eq!(output.structured["target"], "P");
        assert_eq!(
            output.explanation.as_deref(),
            Some("Player gains strength by 10% for 3 turns")
        );
        Ok(())
    }

    #[test]
    fn test_parse_without_explanation() -> ParseResult<()> {
        let output = parse("E-D15C", false)?;
        assert!(output.explanation.is_none());
        assert_eq!(output.structured["duration"]["type"], "C");
        Ok(())
    }

    #[test]
    fn test_validate() {
        assert!(validate("P+S10%3T.ST").is_ok());
        assert!(validate("").is_err());
        assert!(validate("P+S@").unwrap_err().is_tokenization());
    }
}
