//! Parser for ESENS notation
//!
//! Parsing runs in two passes over one token slice. The core pass reads the
//! mandatory `target effect subject` prefix and then the optional magnitude,
//! duration, trigger and element clauses in that order. The extended pass
//! splits whatever follows on `.` delimiters and fills one record attribute
//! per section.

mod clauses;
mod extended;

use crate::error::{ParseError, ParseResult};
use crate::lexer::{Token, TokenKind};
use crate::record::EffectRecord;

// ============================================================================
// PARSER
// ============================================================================

/// Cursor over a slice of tokens.
///
/// `end` is the offset reported for "missing token" failures once the slice
/// is exhausted: the input length for a whole notation, or the offset of the
/// closing delimiter for a section or a nested chain target. `depth` counts
/// the chain targets enclosing the tokens.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    source: &'a str,
    end: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], source: &'a str) -> Self {
        Self::bounded(tokens, source, source.len(), 0)
    }

    pub(crate) fn bounded(tokens: &'a [Token], source: &'a str, end: usize, depth: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            source,
            end,
            depth,
        }
    }

    /// Parse the tokens as one complete effect (core clauses followed by
    /// extended sections).
    pub fn parse(&mut self) -> ParseResult<EffectRecord> {
        let mut record = self.parse_core()?;
        self.parse_extended(&mut record)?;
        Ok(record)
    }

    // ========================================================================
    // HELPER METHODS
    // ========================================================================

    pub(crate) fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    pub(crate) fn peek(&self, ahead: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + ahead)
    }

    pub(crate) fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current().is_some_and(|token| token.is(kind))
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<&'a Token> {
        if self.check(kind) {
            self.advance()
        } else {
            None
        }
    }

    /// Consume a token of the given kind or fail with `what` as the
    /// expectation.
    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> ParseResult<&'a Token> {
        match self.eat(kind) {
            Some(token) => Ok(token),
            None => Err(self.error_expected(what)),
        }
    }

    /// Offset of the current token, or the end offset when exhausted.
    pub(crate) fn offset(&self) -> usize {
        self.current().map(|token| token.offset).unwrap_or(self.end)
    }

    pub(crate) fn error_at(&self, offset: usize, message: impl Into<String>) -> ParseError {
        ParseError::validation(message, offset, self.source)
    }

    pub(crate) fn error(&self, message: impl Into<String>) -> ParseError {
        self.error_at(self.offset(), message)
    }

    /// "expected X" or "expected X, found <kind> '<text>'".
    pub(crate) fn error_expected(&self, what: &str) -> ParseError {
        match self.current() {
            Some(token) => self.error(format!(
                "expected {}, found {} '{}'",
                what, token.kind, token.text
            )),
            None => self.error(format!("expected {}", what)),
        }
    }

    /// Decode a number token, rejecting literals that overflow `u32`.
    pub(crate) fn number_value(&self, token: &Token) -> ParseResult<u32> {
        token.text.parse::<u32>().map_err(|_| {
            self.error_at(token.offset, format!("number '{}' is out of range", token.text))
        })
    }

    pub(crate) fn expect_number(&mut self, what: &str) -> ParseResult<u32> {
        let token = self.expect(TokenKind::Number, what)?;
        self.number_value(token)
    }

    /// Fail if any token is left in the slice.
    pub(crate) fn expect_end(&self, context: &str) -> ParseResult<()> {
        match self.current() {
            Some(token) => Err(self.error(format!(
                "unexpected {} '{}' {}",
                token.kind, token.text, context
            ))),
            None => Ok(()),
        }
    }
}

/// Parse an already tokenized notation.
pub fn parse_tokens(tokens: &[Token], source: &str) -> ParseResult<EffectRecord> {
    Parser::new(tokens, source).parse()
}
