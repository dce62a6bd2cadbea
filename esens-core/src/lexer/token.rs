//! Lexer token types

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Lexical categories of the ESENS notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    // Mandatory prefix
    Target,
    EffectMarker,
    Stat,
    SpecialCondition,

    // Core clauses
    Number,
    Percent,
    FullValue,
    DurationType,
    RangeDash,
    TriggerPrefix,
    TriggerType,
    ConditionPrefix,
    Element,

    // Extended sections
    SpecialFlag,
    Removability,
    ChainEffect,
    SourceDependency,
    StackingBehavior,
    Visibility,
    ResourceMarker,
    Interaction,

    // Delimiters and operators
    Delimiter,
    Comma,
    BraceOpen,
    BraceClose,
    ParenOpen,
    ParenClose,
    ComparisonOperator,

    // Fallbacks
    Identifier,
    Whitespace,
    Error,
}

impl TokenKind {
    /// Human-readable category name used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Target => "target",
            TokenKind::EffectMarker => "effect marker",
            TokenKind::Stat => "stat",
            TokenKind::SpecialCondition => "special condition",
            TokenKind::Number => "number",
            TokenKind::Percent => "percent sign",
            TokenKind::FullValue => "full value",
            TokenKind::DurationType => "duration type",
            TokenKind::RangeDash => "range dash",
            TokenKind::TriggerPrefix => "trigger prefix",
            TokenKind::TriggerType => "trigger type",
            TokenKind::ConditionPrefix => "condition prefix",
            TokenKind::Element => "element",
            TokenKind::SpecialFlag => "special flag",
            TokenKind::Removability => "removability flag",
            TokenKind::ChainEffect => "chain effect",
            TokenKind::SourceDependency => "source dependency",
            TokenKind::StackingBehavior => "stacking behavior",
            TokenKind::Visibility => "visibility flag",
            TokenKind::ResourceMarker => "resource marker",
            TokenKind::Interaction => "interaction tag",
            TokenKind::Delimiter => "delimiter",
            TokenKind::Comma => "comma",
            TokenKind::BraceOpen => "opening brace",
            TokenKind::BraceClose => "closing brace",
            TokenKind::ParenOpen => "opening parenthesis",
            TokenKind::ParenClose => "closing parenthesis",
            TokenKind::ComparisonOperator => "comparison operator",
            TokenKind::Identifier => "identifier",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Error => "invalid character",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token with its category, matched text and byte offset into the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
        }
    }

    /// Byte offset just past the token.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
