//! Lexer implementation
//!
//! Scanning is table driven. Each lexical mode owns an ordered list of
//! anchored patterns and the first one that matches at the current offset
//! wins. The mode only depends on the previously emitted token, which is what
//! lets `C` be a stat right after the effect marker and a combat duration
//! later on.

use super::token::*;
use crate::error::{ParseError, ParseResult};
use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// PATTERN TABLES
// ============================================================================

/// Lexical mode selecting which pattern table is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexMode {
    /// Start of a notation (also right after `(`).
    Target,
    /// Right after the target.
    Effect,
    /// Right after the effect marker: stat letter or special condition.
    Subject,
    /// Right after the subject, where `F` still means "full value".
    Opening,
    /// Everywhere else in the core clauses.
    Core,
    /// Right after a trigger prefix (`>`, `<`, `^`, `v`).
    TriggerKind,
    /// Right after `?`, `{` or a comma inside braces.
    ConditionAttribute,
    /// After a condition attribute, where a comparison may follow.
    ConditionOperator,
    /// After a comparison operator.
    ConditionValue,
    /// At the head of an extended section.
    Extended,
}

struct Pattern {
    regex: Regex,
    kind: TokenKind,
}

fn compile(rules: &[(&str, TokenKind)]) -> Vec<Pattern> {
    rules
        .iter()
        .map(|(source, kind)| Pattern {
            regex: Regex::new(&format!("^(?:{})", source)).expect("Invalid lexer pattern"),
            kind: *kind,
        })
        .collect()
}

/// Fallback tail shared by every mode. It covers the whole supported
/// alphabet and ends in a one-character error pattern, so every position
/// matches something.
const FALLBACK: &[(&str, TokenKind)] = &[
    (r"\s+", TokenKind::Whitespace),
    (r"\.", TokenKind::Delimiter),
    (r",", TokenKind::Comma),
    (r"\{", TokenKind::BraceOpen),
    (r"\}", TokenKind::BraceClose),
    (r"\(", TokenKind::ParenOpen),
    (r"\)", TokenKind::ParenClose),
    (r"<=|>=|!=|==|[<>=]", TokenKind::ComparisonOperator),
    (r"#[A-Za-z]+", TokenKind::SpecialCondition),
    (r"[+\-*!#]", TokenKind::EffectMarker),
    (r"\d+", TokenKind::Number),
    (r"%", TokenKind::Percent),
    (r"\?", TokenKind::ConditionPrefix),
    (r"\^", TokenKind::TriggerPrefix),
    (r"~[A-Za-z]", TokenKind::SourceDependency),
    (r"\$[A-Za-z]+", TokenKind::ResourceMarker),
    (r"[A-Za-z_][A-Za-z0-9_]*", TokenKind::Identifier),
    (r"(?s).", TokenKind::Error),
];

const TARGET: &[(&str, TokenKind)] = &[(r"[PEAXG]", TokenKind::Target)];

const EFFECT: &[(&str, TokenKind)] = &[(r"[+\-=*!#]", TokenKind::EffectMarker)];

const SUBJECT: &[(&str, TokenKind)] = &[
    (r"#[A-Za-z]+", TokenKind::SpecialCondition),
    (r"[A-Z][a-z]{2,}", TokenKind::SpecialCondition),
    (r"[A-Z]", TokenKind::Stat),
];

const OPENING: &[(&str, TokenKind)] = &[(r"F", TokenKind::FullValue)];

const CORE: &[(&str, TokenKind)] = &[
    (r"\d+", TokenKind::Number),
    (r"%", TokenKind::Percent),
    (r"-", TokenKind::RangeDash),
    (r"[TCPA]", TokenKind::DurationType),
    (r"[><^v]", TokenKind::TriggerPrefix),
    (r"K", TokenKind::TriggerType),
    (r"\?", TokenKind::ConditionPrefix),
    (r"[FWESD]", TokenKind::Element),
    (r",", TokenKind::Comma),
    (r"\.", TokenKind::Delimiter),
];

const TRIGGER_KIND: &[(&str, TokenKind)] = &[(r"[A-Za-z]", TokenKind::TriggerType)];

const CONDITION_ATTRIBUTE: &[(&str, TokenKind)] = &[
    (r"\d+", TokenKind::Number),
    (r"[A-Za-z_][A-Za-z0-9_]*", TokenKind::Identifier),
];

const CONDITION_OPERATOR: &[(&str, TokenKind)] =
    &[(r"<=|>=|!=|==|[<>=]", TokenKind::ComparisonOperator)];

const CONDITION_VALUE: &[(&str, TokenKind)] = &[
    (r"\d+", TokenKind::Number),
    (r"[A-Za-z_][A-Za-z0-9_]*", TokenKind::Identifier),
];

// Flag codes go before the bare stacking `S`, which would otherwise shadow `ST`.
const EXTENDED: &[(&str, TokenKind)] = &[
    (r">[A-Z][a-z]+", TokenKind::ChainEffect),
    (r"DOT|ST|AR", TokenKind::SpecialFlag),
    (r"S[+*U]", TokenKind::StackingBehavior),
    (r"S", TokenKind::StackingBehavior),
    (r"R[A-Z]", TokenKind::Removability),
    (r"V[A-Z]", TokenKind::Visibility),
    (r"I[A-Z]", TokenKind::Interaction),
    (r"~[A-Za-z]", TokenKind::SourceDependency),
    (r"\$[A-Z]+", TokenKind::ResourceMarker),
    (r"\{", TokenKind::BraceOpen),
    (r"\?", TokenKind::ConditionPrefix),
    (r"#[A-Za-z]+", TokenKind::SpecialCondition),
];

struct PatternTables {
    target: Vec<Pattern>,
    effect: Vec<Pattern>,
    subject: Vec<Pattern>,
    opening: Vec<Pattern>,
    core: Vec<Pattern>,
    trigger_kind: Vec<Pattern>,
    condition_attribute: Vec<Pattern>,
    condition_operator: Vec<Pattern>,
    condition_value: Vec<Pattern>,
    extended: Vec<Pattern>,
}

fn with_tail(parts: &[&[(&'static str, TokenKind)]]) -> Vec<Pattern> {
    let mut rules: Vec<(&'static str, TokenKind)> = Vec::new();
    for part in parts {
        rules.extend_from_slice(part);
    }
    rules.extend_from_slice(FALLBACK);
    compile(&rules)
}

impl PatternTables {
    fn build() -> Self {
        Self {
            target: with_tail(&[TARGET]),
            effect: with_tail(&[EFFECT]),
            subject: with_tail(&[SUBJECT]),
            opening: with_tail(&[OPENING, CORE]),
            core: with_tail(&[CORE]),
            trigger_kind: with_tail(&[TRIGGER_KIND]),
            condition_attribute: with_tail(&[CONDITION_ATTRIBUTE]),
            condition_operator: with_tail(&[CONDITION_OPERATOR, CORE]),
            condition_value: with_tail(&[CONDITION_VALUE]),
            extended: with_tail(&[EXTENDED]),
        }
    }

    fn table(&self, mode: LexMode) -> &[Pattern] {
        match mode {
            LexMode::Target => &self.target,
            LexMode::Effect => &self.effect,
            LexMode::Subject => &self.subject,
            LexMode::Opening => &self.opening,
            LexMode::Core => &self.core,
            LexMode::TriggerKind => &self.trigger_kind,
            LexMode::ConditionAttribute => &self.condition_attribute,
            LexMode::ConditionOperator => &self.condition_operator,
            LexMode::ConditionValue => &self.condition_value,
            LexMode::Extended => &self.extended,
        }
    }
}

static TABLES: Lazy<PatternTables> = Lazy::new(PatternTables::build);

// ============================================================================
// LEXER IMPLEMENTATION
// ============================================================================

/// Lexer for ESENS notation.
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    mode: LexMode,
    brace_depth: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            mode: LexMode::Target,
            brace_depth: 0,
        }
    }

    /// Tokenize the entire source. Whitespace is dropped; the first character
    /// that matches no pattern aborts with a tokenization error.
    pub fn tokenize(&mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }

        Ok(tokens)
    }

    /// Get the next significant token, or `None` at end of input.
    fn next_token(&mut self) -> ParseResult<Option<Token>> {
        loop {
            let rest = &self.source[self.pos..];
            if rest.is_empty() {
                return Ok(None);
            }

            let start = self.pos;
            let (kind, len) = self.match_at(rest);
            let text = &rest[..len];
            self.pos += len;

            match kind {
                TokenKind::Whitespace => continue,
                TokenKind::Error => {
                    return Err(ParseError::tokenization(
                        format!("invalid character '{}'", text),
                        start,
                        self.source,
                    ));
                }
                _ => {
                    tracing::trace!(kind = ?kind, text, offset = start, "token");
                    self.mode = self.next_mode(kind);
                    return Ok(Some(Token::new(kind, text, start)));
                }
            }
        }
    }

    /// First pattern of the current mode's table that matches at the head of
    /// `rest`. The fallback tail guarantees a non-empty match.
    fn match_at(&self, rest: &str) -> (TokenKind, usize) {
        for pattern in TABLES.table(self.mode) {
            if let Some(m) = pattern.regex.find(rest) {
                if m.end() > 0 {
                    return (pattern.kind, m.end());
                }
            }
        }
        let width = rest.chars().next().map(char::len_utf8).unwrap_or(1);
        (TokenKind::Error, width)
    }

    fn next_mode(&mut self, kind: TokenKind) -> LexMode {
        match kind {
            TokenKind::ParenOpen => return LexMode::Target,
            TokenKind::Delimiter => return LexMode::Extended,
            TokenKind::BraceOpen => {
                self.brace_depth += 1;
                return LexMode::ConditionAttribute;
            }
            TokenKind::BraceClose => {
                self.brace_depth = self.brace_depth.saturating_sub(1);
                return LexMode::Core;
            }
            _ => {}
        }

        match self.mode {
            LexMode::Target => LexMode::Effect,
            LexMode::Effect => LexMode::Subject,
            LexMode::Subject => LexMode::Opening,
            LexMode::ConditionAttribute if kind == TokenKind::Identifier => {
                LexMode::ConditionOperator
            }
            _ => match kind {
                TokenKind::TriggerPrefix => LexMode::TriggerKind,
                TokenKind::ConditionPrefix => LexMode::ConditionAttribute,
                TokenKind::ComparisonOperator => LexMode::ConditionValue,
                TokenKind::Comma if self.brace_depth > 0 => LexMode::ConditionAttribute,
                _ => LexMode::Core,
            },
        }
    }
}

/// Tokenize a notation string.
pub fn tokenize(source: &str) -> ParseResult<Vec<Token>> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .map(|tokens| tokens.into_iter().map(|t| t.kind).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_empty_input_yields_no_tokens() -> ParseResult<()> {
        assert!(tokenize("")?.is_empty());
        assert!(tokenize("   ")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_basic_notation() -> ParseResult<()> {
        let tokens = tokenize("P+S10%3T")?;
        let expected = [
            (TokenKind::Target, "P", 0),
            (TokenKind::EffectMarker, "+", 1),
            (TokenKind::Stat, "S", 2),
            (TokenKind::Number, "10", 3),
            (TokenKind::Percent, "%", 5),
            (TokenKind::Number, "3", 6),
            (TokenKind::DurationType, "T", 7),
        ];
        assert_eq!(tokens.len(), expected.len());
        for (token, (kind, text, offset)) in tokens.iter().zip(expected) {
            assert_eq!(token.kind, kind);
            assert_eq!(token.text, text);
            assert_eq!(token.offset, offset);
        }
        Ok(())
    }

    #[test]
    fn test_same_letter_changes_category_by_position() {
        // `C` is the critical stat after the marker, combat duration later.
        assert_eq!(
            kinds("E-C15C"),
            vec![
                TokenKind::Target,
                TokenKind::EffectMarker,
                TokenKind::Stat,
                TokenKind::Number,
                TokenKind::DurationType,
            ]
        );
        // `F` is full value right after the subject and fire afterwards.
        assert_eq!(
            kinds("P+SF3TF"),
            vec![
                TokenKind::Target,
                TokenKind::EffectMarker,
                TokenKind::Stat,
                TokenKind::FullValue,
                TokenKind::Number,
                TokenKind::DurationType,
                TokenKind::Element,
            ]
        );
    }

    #[test]
    fn test_special_condition_subject() -> ParseResult<()> {
        let tokens = tokenize("P#Stun1T")?;
        assert_eq!(tokens[1].kind, TokenKind::EffectMarker);
        assert_eq!(tokens[2].kind, TokenKind::SpecialCondition);
        assert_eq!(tokens[2].text, "Stun");

        let tokens = tokenize("E+#Regen")?;
        assert_eq!(tokens[2].kind, TokenKind::SpecialCondition);
        assert_eq!(tokens[2].text, "#Regen");
        Ok(())
    }

    #[test]
    fn test_flag_codes_win_over_bare_stacking() -> ParseResult<()> {
        let tokens = tokenize("P+S.ST.S3.SU.DOT")?;
        let extended: Vec<(TokenKind, &str)> = tokens[3..]
            .iter()
            .map(|t| (t.kind, t.text.as_str()))
            .collect();
        assert_eq!(
            extended,
            vec![
                (TokenKind::Delimiter, "."),
                (TokenKind::SpecialFlag, "ST"),
                (TokenKind::Delimiter, "."),
                (TokenKind::StackingBehavior, "S"),
                (TokenKind::Number, "3"),
                (TokenKind::Delimiter, "."),
                (TokenKind::StackingBehavior, "SU"),
                (TokenKind::Delimiter, "."),
                (TokenKind::SpecialFlag, "DOT"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_triggers() {
        assert_eq!(
            kinds("P+S>A"),
            vec![
                TokenKind::Target,
                TokenKind::EffectMarker,
                TokenKind::Stat,
                TokenKind::TriggerPrefix,
                TokenKind::TriggerType,
            ]
        );
        assert_eq!(kinds("P+SvE")[3..], [TokenKind::TriggerPrefix, TokenKind::TriggerType]);
        assert_eq!(kinds("P+SK")[3..], [TokenKind::TriggerType]);
        assert_eq!(
            kinds("P+S?25%")[3..],
            [TokenKind::ConditionPrefix, TokenKind::Number, TokenKind::Percent]
        );
    }

    #[test]
    fn test_condition_comparison() -> ParseResult<()> {
        let tokens = tokenize("P+S?HP<=30%")?;
        let tail: Vec<(TokenKind, &str)> =
            tokens[3..].iter().map(|t| (t.kind, t.text.as_str())).collect();
        assert_eq!(
            tail,
            vec![
                (TokenKind::ConditionPrefix, "?"),
                (TokenKind::Identifier, "HP"),
                (TokenKind::ComparisonOperator, "<="),
                (TokenKind::Number, "30"),
                (TokenKind::Percent, "%"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_condition_list_in_braces() {
        assert_eq!(
            kinds("P+S.{HP<30%,Low,Class=Mage}")[3..],
            [
                TokenKind::Delimiter,
                TokenKind::BraceOpen,
                TokenKind::Identifier,
                TokenKind::ComparisonOperator,
                TokenKind::Number,
                TokenKind::Percent,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::ComparisonOperator,
                TokenKind::Identifier,
                TokenKind::BraceClose,
            ]
        );
    }

    #[test]
    fn test_extended_section_heads() {
        assert_eq!(
            kinds("P+S.RN.>Heal.~P.VH.$MP5.IX.#Gobstop.S+.S*"),
            vec![
                TokenKind::Target,
                TokenKind::EffectMarker,
                TokenKind::Stat,
                TokenKind::Delimiter,
                TokenKind::Removability,
                TokenKind::Delimiter,
                TokenKind::ChainEffect,
                TokenKind::Delimiter,
                TokenKind::SourceDependency,
                TokenKind::Delimiter,
                TokenKind::Visibility,
                TokenKind::Delimiter,
                TokenKind::ResourceMarker,
                TokenKind::Number,
                TokenKind::Delimiter,
                TokenKind::Interaction,
                TokenKind::Delimiter,
                TokenKind::SpecialCondition,
                TokenKind::Delimiter,
                TokenKind::StackingBehavior,
                TokenKind::Delimiter,
                TokenKind::StackingBehavior,
            ]
        );
    }

    #[test]
    fn test_chain_target_restarts_at_target_mode() {
        assert_eq!(
            kinds("P+S.>Trig(E-H5)")[3..],
            [
                TokenKind::Delimiter,
                TokenKind::ChainEffect,
                TokenKind::ParenOpen,
                TokenKind::Target,
                TokenKind::EffectMarker,
                TokenKind::Stat,
                TokenKind::Number,
                TokenKind::ParenClose,
            ]
        );
    }

    #[test]
    fn test_whitespace_is_dropped_and_offsets_kept() -> ParseResult<()> {
        let tokens = tokenize("P + S 10")?;
        let offsets: Vec<usize> = tokens.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![0, 2, 4, 6]);
        Ok(())
    }

    #[test]
    fn test_unknown_target_letter_is_identifier() -> ParseResult<()> {
        let tokens = tokenize("Z+S10")?;
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "Z");
        Ok(())
    }

    #[test]
    fn test_invalid_character_reports_offset() {
        let err = tokenize("P+S1@").unwrap_err();
        assert!(err.is_tokenization());
        assert_eq!(err.offset, Some(4));
        assert!(err.message.contains('@'));
    }

    #[test]
    fn test_non_ascii_character_is_rejected_whole() {
        let err = tokenize("P+Sé").unwrap_err();
        assert!(err.is_tokenization());
        assert_eq!(err.offset, Some(3));
        assert!(err.message.contains('é'));
    }
}
