//! Extended sections: everything after the first `.` delimiter

use super::Parser;
use crate::error::ParseResult;
use crate::lexer::{Token, TokenKind};
use crate::record::*;

/// One delimiter-separated section and the offset where it stops.
struct Section<'a> {
    tokens: &'a [Token],
    end: usize,
}

impl<'a> Parser<'a> {
    /// Split the remaining tokens into sections and apply each one to the
    /// record.
    pub(crate) fn parse_extended(&mut self, record: &mut EffectRecord) -> ParseResult<()> {
        for section in self.sections() {
            let mut parser = Parser::bounded(section.tokens, self.source, section.end, self.depth);
            parser.parse_section(record)?;
        }
        self.pos = self.tokens.len();
        Ok(())
    }

    /// Partition the rest of the slice on delimiters outside parentheses.
    /// Empty sections are dropped.
    fn sections(&self) -> Vec<Section<'a>> {
        let rest = &self.tokens[self.pos.min(self.tokens.len())..];
        let mut sections = Vec::new();
        let mut depth = 0usize;
        let mut start = 0;

        for (index, token) in rest.iter().enumerate() {
            match token.kind {
                TokenKind::ParenOpen => depth += 1,
                TokenKind::ParenClose => depth = depth.saturating_sub(1),
                TokenKind::Delimiter if depth == 0 => {
                    if index > start {
                        sections.push(Section {
                            tokens: &rest[start..index],
                            end: token.offset,
                        });
                    }
                    start = index + 1;
                }
                _ => {}
            }
        }
        if rest.len() > start {
            sections.push(Section {
                tokens: &rest[start..],
                end: self.end,
            });
        }

        sections
    }

    fn parse_section(&mut self, record: &mut EffectRecord) -> ParseResult<()> {
        let Some(head) = self.advance() else {
            return Ok(());
        };

        match head.kind {
            TokenKind::SpecialFlag => {
                let flag = lookup(self, head, "special flag", SpecialFlag::from_code)?;
                record.special_flags.push(flag);
            }
            TokenKind::Removability => {
                record.removability =
                    Some(lookup(self, head, "removability flag", Removability::from_code)?);
            }
            TokenKind::ChainEffect => {
                record.chain_effect = Some(lookup(self, head, "chain effect", ChainEffect::from_code)?);
                record.chain_target = self.parse_chain_target()?.map(Box::new);
            }
            TokenKind::SourceDependency => {
                record.source_dependency =
                    Some(lookup(self, head, "source dependency", SourceDependency::from_code)?);
            }
            TokenKind::StackingBehavior => {
                let behavior = lookup(self, head, "stacking behavior", StackingBehavior::from_code)?;
                let value = if behavior.takes_count() {
                    Some(self.expect_number(&format!("stack count after '{}'", head.text))?)
                } else {
                    None
                };
                record.stacking = Some(Stacking { behavior, value });
            }
            TokenKind::Visibility => {
                record.visibility = Some(lookup(self, head, "visibility flag", Visibility::from_code)?);
            }
            TokenKind::ResourceMarker => {
                let resource = lookup(self, head, "resource", Resource::from_code)?;
                let amount = match self.current() {
                    Some(token) if token.is(TokenKind::Number) => {
                        self.advance();
                        Some(self.number_value(token)?)
                    }
                    _ => None,
                };
                record.resource = Some(ResourceLink { resource, amount });
            }
            TokenKind::BraceOpen => {
                self.parse_condition_list(&mut record.conditions)?;
            }
            TokenKind::ConditionPrefix => {
                record.conditions.push(self.parse_condition()?);
            }
            TokenKind::Interaction => {
                record.interaction_tag =
                    Some(lookup(self, head, "interaction tag", InteractionTag::from_code)?);
            }
            TokenKind::SpecialCondition => match MetaEffect::from_name_prefix(&head.text) {
                Some(meta) => record.meta_effect = Some(meta),
                None => {
                    tracing::debug!(text = %head.text, offset = head.offset, "skipping unknown meta effect section");
                    return Ok(());
                }
            },
            TokenKind::Target
            | TokenKind::EffectMarker
            | TokenKind::Stat
            | TokenKind::Number
            | TokenKind::Percent
            | TokenKind::FullValue
            | TokenKind::DurationType
            | TokenKind::RangeDash
            | TokenKind::TriggerPrefix
            | TokenKind::TriggerType
            | TokenKind::Element
            | TokenKind::Delimiter
            | TokenKind::Comma
            | TokenKind::BraceClose
            | TokenKind::ParenOpen
            | TokenKind::ParenClose
            | TokenKind::ComparisonOperator
            | TokenKind::Identifier
            | TokenKind::Whitespace
            | TokenKind::Error => {
                tracing::debug!(kind = ?head.kind, text = %head.text, offset = head.offset, "skipping unhandled section");
                return Ok(());
            }
        }

        self.expect_end(&format!("after '{}' section", head.text))
    }

    /// Optional `( <notation> )` after a chain effect.
    fn parse_chain_target(&mut self) -> ParseResult<Option<EffectRecord>> {
        let Some(open) = self.eat(TokenKind::ParenOpen) else {
            return Ok(None);
        };
        if self.depth >= MAX_CHAIN_DEPTH {
            return Err(self.error_at(open.offset, "chain target nested too deeply"));
        }

        let start = self.pos;
        let mut open_parens = 1usize;
        while let Some(token) = self.current() {
            match token.kind {
                TokenKind::ParenOpen => open_parens += 1,
                TokenKind::ParenClose => {
                    open_parens -= 1;
                    if open_parens == 0 {
                        break;
                    }
                }
                _ => {}
            }
            self.advance();
        }

        let close = self.expect(TokenKind::ParenClose, "')' to close chain target")?;
        let nested = &self.tokens[start..self.pos - 1];
        tracing::trace!(offset = open.offset, depth = self.depth + 1, "parsing chain target");
        let record = Parser::bounded(nested, self.source, close.offset, self.depth + 1).parse()?;
        Ok(Some(record))
    }

    /// `{cond, cond, ...}` with the opening brace already consumed.
    fn parse_condition_list(&mut self, conditions: &mut Vec<Condition>) -> ParseResult<()> {
        loop {
            conditions.push(self.parse_condition()?);
            if self.eat(TokenKind::Comma).is_some() {
                continue;
            }
            self.expect(TokenKind::BraceClose, "',' or '}' in condition list")?;
            return Ok(());
        }
    }
}

/// Resolve a section head through its vocabulary table.
fn lookup<T>(
    parser: &Parser<'_>,
    head: &Token,
    what: &str,
    from_code: fn(&str) -> Option<T>,
) -> ParseResult<T> {
    from_code(&head.text)
        .ok_or_else(|| parser.error_at(head.offset, format!("unrecognized {} '{}'", what, head.text)))
}
