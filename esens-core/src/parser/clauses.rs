//! Core clauses: mandatory prefix, magnitude, duration, trigger, element

use super::Parser;
use crate::error::ParseResult;
use crate::lexer::TokenKind;
use crate::record::*;

impl<'a> Parser<'a> {
    /// Parse the mandatory prefix and the optional core clauses. Anything
    /// left over must start an extended section.
    pub(crate) fn parse_core(&mut self) -> ParseResult<EffectRecord> {
        let target = self.parse_target()?;
        let effect_type = self.parse_effect_type()?;
        let subject = self.parse_subject()?;
        let mut record = EffectRecord::new(target, effect_type, subject);

        record.magnitude = self.parse_magnitude()?;
        record.duration = self.parse_duration()?;
        record.trigger = self.parse_trigger()?;
        record.elements = self.parse_elements()?;

        if let Some(token) = self.current() {
            if !token.is(TokenKind::Delimiter) {
                return Err(self.error(format!("unexpected {} '{}'", token.kind, token.text)));
            }
        }

        Ok(record)
    }

    // ========================================================================
    // MANDATORY PREFIX
    // ========================================================================

    fn parse_target(&mut self) -> ParseResult<Target> {
        match self.current() {
            Some(token) if token.is(TokenKind::Target) || token.is(TokenKind::Identifier) => {
                let target = Target::from_code(&token.text)
                    .ok_or_else(|| self.error(format!("unrecognized target '{}'", token.text)))?;
                self.advance();
                Ok(target)
            }
            _ => Err(self.error_expected("target (P, E, A, X, G)")),
        }
    }

    fn parse_effect_type(&mut self) -> ParseResult<EffectType> {
        let token = self.expect(TokenKind::EffectMarker, "effect marker (+, -, =, *, !, #)")?;
        EffectType::from_code(&token.text).ok_or_else(|| {
            self.error_at(token.offset, format!("unrecognized effect type '{}'", token.text))
        })
    }

    fn parse_subject(&mut self) -> ParseResult<Subject> {
        match self.current() {
            Some(token) if token.is(TokenKind::Stat) => {
                let stat = Stat::from_code(&token.text)
                    .ok_or_else(|| self.error(format!("unrecognized stat '{}'", token.text)))?;
                self.advance();
                Ok(Subject::Stat(stat))
            }
            Some(token) if token.is(TokenKind::SpecialCondition) => {
                self.advance();
                Ok(Subject::Condition(token.text.clone()))
            }
            _ => Err(self.error_expected("stat or special condition")),
        }
    }

    // ========================================================================
    // OPTIONAL CLAUSES
    // ========================================================================

    /// A number directly followed by `T` or `-` belongs to the duration.
    fn starts_duration(&self) -> bool {
        self.check(TokenKind::Number)
            && self.peek(1).is_some_and(|next| {
                next.is(TokenKind::RangeDash)
                    || (next.is(TokenKind::DurationType) && next.text == DurationKind::Turns.code())
            })
    }

    fn parse_magnitude(&mut self) -> ParseResult<Option<Magnitude>> {
        if self.eat(TokenKind::FullValue).is_some() {
            return Ok(Some(Magnitude::full()));
        }
        if !self.check(TokenKind::Number) || self.starts_duration() {
            return Ok(None);
        }

        let value = self.expect_number("magnitude")?;
        if self.eat(TokenKind::Percent).is_some() {
            Ok(Some(Magnitude::percent(value)))
        } else {
            Ok(Some(Magnitude::flat(value)))
        }
    }

    fn parse_duration(&mut self) -> ParseResult<Option<Duration>> {
        match self.current() {
            Some(token) if token.is(TokenKind::DurationType) => {
                let duration = match DurationKind::from_code(&token.text) {
                    Some(DurationKind::Combat) => Duration::Combat,
                    Some(DurationKind::Permanent) => Duration::Permanent,
                    Some(DurationKind::Action) => Duration::Action,
                    Some(DurationKind::Turns) => {
                        return Err(self.error("turn duration needs a count before 'T'"))
                    }
                    None => {
                        return Err(
                            self.error(format!("unrecognized duration type '{}'", token.text))
                        )
                    }
                };
                self.advance();
                Ok(Some(duration))
            }
            Some(token) if token.is(TokenKind::Number) => {
                let start = self.expect_number("duration")?;
                if self.eat(TokenKind::RangeDash).is_some() {
                    let end = self.expect_number("end of duration range")?;
                    self.expect_turns_marker()?;
                    if start > end {
                        return Err(self.error_at(
                            token.offset,
                            format!("duration range start {} exceeds end {}", start, end),
                        ));
                    }
                    Ok(Some(Duration::TurnRange { start, end }))
                } else {
                    self.expect_turns_marker()?;
                    Ok(Some(Duration::Turns(start)))
                }
            }
            _ => Ok(None),
        }
    }

    fn expect_turns_marker(&mut self) -> ParseResult<()> {
        match self.current() {
            Some(token)
                if token.is(TokenKind::DurationType) && token.text == DurationKind::Turns.code() =>
            {
                self.advance();
                Ok(())
            }
            _ => Err(self.error_expected("'T' after duration count")),
        }
    }

    fn parse_trigger(&mut self) -> ParseResult<Option<Trigger>> {
        let Some(token) = self.current() else {
            return Ok(None);
        };

        match token.kind {
            TokenKind::TriggerType => {
                let kind = TriggerKind::from_code(&token.text)
                    .filter(|kind| !kind.requires_prefix())
                    .ok_or_else(|| self.error(format!("unrecognized trigger '{}'", token.text)))?;
                self.advance();
                Ok(Some(Trigger::Kind(kind)))
            }
            TokenKind::TriggerPrefix => {
                self.advance();
                let kind_token = self.expect(
                    TokenKind::TriggerType,
                    &format!("trigger type after '{}'", token.text),
                )?;
                let code = format!("{}{}", token.text, kind_token.text);
                let kind = TriggerKind::from_code(&code).ok_or_else(|| {
                    self.error_at(token.offset, format!("unrecognized trigger '{}'", code))
                })?;
                Ok(Some(Trigger::Kind(kind)))
            }
            TokenKind::ConditionPrefix => {
                self.advance();
                if self.check(TokenKind::Number) {
                    let chance_offset = self.offset();
                    let chance = self.expect_number("trigger chance")?;
                    self.expect(TokenKind::Percent, "'%' after trigger chance")?;
                    if chance > 100 {
                        return Err(self.error_at(
                            chance_offset,
                            format!("trigger chance {}% exceeds 100%", chance),
                        ));
                    }
                    Ok(Some(Trigger::Chance(chance)))
                } else if self.check(TokenKind::Identifier) {
                    Ok(Some(Trigger::Condition(self.parse_condition()?)))
                } else {
                    Err(self.error_expected("chance or condition after '?'"))
                }
            }
            _ => Ok(None),
        }
    }

    fn parse_elements(&mut self) -> ParseResult<Vec<Element>> {
        let mut elements = Vec::new();
        if !self.check(TokenKind::Element) {
            return Ok(elements);
        }

        elements.push(self.parse_element()?);
        while self.eat(TokenKind::Comma).is_some() {
            elements.push(self.parse_element()?);
        }
        Ok(elements)
    }

    fn parse_element(&mut self) -> ParseResult<Element> {
        let token = self.expect(TokenKind::Element, "element (F, W, E, S, D)")?;
        Element::from_code(&token.text).ok_or_else(|| {
            self.error_at(token.offset, format!("unrecognized element '{}'", token.text))
        })
    }

    // ========================================================================
    // CONDITIONS
    // ========================================================================

    /// `Name`, or `attribute <op> value[%]`. Shared by triggers and
    /// extended condition sections.
    pub(crate) fn parse_condition(&mut self) -> ParseResult<Condition> {
        let attribute = self.expect(TokenKind::Identifier, "condition attribute")?;
        let Some(operator) = self.eat(TokenKind::ComparisonOperator) else {
            return Ok(Condition::flag(attribute.text.clone()));
        };

        match self.current() {
            Some(token) if token.is(TokenKind::Number) => {
                let value = self.expect_number("condition value")?;
                let is_percentage = self.eat(TokenKind::Percent).is_some();
                Ok(Condition::compare(
                    attribute.text.clone(),
                    operator.text.clone(),
                    ConditionValue::Number(value),
                    is_percentage,
                ))
            }
            Some(token) if token.is(TokenKind::Identifier) => {
                self.advance();
                let value = match token.text.as_str() {
                    "true" => ConditionValue::Bool(true),
                    "false" => ConditionValue::Bool(false),
                    text => ConditionValue::Text(text.to_string()),
                };
                Ok(Condition::compare(
                    attribute.text.clone(),
                    operator.text.clone(),
                    value,
                    false,
                ))
            }
            _ => Err(self.error_expected(&format!("condition value after '{}'", operator.text))),
        }
    }
}
