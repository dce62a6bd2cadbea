//! Effect record: the structured result of parsing a notation
//!
//! The record is built once by the core-clause parser, filled in by the
//! extended-clause parser and then handed to the caller. It renders three
//! ways: a structured JSON tree (`to_structured`), an English sentence
//! (`to_text`) and canonical notation (`to_notation` / `Display`).

mod enums;
mod notation;
mod text;

pub use enums::*;

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CORE CLAUSE TYPES
// ============================================================================

/// How much the stat changes. `is_full` wins over the value when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Magnitude {
    pub value: u32,
    pub is_percentage: bool,
    pub is_full: bool,
}

impl Magnitude {
    pub fn flat(value: u32) -> Self {
        Self {
            value,
            is_percentage: false,
            is_full: false,
        }
    }

    pub fn percent(value: u32) -> Self {
        Self {
            value,
            is_percentage: true,
            is_full: false,
        }
    }

    pub fn full() -> Self {
        Self {
            value: 0,
            is_percentage: false,
            is_full: true,
        }
    }
}

/// How long the effect lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DurationRepr", into = "DurationRepr")]
pub enum Duration {
    Turns(u32),
    TurnRange { start: u32, end: u32 },
    Combat,
    Permanent,
    Action,
}

impl Duration {
    pub fn kind(&self) -> DurationKind {
        match self {
            Duration::Turns(_) | Duration::TurnRange { .. } => DurationKind::Turns,
            Duration::Combat => DurationKind::Combat,
            Duration::Permanent => DurationKind::Permanent,
            Duration::Action => DurationKind::Action,
        }
    }
}

/// Flat wire shape of [`Duration`]: `{value?, range_start?, range_end?, type}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct DurationRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    range_start: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    range_end: Option<u32>,
    #[serde(rename = "type")]
    kind: DurationKind,
}

impl From<Duration> for DurationRepr {
    fn from(duration: Duration) -> Self {
        let (value, range_start, range_end) = match duration {
            Duration::Turns(value) => (Some(value), None, None),
            Duration::TurnRange { start, end } => (None, Some(start), Some(end)),
            _ => (None, None, None),
        };
        Self {
            value,
            range_start,
            range_end,
            kind: duration.kind(),
        }
    }
}

impl TryFrom<DurationRepr> for Duration {
    type Error = String;

    fn try_from(repr: DurationRepr) -> Result<Self, Self::Error> {
        match (repr.kind, repr.value, repr.range_start, repr.range_end) {
            (DurationKind::Turns, Some(value), None, None) => Ok(Duration::Turns(value)),
            (DurationKind::Turns, None, Some(start), Some(end)) if start <= end => {
                Ok(Duration::TurnRange { start, end })
            }
            (DurationKind::Turns, None, Some(start), Some(end)) => Err(format!(
                "duration range start {} exceeds end {}",
                start, end
            )),
            (DurationKind::Turns, ..) => {
                Err("turn duration needs either a value or both range bounds".to_string())
            }
            (kind, None, None, None) => Ok(match kind {
                DurationKind::Combat => Duration::Combat,
                DurationKind::Permanent => Duration::Permanent,
                _ => Duration::Action,
            }),
            (kind, ..) => Err(format!("duration type '{}' takes no count", kind)),
        }
    }
}

/// Right-hand side of a condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Bool(bool),
    Number(u32),
    Text(String),
}

impl fmt::Display for ConditionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionValue::Bool(value) => write!(f, "{}", value),
            ConditionValue::Number(value) => write!(f, "{}", value),
            ConditionValue::Text(value) => f.write_str(value),
        }
    }
}

/// A gating condition such as `HP<30%` or the bare name `Low`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Condition {
    pub attribute: String,
    pub operator: String,
    pub value: ConditionValue,
    pub is_percentage: bool,
}

impl Condition {
    /// A bare name, read as `name = true`.
    pub fn flag(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            operator: "=".to_string(),
            value: ConditionValue::Bool(true),
            is_percentage: false,
        }
    }

    pub fn compare(
        attribute: impl Into<String>,
        operator: impl Into<String>,
        value: ConditionValue,
        is_percentage: bool,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            operator: operator.into(),
            value,
            is_percentage,
        }
    }

    fn is_bare_flag(&self) -> bool {
        self.operator == "=" && self.value == ConditionValue::Bool(true) && !self.is_percentage
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bare_flag() {
            return f.write_str(&self.attribute);
        }
        write!(f, "{}{}{}", self.attribute, self.operator, self.value)?;
        if self.is_percentage {
            f.write_str("%")?;
        }
        Ok(())
    }
}

/// What activates the effect. Exactly one form is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TriggerRepr", into = "TriggerRepr")]
pub enum Trigger {
    Kind(TriggerKind),
    Chance(u32),
    Condition(Condition),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct TriggerRepr {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<TriggerKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    chance: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    condition: Option<Condition>,
}

impl From<Trigger> for TriggerRepr {
    fn from(trigger: Trigger) -> Self {
        let mut repr = TriggerRepr {
            kind: None,
            chance: None,
            condition: None,
        };
        match trigger {
            Trigger::Kind(kind) => repr.kind = Some(kind),
            Trigger::Chance(chance) => repr.chance = Some(chance),
            Trigger::Condition(condition) => repr.condition = Some(condition),
        }
        repr
    }
}

impl TryFrom<TriggerRepr> for Trigger {
    type Error = String;

    fn try_from(repr: TriggerRepr) -> Result<Self, Self::Error> {
        match (repr.kind, repr.chance, repr.condition) {
            (Some(kind), None, None) => Ok(Trigger::Kind(kind)),
            (None, Some(chance), None) if chance <= 100 => Ok(Trigger::Chance(chance)),
            (None, Some(chance), None) => Err(format!("trigger chance {}% exceeds 100%", chance)),
            (None, None, Some(condition)) => Ok(Trigger::Condition(condition)),
            _ => Err("trigger needs exactly one of type, chance or condition".to_string()),
        }
    }
}

/// The stat an effect modifies, or a free-form condition name such as
/// `Stun` or `#Regen` (kept verbatim).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Subject {
    Stat(Stat),
    Condition(String),
}

impl From<String> for Subject {
    fn from(text: String) -> Self {
        match Stat::from_code(&text) {
            Some(stat) => Subject::Stat(stat),
            None => Subject::Condition(text),
        }
    }
}

impl From<Subject> for String {
    fn from(subject: Subject) -> Self {
        match subject {
            Subject::Stat(stat) => stat.code().to_string(),
            Subject::Condition(name) => name,
        }
    }
}

// ============================================================================
// EXTENDED SECTION TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stacking {
    #[serde(rename = "type")]
    pub behavior: StackingBehavior,
    /// Max stack count, only for [`StackingBehavior::MaxStacks`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceLink {
    #[serde(rename = "type")]
    pub resource: Resource,
    /// Per-turn cost; `None` renders as "some".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u32>,
}

// ============================================================================
// EFFECT RECORD
// ============================================================================

/// Deepest chain target the parser and `from_structured` accept.
pub const MAX_CHAIN_DEPTH: usize = 8;

/// A fully parsed status effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EffectRecord {
    pub target: Target,
    pub effect_type: EffectType,
    #[serde(rename = "stat_affected")]
    pub subject: Subject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<Magnitude>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Duration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<Trigger>,
    #[serde(rename = "element", default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<Element>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub special_flags: Vec<SpecialFlag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removability: Option<Removability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_effect: Option<ChainEffect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_target: Option<Box<EffectRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_dependency: Option<SourceDependency>,
    #[serde(rename = "stacking_behavior", default, skip_serializing_if = "Option::is_none")]
    pub stacking: Option<Stacking>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(rename = "resource_connection", default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceLink>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_tag: Option<InteractionTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_effect: Option<MetaEffect>,
}

impl EffectRecord {
    /// A record holding only the mandatory prefix.
    pub fn new(target: Target, effect_type: EffectType, subject: Subject) -> Self {
        Self {
            target,
            effect_type,
            subject,
            magnitude: None,
            duration: None,
            trigger: None,
            elements: Vec::new(),
            special_flags: Vec::new(),
            removability: None,
            chain_effect: None,
            chain_target: None,
            source_dependency: None,
            stacking: None,
            visibility: None,
            resource: None,
            conditions: Vec::new(),
            interaction_tag: None,
            meta_effect: None,
        }
    }

    /// Structured form: a JSON object holding only the populated fields,
    /// with enum values written as their notation codes.
    pub fn to_structured(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Number of chain targets nested below this record.
    pub fn chain_depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.chain_target.as_deref();
        while let Some(nested) = current {
            depth += 1;
            current = nested.chain_target.as_deref();
        }
        depth
    }

    /// Rebuild a record from its structured form.
    pub fn from_structured(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let record: Self = serde_json::from_value(value)?;
        if record.chain_depth() > MAX_CHAIN_DEPTH {
            return Err(serde::de::Error::custom(format!(
                "chain target nested deeper than {} levels",
                MAX_CHAIN_DEPTH
            )));
        }
        Ok(record)
    }
}

impl fmt::Display for EffectRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}
