//! Canonical notation emitter

use super::*;

/// Concatenate core parts, inserting a space only where two parts would
/// otherwise lex as one token: adjacent numbers, or a word running into a
/// following letter.
fn join_core(parts: &[String]) -> String {
    let mut out = String::new();
    let mut previous: Option<&str> = None;

    for part in parts {
        if let (Some(prev), Some(next)) = (previous, part.chars().next()) {
            let last = prev.chars().last().unwrap_or(' ');
            let digits = last.is_ascii_digit() && next.is_ascii_digit();
            let word = prev.len() > 1 && last.is_ascii_alphabetic() && next.is_ascii_alphabetic();
            if digits || word {
                out.push(' ');
            }
        }
        out.push_str(part);
        previous = Some(part.as_str());
    }

    out
}

fn magnitude_part(magnitude: &Magnitude) -> String {
    if magnitude.is_full {
        "F".to_string()
    } else if magnitude.is_percentage {
        format!("{}%", magnitude.value)
    } else {
        magnitude.value.to_string()
    }
}

fn duration_part(duration: &Duration) -> String {
    match duration {
        Duration::Turns(turns) => format!("{}T", turns),
        Duration::TurnRange { start, end } => format!("{}-{}T", start, end),
        other => other.kind().code().to_string(),
    }
}

fn trigger_part(trigger: &Trigger) -> String {
    match trigger {
        Trigger::Kind(kind) => kind.code().to_string(),
        Trigger::Chance(chance) => format!("?{}%", chance),
        Trigger::Condition(condition) => format!("?{}", condition),
    }
}

impl EffectRecord {
    /// Canonical notation for this record. Parsing the result yields an
    /// equal record.
    pub fn to_notation(&self) -> String {
        let mut core = vec![
            self.target.code().to_string(),
            self.effect_type.code().to_string(),
            String::from(self.subject.clone()),
        ];
        if let Some(magnitude) = &self.magnitude {
            core.push(magnitude_part(magnitude));
        }
        if let Some(duration) = &self.duration {
            core.push(duration_part(duration));
        }
        if let Some(trigger) = &self.trigger {
            core.push(trigger_part(trigger));
        }
        if !self.elements.is_empty() {
            let codes: Vec<&str> = self.elements.iter().map(|e| e.code()).collect();
            core.push(codes.join(","));
        }

        let mut out = join_core(&core);

        for flag in &self.special_flags {
            out.push('.');
            out.push_str(flag.code());
        }
        if let Some(removability) = self.removability {
            out.push('.');
            out.push_str(removability.code());
        }
        if let Some(chain) = self.chain_effect {
            out.push('.');
            out.push_str(chain.code());
            if let Some(nested) = &self.chain_target {
                out.push_str(&format!("({})", nested.to_notation()));
            }
        }
        if let Some(source) = self.source_dependency {
            out.push('.');
            out.push_str(source.code());
        }
        if let Some(stacking) = &self.stacking {
            out.push('.');
            out.push_str(stacking.behavior.code());
            if let Some(count) = stacking.value {
                out.push_str(&count.to_string());
            }
        }
        if let Some(visibility) = self.visibility {
            out.push('.');
            out.push_str(visibility.code());
        }
        if let Some(link) = &self.resource {
            out.push('.');
            out.push_str(link.resource.code());
            if let Some(amount) = link.amount {
                out.push_str(&amount.to_string());
            }
        }
        if !self.conditions.is_empty() {
            let conditions: Vec<String> = self.conditions.iter().map(|c| c.to_string()).collect();
            out.push_str(&format!(".{{{}}}", conditions.join(",")));
        }
        if let Some(tag) = self.interaction_tag {
            out.push('.');
            out.push_str(tag.code());
        }
        if let Some(meta) = self.meta_effect {
            out.push('.');
            out.push_str(meta.code());
        }

        out
    }
}
