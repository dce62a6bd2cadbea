//! English explanation renderer

use super::*;

fn target_phrase(target: Target) -> &'static str {
    match target {
        Target::Player => "Player",
        Target::Enemy => "Enemy",
        Target::AllAllies => "All allies",
        Target::AllEnemies => "All enemies",
        Target::Global => "Everyone",
    }
}

fn effect_phrase(effect: EffectType) -> &'static str {
    match effect {
        EffectType::Increase => "gains",
        EffectType::Decrease => "loses",
        EffectType::Set => "has set to",
        EffectType::Multiply => "has multiplied",
        EffectType::Nullify => "has nullified",
        EffectType::Special => "is affected by",
    }
}

fn stat_phrase(stat: Stat) -> &'static str {
    match stat {
        Stat::Strength => "strength",
        Stat::Defense => "defense",
        Stat::Element => "element",
        Stat::Luck => "luck",
        Stat::Gold => "gold",
        Stat::Health => "health",
        Stat::Movement => "movement",
        Stat::Initiative => "initiative",
        Stat::Critical => "critical hit chance",
        Stat::Resistance => "resistance",
    }
}

fn element_name(element: Element) -> &'static str {
    match element {
        Element::Fire => "Fire",
        Element::Water => "Water",
        Element::Earth => "Earth",
        Element::Sky => "Sky",
        Element::Death => "Death",
    }
}

fn trigger_phrase(kind: TriggerKind) -> &'static str {
    match kind {
        TriggerKind::OnAttack => "when attacking",
        TriggerKind::OnDefend => "when defending",
        TriggerKind::TurnStart => "at the start of their turn",
        TriggerKind::TurnEnd => "at the end of their turn",
        TriggerKind::OnKill => "on kill",
    }
}

fn flag_phrase(flag: SpecialFlag) -> &'static str {
    match flag {
        SpecialFlag::Stacking => "can stack",
        SpecialFlag::AreaEffect => "affects an area",
        SpecialFlag::DamageOverTime => "deals damage over time",
    }
}

fn removability_phrase(removability: Removability) -> &'static str {
    match removability {
        Removability::NonRemovable => "cannot be removed",
        Removability::EasilyRemoved => "can be easily removed",
        Removability::DifficultToRemove => "is difficult to remove",
        Removability::CleanseSpecific => "requires specific cleansing",
    }
}

fn chain_phrase(chain: ChainEffect) -> &'static str {
    match chain {
        ChainEffect::Heal => "triggers healing when it ends",
        ChainEffect::Explode => "explodes for damage when it ends",
        ChainEffect::Spread => "spreads to nearby targets when it ends",
        ChainEffect::Trigger => "triggers another effect when it ends",
    }
}

fn source_phrase(source: SourceDependency) -> &'static str {
    match source {
        SourceDependency::PlayerLinked => "ends if the player dies",
        SourceDependency::EnemyLinked => "ends if the enemy dies",
        SourceDependency::Independent => "persists regardless of source",
    }
}

fn stacking_phrase(stacking: &Stacking) -> String {
    match stacking.behavior {
        StackingBehavior::MaxStacks => match stacking.value {
            Some(count) => format!("stacks up to {} times", count),
            None => "stacks up to a limit".to_string(),
        },
        StackingBehavior::AddDuration => "adds duration when reapplied".to_string(),
        StackingBehavior::MultiplyEffect => "multiplies effect when stacked".to_string(),
        StackingBehavior::UniqueStacking => {
            "allows unique stacking from different sources".to_string()
        }
    }
}

fn visibility_phrase(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Hidden => "is hidden from the target",
        Visibility::VisibleAll => "is visible to all",
        Visibility::VisiblePlayer => "is only visible to the player",
    }
}

fn resource_phrase(link: &ResourceLink) -> String {
    let resource = match link.resource {
        Resource::Mana => "mana",
        Resource::Health => "health",
        Resource::Gold => "gold",
    };
    match link.amount {
        Some(amount) => format!("costs {} {} per turn", amount, resource),
        None => format!("costs some {} per turn", resource),
    }
}

fn interaction_phrase(tag: InteractionTag) -> &'static str {
    match tag {
        InteractionTag::Exclusive => "cancels similar effects",
        InteractionTag::Additive => "adds with similar effects",
        InteractionTag::Multiplicative => "multiplies with similar effects",
    }
}

fn meta_phrase(meta: MetaEffect) -> &'static str {
    match meta {
        MetaEffect::Gobstopper => "transforms into new effects over time",
        MetaEffect::Phase => "changes based on combat phase",
        MetaEffect::Echo => "repeats at intervals",
        MetaEffect::Flux => "fluctuates in strength",
    }
}

impl EffectRecord {
    /// Human-readable explanation, e.g.
    /// `"Player gains strength by 10% for 3 turns"`.
    pub fn to_text(&self) -> String {
        let mut text = format!(
            "{} {} ",
            target_phrase(self.target),
            effect_phrase(self.effect_type)
        );

        match &self.subject {
            Subject::Stat(stat) => text.push_str(stat_phrase(*stat)),
            Subject::Condition(name) => {
                text.push_str(&format!("the '{}' condition", name.trim_start_matches('#')))
            }
        }

        if let Some(magnitude) = &self.magnitude {
            if magnitude.is_full {
                text.push_str(" to its maximum value");
            } else if magnitude.is_percentage {
                text.push_str(&format!(" by {}%", magnitude.value));
            } else {
                text.push_str(&format!(" by {}", magnitude.value));
            }
        }

        if let Some(duration) = &self.duration {
            match duration {
                Duration::Combat => text.push_str(" for the duration of combat"),
                Duration::Permanent => text.push_str(" permanently"),
                Duration::Action => text.push_str(" for a single action"),
                Duration::TurnRange { start, end } => {
                    text.push_str(&format!(" for {}-{} turns", start, end))
                }
                Duration::Turns(turns) => text.push_str(&format!(" for {} turns", turns)),
            }
        }

        if let Some(trigger) = &self.trigger {
            match trigger {
                Trigger::Kind(kind) => {
                    text.push(' ');
                    text.push_str(trigger_phrase(*kind));
                }
                Trigger::Chance(chance) => {
                    text.push_str(&format!(" with a {}% chance each turn", chance))
                }
                Trigger::Condition(condition) => text.push_str(&format!(" when {}", condition)),
            }
        }

        match self.elements.as_slice() {
            [] => {}
            [single] => text.push_str(&format!(" ({} element)", element_name(*single))),
            many => {
                let names: Vec<&str> = many.iter().map(|e| element_name(*e)).collect();
                text.push_str(&format!(" ({} elements)", names.join(", ")));
            }
        }

        if !self.special_flags.is_empty() {
            let flags: Vec<&str> = self.special_flags.iter().map(|f| flag_phrase(*f)).collect();
            text.push_str(&format!(". This effect {}", flags.join(", ")));
        }

        let extended = self.extended_phrases();
        if !extended.is_empty() {
            text.push_str(&format!(". The effect {}", extended.join(", ")));
        }

        text
    }

    fn extended_phrases(&self) -> Vec<String> {
        let mut phrases = Vec::new();

        if let Some(removability) = self.removability {
            phrases.push(removability_phrase(removability).to_string());
        }
        if let Some(chain) = self.chain_effect {
            let mut phrase = chain_phrase(chain).to_string();
            if let Some(nested) = &self.chain_target {
                phrase.push_str(&format!(" ({})", nested.to_text()));
            }
            phrases.push(phrase);
        }
        if let Some(source) = self.source_dependency {
            phrases.push(source_phrase(source).to_string());
        }
        if let Some(stacking) = &self.stacking {
            phrases.push(stacking_phrase(stacking));
        }
        if let Some(visibility) = self.visibility {
            phrases.push(visibility_phrase(visibility).to_string());
        }
        if let Some(link) = &self.resource {
            phrases.push(resource_phrase(link));
        }
        for condition in &self.conditions {
            phrases.push(format!("only works when {}", condition));
        }
        if let Some(tag) = self.interaction_tag {
            phrases.push(interaction_phrase(tag).to_string());
        }
        if let Some(meta) = self.meta_effect {
            phrases.push(meta_phrase(meta).to_string());
        }

        phrases
    }
}
