//! Vocabulary enums for the effect record

// ============================================================================
// MANDATORY PREFIX
// ============================================================================

notation_codes! {
    /// Who the effect applies to.
    pub enum Target {
        Player => "P",
        Enemy => "E",
        AllAllies => "A",
        AllEnemies => "X",
        Global => "G",
    }
}

notation_codes! {
    /// How the affected stat changes.
    pub enum EffectType {
        Increase => "+",
        Decrease => "-",
        Set => "=",
        Multiply => "*",
        Nullify => "!",
        Special => "#",
    }
}

notation_codes! {
    /// Stats a status effect can modify.
    pub enum Stat {
        Strength => "S",
        Defense => "D",
        Element => "E",
        Luck => "L",
        Gold => "G",
        Health => "H",
        Movement => "M",
        Initiative => "I",
        Critical => "C",
        Resistance => "R",
    }
}

// ============================================================================
// CORE CLAUSES
// ============================================================================

notation_codes! {
    /// Duration markers. `Turns` is the only one that takes a count.
    pub enum DurationKind {
        Turns => "T",
        Combat => "C",
        Permanent => "P",
        Action => "A",
    }
}

notation_codes! {
    /// Event triggers, spelled as prefix + type except for `K`.
    pub enum TriggerKind {
        OnAttack => ">A",
        OnDefend => "<D",
        TurnStart => "^S",
        TurnEnd => "vE",
        OnKill => "K",
    }
}

impl TriggerKind {
    /// Whether the trigger is written with a prefix symbol.
    pub fn requires_prefix(&self) -> bool {
        !matches!(self, TriggerKind::OnKill)
    }
}

notation_codes! {
    /// Elemental affinities.
    pub enum Element {
        Fire => "F",
        Water => "W",
        Earth => "E",
        Sky => "S",
        Death => "D",
    }
}

// ============================================================================
// EXTENDED SECTIONS
// ============================================================================

notation_codes! {
    pub enum SpecialFlag {
        Stacking => "ST",
        AreaEffect => "AR",
        DamageOverTime => "DOT",
    }
}

notation_codes! {
    pub enum Removability {
        NonRemovable => "RN",
        EasilyRemoved => "RE",
        DifficultToRemove => "RD",
        CleanseSpecific => "RC",
    }
}

notation_codes! {
    /// What happens when the effect ends.
    pub enum ChainEffect {
        Heal => ">Heal",
        Explode => ">Expl",
        Spread => ">Sprd",
        Trigger => ">Trig",
    }
}

notation_codes! {
    pub enum SourceDependency {
        PlayerLinked => "~P",
        EnemyLinked => "~E",
        Independent => "~I",
    }
}

notation_codes! {
    pub enum StackingBehavior {
        /// Written `S<n>`.
        MaxStacks => "S",
        AddDuration => "S+",
        MultiplyEffect => "S*",
        UniqueStacking => "SU",
    }
}

impl StackingBehavior {
    /// Only the max-stacks form carries a count.
    pub fn takes_count(&self) -> bool {
        matches!(self, StackingBehavior::MaxStacks)
    }
}

notation_codes! {
    pub enum Visibility {
        Hidden => "VH",
        VisibleAll => "VV",
        VisiblePlayer => "VP",
    }
}

notation_codes! {
    /// Resource drained while the effect is active.
    pub enum Resource {
        Mana => "$MP",
        Health => "$HP",
        Gold => "$G",
    }
}

notation_codes! {
    pub enum InteractionTag {
        Exclusive => "IX",
        Additive => "IA",
        Multiplicative => "IM",
    }
}

notation_codes! {
    pub enum MetaEffect {
        Gobstopper => "#Gobstop",
        Phase => "#Phase",
        Echo => "#Echo",
        Flux => "#Flux",
    }
}

impl MetaEffect {
    /// Match a special-condition word against the meta effect names by
    /// prefix, so `#Gobstopper` and `#Gobstop3` both name the gobstopper.
    pub fn from_name_prefix(text: &str) -> Option<Self> {
        let name = text.trim_start_matches('#');
        Self::ALL
            .iter()
            .copied()
            .find(|meta| name.starts_with(meta.code().trim_start_matches('#')))
    }
}
