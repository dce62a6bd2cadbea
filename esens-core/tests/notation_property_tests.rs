//! Property-Based Tests for ESENS Notation
//!
//! Properties:
//! - Structured form → record is lossless
//! - Canonical notation → parse reproduces the record
//! - validate is deterministic
//! - Inputs without the mandatory prefix fail at the prefix
//! - Every supported character tokenizes on its own
//! - Errors point at the first bad position

use esens_core::*;
use proptest::prelude::*;
use proptest::sample::select;

// ============================================================================
// ARBITRATORS (Generate Random Records)
// ============================================================================

fn arb_subject() -> impl Strategy<Value = Subject> {
    prop_oneof![
        select(Stat::ALL).prop_map(Subject::Stat),
        "[A-Z][a-z]{2,6}".prop_map(Subject::Condition),
        "#[A-Z][a-z]{1,5}".prop_map(Subject::Condition),
    ]
}

fn arb_magnitude() -> impl Strategy<Value = Magnitude> {
    prop_oneof![
        (0u32..1000).prop_map(Magnitude::flat),
        (0u32..1000).prop_map(Magnitude::percent),
        Just(Magnitude::full()),
    ]
}

fn arb_duration() -> impl Strategy<Value = Duration> {
    prop_oneof![
        (1u32..20).prop_map(Duration::Turns),
        (0u32..10, 0u32..10).prop_map(|(a, b)| Duration::TurnRange {
            start: a.min(b),
            end: a.max(b),
        }),
        Just(Duration::Combat),
        Just(Duration::Permanent),
        Just(Duration::Action),
    ]
}

fn arb_operator() -> impl Strategy<Value = &'static str> {
    select(&["<=", ">=", "!=", "==", "<", ">", "="][..])
}

fn arb_condition() -> impl Strategy<Value = Condition> {
    let attribute = "[A-Z][A-Za-z]{0,4}";
    prop_oneof![
        attribute.prop_map(Condition::flag),
        (attribute, arb_operator(), 0u32..200, any::<bool>()).prop_map(|(a, op, v, pct)| {
            Condition::compare(a, op, ConditionValue::Number(v), pct)
        }),
        (attribute, arb_operator(), "[A-Z][a-z]{1,5}").prop_map(|(a, op, v)| {
            Condition::compare(a, op, ConditionValue::Text(v), false)
        }),
        (attribute, arb_operator(), any::<bool>()).prop_map(|(a, op, v)| {
            Condition::compare(a, op, ConditionValue::Bool(v), false)
        }),
    ]
}

fn arb_trigger() -> impl Strategy<Value = Trigger> {
    prop_oneof![
        select(TriggerKind::ALL).prop_map(Trigger::Kind),
        (0u32..=100).prop_map(Trigger::Chance),
        arb_condition().prop_map(Trigger::Condition),
    ]
}

fn arb_stacking() -> impl Strategy<Value = Stacking> {
    prop_oneof![
        (1u32..10).prop_map(|count| Stacking {
            behavior: StackingBehavior::MaxStacks,
            value: Some(count),
        }),
        select(
            &[
                StackingBehavior::AddDuration,
                StackingBehavior::MultiplyEffect,
                StackingBehavior::UniqueStacking,
            ][..]
        )
        .prop_map(|behavior| Stacking {
            behavior,
            value: None,
        }),
    ]
}

fn arb_resource() -> impl Strategy<Value = ResourceLink> {
    (select(Resource::ALL), prop::option::of(0u32..100))
        .prop_map(|(resource, amount)| ResourceLink { resource, amount })
}

type CoreParts = (
    Target,
    EffectType,
    Subject,
    Option<Magnitude>,
    Option<Duration>,
    Option<Trigger>,
    Vec<Element>,
);

fn arb_core() -> impl Strategy<Value = CoreParts> {
    (
        select(Target::ALL),
        select(EffectType::ALL),
        arb_subject(),
        prop::option::of(arb_magnitude()),
        prop::option::of(arb_duration()),
        prop::option::of(arb_trigger()),
        prop::collection::vec(select(Element::ALL), 0..3),
    )
}

type ExtendedParts = (
    Vec<SpecialFlag>,
    Option<Removability>,
    Option<ChainEffect>,
    Option<SourceDependency>,
    Option<Stacking>,
    Option<Visibility>,
    Option<ResourceLink>,
    Vec<Condition>,
    Option<InteractionTag>,
    Option<MetaEffect>,
);

fn arb_extended() -> impl Strategy<Value = ExtendedParts> {
    (
        prop::collection::vec(select(SpecialFlag::ALL), 0..3),
        prop::option::of(select(Removability::ALL)),
        prop::option::of(select(ChainEffect::ALL)),
        prop::option::of(select(SourceDependency::ALL)),
        prop::option::of(arb_stacking()),
        prop::option::of(select(Visibility::ALL)),
        prop::option::of(arb_resource()),
        prop::collection::vec(arb_condition(), 0..3),
        prop::option::of(select(InteractionTag::ALL)),
        prop::option::of(select(MetaEffect::ALL)),
    )
}

fn assemble(core: CoreParts, extended: ExtendedParts) -> EffectRecord {
    let (target, effect_type, subject, magnitude, duration, trigger, elements) = core;
    let (
        special_flags,
        removability,
        chain_effect,
        source_dependency,
        stacking,
        visibility,
        resource,
        conditions,
        interaction_tag,
        meta_effect,
    ) = extended;

    let mut record = EffectRecord::new(target, effect_type, subject);
    record.magnitude = magnitude;
    record.duration = duration;
    record.trigger = trigger;
    record.elements = elements;
    record.special_flags = special_flags;
    record.removability = removability;
    record.chain_effect = chain_effect;
    record.source_dependency = source_dependency;
    record.stacking = stacking;
    record.visibility = visibility;
    record.resource = resource;
    record.conditions = conditions;
    record.interaction_tag = interaction_tag;
    record.meta_effect = meta_effect;
    record
}

/// `F` straight after the subject always reads as full value, so a record
/// whose first clause is the fire element has no notation.
fn fire_follows_subject(record: &EffectRecord) -> bool {
    record.magnitude.is_none()
        && record.duration.is_none()
        && record.trigger.is_none()
        && record.elements.first() == Some(&Element::Fire)
}

fn arb_leaf_record() -> impl Strategy<Value = EffectRecord> {
    (arb_core(), arb_extended())
        .prop_map(|(core, extended)| assemble(core, extended))
        .prop_filter("fire element directly after the subject", |record| {
            !fire_follows_subject(record)
        })
}

fn arb_record() -> impl Strategy<Value = EffectRecord> {
    (arb_leaf_record(), prop::option::of(arb_leaf_record())).prop_map(|(mut record, nested)| {
        if record.chain_effect.is_some() {
            record.chain_target = nested.map(Box::new);
        }
        record
    })
}

/// Characters that tokenize without context.
const ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+-=*!#%?.,{}()<>^_";

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property 1: the structured form rebuilds an equal record
    #[test]
    fn prop_structured_round_trip(record in arb_record()) {
        let rebuilt = EffectRecord::from_structured(record.to_structured());
        prop_assert_eq!(rebuilt.ok(), Some(record));
    }

    /// Property 2: canonical notation parses back to the same record
    #[test]
    fn prop_notation_round_trip(record in arb_record()) {
        let notation = record.to_notation();
        match parse_record(&notation) {
            Ok(parsed) => prop_assert_eq!(parsed, record, "notation: {}", notation),
            Err(err) => prop_assert!(false, "{} failed:\n{}", notation, err.diagnostic()),
        }
    }

    /// Property 3: validate gives the same answer every time
    #[test]
    fn prop_validate_is_idempotent(input in "[ -~]{0,24}") {
        prop_assert_eq!(validate(&input), validate(&input));
    }

    /// Property 4: without a leading target the failure is at offset 0
    #[test]
    fn prop_missing_target_fails_at_start(
        head in "[BCDFHIJKLMNOQRSTUVWYZa-z0-9+\\-=*!#%?.,{}()<>^_]",
        tail in "[A-Za-z0-9+\\-=*!#%?.,{}()<>^_]{0,12}",
    ) {
        let input = format!("{}{}", head, tail);
        let err = validate(&input);
        prop_assert!(matches!(&err, Err(e) if e.is_validation() && e.offset == Some(0)), "{}: {:?}", input, err);
    }

    /// Property 4b: a target without an effect marker fails at offset 1
    #[test]
    fn prop_missing_effect_fails_after_target(
        target in "[PEAXG]",
        tail in "[A-Za-z0-9.,{}()%?]{0,8}",
    ) {
        let input = format!("{}{}", target, tail);
        let err = validate(&input);
        prop_assert!(matches!(&err, Err(e) if e.is_validation() && e.offset == Some(1)), "{}: {:?}", input, err);
    }

    /// Property 5: every supported character is exactly one token in isolation
    #[test]
    fn prop_single_character_is_one_token(c in select(ALPHABET.chars().collect::<Vec<_>>())) {
        let source = c.to_string();
        let tokens = tokenize(&source);
        prop_assert!(matches!(&tokens, Ok(t) if t.len() == 1 && t[0].text == source), "{:?}", tokens);
    }

    /// Property 6: a bad character after a valid notation is reported at its offset
    #[test]
    fn prop_error_points_at_first_bad_character(record in arb_record()) {
        let notation = record.to_notation();

        let bad_char = format!("{}@", notation);
        let err = validate(&bad_char);
        prop_assert!(
            matches!(&err, Err(e) if e.is_tokenization() && e.offset == Some(notation.len())),
            "{}: {:?}", bad_char, err
        );

        let stray_word = format!("{} z", notation);
        let err = validate(&stray_word);
        prop_assert!(
            matches!(&err, Err(e) if e.is_validation() && e.offset == Some(notation.len() + 1)),
            "{}: {:?}", stray_word, err
        );
    }
}
