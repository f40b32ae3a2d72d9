//! Ordered matching rules for boost descriptor segments.
//!
//! Rules are tried top to bottom and the first matching prefix wins. Several
//! prefixes share a stem, so a rule must sit above every rule whose prefix is
//! a prefix of its own. Each ordering constraint is noted on the rule that
//! needs it.

use super::archetype::{ArchetypeProfile, CheckKind};
use super::roll_bonus;
use super::{BoostCategory, ClassifiedBoost};

pub(crate) enum RuleAction {
    /// Emit `category` valued by the given profile field.
    Fixed(BoostCategory, fn(&ArchetypeProfile) -> f32),
    /// Inspect the segment further; may decline to emit anything.
    Custom(fn(&str, &ArchetypeProfile) -> Option<ClassifiedBoost>),
}

pub(crate) struct BoostRule {
    /// Case-insensitive segment prefix.
    pub prefix: &'static str,
    pub action: RuleAction,
}

impl BoostRule {
    pub fn matches(&self, segment: &str) -> bool {
        segment
            .get(..self.prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(self.prefix))
    }

    pub fn apply(&self, segment: &str, profile: &ArchetypeProfile) -> Option<ClassifiedBoost> {
        match self.action {
            RuleAction::Fixed(category, value) => Some(ClassifiedBoost::new(category, value(profile))),
            RuleAction::Custom(handler) => handler(segment, profile),
        }
    }
}

const fn fixed(
    prefix: &'static str,
    category: BoostCategory,
    value: fn(&ArchetypeProfile) -> f32,
) -> BoostRule {
    BoostRule {
        prefix,
        action: RuleAction::Fixed(category, value),
    }
}

const fn custom(
    prefix: &'static str,
    handler: fn(&str, &ArchetypeProfile) -> Option<ClassifiedBoost>,
) -> BoostRule {
    BoostRule {
        prefix,
        action: RuleAction::Custom(handler),
    }
}

pub(crate) const RULES: &[BoostRule] = &[
    // Must precede "Ability(": shares the "Ability" stem.
    fixed(
        "AbilityFailedSavingThrow(",
        BoostCategory::AbilityFailedSavingThrow,
        |p| p.ability_failed_saving_throw,
    ),
    fixed("Ability(", BoostCategory::Ability, |p| p.ability),
    // The three specialised ActionResource forms and the Movement resource
    // must all precede the generic "ActionResource(" rule.
    fixed(
        "ActionResourceMultiplier(",
        BoostCategory::ActionResourceMultiplier,
        |p| p.action_resource_multiplier,
    ),
    fixed(
        "ActionResourceBlock(",
        BoostCategory::ActionResourceBlock,
        |p| p.action_resource_block,
    ),
    fixed(
        "ActionResourceOverride(",
        BoostCategory::ActionResourceOverride,
        |p| p.action_resource_override,
    ),
    fixed("ActionResource(Movement", BoostCategory::Movement, |p| p.movement),
    fixed("ActionResource(", BoostCategory::ActionResource, |p| p.action_resource),
    fixed("AC(", BoostCategory::Ac, |p| p.ac),
    custom("CriticalHit(", classify_critical_hit),
    fixed("WeaponDamage(", BoostCategory::WeaponDamage, |p| p.weapon_damage),
    fixed("DamageBonus(", BoostCategory::DamageBonus, |p| p.damage_bonus),
    fixed("Resistance(", BoostCategory::Resistance, |p| p.resistance),
    fixed("DamageReduction(", BoostCategory::DamageReduction, |p| p.damage_reduction),
    fixed("Initiative(", BoostCategory::Initiative, |p| p.initiative),
    fixed("SavingThrow(", BoostCategory::SavingThrow, |p| p.saving_throw),
    fixed("SpellResistance(", BoostCategory::SpellResistance, |p| p.spell_resistance),
    // Kept above "Advantage(" so a future substring matcher cannot let the
    // advantage rule swallow disadvantage segments.
    custom("Disadvantage(", classify_disadvantage),
    custom("Advantage(", classify_advantage),
    custom("RollBonus(", roll_bonus::classify),
    fixed("SightRangeAdditive(", BoostCategory::SightRange, |p| p.sight_range),
    fixed("TemporaryHP(", BoostCategory::TemporaryHp, |p| p.temporary_hp),
    fixed("StatusImmunity(", BoostCategory::StatusImmunity, |p| p.status_immunity),
    fixed("ProficiencyBonus(", BoostCategory::ProficiencyBonus, |p| p.proficiency_bonus),
    fixed("Reroll(", BoostCategory::Reroll, |p| p.reroll),
];

fn classify_critical_hit(segment: &str, profile: &ArchetypeProfile) -> Option<ClassifiedBoost> {
    let lower = segment.to_ascii_lowercase();
    if lower.contains("never") {
        Some(ClassifiedBoost::new(
            BoostCategory::CriticalHitNever,
            profile.critical_hit_never,
        ))
    } else if lower.contains("always") {
        Some(ClassifiedBoost::new(
            BoostCategory::CriticalHitAlways,
            profile.critical_hit_always,
        ))
    } else {
        None
    }
}

/// Sub-kind named inside an advantage/disadvantage argument list.
///
/// Saving throws are tested first: `AllSavingThrows` and `SavingThrow`
/// arguments often carry an ability name as well.
fn check_kind(segment: &str) -> Option<CheckKind> {
    let args = segment
        .find('(')
        .map_or("", |open| &segment[open + 1..])
        .to_ascii_lowercase();

    if args.contains("savingthrow") {
        Some(CheckKind::SavingThrow)
    } else if args.contains("attack") {
        Some(CheckKind::Attack)
    } else if args.contains("skill") {
        Some(CheckKind::Skill)
    } else if args.contains("ability") {
        Some(CheckKind::Ability)
    } else {
        None
    }
}

fn classify_advantage(segment: &str, profile: &ArchetypeProfile) -> Option<ClassifiedBoost> {
    let kind = check_kind(segment)?;
    Some(ClassifiedBoost::new(
        BoostCategory::Advantage(kind),
        profile.advantage(kind),
    ))
}

/// Disadvantage is the sign-inverse of the matching advantage magnitude.
fn classify_disadvantage(segment: &str, profile: &ArchetypeProfile) -> Option<ClassifiedBoost> {
    let kind = check_kind(segment)?;
    Some(ClassifiedBoost::new(
        BoostCategory::Disadvantage(kind),
        -profile.advantage(kind),
    ))
}

