//! Boost descriptor classification.
//!
//! Status and effect descriptors arrive as semicolon-separated boost strings
//! such as `"AC(2);Advantage(AttackRoll);RollBonus(Damage,1d4)"`. The
//! classifier turns each recognized segment into a typed category plus a
//! multiplier taken from an [`ArchetypeProfile`], so scoring code can value
//! effects without understanding the boost language.
//!
//! Matching is a small ordered rule table (see `rules`), case-insensitive
//! throughout. Unrecognized segments are skipped silently; callers fall back
//! to a default multiplier.

mod archetype;
mod roll_bonus;
mod rules;

use std::fmt;

pub use archetype::{ArchetypeProfile, CheckKind, RollKind};
pub use roll_bonus::{FALLBACK_SCALE, bonus_scale};

/// Typed category of a recognized boost segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoostCategory {
    Ac,
    Ability,
    AbilityFailedSavingThrow,
    ActionResource,
    ActionResourceMultiplier,
    ActionResourceBlock,
    ActionResourceOverride,
    Movement,
    CriticalHitAlways,
    CriticalHitNever,
    WeaponDamage,
    DamageBonus,
    Resistance,
    DamageReduction,
    Initiative,
    SavingThrow,
    SpellResistance,
    Advantage(CheckKind),
    Disadvantage(CheckKind),
    RollBonus(RollKind),
    SightRange,
    TemporaryHp,
    StatusImmunity,
    ProficiencyBonus,
    Reroll,
}

impl fmt::Display for BoostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ac => f.write_str("AC"),
            Self::Ability => f.write_str("Ability"),
            Self::AbilityFailedSavingThrow => f.write_str("AbilityFailedSavingThrow"),
            Self::ActionResource => f.write_str("ActionResource"),
            Self::ActionResourceMultiplier => f.write_str("ActionResourceMultiplier"),
            Self::ActionResourceBlock => f.write_str("ActionResourceBlock"),
            Self::ActionResourceOverride => f.write_str("ActionResourceOverride"),
            Self::Movement => f.write_str("Movement"),
            Self::CriticalHitAlways => f.write_str("CriticalHit_Always"),
            Self::CriticalHitNever => f.write_str("CriticalHit_Never"),
            Self::WeaponDamage => f.write_str("WeaponDamage"),
            Self::DamageBonus => f.write_str("DamageBonus"),
            Self::Resistance => f.write_str("Resistance"),
            Self::DamageReduction => f.write_str("DamageReduction"),
            Self::Initiative => f.write_str("Initiative"),
            Self::SavingThrow => f.write_str("SavingThrow"),
            Self::SpellResistance => f.write_str("SpellResistance"),
            Self::Advantage(kind) => write!(f, "Advantage_{kind}"),
            Self::Disadvantage(kind) => write!(f, "Disadvantage_{kind}"),
            Self::RollBonus(kind) => write!(f, "RollBonus_{kind}"),
            Self::SightRange => f.write_str("SightRange"),
            Self::TemporaryHp => f.write_str("TemporaryHP"),
            Self::StatusImmunity => f.write_str("StatusImmunity"),
            Self::ProficiencyBonus => f.write_str("ProficiencyBonus"),
            Self::Reroll => f.write_str("Reroll"),
        }
    }
}

/// One recognized segment: its category, reported name, and value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassifiedBoost {
    pub category: BoostCategory,
    /// Category name as reported to callers. Roll bonuses keep the roll type
    /// exactly as written in the descriptor (`RollBonus_MeleeWeaponAttack`).
    pub name: String,
    pub multiplier: f32,
}

impl ClassifiedBoost {
    pub fn new(category: BoostCategory, multiplier: f32) -> Self {
        Self {
            name: category.to_string(),
            category,
            multiplier,
        }
    }
}

/// Classifies boost descriptors against one archetype profile.
#[derive(Clone, Copy, Debug)]
pub struct BoostClassifier<'a> {
    profile: &'a ArchetypeProfile,
}

impl<'a> BoostClassifier<'a> {
    pub fn new(profile: &'a ArchetypeProfile) -> Self {
        Self { profile }
    }

    /// One entry per recognized segment, in descriptor order.
    pub fn classify(&self, descriptors: &str) -> Vec<ClassifiedBoost> {
        descriptors
            .split(';')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .filter_map(|segment| self.classify_segment(segment))
            .collect()
    }

    /// Sum of all classified multipliers, or `default` if nothing classified.
    pub fn total_or(&self, descriptors: &str, default: f32) -> f32 {
        let boosts = self.classify(descriptors);
        if boosts.is_empty() {
            default
        } else {
            boosts.iter().map(|b| b.multiplier).sum()
        }
    }

    fn classify_segment(&self, segment: &str) -> Option<ClassifiedBoost> {
        let rule = rules::RULES.iter().find(|rule| rule.matches(segment))?;
        let boost = rule.apply(segment, self.profile);
        if boost.is_none() {
            tracing::trace!("boost segment '{}' matched {} but has no sub-kind", segment, rule.prefix);
        }
        boost
    }
}

/// Classifies `descriptors`; a missing descriptor or profile yields nothing.
pub fn classify(
    descriptors: Option<&str>,
    profile: Option<&ArchetypeProfile>,
) -> Vec<ClassifiedBoost> {
    match (descriptors, profile) {
        (Some(descriptors), Some(profile)) => BoostClassifier::new(profile).classify(descriptors),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(boosts: &[ClassifiedBoost]) -> Vec<&str> {
        boosts.iter().map(|b| b.name.as_str()).collect()
    }

    #[test]
    fn test_failed_saving_throw_is_not_generic_ability() {
        let profile = ArchetypeProfile::default();
        let boosts = BoostClassifier::new(&profile).classify("AbilityFailedSavingThrow(1)");
        assert_eq!(boosts.len(), 1);
        assert_eq!(boosts[0].category, BoostCategory::AbilityFailedSavingThrow);
        assert_eq!(boosts[0].multiplier, profile.ability_failed_saving_throw);
    }

    #[test]
    fn test_movement_resource_is_not_generic_action_resource() {
        let profile = ArchetypeProfile::default();
        let classifier = BoostClassifier::new(&profile);

        let boosts = classifier.classify("ActionResource(Movement,1)");
        assert_eq!(names(&boosts), vec!["Movement"]);
        assert_eq!(boosts[0].multiplier, profile.movement);

        let boosts = classifier.classify("ActionResource(SpellSlot,1,1)");
        assert_eq!(names(&boosts), vec!["ActionResource"]);

        let boosts = classifier.classify("ActionResourceMultiplier(Movement,2,0)");
        assert_eq!(names(&boosts), vec!["ActionResourceMultiplier"]);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let profile = ArchetypeProfile::default();
        let boosts = BoostClassifier::new(&profile).classify("ac(2); actionresource(movement,3)");
        assert_eq!(names(&boosts), vec!["AC", "Movement"]);
    }

    #[test]
    fn test_critical_hit_branches_on_never_and_always() {
        let profile = ArchetypeProfile::default();
        let classifier = BoostClassifier::new(&profile);
        let boosts = classifier.classify(
            "CriticalHit(AttackTarget,Success,Never);CriticalHit(AttackRoll,Success,Always);CriticalHit(AttackRoll)",
        );
        assert_eq!(names(&boosts), vec!["CriticalHit_Never", "CriticalHit_Always"]);
        assert_eq!(boosts[0].multiplier, profile.critical_hit_never);
        assert_eq!(boosts[1].multiplier, profile.critical_hit_always);
    }

    #[test]
    fn test_disadvantage_negates_advantage() {
        let profile = ArchetypeProfile::default();
        let classifier = BoostClassifier::new(&profile);

        let advantage = classifier.classify("Advantage(AttackRoll)");
        let disadvantage = classifier.classify("Disadvantage(AttackRoll)");
        assert_eq!(names(&disadvantage), vec!["Disadvantage_Attack"]);
        assert_eq!(disadvantage[0].multiplier, -advantage[0].multiplier);
    }

    #[test]
    fn test_advantage_sub_kinds() {
        let profile = ArchetypeProfile::default();
        let classifier = BoostClassifier::new(&profile);
        let boosts = classifier.classify(
            "Advantage(AllSavingThrows);Advantage(Skill,Stealth);Advantage(Ability,Strength);Advantage(Concentration)",
        );
        assert_eq!(
            names(&boosts),
            vec![
                "Advantage_SavingThrow",
                "Advantage_Skill",
                "Advantage_Ability"
            ]
        );
    }

    #[test]
    fn test_roll_bonus_scales_modifier() {
        let profile = ArchetypeProfile::default();
        let classifier = BoostClassifier::new(&profile);

        let attack = classifier.classify("RollBonus(Attack,1d4)");
        assert_eq!(attack[0].name, "RollBonus_Attack");
        assert_eq!(attack[0].multiplier, profile.roll_bonus_attack * 2.5);

        let damage = classifier.classify("RollBonus(Damage,-2)");
        assert_eq!(damage[0].multiplier, profile.roll_bonus_damage * 2.0);

        let skill = classifier.classify("RollBonus(Skill,abc)");
        assert_eq!(skill[0].multiplier, profile.roll_bonus_skill);

        let unknown = classifier.classify("RollBonus(meleeSpellAttack,2)");
        assert_eq!(unknown[0].name, "RollBonus_meleeSpellAttack");
        assert_eq!(unknown[0].multiplier, profile.roll_bonus_attack * 2.0);
    }

    #[test]
    fn test_unknown_segments_are_skipped() {
        let profile = ArchetypeProfile::default();
        let classifier = BoostClassifier::new(&profile);
        let boosts = classifier.classify("Foo(1); ;AC(1);UnlockSpell(Shout_Rage)");
        assert_eq!(names(&boosts), vec!["AC"]);
        assert_eq!(classifier.total_or("Foo(1)", 1.0), 1.0);
    }

    #[test]
    fn test_missing_input_yields_nothing() {
        let profile = ArchetypeProfile::default();
        assert!(classify(None, Some(&profile)).is_empty());
        assert!(classify(Some("AC(1)"), None).is_empty());
        assert!(classify(Some(""), Some(&profile)).is_empty());
        assert_eq!(classify(Some("AC(1)"), Some(&profile)).len(), 1);
    }
}
