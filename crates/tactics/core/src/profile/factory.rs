//! Profile construction from archetype templates and rule settings.

use std::collections::{BTreeMap, BTreeSet};

use super::weights::{
    DAMAGE, FOCUS_HEALERS, HEALING, KILL_POTENTIAL, POSITIONING, RESOURCE_EFFICIENCY,
    SELF_PRESERVATION, STATUS_VALUE, THREAT_PRIORITY,
};
use super::{AiArchetype, AiDifficulty, BehaviorProfile};
use crate::boost::ArchetypeProfile;
use crate::state::Combatant;

/// Flat named settings resolved from an external rule set.
pub type RuleSettings = BTreeMap<String, f32>;

// ============================================================================
// Rule setting names
// ============================================================================

const DAMAGE_ENEMY: &str = "multiplier_damage_enemy_pos";
const DAMAGE_SELF: &str = "multiplier_damage_self_neg";
const DAMAGE_ALLY: &str = "multiplier_damage_ally_neg";
const HEAL_SELF: &str = "multiplier_heal_self_pos";
const HEAL_ALLY: &str = "multiplier_heal_ally_pos";
const KILL_ENEMY: &str = "multiplier_kill_enemy";
const CONTROL_ENEMY: &str = "multiplier_control_enemy_pos";
const BOOST_ALLY: &str = "multiplier_boost_ally_pos";
const HEIGHT_DIFFERENCE: &str = "multiplier_height_difference";
const FLANKING: &str = "multiplier_flanking";
const ENEMY_DENSITY: &str = "multiplier_nearby_enemy_density";
const RESOURCE_COST: &str = "multiplier_resource_cost";
const TARGET_THREAT: &str = "multiplier_target_threat";
const TARGET_HEALER: &str = "multiplier_target_healer";
const TARGET_LOW_HP: &str = "multiplier_target_low_hp";
const HIT_CHANCE_STUPIDITY: &str = "hit_chance_stupidity";

const HEIGHT_COEFFICIENT: f32 = 0.5;
const FLANKING_COEFFICIENT: f32 = 0.3;
const DENSITY_COEFFICIENT: f32 = 0.2;
const POSITIONING_MAX: f32 = 3.0;

/// `multiplier_damage_ally_neg` above this enables friendly-fire avoidance.
const FRIENDLY_FIRE_THRESHOLD: f32 = 0.5;
/// `multiplier_target_low_hp` above this enables focus fire.
const FOCUS_FIRE_THRESHOLD: f32 = 0.5;

const RANDOMNESS_BASE: f32 = 0.05;
const RANDOMNESS_SLOPE: f32 = 0.45;
const RANDOMNESS_MIN: f32 = 0.02;
const RANDOMNESS_MAX: f32 = 0.6;

/// Tag → archetype table, checked top to bottom.
const ARCHETYPE_TAGS: &[(&[&str], AiArchetype)] = &[
    (&["barbarian", "berserker"], AiArchetype::Berserker),
    (&["fighter", "paladin", "martial", "melee"], AiArchetype::Aggressive),
    (
        &["wizard", "sorcerer", "warlock", "caster", "controller", "debuffer"],
        AiArchetype::Controller,
    ),
    (&["cleric", "druid", "bard", "healer", "support"], AiArchetype::Support),
    (&["ranger", "rogue", "ranged", "skirmisher"], AiArchetype::Tactical),
];

/// Builds [`BehaviorProfile`]s.
pub struct ProfileFactory;

impl ProfileFactory {
    /// Default table, then archetype overrides, then difficulty overrides.
    pub fn create_for_archetype(archetype: AiArchetype, difficulty: AiDifficulty) -> BehaviorProfile {
        let mut profile = BehaviorProfile::new(
            format!("{archetype}_{difficulty}"),
            format!("{archetype} ({difficulty})"),
            archetype,
            difficulty,
        );
        Self::apply_archetype(&mut profile, archetype);
        Self::apply_difficulty(&mut profile, difficulty);
        profile
    }

    /// Archetype from a combatant's class and role tags.
    pub fn determine_archetype_for_combatant(combatant: &Combatant) -> AiArchetype {
        Self::determine_archetype(&combatant.tags)
    }

    /// First table row with a tag match wins; no match means Aggressive.
    pub fn determine_archetype<S: AsRef<str>>(tags: &[S]) -> AiArchetype {
        ARCHETYPE_TAGS
            .iter()
            .find(|(names, _)| {
                tags.iter()
                    .any(|tag| names.iter().any(|n| tag.as_ref().trim().eq_ignore_ascii_case(n)))
            })
            .map(|(_, archetype)| *archetype)
            .unwrap_or(AiArchetype::Aggressive)
    }

    /// Archetype template for a combatant at the given difficulty.
    pub fn for_combatant(combatant: &Combatant, difficulty: AiDifficulty) -> BehaviorProfile {
        let archetype = Self::determine_archetype_for_combatant(combatant);
        Self::create_for_archetype(archetype, difficulty)
    }

    /// Archetype template refined by rule settings.
    ///
    /// Every mapping reads the value already on the profile and overrides it
    /// only from settings that are present, so absent settings keep the
    /// archetype/difficulty value. Settings that feed neither the weights nor
    /// [`ArchetypeProfile`] are kept under `settings.<key>` for debugging.
    pub fn from_settings(
        archetype: AiArchetype,
        difficulty: AiDifficulty,
        settings: &RuleSettings,
    ) -> BehaviorProfile {
        let mut profile = Self::create_for_archetype(archetype, difficulty);
        let mut reader = SettingsReader::new(settings);

        if let Some(value) = reader.take(DAMAGE_ENEMY) {
            profile.set_weight(DAMAGE, value);
        }
        if let Some(value) = reader.take(DAMAGE_SELF) {
            profile.set_weight(SELF_PRESERVATION, value);
        }
        if let Some(value) = reader.take(KILL_ENEMY) {
            profile.set_weight(KILL_POTENTIAL, value);
        }

        let heal_self = reader.take(HEAL_SELF);
        let heal_ally = reader.take(HEAL_ALLY);
        if heal_self.is_some() || heal_ally.is_some() {
            let current = profile.weight(HEALING);
            let average = (heal_self.unwrap_or(current) + heal_ally.unwrap_or(current)) / 2.0;
            profile.set_weight(HEALING, average.max(0.0));
        }

        let control = reader.take(CONTROL_ENEMY);
        let boost = reader.take(BOOST_ALLY);
        if control.is_some() || boost.is_some() {
            let current = profile.weight(STATUS_VALUE);
            let average = (control.unwrap_or(current) + boost.unwrap_or(current)) / 2.0;
            profile.set_weight(STATUS_VALUE, average.max(0.0));
        }

        let positioning_terms = [
            (reader.take(HEIGHT_DIFFERENCE), HEIGHT_COEFFICIENT),
            (reader.take(FLANKING), FLANKING_COEFFICIENT),
            (reader.take(ENEMY_DENSITY), DENSITY_COEFFICIENT),
        ];
        if positioning_terms.iter().any(|(value, _)| value.is_some()) {
            let accumulated = positioning_terms
                .iter()
                .filter_map(|(value, coefficient)| value.map(|v| v * coefficient))
                .fold(profile.weight(POSITIONING), |acc, term| acc + term);
            profile.set_weight(POSITIONING, accumulated.clamp(0.0, POSITIONING_MAX));
        }

        if let Some(value) = reader.take(RESOURCE_COST) {
            profile.set_weight(RESOURCE_EFFICIENCY, value);
        }
        if let Some(value) = reader.take(TARGET_THREAT) {
            profile.set_weight(THREAT_PRIORITY, value);
        }
        if let Some(value) = reader.take(TARGET_HEALER) {
            profile.set_weight(FOCUS_HEALERS, value);
        }
        if let Some(value) = reader.take(DAMAGE_ALLY) {
            profile.avoid_friendly_fire = value > FRIENDLY_FIRE_THRESHOLD;
        }
        if let Some(value) = reader.take(TARGET_LOW_HP) {
            profile.focus_fire = value > FOCUS_FIRE_THRESHOLD;
        }
        if let Some(value) = reader.take(HIT_CHANCE_STUPIDITY) {
            let randomness =
                (RANDOMNESS_BASE + RANDOMNESS_SLOPE * value).clamp(RANDOMNESS_MIN, RANDOMNESS_MAX);
            profile.set_randomness(randomness);
        }

        for (key, value) in reader.leftovers() {
            if !ArchetypeProfile::is_known_setting(key) {
                profile.record_unresolved(key, value);
            }
        }

        tracing::debug!(
            "profile {} from {} settings ({} unresolved)",
            profile.id,
            settings.len(),
            profile.unresolved_settings().len()
        );
        profile
    }

    fn apply_archetype(profile: &mut BehaviorProfile, archetype: AiArchetype) {
        match archetype {
            AiArchetype::Aggressive => {
                profile.set_weight(DAMAGE, 1.5);
                profile.set_weight(KILL_POTENTIAL, 2.0);
                profile.set_weight(SELF_PRESERVATION, 0.5);
            }
            AiArchetype::Defensive => {
                profile.set_weight(SELF_PRESERVATION, 2.0);
                profile.set_weight(POSITIONING, 1.2);
                profile.set_weight(DAMAGE, 0.7);
                profile.defensive_threshold = 0.2;
            }
            AiArchetype::Support => {
                profile.set_weight(HEALING, 2.0);
                profile.set_weight(STATUS_VALUE, 1.5);
                profile.set_weight(DAMAGE, 0.6);
                profile.avoid_friendly_fire = true;
            }
            AiArchetype::Controller => {
                profile.set_weight(STATUS_VALUE, 2.0);
            }
            AiArchetype::Tactical => {
                profile.set_weight(POSITIONING, 1.0);
                profile.set_weight(THREAT_PRIORITY, 1.3);
            }
            AiArchetype::Berserker => {
                profile.set_weight(DAMAGE, 2.5);
                profile.set_weight(SELF_PRESERVATION, 0.1);
                profile.set_weight(POSITIONING, 0.1);
            }
        }
    }

    fn apply_difficulty(profile: &mut BehaviorProfile, difficulty: AiDifficulty) {
        match difficulty {
            AiDifficulty::Easy => {
                profile.set_randomness(0.3);
                profile.focus_fire = false;
                profile.decision_budget_ms = 250;
            }
            AiDifficulty::Normal => {}
            AiDifficulty::Hard => {
                profile.set_randomness(0.05);
                profile.focus_fire = true;
                profile.decision_budget_ms = 1500;
            }
            AiDifficulty::Nightmare => {
                profile.set_randomness(0.0);
                profile.focus_fire = true;
                profile.scale_weight(KILL_POTENTIAL, 1.5);
                profile.decision_budget_ms = 2000;
            }
        }
    }
}

/// Case-insensitive view over settings that remembers which keys were read.
struct SettingsReader<'a> {
    settings: &'a RuleSettings,
    normalized: BTreeMap<String, &'a String>,
    taken: BTreeSet<String>,
}

impl<'a> SettingsReader<'a> {
    fn new(settings: &'a RuleSettings) -> Self {
        let normalized = settings
            .keys()
            .map(|key| (key.trim().to_ascii_lowercase(), key))
            .collect();
        Self {
            settings,
            normalized,
            taken: BTreeSet::new(),
        }
    }

    fn take(&mut self, name: &str) -> Option<f32> {
        let key = *self.normalized.get(name)?;
        let value = *self.settings.get(key)?;
        self.taken.insert(key.clone());
        value.is_finite().then_some(value)
    }

    fn leftovers(&self) -> impl Iterator<Item = (&'a str, f32)> + '_ {
        self.settings
            .iter()
            .filter(|(key, _)| !self.taken.contains(*key))
            .map(|(key, value)| (key.as_str(), *value))
    }
}
