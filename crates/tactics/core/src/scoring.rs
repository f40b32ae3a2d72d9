//! Utility scoring for candidate actions.
//!
//! Scores are unbounded floats built additively through [`ScoreSheet`];
//! the only multiplicative factor is hit chance. Higher is better, and the
//! planner compares scores of different action kinds directly.

use rand::Rng;

use crate::boost::{ArchetypeProfile, BoostClassifier};
use crate::breakdown::{Breakdown, ScoreSheet};
use crate::profile::{BehaviorProfile, weights};
use crate::state::Combatant;
use crate::threat::ThreatInfo;

pub const MIN_HIT_CHANCE: f32 = 0.05;
pub const MAX_HIT_CHANCE: f32 = 0.95;

/// Value of removing a combatant from the fight, before `kill_potential`.
pub const KILL_VALUE: f32 = 10.0;
/// Maximum focus-fire bonus, reached against a target at zero HP.
pub const FOCUS_FIRE_VALUE: f32 = 10.0;
/// Bonus for a target whose role the profile prioritizes.
pub const ROLE_PRIORITY_VALUE: f32 = 5.0;

const HEALER_TAGS: &[&str] = &["healer", "support", "cleric"];
const DAMAGE_DEALER_TAGS: &[&str] = &["damage", "striker", "ranged", "berserker"];

/// Probability that an attack with `attack_bonus` hits `armor_class` on a d20.
pub fn hit_chance(attack_bonus: i32, armor_class: i32) -> f32 {
    let needed = armor_class - attack_bonus;
    ((21 - needed) as f32 / 20.0).clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE)
}

/// A score plus the explanation of how it was reached.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionScore {
    pub value: f32,
    pub breakdown: Breakdown,
}

impl From<ScoreSheet> for ActionScore {
    fn from(sheet: ScoreSheet) -> Self {
        let (value, breakdown) = sheet.finish();
        Self { value, breakdown }
    }
}

/// Scores attacks, positions and effects for one combatant's profile.
pub struct ActionScorer<'a> {
    profile: &'a BehaviorProfile,
    record: bool,
}

impl<'a> ActionScorer<'a> {
    pub fn new(profile: &'a BehaviorProfile) -> Self {
        Self {
            profile,
            record: true,
        }
    }

    /// Enables or disables breakdown recording. Totals are unaffected.
    pub fn with_breakdown(mut self, record: bool) -> Self {
        self.record = record;
        self
    }

    pub fn profile(&self) -> &BehaviorProfile {
        self.profile
    }

    /// Scores a basic attack from `attacker` on `target`.
    ///
    /// # Arguments
    ///
    /// * `attacker` - The combatant making the attack
    /// * `target` - The combatant being attacked
    /// * `target_threat` - How dangerous the target is to the attacker's side
    pub fn score_attack(&self, attacker: &Combatant, target: &Combatant, target_threat: f32) -> ActionScore {
        let mut sheet = ScoreSheet::new(self.record);
        if !target.is_available() {
            return sheet.into();
        }

        let p = self.profile;
        let expected = attacker.average_damage.max(0.0);
        let hit = hit_chance(attacker.attack_bonus, target.armor_class);

        sheet.add("damage", expected * hit * p.weight(weights::DAMAGE));

        if expected >= target.hp.current as f32 {
            sheet.add("kill", p.weight(weights::KILL_POTENTIAL) * KILL_VALUE);
        }

        if p.focus_fire {
            sheet.add("focus_fire", FOCUS_FIRE_VALUE * (1.0 - target.hp_fraction()));
        }

        if HEALER_TAGS.iter().any(|tag| target.has_tag(tag)) {
            sheet.add(
                "focus_healer",
                p.weight(weights::FOCUS_HEALERS) * ROLE_PRIORITY_VALUE,
            );
        }
        if DAMAGE_DEALER_TAGS.iter().any(|tag| target.has_tag(tag)) {
            sheet.add(
                "focus_damage_dealer",
                p.weight(weights::FOCUS_DAMAGE_DEALERS) * ROLE_PRIORITY_VALUE,
            );
        }

        if target_threat > 0.0 {
            sheet.add("threat", p.weight(weights::THREAT_PRIORITY) * target_threat);
        }

        let score: ActionScore = sheet.into();
        tracing::debug!(
            "attack {} -> {}: {:.2} [{}]",
            attacker.id,
            target.id,
            score.value,
            score.breakdown
        );
        score
    }

    /// Scores standing in a threat cell.
    pub fn score_position(&self, cell: &ThreatInfo) -> ActionScore {
        let mut sheet = ScoreSheet::new(self.record);
        sheet.add(
            "positioning",
            self.profile.weight(weights::POSITIONING) * cell.net_score,
        );
        sheet.add(
            "exposure",
            -self.profile.weight(weights::SELF_PRESERVATION) * cell.threat,
        );
        sheet.into()
    }

    /// Scores a status or effect from its boost descriptors.
    ///
    /// Descriptors that classify to nothing count as a neutral multiplier of 1.
    pub fn score_boosts(&self, descriptors: &str, archetype: &ArchetypeProfile) -> ActionScore {
        let total = BoostClassifier::new(archetype).total_or(descriptors, 1.0);
        let mut sheet = ScoreSheet::new(self.record);
        sheet.add("status", total * self.profile.weight(weights::STATUS_VALUE));
        sheet.into()
    }

    /// Applies profile randomness: `score * randomness * u`, `u` uniform in `[-1, 1]`.
    pub fn jitter<R: Rng + ?Sized>(&self, score: f32, rng: &mut R) -> f32 {
        let randomness = self.profile.randomness();
        if randomness <= 0.0 {
            return score;
        }
        let u: f32 = rng.gen_range(-1.0..=1.0);
        score + score * randomness * u
    }
}
