//! Per-combatant reaction thresholds.

use std::collections::BTreeMap;

use super::{ReactionPolicy, TriggerKind};
use crate::config::ReactionTuning;
use crate::profile::{AiArchetype, AiDifficulty, BehaviorProfile};
use crate::state::CombatantId;

/// Minimum-score multiplier for profiles that hesitate to react.
const EASY_THRESHOLD_SCALE: f32 = 1.5;
/// Minimum-score multiplier for profiles that react eagerly.
const NIGHTMARE_THRESHOLD_SCALE: f32 = 0.5;
/// Extra weight supportive profiles put on ally triggers.
const ALLY_TRIGGER_WEIGHT: f32 = 1.5;

/// Reaction thresholds and policies for one combatant.
///
/// Derived once from the combatant's [`BehaviorProfile`] and cached by the
/// encounter session. Callers may replace it wholesale.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReactionConfig {
    /// Evaluated reactions fire only at or above this score.
    pub min_score: f32,
    /// Opportunity attacks fire on any positive score.
    pub always_react_to_opportunity: bool,
    /// Abilities the reaction is being saved for. Empty means unreserved.
    pub reserved_for: Vec<String>,
    /// Trigger sources that never provoke an opportunity attack.
    pub ignore: Vec<CombatantId>,
    /// Look for a qualifying defensive reaction before the best overall.
    pub prefer_defensive: bool,
    /// Score multipliers per trigger; absent triggers use 1.0.
    pub trigger_weights: BTreeMap<TriggerKind, f32>,
    /// Policy per reaction id; absent ids are evaluated.
    pub policies: BTreeMap<String, ReactionPolicy>,
}

impl Default for ReactionConfig {
    fn default() -> Self {
        Self {
            min_score: ReactionTuning::default().default_min_score,
            always_react_to_opportunity: false,
            reserved_for: Vec::new(),
            ignore: Vec::new(),
            prefer_defensive: false,
            trigger_weights: BTreeMap::new(),
            policies: BTreeMap::new(),
        }
    }
}

impl ReactionConfig {
    /// Derives thresholds from a profile's archetype and difficulty.
    pub fn from_profile(profile: &BehaviorProfile, tuning: &ReactionTuning) -> Self {
        let mut config = Self {
            min_score: tuning.default_min_score,
            ..Self::default()
        };

        match profile.archetype {
            AiArchetype::Aggressive | AiArchetype::Berserker => {
                config.always_react_to_opportunity = true;
            }
            AiArchetype::Defensive => {
                config.prefer_defensive = true;
            }
            AiArchetype::Support => {
                config.prefer_defensive = true;
                config
                    .trigger_weights
                    .insert(TriggerKind::AllyTakesDamage, ALLY_TRIGGER_WEIGHT);
                config
                    .trigger_weights
                    .insert(TriggerKind::AllyDowned, ALLY_TRIGGER_WEIGHT);
            }
            AiArchetype::Controller | AiArchetype::Tactical => {}
        }

        match profile.difficulty {
            AiDifficulty::Easy => config.min_score *= EASY_THRESHOLD_SCALE,
            AiDifficulty::Nightmare => config.min_score *= NIGHTMARE_THRESHOLD_SCALE,
            AiDifficulty::Normal | AiDifficulty::Hard => {}
        }

        config
    }

    pub fn trigger_weight(&self, trigger: TriggerKind) -> f32 {
        self.trigger_weights.get(&trigger).copied().unwrap_or(1.0)
    }

    pub fn policy_for(&self, reaction_id: &str) -> ReactionPolicy {
        self.policies.get(reaction_id).copied().unwrap_or_default()
    }

    pub fn is_ignored(&self, id: &CombatantId) -> bool {
        self.ignore.contains(id)
    }

    pub fn is_reserved(&self) -> bool {
        !self.reserved_for.is_empty()
    }

    /// True when a reservation exists and the triggering `ability` is not on
    /// it. Triggers without an ability never break a reservation.
    pub fn breaks_reservation(&self, ability: Option<&str>) -> bool {
        match ability {
            Some(ability) if self.is_reserved() => !self
                .reserved_for
                .iter()
                .any(|id| id.eq_ignore_ascii_case(ability.trim())),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileFactory;

    #[test]
    fn test_archetype_shapes_config() {
        let tuning = ReactionTuning::default();
        let berserker = ProfileFactory::create_for_archetype(AiArchetype::Berserker, AiDifficulty::Normal);
        let support = ProfileFactory::create_for_archetype(AiArchetype::Support, AiDifficulty::Normal);

        let aggressive = ReactionConfig::from_profile(&berserker, &tuning);
        assert!(aggressive.always_react_to_opportunity);
        assert!(!aggressive.prefer_defensive);
        assert_eq!(aggressive.min_score, tuning.default_min_score);

        let careful = ReactionConfig::from_profile(&support, &tuning);
        assert!(careful.prefer_defensive);
        assert_eq!(careful.trigger_weight(TriggerKind::AllyDowned), ALLY_TRIGGER_WEIGHT);
        assert_eq!(careful.trigger_weight(TriggerKind::YouAreHit), 1.0);
    }

    #[test]
    fn test_difficulty_moves_threshold() {
        let tuning = ReactionTuning::default();
        let easy = ProfileFactory::create_for_archetype(AiArchetype::Tactical, AiDifficulty::Easy);
        let nightmare =
            ProfileFactory::create_for_archetype(AiArchetype::Tactical, AiDifficulty::Nightmare);
        assert!(
            ReactionConfig::from_profile(&easy, &tuning).min_score
                > ReactionConfig::from_profile(&nightmare, &tuning).min_score
        );
    }

    #[test]
    fn test_reservation_checks() {
        let mut config = ReactionConfig::default();
        assert!(!config.is_reserved());
        assert!(!config.breaks_reservation(Some("fireball")));
        config.reserved_for.push("Counterspell".into());
        assert!(config.is_reserved());
        assert!(config.breaks_reservation(Some("fireball")));
        assert!(!config.breaks_reservation(Some("counterspell")));
        assert!(!config.breaks_reservation(None));
        assert_eq!(config.policy_for("shield"), ReactionPolicy::Evaluate);
    }
}
