//! Behavior profiles: named scoring weights plus behavioral flags.
//!
//! A [`BehaviorProfile`] is created once per combatant (or once per
//! archetype template and shared by reference) at encounter setup. Weights
//! change only through the explicit adjustment methods below.
//!
//! Profiles come from [`ProfileFactory`], either from an archetype and
//! difficulty pair or from flat rule settings.

mod factory;
mod kinds;
pub mod weights;

use std::collections::BTreeMap;

pub use factory::{ProfileFactory, RuleSettings};
pub use kinds::{AiArchetype, AiDifficulty};

/// Scoring weights and flags driving one combatant's decisions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorProfile {
    pub id: String,
    pub name: String,
    pub archetype: AiArchetype,
    pub difficulty: AiDifficulty,
    weights: BTreeMap<String, f32>,
    /// Wall-clock budget the planner may spend on one decision.
    pub decision_budget_ms: u32,
    pub use_reactions: bool,
    /// Prefer finishing wounded targets.
    pub focus_fire: bool,
    pub avoid_friendly_fire: bool,
    /// HP fraction below which the planner switches to safe positioning.
    pub defensive_threshold: f32,
    randomness: f32,
    /// Settings the factory could not map, keyed `settings.<original key>`.
    unresolved: BTreeMap<String, f32>,
}

impl BehaviorProfile {
    pub const DEFAULT_DECISION_BUDGET_MS: u32 = 1000;
    pub const DEFAULT_DEFENSIVE_THRESHOLD: f32 = 0.3;
    pub const DEFAULT_RANDOMNESS: f32 = 0.1;

    /// Profile with the default weight table and default flags.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        archetype: AiArchetype,
        difficulty: AiDifficulty,
    ) -> Self {
        let weights = weights::DEFAULTS
            .iter()
            .map(|(name, value)| ((*name).to_owned(), *value))
            .collect();

        Self {
            id: id.into(),
            name: name.into(),
            archetype,
            difficulty,
            weights,
            decision_budget_ms: Self::DEFAULT_DECISION_BUDGET_MS,
            use_reactions: true,
            focus_fire: false,
            avoid_friendly_fire: false,
            defensive_threshold: Self::DEFAULT_DEFENSIVE_THRESHOLD,
            randomness: Self::DEFAULT_RANDOMNESS,
            unresolved: BTreeMap::new(),
        }
    }

    /// Weight of a scoring component, [`weights::DEFAULT_WEIGHT`] if never set.
    pub fn weight(&self, component: &str) -> f32 {
        self.weights
            .get(component)
            .copied()
            .unwrap_or(weights::DEFAULT_WEIGHT)
    }

    /// Sets a weight. Negative or non-finite values are clamped to zero.
    pub fn set_weight(&mut self, component: &str, value: f32) {
        let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
        self.weights.insert(component.to_owned(), value);
    }

    /// Multiplies an existing (or default) weight by `factor`.
    pub fn scale_weight(&mut self, component: &str, factor: f32) {
        let current = self.weight(component);
        self.set_weight(component, current * factor);
    }

    pub fn weights(&self) -> impl Iterator<Item = (&str, f32)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Decision noise in `[0, 1]`.
    pub fn randomness(&self) -> f32 {
        self.randomness
    }

    pub fn set_randomness(&mut self, value: f32) {
        self.randomness = if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    pub fn unresolved_settings(&self) -> &BTreeMap<String, f32> {
        &self.unresolved
    }

    pub(crate) fn record_unresolved(&mut self, key: &str, value: f32) {
        self.unresolved.insert(format!("settings.{key}"), value);
    }
}

impl Default for BehaviorProfile {
    fn default() -> Self {
        ProfileFactory::create_for_archetype(AiArchetype::default(), AiDifficulty::default())
    }
}
