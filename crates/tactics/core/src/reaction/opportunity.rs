//! Scored reaction candidates.

use super::{ReactionKind, TriggerKind};
use crate::breakdown::Breakdown;
use crate::state::CombatantId;

/// How a reaction is decided.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReactionPolicy {
    /// Scored by the matching evaluator.
    #[default]
    Evaluate,
    /// Fires without scoring.
    Always,
    /// Fires on a coin flip.
    Random,
    /// Filtered out before evaluation.
    Never,
}

/// Where an opportunity is in its decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReactionStatus {
    Pending,
    Evaluated,
    Accepted,
    Rejected,
}

/// A reaction the reactor could spend on a trigger.
#[derive(Clone, Debug, PartialEq)]
pub struct ReactionCandidate {
    /// Reaction or ability id (`"opportunity_attack"`, `"shield"`, ...).
    pub id: String,
    pub kind: ReactionKind,
    pub policy: ReactionPolicy,
}

impl ReactionCandidate {
    pub const OPPORTUNITY_ATTACK: &'static str = "opportunity_attack";
    pub const DEFENSIVE: &'static str = "defensive_reaction";
    pub const COUNTER: &'static str = "counter_reaction";

    pub fn new(id: impl Into<String>, kind: ReactionKind) -> Self {
        Self {
            id: id.into(),
            kind,
            policy: ReactionPolicy::Evaluate,
        }
    }

    pub fn with_policy(mut self, policy: ReactionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The generic reaction every combatant has for a reaction kind.
    pub fn basic(kind: ReactionKind) -> Self {
        let id = match kind {
            ReactionKind::OpportunityAttack => Self::OPPORTUNITY_ATTACK,
            ReactionKind::Defensive => Self::DEFENSIVE,
            ReactionKind::Counter => Self::COUNTER,
        };
        Self::new(id, kind)
    }
}

/// One evaluated reaction with its full explanation.
#[derive(Clone, Debug, PartialEq)]
pub struct ReactionOpportunity {
    pub trigger: TriggerKind,
    pub kind: ReactionKind,
    pub reactor: CombatantId,
    /// Combatant that caused the trigger.
    pub source: CombatantId,
    pub reaction_id: String,
    pub status: ReactionStatus,
    pub score: f32,
    pub breakdown: Breakdown,
    pub should_react: bool,
    pub justification: String,
    pub expected_damage: f32,
    pub hit_chance: f32,
    pub would_kill: bool,
    /// Threat estimate of the trigger source.
    pub threat_level: f32,
    /// Reacting keeps the protected combatant alive.
    pub prevents_death: bool,
}

impl ReactionOpportunity {
    pub fn pending(
        trigger: TriggerKind,
        reactor: CombatantId,
        source: CombatantId,
        candidate: &ReactionCandidate,
    ) -> Self {
        Self {
            trigger,
            kind: candidate.kind,
            reactor,
            source,
            reaction_id: candidate.id.clone(),
            status: ReactionStatus::Pending,
            score: 0.0,
            breakdown: Breakdown::disabled(),
            should_react: false,
            justification: String::new(),
            expected_damage: 0.0,
            hit_chance: 1.0,
            would_kill: false,
            threat_level: 0.0,
            prevents_death: false,
        }
    }

    /// Records the score without deciding.
    pub(crate) fn scored(&mut self, score: f32, breakdown: Breakdown) {
        self.score = score;
        self.breakdown = breakdown;
        self.status = ReactionStatus::Evaluated;
    }

    /// Final decision. Calling it again overwrites the previous one.
    pub(crate) fn decide(&mut self, should_react: bool, justification: String) {
        self.should_react = should_react;
        self.status = if should_react {
            ReactionStatus::Accepted
        } else {
            ReactionStatus::Rejected
        };
        self.justification = justification;
    }

    pub fn is_accepted(&self) -> bool {
        self.status == ReactionStatus::Accepted
    }
}
