//! Trigger events and their routing to reaction evaluators.

use crate::config::ReactionTuning;
use crate::state::CombatantId;

/// What happened that may warrant a reaction.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
    strum::AsRefStr, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TriggerKind {
    EnemyLeavesReach,
    EnemyEntersReach,
    YouAreAttacked,
    YouAreHit,
    YouTakeDamage,
    AllyTakesDamage,
    AllyDowned,
    SpellCastNearby,
    /// Engine-specific trigger; scored like a counter against `value`.
    Custom,
}

/// The three reaction evaluators.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReactionKind {
    OpportunityAttack,
    /// Damage prevention for the reactor or an ally.
    Defensive,
    Counter,
}

impl TriggerKind {
    /// Fixed trigger → evaluator routing.
    pub const fn reaction_kind(self) -> ReactionKind {
        match self {
            Self::EnemyLeavesReach | Self::EnemyEntersReach => ReactionKind::OpportunityAttack,
            Self::YouAreAttacked
            | Self::YouAreHit
            | Self::YouTakeDamage
            | Self::AllyTakesDamage
            | Self::AllyDowned => ReactionKind::Defensive,
            Self::SpellCastNearby | Self::Custom => ReactionKind::Counter,
        }
    }

    /// Triggers that concern an ally rather than the reactor.
    pub const fn targets_ally(self) -> bool {
        matches!(self, Self::AllyTakesDamage | Self::AllyDowned)
    }
}

/// One trigger delivered by the engine's reaction dispatch.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerEvent {
    pub kind: TriggerKind,
    /// Combatant whose action caused the trigger.
    pub source: CombatantId,
    /// Combatant affected by it (attacked, damaged, downed, spell target).
    pub affected: Option<CombatantId>,
    /// Associated amount, usually damage.
    pub value: f32,
    /// Action or ability that caused the trigger.
    pub ability: Option<String>,
}

impl TriggerEvent {
    pub fn new(kind: TriggerKind, source: impl Into<CombatantId>) -> Self {
        Self {
            kind,
            source: source.into(),
            affected: None,
            value: 0.0,
            ability: None,
        }
    }

    pub fn with_affected(mut self, affected: impl Into<CombatantId>) -> Self {
        self.affected = Some(affected.into());
        self
    }

    pub fn with_value(mut self, value: f32) -> Self {
        self.value = value;
        self
    }

    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.ability = Some(ability.into());
        self
    }

    pub fn reaction_kind(&self) -> ReactionKind {
        self.kind.reaction_kind()
    }

    /// Damage the event represents. An ally going down always counts as at
    /// least `ally_downed_min_severity`.
    pub fn severity(&self, tuning: &ReactionTuning) -> f32 {
        let value = if self.value.is_finite() { self.value.max(0.0) } else { 0.0 };
        match self.kind {
            TriggerKind::AllyDowned => value.max(tuning.ally_downed_min_severity),
            _ => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_every_trigger_routes_somewhere() {
        let routed: Vec<ReactionKind> = TriggerKind::iter().map(TriggerKind::reaction_kind).collect();
        assert_eq!(routed.len(), 9);
        assert_eq!(
            TriggerKind::EnemyLeavesReach.reaction_kind(),
            ReactionKind::OpportunityAttack
        );
        assert_eq!(TriggerKind::AllyDowned.reaction_kind(), ReactionKind::Defensive);
        assert_eq!(TriggerKind::SpellCastNearby.reaction_kind(), ReactionKind::Counter);
    }

    #[test]
    fn test_ally_downed_has_minimum_severity() {
        let tuning = ReactionTuning::default();
        let downed = TriggerEvent::new(TriggerKind::AllyDowned, "orc").with_value(3.0);
        assert_eq!(downed.severity(&tuning), 20.0);
        let heavy = TriggerEvent::new(TriggerKind::AllyDowned, "orc").with_value(35.0);
        assert_eq!(heavy.severity(&tuning), 35.0);
        let hit = TriggerEvent::new(TriggerKind::YouAreHit, "orc").with_value(3.0);
        assert_eq!(hit.severity(&tuning), 3.0);
    }

    #[test]
    fn test_trigger_names_parse_case_insensitively() {
        assert_eq!("Enemy_Leaves_Reach".parse::<TriggerKind>().ok(), Some(TriggerKind::EnemyLeavesReach));
        assert_eq!(TriggerKind::YouTakeDamage.to_string(), "you_take_damage");
    }
}
