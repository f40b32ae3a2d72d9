//! Planned actions and their resource needs.

use bitflags::bitflags;

use crate::breakdown::Breakdown;
use crate::config::PlanConfig;
use crate::state::{ActionBudget, CombatantId, Position};

bitflags! {
    /// Parts of the action budget an action draws on.
    ///
    /// `ACTION | BONUS_ACTION` means either one will do.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ResourceNeeds: u8 {
        const ACTION       = 1 << 0;
        const BONUS_ACTION = 1 << 1;
        const MOVEMENT     = 1 << 2;
    }
}

impl ResourceNeeds {
    /// Whether `budget` can pay for these needs.
    pub fn affordable(self, budget: &ActionBudget, config: &PlanConfig) -> bool {
        let action_ok = if self.contains(Self::ACTION | Self::BONUS_ACTION) {
            budget.has_action || budget.has_bonus_action
        } else if self.contains(Self::ACTION) {
            budget.has_action
        } else if self.contains(Self::BONUS_ACTION) {
            budget.has_bonus_action
        } else {
            true
        };
        let movement_ok =
            !self.contains(Self::MOVEMENT) || budget.remaining_movement >= config.min_movement;
        action_ok && movement_ok
    }
}

/// Kind of a planned action.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AiActionType {
    Attack,
    Move,
    Jump,
    Shove,
    Dash,
    Disengage,
    UseAbility,
    Dodge,
    EndTurn,
}

impl AiActionType {
    pub fn needs(self) -> ResourceNeeds {
        match self {
            Self::Attack | Self::Shove | Self::Dash | Self::Disengage | Self::Dodge => {
                ResourceNeeds::ACTION
            }
            Self::Move | Self::Jump => ResourceNeeds::MOVEMENT,
            Self::UseAbility => ResourceNeeds::ACTION | ResourceNeeds::BONUS_ACTION,
            Self::EndTurn => ResourceNeeds::empty(),
        }
    }

    /// Actions that carry the actor to `target_position`.
    pub fn is_movement(self) -> bool {
        matches!(self, Self::Move | Self::Jump)
    }
}

/// Type-specific details of a planned action.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionMetadata {
    /// Planar push direction of a shove.
    pub push_direction: Option<Position>,
    /// Height gained by a move or jump.
    pub height_gain: Option<f32>,
}

/// One step of a [`super::TurnPlan`].
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedAction {
    pub action_type: AiActionType,
    pub ability_id: Option<String>,
    pub target_id: Option<CombatantId>,
    pub target_position: Option<Position>,
    pub score: f32,
    pub breakdown: Breakdown,
    pub is_valid: bool,
    pub metadata: ActionMetadata,
}

impl PlannedAction {
    pub fn new(action_type: AiActionType) -> Self {
        Self {
            action_type,
            ability_id: None,
            target_id: None,
            target_position: None,
            score: 0.0,
            breakdown: Breakdown::disabled(),
            is_valid: true,
            metadata: ActionMetadata::default(),
        }
    }

    pub fn attack(target: impl Into<CombatantId>) -> Self {
        Self::new(AiActionType::Attack).with_target(target)
    }

    pub fn move_to(position: Position) -> Self {
        Self::new(AiActionType::Move).with_position(position)
    }

    pub fn jump_to(position: Position, height_gain: f32) -> Self {
        let mut action = Self::new(AiActionType::Jump).with_position(position);
        action.metadata.height_gain = Some(height_gain);
        action
    }

    pub fn shove(target: impl Into<CombatantId>, push_direction: Position) -> Self {
        let mut action = Self::new(AiActionType::Shove).with_target(target);
        action.metadata.push_direction = Some(push_direction);
        action
    }

    pub fn ability(ability_id: impl Into<String>) -> Self {
        Self::new(AiActionType::UseAbility).with_ability(ability_id)
    }

    pub fn with_target(mut self, target: impl Into<CombatantId>) -> Self {
        self.target_id = Some(target.into());
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.target_position = Some(position);
        self
    }

    pub fn with_ability(mut self, ability_id: impl Into<String>) -> Self {
        self.ability_id = Some(ability_id.into());
        self
    }

    pub fn with_score(mut self, score: f32, breakdown: Breakdown) -> Self {
        self.score = score;
        self.breakdown = breakdown;
        self
    }
}

impl std::fmt::Display for PlannedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.action_type)?;
        if let Some(ability) = &self.ability_id {
            write!(f, " {ability}")?;
        }
        if let Some(target) = &self.target_id {
            write!(f, " -> {target}")?;
        }
        if let Some(position) = &self.target_position {
            write!(f, " @ {position}")?;
        }
        write!(f, " ({:.2})", self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ability_accepts_either_action() {
        let config = PlanConfig::default();
        let needs = AiActionType::UseAbility.needs();
        let bonus_only = ActionBudget {
            has_action: false,
            ..ActionBudget::default()
        };
        assert!(needs.affordable(&bonus_only, &config));
        assert!(!AiActionType::Attack.needs().affordable(&bonus_only, &config));
        assert!(!needs.affordable(&ActionBudget::exhausted(), &config));
    }

    #[test]
    fn test_movement_needs_minimum_remaining() {
        let config = PlanConfig::default();
        let nearly_spent = ActionBudget {
            remaining_movement: 0.2,
            ..ActionBudget::default()
        };
        assert!(!AiActionType::Move.needs().affordable(&nearly_spent, &config));
        assert!(AiActionType::Move.needs().affordable(&ActionBudget::default(), &config));
        assert!(AiActionType::EndTurn.needs().affordable(&ActionBudget::exhausted(), &config));
    }
}
