//! In-memory battlefield.
//!
//! [`Battlefield`] is the simplest [`CombatContext`]: a list of combatant
//! snapshots plus the handful of mutations a turn loop needs to play out a
//! plan. Hosts with their own combat state implement [`CombatContext`]
//! directly instead.

use tactics_content::Scenario;
use tactics_core::{
    ActionBudget, AiActionType, CombatContext, Combatant, CombatantId, PlannedAction, Position,
};

use crate::error::{Result, RuntimeError};

/// Distance a successful shove pushes its target.
pub const SHOVE_DISTANCE: f32 = 1.5;

#[derive(Clone, Debug, Default)]
pub struct Battlefield {
    combatants: Vec<Combatant>,
}

impl Battlefield {
    pub fn new(combatants: Vec<Combatant>) -> Self {
        Self { combatants }
    }

    /// Combatants of a scenario, in initiative order.
    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self::new(scenario.combatants())
    }

    pub fn push(&mut self, combatant: Combatant) {
        self.combatants.push(combatant);
    }

    pub fn get_mut(&mut self, id: &CombatantId) -> Result<&mut Combatant> {
        self.combatants
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| RuntimeError::UnknownCombatant(id.clone()))
    }

    fn require(&self, id: &CombatantId) -> Result<&Combatant> {
        self.combatant(id)
            .ok_or_else(|| RuntimeError::UnknownCombatant(id.clone()))
    }

    /// Available combatants by initiative, highest first. Ties keep list order.
    pub fn turn_order(&self) -> Vec<CombatantId> {
        let mut order: Vec<&Combatant> = self.combatants.iter().filter(|c| c.is_available()).collect();
        order.sort_by(|a, b| b.initiative.cmp(&a.initiative));
        order.into_iter().map(|c| c.id.clone()).collect()
    }

    /// Available AI-controlled combatants, in list order.
    pub fn ai_controlled(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants
            .iter()
            .filter(|c| c.ai_controlled && c.is_available())
    }

    /// One side has nobody left standing.
    pub fn is_decided(&self) -> bool {
        let alive: Vec<&Combatant> = self.combatants.iter().filter(|c| c.is_available()).collect();
        !alive
            .iter()
            .any(|a| alive.iter().any(|b| a.is_hostile_to(b)))
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Resets the combatant's budget for a new turn.
    pub fn start_turn(&mut self, id: &CombatantId) -> Result<()> {
        let combatant = self.get_mut(id)?;
        combatant.budget = ActionBudget::fresh(combatant.budget.max_movement);
        Ok(())
    }

    /// Moves a combatant, spending movement equal to the distance travelled.
    ///
    /// # Returns
    ///
    /// The distance actually moved; the move is cut short when movement runs out.
    pub fn move_to(&mut self, id: &CombatantId, destination: Position) -> Result<f32> {
        let combatant = self.get_mut(id)?;
        let wanted = combatant.position.distance(&destination);
        let allowed = combatant.budget.remaining_movement.max(0.0);

        let travelled = if wanted <= allowed {
            combatant.position = destination;
            wanted
        } else if wanted > 0.0 {
            let t = allowed / wanted;
            let from = combatant.position;
            combatant.position = Position::new(
                from.x + (destination.x - from.x) * t,
                from.y + (destination.y - from.y) * t,
                from.z + (destination.z - from.z) * t,
            );
            allowed
        } else {
            0.0
        };
        combatant.budget.remaining_movement -= travelled;
        Ok(travelled)
    }

    /// Applies damage and returns the remaining HP. HP never drops below zero.
    pub fn apply_damage(&mut self, id: &CombatantId, amount: i32) -> Result<i32> {
        let combatant = self.get_mut(id)?;
        combatant.hp.current = (combatant.hp.current - amount.max(0)).max(0);
        if !combatant.is_alive() {
            tracing::debug!("{} is down", combatant.id);
        }
        Ok(combatant.hp.current)
    }

    pub fn spend_reaction(&mut self, id: &CombatantId) -> Result<()> {
        self.get_mut(id)?.budget.has_reaction = false;
        Ok(())
    }

    /// Plays out one planned action with average outcomes.
    ///
    /// Attacks always deal the attacker's average damage; the AI's own hit
    /// chance model is not re-rolled here.
    pub fn execute(&mut self, actor: &CombatantId, action: &PlannedAction) -> Result<()> {
        self.require(actor)?;

        match action.action_type {
            AiActionType::Move | AiActionType::Jump => {
                if let Some(destination) = action.target_position {
                    self.move_to(actor, destination)?;
                }
            }
            AiActionType::Attack => {
                let damage = self.require(actor)?.average_damage.round() as i32;
                if let Some(target) = &action.target_id {
                    self.apply_damage(target, damage)?;
                }
                self.get_mut(actor)?.budget.has_action = false;
            }
            AiActionType::Shove => {
                if let (Some(target), Some(direction)) =
                    (&action.target_id, action.metadata.push_direction)
                {
                    let pushed = self.get_mut(target)?;
                    pushed.position = Position::new(
                        pushed.position.x + direction.x * SHOVE_DISTANCE,
                        pushed.position.y,
                        pushed.position.z + direction.z * SHOVE_DISTANCE,
                    );
                }
                self.get_mut(actor)?.budget.has_action = false;
            }
            AiActionType::Dash => {
                let combatant = self.get_mut(actor)?;
                combatant.budget.has_action = false;
                combatant.budget.remaining_movement += combatant.budget.max_movement;
            }
            AiActionType::Disengage | AiActionType::Dodge => {
                self.get_mut(actor)?.budget.has_action = false;
            }
            AiActionType::UseAbility => {
                let budget = &mut self.get_mut(actor)?.budget;
                if budget.has_action {
                    budget.has_action = false;
                } else {
                    budget.has_bonus_action = false;
                }
            }
            AiActionType::EndTurn => {}
        }
        Ok(())
    }
}

impl CombatContext for Battlefield {
    fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }
}
