//! Turn plans and their validity state machine.
//!
//! A [`TurnPlan`] is an ordered list of [`PlannedAction`]s with a cursor.
//! The turn engine checks [`TurnPlan::is_valid`] before executing each step
//! and calls [`TurnPlan::advance`] after it.
//!
//! # States
//!
//! - **Active**: `cursor < len`
//! - **Complete**: `cursor == len`, terminal until the plan is replaced
//!
//! A failed validation invalidates the entire remaining plan rather than
//! the single stale step; the planner is expected to build a new one.

mod action;
mod errors;

pub use action::{ActionMetadata, AiActionType, PlannedAction, ResourceNeeds};
pub use errors::PlanInvalidation;

use crate::config::PlanConfig;
use crate::context::CombatContext;
use crate::error::TacticsError;
use crate::state::CombatantId;

/// Ordered, steppable action sequence for one combatant's turn.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnPlan {
    actor: CombatantId,
    actions: Vec<PlannedAction>,
    cursor: usize,
    expected_value: f32,
}

impl TurnPlan {
    pub fn new(actor: impl Into<CombatantId>) -> Self {
        Self {
            actor: actor.into(),
            actions: Vec::new(),
            cursor: 0,
            expected_value: 0.0,
        }
    }

    /// Appends an action and adds its score to the expected value.
    pub fn push(&mut self, action: PlannedAction) {
        self.expected_value += action.score;
        self.actions.push(action);
    }

    pub fn with_action(mut self, action: PlannedAction) -> Self {
        self.push(action);
        self
    }

    pub fn actor(&self) -> &CombatantId {
        &self.actor
    }

    pub fn actions(&self) -> &[PlannedAction] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn expected_value(&self) -> f32 {
        self.expected_value
    }

    /// Next action to execute, `None` once complete.
    pub fn current(&self) -> Option<&PlannedAction> {
        self.actions.get(self.cursor)
    }

    /// Actions not yet executed.
    pub fn remaining(&self) -> &[PlannedAction] {
        &self.actions[self.cursor..]
    }

    /// Marks the current action executed.
    ///
    /// # Returns
    ///
    /// The new current action, or `None` when the plan is now complete.
    pub fn advance(&mut self) -> Option<&PlannedAction> {
        if self.cursor < self.actions.len() {
            self.cursor += 1;
        }
        self.current()
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.actions.len()
    }

    /// Forces the plan to complete; the caller must plan again.
    pub fn invalidate(&mut self) {
        self.cursor = self.actions.len();
    }

    /// Checks the next action against live state.
    ///
    /// # Errors
    ///
    /// The first staleness reason found, checked in this order: completion,
    /// actor, arrival, target, reach, resources.
    pub fn validate<C>(&self, ctx: &C, config: &PlanConfig) -> Result<(), PlanInvalidation>
    where
        C: CombatContext + ?Sized,
    {
        let action = self.current().ok_or(PlanInvalidation::Complete)?;

        let actor = ctx
            .combatant(&self.actor)
            .ok_or_else(|| PlanInvalidation::ActorMissing(self.actor.clone()))?;
        if !actor.is_available() {
            return Err(PlanInvalidation::ActorInactive(self.actor.clone()));
        }

        if action.action_type.is_movement() {
            if let Some(destination) = &action.target_position {
                let distance = actor.position.distance(destination);
                if distance <= config.arrival_epsilon {
                    return Err(PlanInvalidation::AlreadyAtDestination { distance });
                }
            }
        }

        if let Some(target_id) = &action.target_id {
            let target = ctx
                .available(target_id)
                .ok_or_else(|| PlanInvalidation::TargetUnavailable(target_id.clone()))?;

            if action.action_type == AiActionType::Attack {
                let distance = actor.distance_to(target);
                let reach = config.attack_reach();
                if distance > reach {
                    return Err(PlanInvalidation::TargetOutOfReach {
                        target: target_id.clone(),
                        distance,
                        reach,
                    });
                }
            }
        }

        if !action.action_type.needs().affordable(&actor.budget, config) {
            return Err(PlanInvalidation::InsufficientResources(action.action_type));
        }

        Ok(())
    }

    pub fn is_valid<C>(&self, ctx: &C, config: &PlanConfig) -> bool
    where
        C: CombatContext + ?Sized,
    {
        self.validate(ctx, config).is_ok()
    }

    /// Validates and invalidates the whole plan on failure.
    pub fn revalidate<C>(&mut self, ctx: &C, config: &PlanConfig) -> Result<(), PlanInvalidation>
    where
        C: CombatContext + ?Sized,
    {
        let result = self.validate(ctx, config);
        if let Err(reason) = &result {
            if !self.is_complete() {
                tracing::info!(
                    "plan for {} invalidated at step {}/{} [{}]: {}",
                    self.actor,
                    self.cursor,
                    self.actions.len(),
                    reason.error_code(),
                    reason
                );
            }
            self.invalidate();
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorSeverity;
    use crate::state::{ActionBudget, Combatant, Faction, Position, ResourceMeter};

    fn field() -> Vec<Combatant> {
        vec![
            Combatant::new("orc", Faction::Hostile, Position::ORIGIN, ResourceMeter::full(20)),
            Combatant::new("elf", Faction::Player, Position::flat(1.0, 0.0), ResourceMeter::full(20)),
            Combatant::new("dwarf", Faction::Player, Position::flat(8.0, 0.0), ResourceMeter::full(20)),
        ]
    }

    #[test]
    fn test_cursor_walks_to_complete() {
        let config = PlanConfig::default();
        let ctx = field();
        let mut plan = TurnPlan::new("orc")
            .with_action(PlannedAction::attack("elf").with_score(5.0, Default::default()))
            .with_action(PlannedAction::new(AiActionType::EndTurn).with_score(1.0, Default::default()));

        assert_eq!(plan.expected_value(), 6.0);
        assert!(plan.is_valid(&ctx, &config));
        assert_eq!(
            plan.advance().map(|a| a.action_type),
            Some(AiActionType::EndTurn)
        );
        assert!(plan.advance().is_none());
        assert!(plan.is_complete());
        assert!(plan.advance().is_none());
        assert_eq!(plan.cursor(), plan.len());
        assert_eq!(plan.validate(&ctx, &config), Err(PlanInvalidation::Complete));
        assert!(!plan.is_valid(&ctx, &config));
    }

    #[test]
    fn test_arrival_within_epsilon_is_stale() {
        let config = PlanConfig::default();
        let ctx = field();
        let near = TurnPlan::new("orc").with_action(PlannedAction::move_to(Position::flat(0.8, 0.3)));
        assert!(matches!(
            near.validate(&ctx, &config),
            Err(PlanInvalidation::AlreadyAtDestination { .. })
        ));

        let far = TurnPlan::new("orc").with_action(PlannedAction::move_to(Position::flat(4.0, 0.0)));
        assert!(far.is_valid(&ctx, &config));
    }

    #[test]
    fn test_stale_targets_and_reach() {
        let config = PlanConfig::default();
        let mut ctx = field();

        let distant = TurnPlan::new("orc").with_action(PlannedAction::attack("dwarf"));
        let err = distant.validate(&ctx, &config).unwrap_err();
        assert!(matches!(err, PlanInvalidation::TargetOutOfReach { .. }));
        assert_eq!(err.severity(), ErrorSeverity::Recoverable);

        ctx[1].hp.current = 0;
        let dead = TurnPlan::new("orc").with_action(PlannedAction::attack("elf"));
        let err = dead.validate(&ctx, &config).unwrap_err();
        assert_eq!(err, PlanInvalidation::TargetUnavailable("elf".into()));
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.error_code(), "PLAN_TARGET_UNAVAILABLE");
    }

    #[test]
    fn test_actor_must_exist_and_act() {
        let config = PlanConfig::default();
        let mut ctx = field();
        let plan = TurnPlan::new("ghost").with_action(PlannedAction::new(AiActionType::Dodge));
        assert_eq!(
            plan.validate(&ctx, &config),
            Err(PlanInvalidation::ActorMissing("ghost".into()))
        );

        ctx[0].is_active = false;
        let plan = TurnPlan::new("orc").with_action(PlannedAction::new(AiActionType::Dodge));
        assert_eq!(
            plan.validate(&ctx, &config),
            Err(PlanInvalidation::ActorInactive("orc".into()))
        );
    }

    #[test]
    fn test_spent_budget_invalidates_whole_plan() {
        let config = PlanConfig::default();
        let mut ctx = field();
        ctx[0].budget = ActionBudget {
            has_action: false,
            ..ActionBudget::default()
        };
        let mut plan = TurnPlan::new("orc")
            .with_action(PlannedAction::attack("elf"))
            .with_action(PlannedAction::move_to(Position::flat(5.0, 5.0)));

        assert_eq!(
            plan.revalidate(&ctx, &config),
            Err(PlanInvalidation::InsufficientResources(AiActionType::Attack))
        );
        assert!(plan.is_complete());
        assert!(plan.remaining().is_empty());
    }

    #[test]
    fn test_shove_keeps_push_direction() {
        let push = Position::ORIGIN.direction_to(&Position::flat(1.0, 0.0));
        let action = PlannedAction::shove("elf", push);
        assert_eq!(action.metadata.push_direction, Some(push));
        assert_eq!(action.to_string(), "shove -> elf (0.00)");
    }
}
