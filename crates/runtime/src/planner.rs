//! Greedy single-turn planner.
//!
//! The planner picks one target and at most one reposition per turn:
//!
//! 1. Rebuild the threat grid around the actor.
//! 2. Score every hostile as an attack target (with profile jitter).
//! 3. Wounded below the profile's defensive threshold: retreat to the
//!    safest reachable cell and dodge.
//! 4. Otherwise close in through the best tactical cell and attack if the
//!    target ends up in reach, dodging if it does not.
//!
//! The resulting [`TurnPlan`] is re-validated by the turn engine before
//! every step, so the planner never has to predict how the turn unfolds.

use std::time::{Duration, Instant};

use tactics_core::threat::threat_posed_by;
use tactics_core::{
    ActionScorer, AiActionType, CombatContext, Combatant, CombatantId, PlannedAction, ThreatInfo,
    TurnPlan,
};

use crate::error::{Result, RuntimeError};
use crate::session::EncounterSession;

/// Tactical value of a cell from which the chosen target can be attacked.
pub const ENGAGE_VALUE: f32 = 5.0;
/// Tactical value lost per unit of distance still left to the target.
pub const APPROACH_FALLOFF: f32 = 0.5;

pub struct TurnPlanner;

impl TurnPlanner {
    /// Builds a plan for `actor_id`'s turn.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::UnknownCombatant`] if `actor_id` is not in `ctx`. An
    /// actor that exists but cannot act gets a plan that just ends the turn.
    pub fn plan<C>(session: &mut EncounterSession, ctx: &C, actor_id: &CombatantId) -> Result<TurnPlan>
    where
        C: CombatContext + ?Sized,
    {
        let actor = ctx
            .combatant(actor_id)
            .ok_or_else(|| RuntimeError::UnknownCombatant(actor_id.clone()))?;
        let mut plan = TurnPlan::new(actor_id.clone());

        let hostiles = ctx.hostiles_of(actor_id);
        if !actor.is_available() || hostiles.is_empty() {
            plan.push(PlannedAction::new(AiActionType::EndTurn));
            return Ok(plan);
        }

        let profile = session.profile_for(actor);
        let config = session.config().clone();
        let started = Instant::now();
        let budget = Duration::from_millis(u64::from(profile.decision_budget_ms));
        let movement = actor.budget.remaining_movement.max(0.0);
        let reach = config.plan.attack_reach();

        // Threat grid around the actor, with occupied cells blocked.
        let field = session.threat_field_mut();
        field.calculate(hostiles.iter().copied(), actor.position, movement + reach);
        for other in ctx.combatants().iter().filter(|c| c.id != actor.id && c.is_available()) {
            field.set_reachable(&other.position, false);
        }

        // Target selection.
        let mut side = ctx.allies_of(actor_id);
        side.push(actor);
        let scorer = ActionScorer::new(&profile);
        let mut best: Option<(&Combatant, f32, PlannedAction)> = None;
        for &hostile in &hostiles {
            if started.elapsed() > budget && best.is_some() {
                tracing::debug!("{}: decision budget spent, keeping best so far", actor.id);
                break;
            }
            let threat = threat_posed_by(&config.threat, hostile, side.iter().copied());
            let score = scorer.score_attack(actor, hostile, threat);
            let jittered = scorer.jitter(score.value, session.rng_mut());
            if best.as_ref().is_none_or(|(_, top, _)| jittered > *top) {
                let attack = PlannedAction::attack(hostile.id.clone()).with_score(jittered, score.breakdown);
                best = Some((hostile, jittered, attack));
            }
        }
        let Some((target, _, attack)) = best else {
            plan.push(PlannedAction::new(AiActionType::EndTurn));
            return Ok(plan);
        };

        let wounded = actor.hp_fraction() < profile.defensive_threshold;
        let field = session.threat_field_mut();

        if wounded {
            let retreat = field
                .safest_cells(&actor.position, movement, 1)
                .first()
                .map(|cell| (*cell).clone());
            if let Some(cell) = retreat {
                if let Some(step) = Self::move_step(&scorer, actor, &cell, config.plan.arrival_epsilon) {
                    plan.push(step);
                }
            }
            if actor.budget.has_action {
                plan.push(PlannedAction::new(AiActionType::Dodge));
            }
            if plan.is_empty() {
                plan.push(PlannedAction::new(AiActionType::EndTurn));
            }
            tracing::debug!("{} is wounded, falling back", actor.id);
            return Ok(plan);
        }

        let mut standing = actor.position;
        if actor.distance_to(target) > reach {
            let cells: Vec<_> = field
                .cells()
                .map(|(_, cell)| cell.position)
                .collect();
            for position in cells {
                let gap = position.distance(&target.position);
                let value = if gap <= reach {
                    ENGAGE_VALUE
                } else {
                    -APPROACH_FALLOFF * gap
                };
                field.set_cell_value(&position, value);
            }

            let approach = field
                .best_tactical_cells(&actor.position, movement, 1)
                .first()
                .map(|cell| (*cell).clone());
            if let Some(cell) = approach {
                if let Some(step) = Self::move_step(&scorer, actor, &cell, config.plan.arrival_epsilon) {
                    standing = cell.position;
                    plan.push(step);
                }
            }
        }

        if actor.budget.has_action {
            if standing.distance(&target.position) <= reach {
                plan.push(attack);
            } else {
                plan.push(PlannedAction::new(AiActionType::Dodge));
            }
        }
        if plan.is_empty() {
            plan.push(PlannedAction::new(AiActionType::EndTurn));
        }

        tracing::debug!(
            "{} plans {} step(s) against {} (expected {:.2})",
            actor.id,
            plan.len(),
            target.id,
            plan.expected_value()
        );
        Ok(plan)
    }

    fn move_step(
        scorer: &ActionScorer<'_>,
        actor: &Combatant,
        cell: &ThreatInfo,
        arrival_epsilon: f32,
    ) -> Option<PlannedAction> {
        if actor.position.distance(&cell.position) <= arrival_epsilon {
            return None;
        }
        let score = scorer.score_position(cell);
        let mut step = PlannedAction::move_to(cell.position).with_score(score.value, score.breakdown);
        let height_gain = cell.position.y - actor.position.y;
        if height_gain > 0.0 {
            step.metadata.height_gain = Some(height_gain);
        }
        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use tactics_core::{ActionBudget, AiConfig, Faction, Position, ResourceMeter};

    use super::*;
    use crate::battlefield::Battlefield;

    fn duel(elf_at: Position, orc_hp: i32) -> Battlefield {
        Battlefield::new(vec![
            Combatant::new("orc", Faction::Hostile, Position::ORIGIN, ResourceMeter::new(orc_hp, 20))
                .with_tags(["melee"]),
            Combatant::new("elf", Faction::Player, elf_at, ResourceMeter::full(12)),
        ])
    }

    fn kinds(plan: &TurnPlan) -> Vec<AiActionType> {
        plan.actions().iter().map(|a| a.action_type).collect()
    }

    #[test]
    fn test_adjacent_target_is_attacked_in_place() {
        let field = duel(Position::flat(1.0, 0.0), 20);
        let mut session = EncounterSession::new(AiConfig::default(), 3);

        let plan = TurnPlanner::plan(&mut session, &field, &"orc".into()).unwrap();
        assert_eq!(kinds(&plan), [AiActionType::Attack]);
        assert_eq!(plan.actions()[0].target_id, Some("elf".into()));
        assert!(plan.is_valid(&field, &session.config().plan));
    }

    #[test]
    fn test_distant_target_is_approached_then_attacked() {
        let field = duel(Position::flat(6.0, 0.0), 20);
        let mut session = EncounterSession::new(AiConfig::default(), 3);

        let plan = TurnPlanner::plan(&mut session, &field, &"orc".into()).unwrap();
        assert_eq!(kinds(&plan), [AiActionType::Move, AiActionType::Attack]);

        let destination = plan.actions()[0].target_position.unwrap();
        let reach = session.config().plan.attack_reach();
        assert!(destination.distance(&Position::flat(6.0, 0.0)) <= reach);
        assert!(destination.distance(&Position::ORIGIN) <= ActionBudget::DEFAULT_MOVEMENT);
        assert_ne!(destination, Position::flat(6.0, 0.0));
    }

    #[test]
    fn test_wounded_actor_falls_back_and_dodges() {
        let field = duel(Position::flat(1.0, 0.0), 3);
        let mut session = EncounterSession::new(AiConfig::default(), 3);

        let plan = TurnPlanner::plan(&mut session, &field, &"orc".into()).unwrap();
        assert_eq!(kinds(&plan), [AiActionType::Move, AiActionType::Dodge]);

        let destination = plan.actions()[0].target_position.unwrap();
        let threat = session.threat_field();
        assert!(threat.threat_at(&destination) < threat.threat_at(&Position::ORIGIN));
    }

    #[test]
    fn test_nothing_to_fight_ends_the_turn() {
        let field = Battlefield::new(vec![Combatant::new(
            "orc",
            Faction::Hostile,
            Position::ORIGIN,
            ResourceMeter::full(10),
        )]);
        let mut session = EncounterSession::new(AiConfig::default(), 3);

        let plan = TurnPlanner::plan(&mut session, &field, &"orc".into()).unwrap();
        assert_eq!(kinds(&plan), [AiActionType::EndTurn]);

        let missing = TurnPlanner::plan(&mut session, &field, &"ghost".into());
        assert_eq!(missing, Err(RuntimeError::UnknownCombatant("ghost".into())));
    }

    #[test]
    fn test_same_seed_same_plan() {
        let field = Battlefield::new(vec![
            Combatant::new("orc", Faction::Hostile, Position::ORIGIN, ResourceMeter::full(20)),
            Combatant::new("elf", Faction::Player, Position::flat(1.0, 1.0), ResourceMeter::full(12)),
            Combatant::new("dwarf", Faction::Player, Position::flat(-1.0, 1.0), ResourceMeter::full(12)),
        ]);
        let plan_with = |seed| {
            let mut session = EncounterSession::new(AiConfig::default(), seed);
            TurnPlanner::plan(&mut session, &field, &"orc".into()).unwrap()
        };
        assert_eq!(plan_with(11), plan_with(11));
    }
}
