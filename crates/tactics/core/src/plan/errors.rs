//! Plan staleness reasons.

use super::AiActionType;
use crate::error::{ErrorSeverity, TacticsError};
use crate::state::CombatantId;

/// Why a [`super::TurnPlan`] can no longer be executed as queued.
///
/// Any of these invalidates the whole remaining plan.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PlanInvalidation {
    /// Every queued action has been executed or the plan was invalidated.
    #[error("plan is complete")]
    Complete,

    #[error("actor {0} is not in the encounter")]
    ActorMissing(CombatantId),

    /// Actor is dead or no longer active.
    #[error("actor {0} can no longer act")]
    ActorInactive(CombatantId),

    #[error("already at destination ({distance:.2} away)")]
    AlreadyAtDestination { distance: f32 },

    /// Target is gone, dead or inactive.
    #[error("target {0} is unavailable")]
    TargetUnavailable(CombatantId),

    #[error("target {target} is {distance:.2} away (reach {reach:.2})")]
    TargetOutOfReach {
        target: CombatantId,
        distance: f32,
        reach: f32,
    },

    #[error("not enough resources left for {0}")]
    InsufficientResources(AiActionType),
}

impl TacticsError for PlanInvalidation {
    fn severity(&self) -> ErrorSeverity {
        use PlanInvalidation::*;
        match self {
            // The world moved on; plan again
            Complete
            | AlreadyAtDestination { .. }
            | TargetOutOfReach { .. }
            | InsufficientResources(_) => ErrorSeverity::Recoverable,

            // A referenced combatant is gone
            ActorMissing(_) | ActorInactive(_) | TargetUnavailable(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use PlanInvalidation::*;
        match self {
            Complete => "PLAN_COMPLETE",
            ActorMissing(_) => "PLAN_ACTOR_MISSING",
            ActorInactive(_) => "PLAN_ACTOR_INACTIVE",
            AlreadyAtDestination { .. } => "PLAN_ALREADY_AT_DESTINATION",
            TargetUnavailable(_) => "PLAN_TARGET_UNAVAILABLE",
            TargetOutOfReach { .. } => "PLAN_TARGET_OUT_OF_REACH",
            InsufficientResources(_) => "PLAN_INSUFFICIENT_RESOURCES",
        }
    }
}
