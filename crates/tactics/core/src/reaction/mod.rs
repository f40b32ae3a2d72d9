//! Reaction decisions: whether to spend a combatant's reaction on a trigger.
//!
//! A trigger routes to one of three evaluators by [`TriggerKind::reaction_kind`].
//! [`ReactionEvaluator`] scores candidates against the reactor's
//! [`ReactionConfig`] and picks at most one to accept.

mod config;
mod evaluator;
mod opportunity;
mod trigger;

pub use config::ReactionConfig;
pub use evaluator::{EffectEstimator, EventValueEstimator, ReactionEvaluator};
pub use opportunity::{ReactionCandidate, ReactionOpportunity, ReactionPolicy, ReactionStatus};
pub use trigger::{ReactionKind, TriggerEvent, TriggerKind};
