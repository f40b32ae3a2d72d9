//! Utility-based decision core for turn-based tactical combat AI.
//!
//! `tactics-core` turns a combatant, a view of the battlefield and a
//! behavior profile into scored decisions without per-archetype scripts.
//! It performs no I/O and never blocks; every failure degrades to "no
//! decision" or "plan invalid". Encounter-level state (profile caches, RNG,
//! the threat grid) is owned by `tactics-runtime`, and data files are read by
//! `tactics-content`.
pub mod boost;
pub mod breakdown;
pub mod config;
pub mod context;
pub mod error;
pub mod plan;
pub mod profile;
pub mod reaction;
pub mod scoring;
pub mod state;
pub mod threat;
pub use boost::{ArchetypeProfile, BoostCategory, BoostClassifier, CheckKind, ClassifiedBoost, RollKind};
pub use breakdown::{Breakdown, ScoreSheet};
pub use config::{AiConfig, PlanConfig, ReactionTuning, ThreatFieldConfig};
pub use context::CombatContext;
pub use error::{ErrorSeverity, TacticsError};
pub use plan::{
    ActionMetadata, AiActionType, PlanInvalidation, PlannedAction, ResourceNeeds, TurnPlan,
};
pub use profile::{AiArchetype, AiDifficulty, BehaviorProfile, ProfileFactory, RuleSettings};
pub use reaction::{
    EffectEstimator, EventValueEstimator, ReactionCandidate, ReactionConfig, ReactionEvaluator,
    ReactionKind, ReactionOpportunity, ReactionPolicy, ReactionStatus, TriggerEvent, TriggerKind,
};
pub use scoring::{ActionScore, ActionScorer, hit_chance};
pub use state::{ActionBudget, Combatant, CombatantId, Faction, Position, ResourceMeter};
pub use threat::{GridCoord, MAX_GRID_STEPS, ThreatField, ThreatInfo};
