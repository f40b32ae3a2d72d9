//! Encounter orchestration for the tactical AI.
//!
//! `tactics-core` decides; this crate owns the state those decisions need
//! across a fight and wires the pieces together for a turn engine:
//! - [`session`] holds per-encounter caches, the seeded RNG and the threat grid
//! - [`battlefield`] is an in-memory [`tactics_core::CombatContext`]
//! - [`planner`] builds turn plans
//! - [`bridge`] routes trigger events to AI reactors
pub mod battlefield;
pub mod bridge;
pub mod error;
pub mod planner;
pub mod session;

pub use battlefield::Battlefield;
pub use bridge::ReactionBridge;
pub use error::{Result, RuntimeError};
pub use planner::TurnPlanner;
pub use session::EncounterSession;
