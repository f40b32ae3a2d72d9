//! Battlefield snapshot types consumed by the decision core.
//!
//! The turn engine owns live combatant state; these types are the read-only
//! view the AI works against. Nothing in this crate mutates a [`Combatant`].
mod combatant;
mod common;
mod faction;

pub use combatant::{ActionBudget, Combatant};
pub use common::{CombatantId, Position, ResourceMeter};
pub use faction::Faction;
