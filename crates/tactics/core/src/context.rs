//! Combat context capability consumed by the decision core.
//!
//! The turn engine owns combatant state. The AI only needs to resolve
//! combatants by id and enumerate the field, so the engine exposes exactly
//! that through [`CombatContext`].

use crate::state::{Combatant, CombatantId};

/// Read access to the live battlefield.
///
/// Implementations must return combatants in a stable order; the reaction
/// bridge and the planner break ties by iteration order.
pub trait CombatContext {
    /// All combatants known to the encounter, dead or alive.
    fn combatants(&self) -> &[Combatant];

    /// Resolves a combatant by id.
    fn combatant(&self, id: &CombatantId) -> Option<&Combatant> {
        self.combatants().iter().find(|c| &c.id == id)
    }

    /// Resolves a combatant only if it is alive and active.
    fn available(&self, id: &CombatantId) -> Option<&Combatant> {
        self.combatant(id).filter(|c| c.is_available())
    }

    /// Living, active combatants hostile to `id`.
    fn hostiles_of(&self, id: &CombatantId) -> Vec<&Combatant> {
        let Some(me) = self.combatant(id) else {
            return Vec::new();
        };
        self.combatants()
            .iter()
            .filter(|c| c.is_available() && me.is_hostile_to(c))
            .collect()
    }

    /// Living, active allies of `id`, excluding `id` itself.
    fn allies_of(&self, id: &CombatantId) -> Vec<&Combatant> {
        let Some(me) = self.combatant(id) else {
            return Vec::new();
        };
        self.combatants()
            .iter()
            .filter(|c| {
                c.id != me.id && c.is_available() && c.faction.is_allied_with(&me.faction)
            })
            .collect()
    }
}

impl CombatContext for [Combatant] {
    fn combatants(&self) -> &[Combatant] {
        self
    }
}

impl CombatContext for Vec<Combatant> {
    fn combatants(&self) -> &[Combatant] {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Faction, Position, ResourceMeter};

    fn unit(id: &str, faction: Faction, hp: i32) -> Combatant {
        Combatant::new(id, faction, Position::ORIGIN, ResourceMeter::new(hp, 20))
    }

    #[test]
    fn test_hostiles_skip_dead_and_inactive() {
        let mut inactive = unit("h3", Faction::Hostile, 10);
        inactive.is_active = false;
        let field = vec![
            unit("p1", Faction::Player, 10),
            unit("h1", Faction::Hostile, 10),
            unit("h2", Faction::Hostile, 0),
            inactive,
        ];

        let hostiles = field.hostiles_of(&CombatantId::new("p1"));
        assert_eq!(hostiles.len(), 1);
        assert_eq!(hostiles[0].id.as_str(), "h1");
    }

    #[test]
    fn test_allies_exclude_self() {
        let field = vec![
            unit("h1", Faction::Hostile, 10),
            unit("h2", Faction::Hostile, 10),
            unit("p1", Faction::Player, 10),
        ];
        let allies = field.allies_of(&CombatantId::new("h1"));
        assert_eq!(allies.len(), 1);
        assert_eq!(allies[0].id.as_str(), "h2");
    }

    #[test]
    fn test_unknown_id_resolves_to_nothing() {
        let field = vec![unit("h1", Faction::Hostile, 10)];
        assert!(field.combatant(&CombatantId::new("ghost")).is_none());
        assert!(field.hostiles_of(&CombatantId::new("ghost")).is_empty());
    }
}
