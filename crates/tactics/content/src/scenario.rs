//! Encounter scenario format.
//!
//! Scenarios are JSON documents listing the units of an encounter. Field
//! names are camelCase to match the files produced by the scenario
//! generator.

use serde::{Deserialize, Serialize};
use tactics_core::{Combatant, Faction, Position, ResourceMeter};

/// One unit of a scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitSpec {
    pub id: String,
    pub name: String,
    /// `"player"`, `"hostile"` or `"neutral"`, case-insensitive.
    pub faction: String,
    pub hp: i32,
    pub max_hp: i32,
    pub initiative: i32,
    #[serde(default)]
    pub initiative_tiebreaker: i32,
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    pub z: f32,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl UnitSpec {
    pub fn faction(&self) -> Faction {
        self.faction.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("unit '{}': unknown faction '{}'", self.id, self.faction);
            Faction::Neutral
        })
    }

    pub fn to_combatant(&self) -> Combatant {
        Combatant::new(
            self.id.as_str(),
            self.faction(),
            Position::new(self.x, self.y, self.z),
            ResourceMeter::new(self.hp, self.max_hp),
        )
        .with_name(self.name.clone())
        .with_tags(self.tags.iter().cloned())
        .with_abilities(self.abilities.iter().cloned())
        .with_initiative(self.initiative)
    }
}

/// A complete encounter description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub units: Vec<UnitSpec>,
}

impl Scenario {
    /// Combatants in turn order: initiative descending, then tiebreaker
    /// descending, then file order.
    pub fn combatants(&self) -> Vec<Combatant> {
        let mut units: Vec<&UnitSpec> = self.units.iter().collect();
        units.sort_by(|a, b| {
            b.initiative
                .cmp(&a.initiative)
                .then(b.initiative_tiebreaker.cmp(&a.initiative_tiebreaker))
        });
        units.into_iter().map(UnitSpec::to_combatant).collect()
    }
}
