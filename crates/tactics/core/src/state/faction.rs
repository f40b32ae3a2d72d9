/// Combatant allegiance.
///
/// Parsed case-insensitively from scenario files (`"player"`, `"hostile"`).
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Faction {
    /// Player party and its allies.
    Player,
    /// Enemies of the player party.
    Hostile,
    /// Bystanders; never hostile to anyone.
    #[default]
    Neutral,
}

impl Faction {
    /// Check if this faction is hostile to another faction.
    pub fn is_hostile_to(&self, other: &Faction) -> bool {
        matches!(
            (self, other),
            (Faction::Player, Faction::Hostile) | (Faction::Hostile, Faction::Player)
        )
    }

    /// Same side of the fight. Neutral combatants are allied with no one.
    pub fn is_allied_with(&self, other: &Faction) -> bool {
        self == other && *self != Faction::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostility_is_symmetric() {
        assert!(Faction::Player.is_hostile_to(&Faction::Hostile));
        assert!(Faction::Hostile.is_hostile_to(&Faction::Player));
        assert!(!Faction::Neutral.is_hostile_to(&Faction::Hostile));
        assert!(!Faction::Hostile.is_hostile_to(&Faction::Hostile));
    }

    #[test]
    fn test_parses_case_insensitively() {
        assert_eq!("HOSTILE".parse::<Faction>(), Ok(Faction::Hostile));
        assert_eq!("player".parse::<Faction>(), Ok(Faction::Player));
    }
}
