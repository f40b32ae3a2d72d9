/// AI behavioral style driving weight defaults.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AiArchetype {
    /// Maximizes damage and kills, accepts risk.
    #[default]
    Aggressive,
    /// Prioritizes survival and good positions.
    Defensive,
    /// Heals and buffs allies, avoids friendly fire.
    Support,
    /// Values control and status effects.
    Controller,
    /// Balanced, favors positioning and priority targets.
    Tactical,
    /// All-in damage, ignores self-preservation.
    Berserker,
}

/// Difficulty tier layered on top of the archetype.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AiDifficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Nightmare,
}
