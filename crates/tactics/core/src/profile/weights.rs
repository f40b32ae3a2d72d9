//! Scoring component names and the default weight table.

/// Weight of raw damage dealt.
pub const DAMAGE: &str = "damage";
pub const HEALING: &str = "healing";
pub const KILL_POTENTIAL: &str = "kill_potential";
pub const STATUS_VALUE: &str = "status_value";
pub const SELF_PRESERVATION: &str = "self_preservation";
pub const POSITIONING: &str = "positioning";
pub const RESOURCE_EFFICIENCY: &str = "resource_efficiency";
/// Value of keeping the reaction unspent.
pub const REACTION_SAVE: &str = "reaction_save";
pub const THREAT_PRIORITY: &str = "threat_priority";
pub const FOCUS_HEALERS: &str = "focus_healers";
pub const FOCUS_DAMAGE_DEALERS: &str = "focus_damage_dealers";
/// Multiplier on the base value of an opportunity attack.
pub const OPPORTUNITY_ATTACK: &str = "opportunity_attack";

/// Weight reported for components a profile never set.
pub const DEFAULT_WEIGHT: f32 = 1.0;

/// Baseline table every profile starts from.
pub const DEFAULTS: &[(&str, f32)] = &[
    (DAMAGE, 1.0),
    (HEALING, 1.2),
    (KILL_POTENTIAL, 1.5),
    (STATUS_VALUE, 0.8),
    (SELF_PRESERVATION, 1.0),
    (POSITIONING, 0.6),
    (RESOURCE_EFFICIENCY, 0.4),
    (REACTION_SAVE, 0.3),
    (THREAT_PRIORITY, 1.0),
    (FOCUS_HEALERS, 1.0),
    (FOCUS_DAMAGE_DEALERS, 1.0),
];
