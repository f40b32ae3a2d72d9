//! Tunable parameters for threat mapping, plan validation, and reactions.
//!
//! Every field has a default, so a partially specified TOML file (or none at
//! all) still yields a complete configuration.

/// Threat grid tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ThreatFieldConfig {
    /// Edge length of one grid cell in world units.
    pub cell_size: f32,
    /// Hostiles within this distance threaten a cell in melee.
    pub melee_range: f32,
    /// Hostiles within this distance (and outside melee) threaten at range.
    pub ranged_range: f32,
    pub melee_weight: f32,
    pub ranged_weight: f32,
}

impl ThreatFieldConfig {
    pub const DEFAULT_CELL_SIZE: f32 = 1.0;
    pub const DEFAULT_MELEE_RANGE: f32 = 5.0;
    pub const DEFAULT_RANGED_RANGE: f32 = 30.0;
    pub const DEFAULT_MELEE_WEIGHT: f32 = 3.0;
    pub const DEFAULT_RANGED_WEIGHT: f32 = 1.0;
}

impl Default for ThreatFieldConfig {
    fn default() -> Self {
        Self {
            cell_size: Self::DEFAULT_CELL_SIZE,
            melee_range: Self::DEFAULT_MELEE_RANGE,
            ranged_range: Self::DEFAULT_RANGED_RANGE,
            melee_weight: Self::DEFAULT_MELEE_WEIGHT,
            ranged_weight: Self::DEFAULT_RANGED_WEIGHT,
        }
    }
}

/// Turn plan re-validation thresholds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlanConfig {
    /// A move whose destination is closer than this is treated as already done.
    pub arrival_epsilon: f32,
    /// Reach of a basic melee attack.
    pub melee_attack_range: f32,
    /// Slack added to `melee_attack_range` before an attack is considered stale.
    pub attack_range_tolerance: f32,
    /// Minimum remaining movement for a queued move or jump to stay valid.
    pub min_movement: f32,
}

impl PlanConfig {
    /// Maximum actor-to-target distance for a queued attack.
    pub fn attack_reach(&self) -> f32 {
        self.melee_attack_range + self.attack_range_tolerance
    }
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            arrival_epsilon: 1.0,
            melee_attack_range: 1.5,
            attack_range_tolerance: 1.0,
            min_movement: 0.5,
        }
    }
}

/// Fixed scoring constants for reaction evaluation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReactionTuning {
    pub opportunity_base_value: f32,
    pub reserved_penalty: f32,
    pub damage_factor: f32,
    pub kill_bonus: f32,
    pub high_threat_threshold: f32,
    pub high_threat_bonus: f32,
    pub low_hp_focus_bonus: f32,
    /// Targets below this HP fraction attract the focus-fire bonus.
    pub focus_fire_hp_fraction: f32,
    pub survival_bonus: f32,
    /// Reactors below this HP fraction get the defensive low-HP bonus.
    pub defensive_low_hp_fraction: f32,
    pub defensive_low_hp_bonus: f32,
    pub counter_ally_bonus: f32,
    /// Score reported for reactions whose policy is `Always`.
    pub always_policy_score: f32,
    pub random_policy_probability: f32,
    /// Ally-downed triggers report at least this much damage.
    pub ally_downed_min_severity: f32,
    pub default_min_score: f32,
    /// Build per-factor breakdowns alongside scores.
    pub record_breakdown: bool,
}

impl Default for ReactionTuning {
    fn default() -> Self {
        Self {
            opportunity_base_value: 20.0,
            reserved_penalty: 15.0,
            damage_factor: 0.2,
            kill_bonus: 30.0,
            high_threat_threshold: 6.0,
            high_threat_bonus: 10.0,
            low_hp_focus_bonus: 15.0,
            focus_fire_hp_fraction: 0.5,
            survival_bonus: 100.0,
            defensive_low_hp_fraction: 0.3,
            defensive_low_hp_bonus: 20.0,
            counter_ally_bonus: 20.0,
            always_policy_score: 100.0,
            random_policy_probability: 0.5,
            ally_downed_min_severity: 20.0,
            default_min_score: 10.0,
            record_breakdown: true,
        }
    }
}

/// Complete AI configuration for one encounter.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiConfig {
    pub threat: ThreatFieldConfig,
    pub plan: PlanConfig,
    pub reaction: ReactionTuning,
}

impl AiConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
