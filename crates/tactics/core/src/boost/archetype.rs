//! Archetype multiplier table used to value boost descriptors.

/// Which roll an advantage or disadvantage boost applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CheckKind {
    Attack,
    Ability,
    SavingThrow,
    Skill,
}

/// Roll type named by a `RollBonus(...)` boost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RollKind {
    Attack,
    Damage,
    SavingThrow,
    Skill,
    Ability,
    Initiative,
}

impl RollKind {
    /// Maps a roll-type name onto its modifier slot.
    ///
    /// Matching is case-insensitive and accepts the usual synonyms. Anything
    /// unrecognized is valued like an attack roll.
    pub fn from_roll_type(roll_type: &str) -> Self {
        match roll_type.trim().to_ascii_lowercase().as_str() {
            "damage" => Self::Damage,
            "savingthrow" | "deathsavingthrow" => Self::SavingThrow,
            "skill" | "skillcheck" => Self::Skill,
            "ability" | "abilitycheck" | "rawability" => Self::Ability,
            "initiative" => Self::Initiative,
            _ => Self::Attack,
        }
    }
}

/// Per-archetype valuation of every recognized boost category.
///
/// Populated once from resolved rule settings and read-only afterwards.
/// Every field has a default, so lookups never fail; unknown settings are
/// ignored.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArchetypeProfile {
    pub ac: f32,
    pub ability: f32,
    pub ability_failed_saving_throw: f32,
    pub action_resource: f32,
    pub action_resource_multiplier: f32,
    pub action_resource_block: f32,
    pub action_resource_override: f32,
    pub movement: f32,
    pub critical_hit_always: f32,
    pub critical_hit_never: f32,
    pub weapon_damage: f32,
    pub damage_bonus: f32,
    pub resistance: f32,
    pub damage_reduction: f32,
    pub initiative: f32,
    pub saving_throw: f32,
    pub spell_resistance: f32,
    pub advantage_attack: f32,
    pub advantage_ability: f32,
    pub advantage_saving_throw: f32,
    pub advantage_skill: f32,
    pub roll_bonus_attack: f32,
    pub roll_bonus_damage: f32,
    pub roll_bonus_saving_throw: f32,
    pub roll_bonus_skill: f32,
    pub roll_bonus_ability: f32,
    pub roll_bonus_initiative: f32,
    pub sight_range: f32,
    pub temporary_hp: f32,
    pub status_immunity: f32,
    pub proficiency_bonus: f32,
    pub reroll: f32,
}

impl Default for ArchetypeProfile {
    fn default() -> Self {
        Self {
            ac: 1.0,
            ability: 0.5,
            ability_failed_saving_throw: 0.8,
            action_resource: 0.6,
            action_resource_multiplier: 1.0,
            action_resource_block: 1.0,
            action_resource_override: 0.8,
            movement: 0.3,
            critical_hit_always: 1.5,
            critical_hit_never: 1.0,
            weapon_damage: 1.0,
            damage_bonus: 1.0,
            resistance: 0.8,
            damage_reduction: 0.7,
            initiative: 0.2,
            saving_throw: 0.6,
            spell_resistance: 0.8,
            advantage_attack: 1.0,
            advantage_ability: 0.5,
            advantage_saving_throw: 0.6,
            advantage_skill: 0.3,
            roll_bonus_attack: 0.5,
            roll_bonus_damage: 0.6,
            roll_bonus_saving_throw: 0.4,
            roll_bonus_skill: 0.2,
            roll_bonus_ability: 0.3,
            roll_bonus_initiative: 0.1,
            sight_range: 0.1,
            temporary_hp: 0.5,
            status_immunity: 0.7,
            proficiency_bonus: 0.4,
            reroll: 0.5,
        }
    }
}

impl ArchetypeProfile {
    /// Builds a profile from flat rule settings, starting from defaults.
    ///
    /// Keys are matched case-insensitively (`multiplier_boost_ac`,
    /// `modifier_roll_bonus_attack`, ...). Unknown keys are ignored.
    pub fn from_settings<'a, I>(settings: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a f32)>,
    {
        let mut profile = Self::default();
        for (key, value) in settings {
            if let Some(slot) = profile.slot_mut(key) {
                *slot = *value;
            }
        }
        profile
    }

    /// Whether `key` names one of this profile's settings.
    pub fn is_known_setting(key: &str) -> bool {
        Self::default().slot_mut(key).is_some()
    }

    /// Advantage multiplier for a roll kind.
    pub fn advantage(&self, kind: CheckKind) -> f32 {
        match kind {
            CheckKind::Attack => self.advantage_attack,
            CheckKind::Ability => self.advantage_ability,
            CheckKind::SavingThrow => self.advantage_saving_throw,
            CheckKind::Skill => self.advantage_skill,
        }
    }

    /// Roll-bonus modifier for a roll kind.
    pub fn roll_bonus(&self, kind: RollKind) -> f32 {
        match kind {
            RollKind::Attack => self.roll_bonus_attack,
            RollKind::Damage => self.roll_bonus_damage,
            RollKind::SavingThrow => self.roll_bonus_saving_throw,
            RollKind::Skill => self.roll_bonus_skill,
            RollKind::Ability => self.roll_bonus_ability,
            RollKind::Initiative => self.roll_bonus_initiative,
        }
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut f32> {
        let slot = match key.trim().to_ascii_lowercase().as_str() {
            "multiplier_boost_ac" => &mut self.ac,
            "multiplier_boost_ability" => &mut self.ability,
            "multiplier_boost_ability_failed_saving_throw" => {
                &mut self.ability_failed_saving_throw
            }
            "multiplier_boost_action_resource" => &mut self.action_resource,
            "multiplier_boost_action_resource_multiplier" => &mut self.action_resource_multiplier,
            "multiplier_boost_action_resource_block" => &mut self.action_resource_block,
            "multiplier_boost_action_resource_override" => &mut self.action_resource_override,
            "multiplier_boost_movement" => &mut self.movement,
            "multiplier_boost_critical_hit_always" => &mut self.critical_hit_always,
            "multiplier_boost_critical_hit_never" => &mut self.critical_hit_never,
            "multiplier_boost_weapon_damage" => &mut self.weapon_damage,
            "multiplier_boost_damage_bonus" => &mut self.damage_bonus,
            "multiplier_boost_resistance" => &mut self.resistance,
            "multiplier_boost_damage_reduction" => &mut self.damage_reduction,
            "multiplier_boost_initiative" => &mut self.initiative,
            "multiplier_boost_saving_throw" => &mut self.saving_throw,
            "multiplier_boost_spell_resistance" => &mut self.spell_resistance,
            "multiplier_advantage_attack" => &mut self.advantage_attack,
            "multiplier_advantage_ability" => &mut self.advantage_ability,
            "multiplier_advantage_saving_throw" => &mut self.advantage_saving_throw,
            "multiplier_advantage_skill" => &mut self.advantage_skill,
            "modifier_roll_bonus_attack" => &mut self.roll_bonus_attack,
            "modifier_roll_bonus_damage" => &mut self.roll_bonus_damage,
            "modifier_roll_bonus_saving_throw" => &mut self.roll_bonus_saving_throw,
            "modifier_roll_bonus_skill" => &mut self.roll_bonus_skill,
            "modifier_roll_bonus_ability" => &mut self.roll_bonus_ability,
            "modifier_roll_bonus_initiative" => &mut self.roll_bonus_initiative,
            "multiplier_boost_sight_range" => &mut self.sight_range,
            "multiplier_boost_temporary_hp" => &mut self.temporary_hp,
            "multiplier_boost_status_immunity" => &mut self.status_immunity,
            "multiplier_boost_proficiency_bonus" => &mut self.proficiency_bonus,
            "multiplier_boost_reroll" => &mut self.reroll,
            _ => return None,
        };
        Some(slot)
    }
}
