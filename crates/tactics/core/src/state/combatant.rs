use super::{CombatantId, Faction, Position, ResourceMeter};

/// Per-turn action economy of a combatant.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionBudget {
    pub has_action: bool,
    pub has_bonus_action: bool,
    pub has_reaction: bool,
    /// Movement left this turn, in world units.
    pub remaining_movement: f32,
    pub max_movement: f32,
}

impl ActionBudget {
    pub const DEFAULT_MOVEMENT: f32 = 9.0;

    /// Fresh budget at the start of a turn.
    pub fn fresh(max_movement: f32) -> Self {
        Self {
            has_action: true,
            has_bonus_action: true,
            has_reaction: true,
            remaining_movement: max_movement,
            max_movement,
        }
    }

    /// Nothing left to spend.
    pub fn exhausted() -> Self {
        Self {
            has_action: false,
            has_bonus_action: false,
            has_reaction: false,
            remaining_movement: 0.0,
            max_movement: 0.0,
        }
    }
}

impl Default for ActionBudget {
    fn default() -> Self {
        Self::fresh(Self::DEFAULT_MOVEMENT)
    }
}

/// Read-only snapshot of a combatant as seen by the AI.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub faction: Faction,
    pub position: Position,
    pub hp: ResourceMeter,
    pub initiative: i32,
    /// Still participating in the encounter (not fled, not removed).
    pub is_active: bool,
    /// Decisions for this combatant are made by the AI.
    pub ai_controlled: bool,
    pub budget: ActionBudget,
    /// Class / role labels (`"barbarian"`, `"healer"`, ...).
    pub tags: Vec<String>,
    pub abilities: Vec<String>,
    pub armor_class: i32,
    pub attack_bonus: i32,
    /// Average damage of one successful basic attack.
    pub average_damage: f32,
}

impl Combatant {
    pub const DEFAULT_ARMOR_CLASS: i32 = 12;
    pub const DEFAULT_ATTACK_BONUS: i32 = 4;
    pub const DEFAULT_AVERAGE_DAMAGE: f32 = 7.0;

    pub fn new(
        id: impl Into<CombatantId>,
        faction: Faction,
        position: Position,
        hp: ResourceMeter,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.as_str().to_owned(),
            id,
            faction,
            position,
            hp,
            initiative: 0,
            is_active: true,
            ai_controlled: faction == Faction::Hostile,
            budget: ActionBudget::default(),
            tags: Vec::new(),
            abilities: Vec::new(),
            armor_class: Self::DEFAULT_ARMOR_CLASS,
            attack_bonus: Self::DEFAULT_ATTACK_BONUS,
            average_damage: Self::DEFAULT_AVERAGE_DAMAGE,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_abilities<I, S>(mut self, abilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abilities = abilities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_initiative(mut self, initiative: i32) -> Self {
        self.initiative = initiative;
        self
    }

    pub fn with_budget(mut self, budget: ActionBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_ai_control(mut self, ai_controlled: bool) -> Self {
        self.ai_controlled = ai_controlled;
        self
    }

    pub fn with_attack(mut self, attack_bonus: i32, average_damage: f32) -> Self {
        self.attack_bonus = attack_bonus;
        self.average_damage = average_damage;
        self
    }

    pub fn with_armor_class(mut self, armor_class: i32) -> Self {
        self.armor_class = armor_class;
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp.current > 0
    }

    /// Alive and still taking part in the fight.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.is_active && self.is_alive()
    }

    #[inline]
    pub fn hp_fraction(&self) -> f32 {
        self.hp.fraction()
    }

    pub fn is_hostile_to(&self, other: &Combatant) -> bool {
        self.faction.is_hostile_to(&other.faction)
    }

    /// Case-insensitive tag check.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn has_ability(&self, ability: &str) -> bool {
        self.abilities.iter().any(|a| a.eq_ignore_ascii_case(ability))
    }

    pub fn distance_to(&self, other: &Combatant) -> f32 {
        self.position.distance(&other.position)
    }
}
