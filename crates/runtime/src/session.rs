//! Per-encounter decision state.
//!
//! An [`EncounterSession`] is created by the turn engine when a fight
//! starts and dropped when it ends. It owns everything the decision core
//! needs to remember between calls:
//!
//! - behavior profiles per combatant, with archetype templates shared via [`Arc`]
//! - reaction configs per combatant, derived once from the profile
//! - the seeded RNG behind score jitter and random reaction policies
//! - the threat grid, rebuilt by each planning pass
//!
//! Caches are write-once in normal operation. Explicit overrides replace an
//! entry wholesale.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tactics_core::{
    AiArchetype, AiConfig, AiDifficulty, BehaviorProfile, CombatContext, Combatant, CombatantId,
    ProfileFactory, ReactionCandidate, ReactionConfig, ReactionEvaluator, ReactionOpportunity,
    ThreatField, TriggerEvent,
};

use crate::error::{Result, RuntimeError};

pub struct EncounterSession {
    config: AiConfig,
    difficulty: AiDifficulty,
    seed: u64,
    rng: StdRng,
    threat: ThreatField,
    templates: BTreeMap<(AiArchetype, AiDifficulty), Arc<BehaviorProfile>>,
    profiles: BTreeMap<CombatantId, Arc<BehaviorProfile>>,
    reaction_configs: BTreeMap<CombatantId, ReactionConfig>,
}

impl EncounterSession {
    pub fn new(config: AiConfig, seed: u64) -> Self {
        Self {
            threat: ThreatField::new(config.threat.clone()),
            config,
            difficulty: AiDifficulty::default(),
            seed,
            rng: StdRng::seed_from_u64(seed),
            templates: BTreeMap::new(),
            profiles: BTreeMap::new(),
            reaction_configs: BTreeMap::new(),
        }
    }

    /// Difficulty used for combatants without an explicit profile.
    pub fn with_difficulty(mut self, difficulty: AiDifficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn difficulty(&self) -> AiDifficulty {
        self.difficulty
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn threat_field(&self) -> &ThreatField {
        &self.threat
    }

    pub fn threat_field_mut(&mut self) -> &mut ThreatField {
        &mut self.threat
    }

    // ========================================================================
    // Profiles
    // ========================================================================

    /// Resolves every AI-controlled combatant's profile up front.
    pub fn prepare<C>(&mut self, ctx: &C)
    where
        C: CombatContext + ?Sized,
    {
        for combatant in ctx.combatants().iter().filter(|c| c.ai_controlled) {
            self.profile_for(combatant);
        }
        tracing::debug!(
            "session prepared: {} profiles from {} templates",
            self.profiles.len(),
            self.templates.len()
        );
    }

    /// Cached profile of `combatant`, creating it from its tags on first use.
    pub fn profile_for(&mut self, combatant: &Combatant) -> Arc<BehaviorProfile> {
        if let Some(profile) = self.profiles.get(&combatant.id) {
            return Arc::clone(profile);
        }

        let archetype = ProfileFactory::determine_archetype_for_combatant(combatant);
        let difficulty = self.difficulty;
        let template = self
            .templates
            .entry((archetype, difficulty))
            .or_insert_with(|| Arc::new(ProfileFactory::create_for_archetype(archetype, difficulty)));
        let profile = Arc::clone(template);

        tracing::debug!("{} uses profile {}", combatant.id, profile.id);
        self.profiles.insert(combatant.id.clone(), Arc::clone(&profile));
        profile
    }

    /// Profile already resolved for `id`.
    pub fn profile(&self, id: &CombatantId) -> Result<&Arc<BehaviorProfile>> {
        self.profiles
            .get(id)
            .ok_or_else(|| RuntimeError::ProfileMissing(id.clone()))
    }

    /// Replaces a combatant's profile and drops its derived reaction config.
    pub fn set_profile(&mut self, id: impl Into<CombatantId>, profile: BehaviorProfile) {
        let id = id.into();
        self.reaction_configs.remove(&id);
        self.profiles.insert(id, Arc::new(profile));
    }

    /// Number of distinct profile allocations in use.
    pub fn shared_profile_count(&self) -> usize {
        let mut seen: Vec<&Arc<BehaviorProfile>> = Vec::new();
        for profile in self.profiles.values() {
            if !seen.iter().any(|known| Arc::ptr_eq(known, profile)) {
                seen.push(profile);
            }
        }
        seen.len()
    }

    // ========================================================================
    // Reaction configs
    // ========================================================================

    /// Cached reaction config of `combatant`, derived from its profile on first use.
    pub fn reaction_config_for(&mut self, combatant: &Combatant) -> ReactionConfig {
        if let Some(config) = self.reaction_configs.get(&combatant.id) {
            return config.clone();
        }
        let profile = self.profile_for(combatant);
        let config = ReactionConfig::from_profile(&profile, &self.config.reaction);
        self.reaction_configs
            .insert(combatant.id.clone(), config.clone());
        config
    }

    /// Overrides the reaction config of a combatant present in `ctx`.
    pub fn set_reaction_config<C>(
        &mut self,
        ctx: &C,
        id: &CombatantId,
        config: ReactionConfig,
    ) -> Result<()>
    where
        C: CombatContext + ?Sized,
    {
        if ctx.combatant(id).is_none() {
            return Err(RuntimeError::UnknownCombatant(id.clone()));
        }
        self.reaction_configs.insert(id.clone(), config);
        Ok(())
    }

    /// Scores `candidates` for `reactor` and returns the accepted one, if any.
    pub fn decide_reaction<C>(
        &mut self,
        ctx: &C,
        reactor: &Combatant,
        event: &TriggerEvent,
        candidates: &[ReactionCandidate],
    ) -> Option<ReactionOpportunity>
    where
        C: CombatContext + ?Sized,
    {
        let profile = self.profile_for(reactor);
        let reaction_config = self.reaction_config_for(reactor);
        let evaluator = ReactionEvaluator::new(&profile, &reaction_config, &self.config);
        evaluator.decide(ctx, reactor, event, candidates, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use tactics_core::{Faction, Position, ResourceMeter};

    use super::*;
    use crate::battlefield::Battlefield;

    fn field() -> Battlefield {
        Battlefield::new(vec![
            Combatant::new("g1", Faction::Hostile, Position::ORIGIN, ResourceMeter::full(10))
                .with_tags(["melee"]),
            Combatant::new("g2", Faction::Hostile, Position::flat(1.0, 0.0), ResourceMeter::full(10))
                .with_tags(["fighter"]),
            Combatant::new("shaman", Faction::Hostile, Position::flat(2.0, 0.0), ResourceMeter::full(10))
                .with_tags(["healer"]),
            Combatant::new("hero", Faction::Player, Position::flat(5.0, 0.0), ResourceMeter::full(10)),
        ])
    }

    #[test]
    fn test_templates_are_shared_per_archetype() {
        let field = field();
        let mut session = EncounterSession::new(AiConfig::default(), 1);
        session.prepare(&field);

        let g1 = session.profile(&"g1".into()).unwrap().clone();
        let g2 = session.profile(&"g2".into()).unwrap().clone();
        let shaman = session.profile(&"shaman".into()).unwrap().clone();
        assert!(Arc::ptr_eq(&g1, &g2));
        assert_eq!(shaman.archetype, AiArchetype::Support);
        assert_eq!(session.shared_profile_count(), 2);

        session.set_profile("g2", ProfileFactory::create_for_archetype(AiArchetype::Aggressive, AiDifficulty::Normal));
        assert_eq!(session.shared_profile_count(), 3);
        assert_eq!(
            session.profile(&"hero".into()),
            Err(RuntimeError::ProfileMissing("hero".into()))
        );
    }

    #[test]
    fn test_overrides_replace_cached_entries() {
        let field = field();
        let mut session = EncounterSession::new(AiConfig::default(), 1).with_difficulty(AiDifficulty::Hard);
        let g1 = field.combatant(&"g1".into()).unwrap();

        let derived = session.reaction_config_for(g1);
        assert!(derived.always_react_to_opportunity);

        let custom = ReactionConfig {
            min_score: 99.0,
            ..ReactionConfig::default()
        };
        session.set_reaction_config(&field, &g1.id, custom.clone()).unwrap();
        assert_eq!(session.reaction_config_for(g1), custom);
        assert!(session.set_reaction_config(&field, &"ghost".into(), custom).is_err());

        let defensive = ProfileFactory::create_for_archetype(AiArchetype::Defensive, AiDifficulty::Hard);
        session.set_profile("g1", defensive);
        assert!(session.reaction_config_for(g1).prefer_defensive);
    }
}
