//! Routes trigger events to AI reactors.
//!
//! The trigger system raises an event and lists everyone eligible to react,
//! in its own priority order. The bridge asks each AI reactor in turn and
//! stops at the first one that accepts: at most one reaction per trigger.

use tactics_core::{
    CombatContext, Combatant, CombatantId, ReactionCandidate, ReactionKind, ReactionOpportunity,
    TriggerEvent,
};

use crate::session::EncounterSession;

/// Reaction abilities the bridge offers alongside the basic reaction of a kind.
const REACTION_ABILITIES: &[(&str, ReactionKind)] = &[
    ("shield", ReactionKind::Defensive),
    ("parry", ReactionKind::Defensive),
    ("uncanny_dodge", ReactionKind::Defensive),
    ("counterspell", ReactionKind::Counter),
];

pub struct ReactionBridge;

impl ReactionBridge {
    /// Offers `event` to each reactor in order.
    ///
    /// # Arguments
    ///
    /// * `reactors` - Eligible reactors in the trigger system's priority order.
    ///   Missing, unavailable, player-controlled and reaction-exhausted
    ///   entries are skipped, as are profiles with reactions disabled.
    ///
    /// # Returns
    ///
    /// The first accepted reaction, or `None` if nobody reacts.
    pub fn dispatch<C>(
        session: &mut EncounterSession,
        ctx: &C,
        event: &TriggerEvent,
        reactors: &[CombatantId],
    ) -> Option<ReactionOpportunity>
    where
        C: CombatContext + ?Sized,
    {
        for id in reactors {
            let Some(reactor) = ctx.available(id) else {
                tracing::debug!("reactor {} is gone, skipping", id);
                continue;
            };
            if !reactor.ai_controlled || !reactor.budget.has_reaction {
                continue;
            }
            if !session.profile_for(reactor).use_reactions {
                continue;
            }

            let candidates = Self::candidates_for(reactor, event.reaction_kind());
            if let Some(decision) = session.decide_reaction(ctx, reactor, event, &candidates) {
                if decision.is_accepted() {
                    tracing::info!(
                        "{} reacts to {} with {} (score {:.2})",
                        reactor.id,
                        event.kind,
                        decision.reaction_id,
                        decision.score
                    );
                    return Some(decision);
                }
            }
        }
        None
    }

    /// The basic reaction of `kind` plus any matching reaction abilities the
    /// reactor knows.
    pub fn candidates_for(reactor: &Combatant, kind: ReactionKind) -> Vec<ReactionCandidate> {
        let mut candidates = vec![ReactionCandidate::basic(kind)];
        candidates.extend(
            REACTION_ABILITIES
                .iter()
                .filter(|(ability, ability_kind)| *ability_kind == kind && reactor.has_ability(ability))
                .map(|(ability, ability_kind)| ReactionCandidate::new(*ability, *ability_kind)),
        );
        candidates
    }
}

#[cfg(test)]
mod tests {
    use tactics_core::{
        AiArchetype, AiConfig, AiDifficulty, Faction, Position, ProfileFactory, ResourceMeter,
        TriggerKind,
    };

    use super::*;
    use crate::battlefield::Battlefield;

    fn goblin(id: &str, x: f32) -> Combatant {
        Combatant::new(id, Faction::Hostile, Position::flat(x, 0.0), ResourceMeter::full(10))
            .with_tags(["melee"])
    }

    fn field() -> Battlefield {
        Battlefield::new(vec![
            goblin("g1", 0.0),
            goblin("g2", 2.0),
            Combatant::new("hero", Faction::Player, Position::flat(1.0, 0.0), ResourceMeter::full(8)),
        ])
    }

    fn flee() -> TriggerEvent {
        TriggerEvent::new(TriggerKind::EnemyLeavesReach, "hero")
    }

    #[test]
    fn test_first_accepting_reactor_wins() {
        let field = field();
        let mut session = EncounterSession::new(AiConfig::default(), 5);

        let decision =
            ReactionBridge::dispatch(&mut session, &field, &flee(), &["g1".into(), "g2".into()]).unwrap();
        assert_eq!(decision.reactor, CombatantId::new("g1"));
        assert_eq!(decision.reaction_id, ReactionCandidate::OPPORTUNITY_ATTACK);
    }

    #[test]
    fn test_exhausted_and_unwilling_reactors_are_skipped() {
        let mut field = field();
        field.spend_reaction(&"g1".into()).unwrap();
        let mut session = EncounterSession::new(AiConfig::default(), 5);

        let decision = ReactionBridge::dispatch(
            &mut session,
            &field,
            &flee(),
            &["ghost".into(), "hero".into(), "g1".into(), "g2".into()],
        )
        .unwrap();
        assert_eq!(decision.reactor, CombatantId::new("g2"));

        let mut passive = ProfileFactory::create_for_archetype(AiArchetype::Aggressive, AiDifficulty::Normal);
        passive.use_reactions = false;
        session.set_profile("g2", passive);
        assert!(ReactionBridge::dispatch(&mut session, &field, &flee(), &["g1".into(), "g2".into()]).is_none());
    }

    #[test]
    fn test_known_reaction_abilities_join_the_candidates() {
        let mage = goblin("mage", 0.0).with_abilities(["counterspell", "shield", "fireball"]);

        let defensive = ReactionBridge::candidates_for(&mage, ReactionKind::Defensive);
        let ids: Vec<&str> = defensive.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, [ReactionCandidate::DEFENSIVE, "shield"]);

        let counter = ReactionBridge::candidates_for(&mage, ReactionKind::Counter);
        assert_eq!(counter.len(), 2);
        assert_eq!(counter[1].id, "counterspell");
    }
}
