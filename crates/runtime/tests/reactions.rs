use tactics_core::{
    Combatant, CombatantId, Faction, Position, ReactionCandidate, ReactionKind, ResourceMeter,
    TriggerEvent, TriggerKind,
};
use tactics_runtime::{Battlefield, EncounterSession, ReactionBridge};

fn ambush() -> Battlefield {
    Battlefield::new(vec![
        Combatant::new("orc", Faction::Hostile, Position::ORIGIN, ResourceMeter::full(20))
            .with_tags(["barbarian"])
            .with_attack(5, 9.0),
        Combatant::new("mage", Faction::Hostile, Position::flat(0.0, 2.0), ResourceMeter::full(6))
            .with_tags(["wizard"])
            .with_abilities(["shield", "counterspell"]),
        Combatant::new("hero", Faction::Player, Position::flat(1.0, 0.0), ResourceMeter::full(30)),
    ])
}

#[test]
fn test_fleeing_hero_provokes_one_reaction() {
    let mut field = ambush();
    let mut session = EncounterSession::new(Default::default(), 9);
    let reactors: Vec<CombatantId> = vec!["orc".into(), "mage".into()];
    let event = TriggerEvent::new(TriggerKind::EnemyLeavesReach, "hero");

    let decision = ReactionBridge::dispatch(&mut session, &field, &event, &reactors).unwrap();
    assert_eq!(decision.reactor, CombatantId::new("orc"));
    assert_eq!(decision.kind, ReactionKind::OpportunityAttack);
    assert!(decision.score > 0.0);

    field.spend_reaction(&decision.reactor).unwrap();
    let second = ReactionBridge::dispatch(&mut session, &field, &event, &["orc".into()]);
    assert!(second.is_none());
}

#[test]
fn test_lethal_hit_is_shielded() {
    let field = ambush();
    let mut session = EncounterSession::new(Default::default(), 9);
    let event = TriggerEvent::new(TriggerKind::YouAreAttacked, "hero")
        .with_affected("mage")
        .with_value(12.0);

    let decision = ReactionBridge::dispatch(&mut session, &field, &event, &["mage".into()]).unwrap();
    assert_eq!(decision.kind, ReactionKind::Defensive);
    assert!(decision.prevents_death);
    assert!(
        decision.reaction_id == ReactionCandidate::DEFENSIVE || decision.reaction_id == "shield"
    );
}

#[test]
fn test_player_units_never_react() {
    let field = ambush();
    let mut session = EncounterSession::new(Default::default(), 9);
    let event = TriggerEvent::new(TriggerKind::EnemyLeavesReach, "orc");

    assert!(ReactionBridge::dispatch(&mut session, &field, &event, &["hero".into()]).is_none());
}
