use std::fs;

use tactics_content::ContentFactory;
use tactics_core::{AiActionType, CombatContext, CombatantId};
use tactics_runtime::{Battlefield, EncounterSession, TurnPlanner};
use tempfile::TempDir;

const SCENARIO: &str = r#"{
  "id": "skirmish",
  "name": "Skirmish",
  "seed": 42,
  "units": [
    { "id": "player_1", "name": "Aldric", "faction": "player", "hp": 40, "maxHp": 40,
      "initiative": 14, "x": -4.0, "z": 0.0, "tags": ["melee"] },
    { "id": "player_2", "name": "Fiona", "faction": "player", "hp": 36, "maxHp": 36,
      "initiative": 9, "x": -4.0, "z": 2.0, "tags": ["healer", "support"] },
    { "id": "hostile_1", "name": "Grimfang", "faction": "hostile", "hp": 45, "maxHp": 45,
      "initiative": 16, "x": 4.0, "z": 0.0, "tags": ["melee"] },
    { "id": "hostile_2", "name": "Vex", "faction": "hostile", "hp": 38, "maxHp": 38,
      "initiative": 11, "x": 4.0, "z": -2.0, "tags": ["ranged"] }
  ]
}"#;

const AI_CONFIG: &str = r#"
[plan]
arrival_epsilon = 0.5
"#;

fn load(temp_dir: &TempDir) -> (ContentFactory, Battlefield) {
    let scenarios = temp_dir.path().join("scenarios");
    fs::create_dir_all(&scenarios).unwrap();
    fs::write(scenarios.join("skirmish.json"), SCENARIO).unwrap();
    fs::write(temp_dir.path().join("ai.toml"), AI_CONFIG).unwrap();

    let factory = ContentFactory::new(temp_dir.path());
    let scenario = factory.load_scenario("skirmish").unwrap();
    let mut field = Battlefield::from_scenario(&scenario);
    for id in field.turn_order() {
        field.get_mut(&id).unwrap().ai_controlled = true;
    }
    (factory, field)
}

/// Plays `rounds` rounds, re-validating each step before it runs.
fn play(field: &mut Battlefield, session: &mut EncounterSession, rounds: usize) -> Vec<AiActionType> {
    let mut log = Vec::new();
    for _ in 0..rounds {
        for id in field.turn_order() {
            if field.available(&id).is_none() {
                continue;
            }
            field.start_turn(&id).unwrap();
            let mut plan = TurnPlanner::plan(session, field, &id).unwrap();

            while let Some(action) = plan.current().cloned() {
                if plan.revalidate(field, &session.config().plan).is_err() {
                    break;
                }
                field.execute(&id, &action).unwrap();
                log.push(action.action_type);
                plan.advance();
            }
        }
    }
    log
}

fn total_hp(field: &Battlefield) -> i32 {
    field.combatants().iter().map(|c| c.hp.current).sum()
}

#[test]
fn test_turn_order_follows_initiative() {
    let temp_dir = TempDir::new().unwrap();
    let (_, field) = load(&temp_dir);

    let order: Vec<String> = field.turn_order().iter().map(CombatantId::to_string).collect();
    assert_eq!(order, ["hostile_1", "player_1", "hostile_2", "player_2"]);
}

#[test]
fn test_rounds_make_progress() {
    let temp_dir = TempDir::new().unwrap();
    let (factory, mut field) = load(&temp_dir);
    let config = factory.load_config().unwrap();
    assert_eq!(config.plan.arrival_epsilon, 0.5);

    let before = total_hp(&field);
    let mut session = EncounterSession::new(config, 42);
    session.prepare(&field);
    let log = play(&mut field, &mut session, 3);

    assert!(log.contains(&AiActionType::Move));
    assert!(log.contains(&AiActionType::Attack));
    assert!(total_hp(&field) < before);
}

#[test]
fn test_same_seed_replays_identically() {
    let run = || {
        let temp_dir = TempDir::new().unwrap();
        let (factory, mut field) = load(&temp_dir);
        let mut session = EncounterSession::new(factory.load_config().unwrap(), 42);
        let log = play(&mut field, &mut session, 4);
        let hp: Vec<i32> = field.combatants().iter().map(|c| c.hp.current).collect();
        (log, hp)
    };
    assert_eq!(run(), run());
}

#[test]
fn test_stale_attack_is_dropped() {
    let temp_dir = TempDir::new().unwrap();
    let (factory, mut field) = load(&temp_dir);
    let mut session = EncounterSession::new(factory.load_config().unwrap(), 42);

    let grimfang: CombatantId = "hostile_1".into();
    let mut plan = TurnPlanner::plan(&mut session, &field, &grimfang).unwrap();
    let target = plan
        .actions()
        .iter()
        .find_map(|a| a.target_id.clone())
        .unwrap();

    while let Some(step) = plan.current().filter(|a| a.action_type.is_movement()).cloned() {
        field.execute(&grimfang, &step).unwrap();
        plan.advance();
    }
    assert_eq!(plan.current().map(|a| a.action_type), Some(AiActionType::Attack));

    // The target falls before the attack lands.
    field.apply_damage(&target, 1000).unwrap();
    assert!(plan.revalidate(&field, &session.config().plan).is_err());
    assert!(plan.current().is_none());
}
