//! Generate randomized 2v2 scenarios
//!
//! The same seed always produces the same scenario, so a seed is enough to
//! reproduce an encounter in a bug report.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

use tactics_content::{Scenario, UnitSpec};

const EXTRA_ABILITIES: &[&str] = &[
    "ranged_attack",
    "offhand_attack",
    "shove",
    "dash",
    "dodge_action",
    "hide",
    "second_wind",
    "bardic_inspiration",
    "cure_wounds",
    "Target_PoisonSpray",
];

const PLAYER_NAMES: &[&str] = &[
    "Aldric", "Brienne", "Cedric", "Delara", "Eldrin", "Fiona", "Gareth", "Helena", "Isadora",
    "Jareth",
];

const HOSTILE_NAMES: &[&str] = &[
    "Grimfang",
    "Vex",
    "Kragnar",
    "Shadowblade",
    "Malakar",
    "Dreadmaw",
    "Skorn",
    "Nightshade",
    "Razorclaw",
    "Hexbane",
];

/// Generate a deterministic random 2v2 scenario
#[derive(Parser)]
pub struct GenScenario {
    /// Seed for deterministic generation
    #[arg(long, value_name = "SEED")]
    seed: u64,

    /// Output file path (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl GenScenario {
    pub fn execute(self) -> Result<()> {
        let scenario = generate(self.seed);
        let json = serde_json::to_string_pretty(&scenario).context("Failed to serialize scenario")?;

        match self.output {
            Some(path) => {
                std::fs::write(&path, format!("{json}\n"))
                    .with_context(|| format!("Failed to write scenario: {}", path.display()))?;
                eprintln!(
                    "{} {}",
                    style("Generated scenario saved to:").bold().green(),
                    path.display()
                );
            }
            None => println!("{json}"),
        }
        Ok(())
    }
}

/// Two players on the left, two hostiles on the right.
pub fn generate(seed: u64) -> Scenario {
    let mut rng = StdRng::seed_from_u64(seed);
    let players: Vec<&str> = PLAYER_NAMES.choose_multiple(&mut rng, 2).copied().collect();
    let hostiles: Vec<&str> = HOSTILE_NAMES.choose_multiple(&mut rng, 2).copied().collect();

    let mut units = Vec::with_capacity(4);
    for (i, name) in players.iter().enumerate() {
        units.push(unit(&mut rng, format!("player_{}", i + 1), name, "player", (-5.0, -3.0)));
    }
    for (i, name) in hostiles.iter().enumerate() {
        units.push(unit(&mut rng, format!("hostile_{}", i + 1), name, "hostile", (3.0, 5.0)));
    }

    Scenario {
        id: format!("random_2v2_seed_{seed}"),
        name: format!("Random 2v2 (Seed {seed})"),
        seed: Some(seed),
        units,
    }
}

fn unit(rng: &mut StdRng, id: String, name: &str, faction: &str, x_range: (f32, f32)) -> UnitSpec {
    let mut abilities = vec!["main_hand_attack".to_owned()];
    let extra = rng.gen_range(1..=3);
    abilities.extend(
        EXTRA_ABILITIES
            .choose_multiple(rng, extra)
            .map(|ability| (*ability).to_owned()),
    );

    let hp = rng.gen_range(35..=80);
    let initiative = rng.gen_range(8..=18);
    let x = rng.gen_range(x_range.0..x_range.1);
    let z = rng.gen_range(-2.0f32..2.0);

    UnitSpec {
        id,
        name: name.to_owned(),
        faction: faction.to_owned(),
        hp,
        max_hp: hp,
        initiative,
        initiative_tiebreaker: rng.gen_range(1..=100),
        x: round2(x),
        y: 0.0,
        z: round2(z),
        tags: tags_for(&abilities),
        abilities,
    }
}

/// Tags implied by a unit's abilities, without duplicates.
fn tags_for(abilities: &[String]) -> Vec<String> {
    let has = |ability: &str| abilities.iter().any(|a| a == ability);
    let mut tags: Vec<&str> = Vec::new();
    let mut add = |tag| {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    };

    if has("Target_PoisonSpray") {
        add("melee");
        add("debuffer");
    }
    if has("cure_wounds") {
        add("healer");
        add("support");
    }
    if has("ranged_attack") {
        add("ranged");
    }
    if has("offhand_attack") {
        add("melee");
    }
    if has("bardic_inspiration") {
        add("support");
    }
    tags.into_iter().map(str::to_owned).collect()
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_scenario() {
        assert_eq!(generate(42), generate(42));
        assert_ne!(generate(42), generate(43));
    }

    #[test]
    fn test_units_stay_in_bounds() {
        let scenario = generate(7);
        assert_eq!(scenario.id, "random_2v2_seed_7");
        assert_eq!(scenario.units.len(), 4);

        for unit in &scenario.units {
            assert!((35..=80).contains(&unit.hp));
            assert_eq!(unit.hp, unit.max_hp);
            assert!((8..=18).contains(&unit.initiative));
            assert_eq!(unit.abilities[0], "main_hand_attack");
            assert!((2..=4).contains(&unit.abilities.len()));
            let (lo, hi) = if unit.faction == "player" { (-5.0, -3.0) } else { (3.0, 5.0) };
            assert!(unit.x >= lo && unit.x <= hi);
        }
    }

    #[test]
    fn test_tags_follow_abilities() {
        let abilities: Vec<String> = ["main_hand_attack", "Target_PoisonSpray", "offhand_attack", "cure_wounds"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(tags_for(&abilities), ["melee", "debuffer", "healer", "support"]);
        assert!(tags_for(&["main_hand_attack".to_owned()]).is_empty());
    }
}
