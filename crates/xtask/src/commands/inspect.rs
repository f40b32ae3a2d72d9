//! Show what the AI would do in a scenario
//!
//! Builds a session for the scenario and prints, for each AI combatant, the
//! profile it resolves to, the safest cells around it and its turn plan.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use tactics_content::{ConfigLoader, ScenarioLoader};
use tactics_core::{AiConfig, AiDifficulty, CombatContext, Combatant, CombatantId};
use tactics_runtime::{Battlefield, EncounterSession, TurnPlanner};

/// Number of safe cells listed per combatant.
const SAFE_CELLS: usize = 3;

/// Load a scenario and show what the AI would do
#[derive(Parser)]
pub struct Inspect {
    /// Scenario JSON file
    #[arg(short, long, value_name = "FILE")]
    scenario: PathBuf,

    /// Only inspect this combatant
    #[arg(short, long, value_name = "ID")]
    actor: Option<String>,

    /// AI tuning file (defaults to built-in tuning)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Difficulty applied to every AI profile
    #[arg(short, long, default_value = "normal")]
    difficulty: AiDifficulty,

    /// RNG seed (defaults to the scenario's seed, then 0)
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Let the AI plan for player units too
    #[arg(long)]
    all: bool,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let scenario = ScenarioLoader::load(&self.scenario)?;
        let config = match &self.config {
            Some(path) => ConfigLoader::load(path)?,
            None => AiConfig::default(),
        };
        let seed = self.seed.or(scenario.seed).unwrap_or(0);

        let mut field = Battlefield::from_scenario(&scenario);
        if self.all {
            for id in field.turn_order() {
                field.get_mut(&id)?.ai_controlled = true;
            }
        }

        let actors: Vec<CombatantId> = match &self.actor {
            Some(id) => {
                let id = CombatantId::new(id.as_str());
                field
                    .combatant(&id)
                    .with_context(|| format!("No combatant '{}' in {}", id, scenario.id))?;
                vec![id]
            }
            None => field.ai_controlled().map(|c| c.id.clone()).collect(),
        };

        let mut session = EncounterSession::new(config, seed).with_difficulty(self.difficulty);
        session.prepare(&field);

        println!("{} {}", style("Scenario:").bold().cyan(), scenario.name);
        println!("{} {}", style("Seed:").bold().cyan(), seed);
        println!("{} {}", style("Difficulty:").bold().cyan(), self.difficulty);
        println!();

        for id in &actors {
            let Some(actor) = field.combatant(id) else {
                continue;
            };
            inspect_actor(&mut session, &field, actor)?;
        }
        Ok(())
    }
}

fn inspect_actor(session: &mut EncounterSession, field: &Battlefield, actor: &Combatant) -> Result<()> {
    let profile = session.profile_for(actor);
    println!(
        "{} {} ({})",
        style("===").bold().green(),
        style(&actor.name).bold(),
        actor.id
    );
    println!(
        "  Archetype: {}  Profile: {}  HP: {}/{}",
        style(profile.archetype).yellow(),
        profile.id,
        actor.hp.current,
        actor.hp.maximum
    );

    let plan = TurnPlanner::plan(session, field, &actor.id)?;

    println!("  {}", style("Safest cells:").bold());
    let safest = session
        .threat_field()
        .safest_cells(&actor.position, actor.budget.remaining_movement, SAFE_CELLS);
    if safest.is_empty() {
        println!("    (none)");
    }
    for cell in safest {
        println!(
            "    {} threat {:.1} ({} melee, {} ranged)",
            cell.position, cell.threat, cell.melee_threats, cell.ranged_threats
        );
    }

    println!(
        "  {} expected {:.2}",
        style("Plan:").bold(),
        plan.expected_value()
    );
    for (step, action) in plan.actions().iter().enumerate() {
        println!("    {}. {}", step + 1, action);
        if !action.breakdown.entries().is_empty() {
            println!("       {}", style(&action.breakdown).dim());
        }
    }
    println!();
    Ok(())
}
