//! Development tasks for the tactics workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{GenScenario, Inspect};

/// Development tasks for the tactics workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the tactical AI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate a deterministic random 2v2 scenario
    GenScenario(GenScenario),

    /// Load a scenario and show what the AI would do
    Inspect(Inspect),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::GenScenario(cmd) => cmd.execute(),
        Command::Inspect(cmd) => cmd.execute(),
    }
}
