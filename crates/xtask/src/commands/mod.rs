//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod gen_scenario;
mod inspect;

pub use gen_scenario::GenScenario;
pub use inspect::Inspect;
