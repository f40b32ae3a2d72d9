//! Data-driven AI content and loaders.
//!
//! This crate reads the files an encounter is configured from:
//! - Rule settings (flat TOML tables of named multipliers)
//! - Behavior profile presets (RON)
//! - AI tuning (TOML)
//! - Encounter scenarios (JSON)
//!
//! Everything deserializes straight into `tactics-core` types where possible.

pub mod loaders;
pub mod scenario;

pub use loaders::{
    ConfigLoader, ContentFactory, LoadResult, ProfileLoader, ProfilePreset, ScenarioLoader,
    SettingsLoader,
};
pub use scenario::{Scenario, UnitSpec};
