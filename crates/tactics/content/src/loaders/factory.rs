//! Content factory for loading an encounter's AI data from a directory.

use std::path::{Path, PathBuf};

use tactics_core::{AiConfig, BehaviorProfile, RuleSettings};

use crate::loaders::{ConfigLoader, LoadResult, ProfileLoader, ScenarioLoader, SettingsLoader};
use crate::scenario::Scenario;

/// Loads AI content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── ai.toml
/// ├── profiles.ron
/// ├── settings/
/// │   └── <ruleset>.toml
/// └── scenarios/
///     └── <scenario>.json
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load AI tuning from `ai.toml`, or defaults if the file is absent.
    pub fn load_config(&self) -> LoadResult<AiConfig> {
        let path = self.data_dir.join("ai.toml");
        if !path.exists() {
            tracing::debug!("{} not found, using default AI config", path.display());
            return Ok(AiConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load profile presets from `profiles.ron`.
    pub fn load_profiles(&self) -> LoadResult<Vec<BehaviorProfile>> {
        ProfileLoader::load(&self.data_dir.join("profiles.ron"))
    }

    /// Load `settings/<name>.toml`.
    pub fn load_settings(&self, name: &str) -> LoadResult<RuleSettings> {
        let path = self.data_dir.join("settings").join(format!("{name}.toml"));
        SettingsLoader::load(&path)
    }

    /// Load `scenarios/<name>.json`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        let path = self.data_dir.join("scenarios").join(format!("{name}.json"));
        ScenarioLoader::load(&path)
    }
}
