//! Scenario loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::scenario::Scenario;

/// Loader for [`Scenario`] JSON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load scenario {}: {}", path.display(), e))
    }

    /// Parse and check unit ids are unique.
    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario JSON: {}", e))?;

        let mut seen = std::collections::BTreeSet::new();
        for unit in &scenario.units {
            if !seen.insert(unit.id.as_str()) {
                anyhow::bail!("duplicate unit id '{}' in scenario '{}'", unit.id, scenario.id);
            }
        }
        Ok(scenario)
    }
}
