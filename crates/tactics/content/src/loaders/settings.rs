//! Rule settings loader.
//!
//! Settings are a flat table of named multipliers exported from the rule
//! set, e.g.
//!
//! ```toml
//! multiplier_damage_enemy_pos = 1.2
//! multiplier_heal_self_pos = 0.8
//! hit_chance_stupidity = 0.1
//! ```
//!
//! Integer values are accepted and widened. Non-numeric entries are skipped
//! with a warning rather than failing the whole file.

use std::path::Path;

use tactics_core::RuleSettings;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`RuleSettings`] from TOML files.
pub struct SettingsLoader;

impl SettingsLoader {
    pub fn load(path: &Path) -> LoadResult<RuleSettings> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load settings {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<RuleSettings> {
        let table: toml::Table = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse settings TOML: {}", e))?;

        let mut settings = RuleSettings::new();
        for (key, value) in table {
            match value {
                toml::Value::Float(v) => {
                    settings.insert(key, v as f32);
                }
                toml::Value::Integer(v) => {
                    settings.insert(key, v as f32);
                }
                other => {
                    tracing::warn!("skipping non-numeric setting '{}' ({})", key, other.type_str());
                }
            }
        }
        Ok(settings)
    }
}
