//! AI tuning loader.

use std::path::Path;

use tactics_core::AiConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`AiConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load AI tuning from a TOML file.
    ///
    /// Sections and keys may be omitted; missing values keep their defaults.
    ///
    /// ```toml
    /// [threat]
    /// melee_range = 5.0
    ///
    /// [reaction]
    /// kill_bonus = 40.0
    /// ```
    pub fn load(path: &Path) -> LoadResult<AiConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<AiConfig> {
        let config: AiConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse AI config TOML: {}", e))?;
        Ok(config)
    }
}
