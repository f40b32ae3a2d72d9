//! Behavior profile preset loader.
//!
//! Presets name an archetype and difficulty template, then layer explicit
//! weights and flags on top:
//!
//! ```ron
//! [
//!     (
//!         id: "goblin_skirmisher",
//!         name: Some("Goblin Skirmisher"),
//!         archetype: Some("tactical"),
//!         difficulty: Some("hard"),
//!         weights: { "positioning": 1.4 },
//!         flags: (focus_fire: Some(true)),
//!     ),
//! ]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tactics_core::{AiArchetype, AiDifficulty, BehaviorProfile, ProfileFactory, RuleSettings};

use crate::loaders::{LoadResult, read_file};

/// Optional flag overrides of a preset.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PresetFlags {
    pub use_reactions: Option<bool>,
    pub focus_fire: Option<bool>,
    pub avoid_friendly_fire: Option<bool>,
    pub defensive_threshold: Option<f32>,
    pub randomness: Option<f32>,
    pub decision_budget_ms: Option<u32>,
}

/// One entry of a profile preset file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProfilePreset {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub archetype: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Rule settings applied through the settings factory before weights.
    #[serde(default)]
    pub settings: RuleSettings,
    #[serde(default)]
    pub weights: BTreeMap<String, f32>,
    #[serde(default)]
    pub flags: PresetFlags,
}

impl ProfilePreset {
    /// Archetype named by the preset; unknown or missing names fall back to the default.
    pub fn archetype(&self) -> AiArchetype {
        parse_or_default(&self.id, "archetype", self.archetype.as_deref())
    }

    pub fn difficulty(&self) -> AiDifficulty {
        parse_or_default(&self.id, "difficulty", self.difficulty.as_deref())
    }

    /// Builds the profile: template (or settings factory), then weights, then flags.
    pub fn into_profile(self) -> BehaviorProfile {
        let archetype = self.archetype();
        let difficulty = self.difficulty();

        let mut profile = if self.settings.is_empty() {
            ProfileFactory::create_for_archetype(archetype, difficulty)
        } else {
            ProfileFactory::from_settings(archetype, difficulty, &self.settings)
        };

        profile.name = self.name.unwrap_or_else(|| self.id.clone());
        profile.id = self.id;

        for (component, value) in &self.weights {
            profile.set_weight(component, *value);
        }

        let flags = self.flags;
        if let Some(v) = flags.use_reactions {
            profile.use_reactions = v;
        }
        if let Some(v) = flags.focus_fire {
            profile.focus_fire = v;
        }
        if let Some(v) = flags.avoid_friendly_fire {
            profile.avoid_friendly_fire = v;
        }
        if let Some(v) = flags.defensive_threshold {
            profile.defensive_threshold = v.clamp(0.0, 1.0);
        }
        if let Some(v) = flags.randomness {
            profile.set_randomness(v);
        }
        if let Some(v) = flags.decision_budget_ms {
            profile.decision_budget_ms = v;
        }

        profile
    }
}

fn parse_or_default<T>(preset: &str, what: &str, raw: Option<&str>) -> T
where
    T: std::str::FromStr + Default + std::fmt::Display,
{
    let Some(raw) = raw else {
        return T::default();
    };
    raw.trim().parse().unwrap_or_else(|_| {
        let fallback = T::default();
        tracing::warn!(
            "preset '{}': unknown {} '{}', using {}",
            preset,
            what,
            raw,
            fallback
        );
        fallback
    })
}

/// Loader for behavior profile presets from RON files.
pub struct ProfileLoader;

impl ProfileLoader {
    /// Load presets and build their profiles, in file order.
    pub fn load(path: &Path) -> LoadResult<Vec<BehaviorProfile>> {
        Ok(Self::load_presets(path)?
            .into_iter()
            .map(ProfilePreset::into_profile)
            .collect())
    }

    /// Load the raw presets without building profiles.
    pub fn load_presets(path: &Path) -> LoadResult<Vec<ProfilePreset>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse profile RON at {:?}: {}", path, e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ProfilePreset>> {
        let presets: Vec<ProfilePreset> = ron::from_str(content)?;

        let mut seen = std::collections::BTreeSet::new();
        for preset in &presets {
            if !seen.insert(preset.id.as_str()) {
                anyhow::bail!("duplicate profile id '{}'", preset.id);
            }
        }
        Ok(presets)
    }
}
