//! Game settings
//!
//! Ordered level list plus controller tuning, loaded from a JSON file.
//! Every field falls back to its default, so a file only needs the keys it
//! changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::LevelSettings;
use crate::tuning::PlayerTuning;

/// Failures while loading a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("settings contain no levels")]
    NoLevels,
}

/// Session-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Levels in play order
    pub levels: Vec<LevelSettings>,
    pub player: PlayerTuning,
    /// Fixed seed for reproducible layouts; each level offsets it by its index
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            levels: vec![
                LevelSettings::opening(),
                LevelSettings {
                    height: 60,
                    solid_chance: 0.2,
                    water_level: 2.0,
                    ..LevelSettings::default()
                },
                LevelSettings {
                    height: 80,
                    has_wind: true,
                    water_rise_speed: 0.4,
                    ..LevelSettings::default()
                },
                LevelSettings {
                    height: 100,
                    min_platform_width: 2,
                    max_platform_width: 6,
                    solid_chance: 0.4,
                    has_grates: true,
                    has_wind: true,
                    water_rise_speed: 0.7,
                    ..LevelSettings::default()
                },
                LevelSettings::victory(),
            ],
            player: PlayerTuning::default(),
            seed: None,
        }
    }
}

impl GameSettings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        if settings.levels.is_empty() {
            return Err(SettingsError::NoLevels);
        }
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded {} levels from {}",
            settings.levels.len(),
            path.display()
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Seed for the level at `index`, if seeding is fixed
    pub fn level_seed(&self, index: usize) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(index as u64))
    }
}
