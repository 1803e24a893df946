//! Level settings loaded from an external RON file.
//!
//! Allows tweaking the boss encounter without recompilation.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

use crate::error::BossDataError;

/// Default location of the settings file.
pub const SETTINGS_PATH: &str = "assets/data/settings.ron";

/// Difficulty and layout settings for one level, loaded from
/// `assets/data/settings.ron`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Number of columns in the formation.
    pub formation_width: u32,
    /// Number of rows in the formation.
    pub formation_height: u32,
    /// Movement interval (in frames) at full strength, scaled down as parts die.
    pub base_speed: u32,
    /// Frames between formation shots, varied by ±20%.
    pub shooting_frequency: u32,
    /// Number of enemy waves in the level.
    pub waves: u32,
    /// Whether this level ends in a boss encounter.
    pub boss_level: bool,
    /// Variety name looked up in the catalog.
    pub boss_type: String,
    // Playfield
    pub screen_width: i32,
    pub screen_height: i32,
    /// Fixed seed for the formation's random source. Unset means entropy.
    pub rng_seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            formation_width: 3,
            formation_height: 1,
            base_speed: 60,
            shooting_frequency: 90,
            waves: 1,
            boss_level: true,
            boss_type: "Crab".to_string(),
            screen_width: 600,
            screen_height: 650,
            rng_seed: None,
        }
    }
}

impl GameSettings {
    /// Parse settings from RON text.
    pub fn from_ron(contents: &str, path: &str) -> Result<Self, BossDataError> {
        ron::from_str(contents).map_err(|e| BossDataError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })
    }

    /// Load settings from the default file, falling back to defaults.
    pub fn load() -> Self {
        let path = SETTINGS_PATH;
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", path, e);
                return Self::default();
            }
        };
        match Self::from_ron(&contents, path) {
            Ok(settings) => {
                info!("Loaded game settings from {}", path);
                settings
            }
            Err(e) => {
                error!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Total number of parts a formation built from these settings holds.
    pub fn formation_size(&self) -> u32 {
        self.formation_width * self.formation_height
    }
}

/// System to load game settings at startup.
pub fn load_game_settings(mut settings: ResMut<GameSettings>) {
    *settings = GameSettings::load();
}
