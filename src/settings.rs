//! Game settings and preferences
//!
//! Persisted as a JSON file next to the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::TICK_HZ;
use crate::error::SettingsError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name scores are recorded under
    pub player_name: String,
    /// SQLite leaderboard file
    pub database_path: PathBuf,

    // === Simulation ===
    /// Ticks per second
    pub tick_hz: u32,
    /// Fixed spawner seed (random per run if unset)
    pub seed: Option<u64>,
    /// Headless driver stops after this many ticks
    pub max_ticks: u64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: "Player".to_string(),
            database_path: PathBuf::from("jelly_lasso.db"),

            tick_hz: TICK_HZ,
            seed: None,
            max_ticks: 60 * 60 * 2,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Nominal time between ticks
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_hz.max(1) as f64)
    }

    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn try_load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("Ignoring {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            player_name: "Ann".to_string(),
            seed: Some(9),
            muted: true,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "player_name": "Bo", "tick_hz": 30 }"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.player_name, "Bo");
        assert_eq!(settings.tick_hz, 30);
        assert_eq!(settings.database_path, PathBuf::from("jelly_lasso.db"));
    }

    #[test]
    fn test_missing_or_malformed_falls_back() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");
        assert_eq!(Settings::load(&missing), Settings::default());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(Settings::try_load(&bad), Err(SettingsError::Json(_))));
        assert_eq!(Settings::load(&bad), Settings::default());
    }

    #[test]
    fn test_tick_period() {
        let settings = Settings::default();
        assert_eq!(settings.tick_period().as_micros(), 16_666);
        let muted = Settings { muted: true, ..Default::default() };
        assert_eq!(muted.effective_sfx_volume(), 0.0);
    }
}
