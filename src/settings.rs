//! Game settings
//!
//! Loaded from a JSON file next to the binary (or the path in
//! `NARUKAMI_SETTINGS`). Missing fields take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Rules ===
    /// Score a new game starts with
    pub starting_score: u64,
    /// Wager selected at the start of each round
    pub default_bet: u64,
    /// Wager buttons offered by presentation
    pub bet_presets: Vec<u64>,
    /// Clock ticks per round
    pub round_seconds: u32,

    // === Presentation hints (ms) ===
    pub result_display_ms: u32,
    pub win_flash_ms: u32,
    pub loss_flash_ms: u32,
    pub strike_highlight_ms: u32,

    // === Driver ===
    /// Fixed RNG seed; random per run when absent
    pub seed: Option<u64>,
    /// Real time between clock ticks (0 runs flat out)
    pub tick_interval_ms: u64,
    /// Rounds the headless driver plays before exiting
    pub autoplay_rounds: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_score: STARTING_SCORE,
            default_bet: DEFAULT_BET,
            bet_presets: BET_PRESETS.to_vec(),
            round_seconds: ROUND_SECONDS,

            result_display_ms: RESULT_DISPLAY_MS,
            win_flash_ms: WIN_FLASH_MS,
            loss_flash_ms: LOSS_FLASH_MS,
            strike_highlight_ms: STRIKE_HIGHLIGHT_MS,

            seed: None,
            tick_interval_ms: 1000,
            autoplay_rounds: 3,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "narukami.json";
    /// Environment variable overriding the settings path
    pub const PATH_ENV: &'static str = "NARUKAMI_SETTINGS";

    /// Check the values the engine relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.round_seconds == 0 {
            return Err(SettingsError::InvalidNonZero {
                field: "round_seconds",
            });
        }
        if self.default_bet == 0 {
            return Err(SettingsError::InvalidNonZero {
                field: "default_bet",
            });
        }
        if self.bet_presets.is_empty() {
            return Err(SettingsError::EmptyPresets);
        }
        if self.bet_presets.contains(&0) {
            return Err(SettingsError::InvalidNonZero {
                field: "bet_presets",
            });
        }
        Ok(())
    }

    /// Read and validate settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load settings from the configured path, falling back to defaults
    pub fn load() -> Self {
        let path = std::env::var(Self::PATH_ENV).unwrap_or_else(|_| Self::FILE_NAME.to_string());

        if !Path::new(&path).exists() {
            log::info!("No settings at {path}, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {path}");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings at {path}: {e}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("narukami-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.starting_score, 1000);
        assert_eq!(settings.round_seconds, 300);
        assert_eq!(settings.bet_presets, vec![50, 100, 250, 500]);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "round_seconds": 10, "seed": 7 }"#).unwrap();
        assert_eq!(settings.round_seconds, 10);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.default_bet, DEFAULT_BET);
    }

    #[test]
    fn test_validate_rejects_zeroes() {
        let settings = Settings {
            round_seconds: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidNonZero {
                field: "round_seconds"
            })
        ));

        let settings = Settings {
            bet_presets: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::EmptyPresets)));
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("settings.json");
        let settings = Settings {
            seed: Some(99),
            tick_interval_ms: 0,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_from_bad_file() {
        let path = temp_path("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Settings::load_from(&path),
            Err(SettingsError::Parse(_))
        ));
        let _ = fs::remove_file(&path);

        assert!(matches!(
            Settings::load_from(temp_path("missing.json")),
            Err(SettingsError::Io(_))
        ));
    }
}
