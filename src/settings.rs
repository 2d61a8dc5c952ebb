//! Game settings and preferences
//!
//! Persisted separately from high scores in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::platform::storage;
use crate::tuning::{Skin, Tuning};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Game ===
    /// Which game variant to play
    pub skin: Skin,
    /// Difficulty level the first round starts at
    pub start_difficulty: u32,
    /// Replaces the skin's tuning when set
    pub custom_tuning: Option<Tuning>,
    /// Allow the hint key
    pub hints_enabled: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (no piece bounce or flashes)
    pub reduced_motion: bool,
    /// High contrast mode
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            skin: Skin::Gears,
            start_difficulty: 0,
            custom_tuning: None,
            hints_enabled: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,

            reduced_motion: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "tally_tiles_settings";

    /// Create settings for a skin
    pub fn from_skin(skin: Skin) -> Self {
        Self {
            skin,
            ..Self::default()
        }
    }

    /// Tuning to play with: the custom one if set, else the skin preset
    pub fn tuning(&self) -> Tuning {
        self.custom_tuning
            .clone()
            .unwrap_or_else(|| self.skin.tuning())
    }

    /// Effective sound volume (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    /// Parse settings from JSON and check the tuning they carry
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.master_volume) || !(0.0..=1.0).contains(&self.sfx_volume) {
            return Err(ConfigError::Invalid("volumes must be within 0.0-1.0".into()));
        }
        self.tuning().validate()
    }

    /// Load settings from storage, falling back to defaults
    pub fn load() -> Self {
        match storage::load_json::<Settings>(Self::STORAGE_KEY) {
            Some(settings) => match settings.validate() {
                Ok(()) => {
                    log::info!("Loaded settings ({})", settings.skin.as_str());
                    settings
                }
                Err(e) => {
                    log::warn!("Stored settings rejected: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        if storage::save_json(Self::STORAGE_KEY, self) {
            log::info!("Settings saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Operation;

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            skin: Skin::Tiles,
            start_difficulty: 3,
            muted: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"skin":"Batteries"}"#).unwrap();
        assert_eq!(settings.skin, Skin::Batteries);
        assert_eq!(settings.tuning().operation, Operation::Multiply);
        assert!(settings.hints_enabled);
    }

    #[test]
    fn test_custom_tuning_overrides_skin() {
        let settings = Settings::from_json(
            r#"{"skin":"Gears","custom_tuning":{"operation":"Subtract","target_max":20}}"#,
        )
        .unwrap();
        assert_eq!(settings.tuning().operation, Operation::Subtract);
        assert_eq!(settings.tuning().target_max, 20);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(Settings::from_json(r#"{"master_volume":3.0}"#).is_err());
        assert!(Settings::from_json(r#"{"custom_tuning":{"max_terms":0}}"#).is_err());
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_native_load_is_default() {
        assert_eq!(Settings::load(), Settings::default());
    }
}
