//! Game settings and tuning
//!
//! Stored as JSON: a file on native, LocalStorage on the web. Missing fields
//! fall back to their defaults, so older settings files keep loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{RinkGeometry, Tuning};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Storage(String),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Physics, rink and match tuning
    pub tuning: Tuning,
    /// Frame-rate cap for the tick driver (0 = uncapped)
    pub max_fps: f32,
    /// Start matches with the AI driving the away paddle
    pub ai_opponent: bool,
    /// Fixed RNG seed; `None` picks one per run
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            max_fps: MAX_FPS,
            ai_opponent: true,
            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "rink_hockey_settings";

    /// Tuning for a new simulation
    pub fn tuning(&self) -> Tuning {
        self.tuning.clone()
    }

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Pull out-of-range values back into something the simulation can run
    pub fn sanitized(mut self) -> Self {
        let puck = &mut self.tuning.puck;
        if !(puck.friction > 0.0 && puck.friction < 1.0) {
            log::warn!("Friction {} out of range, using default", puck.friction);
            puck.friction = PUCK_FRICTION;
        }
        if !(0.0..1.0).contains(&puck.bounce_damping) {
            log::warn!(
                "Bounce damping {} out of range, using default",
                puck.bounce_damping
            );
            puck.bounce_damping = PUCK_BOUNCE_DAMPING;
        }
        if puck.rest_epsilon <= 0.0 {
            puck.rest_epsilon = PUCK_REST_EPSILON;
        }

        if !self.tuning.rink.is_consistent() {
            log::warn!(
                "Rink geometry {:?} leaves no room to play, using default",
                self.tuning.rink
            );
            self.tuning.rink = RinkGeometry::default();
        }

        if self.tuning.paddle_speed <= 0.0 {
            self.tuning.paddle_speed = PADDLE_SPEED;
        }
        self.max_fps = self.max_fps.max(0.0);
        self
    }

    /// Load settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write settings to a JSON file
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load from `path`, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Decode an optional stored document (absent means nothing saved yet)
    pub fn from_stored(json: Option<String>) -> Result<Option<Self>, SettingsError> {
        json.map(|json| Self::from_json(&json)).transpose()
    }

    #[cfg(target_arch = "wasm32")]
    fn local_storage() -> Result<web_sys::Storage, SettingsError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| SettingsError::Storage("no LocalStorage".into()))
    }

    /// Settings stored in LocalStorage, if any (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load_local() -> Result<Option<Self>, SettingsError> {
        let json = Self::local_storage()?
            .get_item(Self::STORAGE_KEY)
            .map_err(|e| SettingsError::Storage(format!("{:?}", e)))?;
        Self::from_stored(json)
    }

    /// Load settings from LocalStorage, falling back to defaults (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match Self::load_local() {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), SettingsError> {
        let json = self.to_json()?;
        Self::local_storage()?
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|e| SettingsError::Storage(format!("{:?}", e)))?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"ai_opponent": false}"#).unwrap();
        assert!(!settings.ai_opponent);
        assert_eq!(settings.tuning, Tuning::default());
        assert_eq!(settings.max_fps, MAX_FPS);
    }

    #[test]
    fn test_nested_tuning_override() {
        let json = r#"{"tuning": {"rink": {"goal_mouth_half_width": 3.0, "goal_line": "Boundary"}}}"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.tuning.rink.goal_mouth_half_width, 3.0);
        assert_eq!(settings.tuning.rink.goal_line, crate::sim::GoalLine::Boundary);
        assert_eq!(settings.tuning.rink.half_width, RINK_WIDTH / 2.0);
    }

    #[test]
    fn test_sanitize_rejects_energy_gain() {
        let json = r#"{"tuning": {"puck": {"friction": 1.2, "bounce_damping": 1.5}}}"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.tuning.puck.friction, PUCK_FRICTION);
        assert_eq!(settings.tuning.puck.bounce_damping, PUCK_BOUNCE_DAMPING);
    }

    #[test]
    fn test_sanitize_rejects_cramped_rink() {
        let settings = Settings::from_json(r#"{"tuning": {"rink": {"half_height": 0.8}}}"#).unwrap();
        assert_eq!(settings.tuning.rink, RinkGeometry::default());

        let json = r#"{"tuning": {"rink": {"paddle_margin": 8.0}}}"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.tuning.rink, RinkGeometry::default());
    }

    #[test]
    fn test_stored_document_decoding() {
        assert_eq!(Settings::from_stored(None).unwrap(), None);

        let stored = Settings::from_stored(Some(r#"{"max_fps": 60.0}"#.into())).unwrap();
        assert_eq!(stored.map(|s| s.max_fps), Some(60.0));

        assert!(matches!(
            Settings::from_stored(Some("{".into())),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.seed = Some(42);
        settings.tuning.match_config.max_periods = 2;
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_or_default(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
    }
}
