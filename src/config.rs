//! Simulation configuration
//!
//! Recognized options: `arenaWidth`, `arenaHeight`, `ballCount`,
//! `ballDiameter`, `maxInitialSpeed`, plus an optional `seed`.
//! Unknown keys are rejected; omitted keys take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct SimConfig {
    /// Arena width in logical units
    pub arena_width: f64,
    /// Arena height in logical units
    pub arena_height: f64,
    /// Number of balls spawned at start
    pub ball_count: usize,
    /// Ball diameter (every ball shares it)
    pub ball_diameter: f64,
    /// Upper bound of the integer initial speed range `1..=max`
    pub max_initial_speed: u32,
    /// RNG seed for initial positions/speeds (wall clock when absent)
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            ball_count: BALL_COUNT,
            ball_diameter: BALL_DIAMETER,
            max_initial_speed: MAX_INITIAL_SPEED,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; a missing file yields the defaults
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let config = Self::from_json(&json)?;
                log::info!("Loaded config from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Builder-style seed override
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Ball radius derived from the diameter
    pub fn ball_radius(&self) -> f64 {
        self.ball_diameter / 2.0
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !(self.arena_width.is_finite() && self.arena_width > 0.0) {
            return Err(invalid("arenaWidth", "must be positive and finite"));
        }
        if !(self.arena_height.is_finite() && self.arena_height > 0.0) {
            return Err(invalid("arenaHeight", "must be positive and finite"));
        }
        if !(self.ball_diameter.is_finite() && self.ball_diameter > 0.0) {
            return Err(invalid("ballDiameter", "must be positive and finite"));
        }
        if self.ball_diameter >= self.arena_width.min(self.arena_height) {
            return Err(invalid(
                "ballDiameter",
                format!(
                    "{} does not fit a {}x{} arena",
                    self.ball_diameter, self.arena_width, self.arena_height
                ),
            ));
        }
        if self.max_initial_speed < 1 {
            return Err(invalid("maxInitialSpeed", "must be at least 1"));
        }
        Ok(())
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bouncing_balls_config";

    /// Load config from LocalStorage, falling back to defaults
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                let config = Self::from_json(&json)?;
                log::info!("Loaded config from LocalStorage");
                return Ok(config);
            }
        }

        log::info!("Using default config");
        Ok(Self::default())
    }

    /// Load config from the fixed relative path
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_PATH)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> Error {
    Error::InvalidConfig {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = SimConfig::default();
        assert_eq!(config.arena_width, 1200.0);
        assert_eq!(config.arena_height, 600.0);
        assert_eq!(config.ball_count, 50);
        assert_eq!(config.ball_diameter, 20.0);
        assert_eq!(config.max_initial_speed, 5);
        assert_eq!(config.ball_radius(), 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SimConfig::from_json(r#"{ "ballCount": 12, "seed": 7 }"#).unwrap();
        assert_eq!(config.ball_count, 12);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.arena_width, ARENA_WIDTH);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = SimConfig::from_json(r#"{ "gravity": 9.8 }"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_oversized_ball_rejected() {
        let err = SimConfig::from_json(r#"{ "arenaHeight": 15, "ballDiameter": 20 }"#)
            .unwrap_err();
        match err {
            Error::InvalidConfig { field, .. } => assert_eq!(field, "ballDiameter"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_zero_speed_rejected() {
        let config = SimConfig {
            max_initial_speed: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = SimConfig::load_from("does/not/exist.json").unwrap();
        assert_eq!(config, SimConfig::default());
    }
}
