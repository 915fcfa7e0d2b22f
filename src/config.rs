//! One-shot structured configuration.
//!
//! The configuration loader parses a flat JSON object once at startup and
//! hands the core a plain numeric struct; nothing re-validates ranges inside
//! the simulation. Missing fields fall back to the reference values, unknown
//! fields are the loader's concern.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Flat player tuning. Field names match the external config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub acceleration: f32,
    pub drag: f32,
    pub max_speed: f32,
    pub turn_speed: f32,
    pub max_fallspeed: f32,
    pub jump_vel: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 16.0,
            height: 28.0,
            acceleration: PLAYER_ACCELERATION,
            drag: PLAYER_DRAG,
            max_speed: PLAYER_MAX_SPEED,
            turn_speed: PLAYER_TURN_SPEED,
            max_fallspeed: PLAYER_MAX_FALL_SPEED,
            jump_vel: PLAYER_JUMP_VELOCITY,
        }
    }
}

impl PlayerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Level-wide tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub gravity: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
        }
    }
}

impl LevelConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference() {
        let cfg = PlayerConfig::default();
        assert_eq!(cfg.acceleration, 0.1);
        assert_eq!(cfg.drag, 0.8);
        assert_eq!(cfg.max_speed, 0.8);
        assert_eq!(cfg.turn_speed, 0.7);
        assert_eq!(cfg.max_fallspeed, 13.0);
        assert_eq!(cfg.jump_vel, 5.5);
        assert_eq!(LevelConfig::default().gravity, 0.275);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = PlayerConfig::from_json(r#"{"acceleration": 0.2, "max_speed": 1.5}"#).unwrap();
        assert_eq!(cfg.acceleration, 0.2);
        assert_eq!(cfg.max_speed, 1.5);
        assert_eq!(cfg.drag, 0.8);
        assert_eq!(cfg.width, 16.0);
    }

    #[test]
    fn test_full_json_roundtrip() {
        let cfg = PlayerConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back = PlayerConfig::from_json(&json).unwrap();
        assert_eq!(back.jump_vel, cfg.jump_vel);
    }

    #[test]
    fn test_level_config_gravity() {
        let cfg = LevelConfig::from_json(r#"{"gravity": 0.245}"#).unwrap();
        assert_eq!(cfg.gravity, 0.245);
    }

    #[test]
    fn test_malformed_json_is_loader_error() {
        assert!(PlayerConfig::from_json("{acceleration").is_err());
    }
}
