//! World configuration
//!
//! Every tunable constant of the simulation lives here. A config is copied
//! into the session when it is built and never changes afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading a [`WorldConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// World constants fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,

    // === Actor ===
    pub actor_width: f32,
    pub actor_height: f32,
    /// Spawn x; spawn y is always "standing on the floor"
    pub spawn_x: f32,

    // === Physics (per frame) ===
    pub gravity: f32,
    /// Negative = upward
    pub jump_speed: f32,
    pub move_speed: f32,

    // === Session ===
    pub timer_interval_ms: u32,
    pub initial_lives: u32,
    pub initial_time: i32,
    pub pickup_time_bonus: i32,

    // === Driver ===
    pub frame_interval_ms: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            actor_width: ACTOR_WIDTH,
            actor_height: ACTOR_HEIGHT,
            spawn_x: SPAWN_X,

            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,
            move_speed: MOVE_SPEED,

            timer_interval_ms: TIMER_INTERVAL_MS,
            initial_lives: INITIAL_LIVES,
            initial_time: INITIAL_TIME,
            pickup_time_bonus: PICKUP_TIME_BONUS,

            frame_interval_ms: FRAME_INTERVAL_MS,
        }
    }
}

impl WorldConfig {
    /// Parse a config from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(ConfigError::Invalid("world size must be positive"));
        }
        if !(self.actor_width > 0.0 && self.actor_height > 0.0) {
            return Err(ConfigError::Invalid("actor size must be positive"));
        }
        if self.actor_width > self.world_width || self.actor_height > self.world_height {
            return Err(ConfigError::Invalid("actor does not fit in the world"));
        }
        if self.spawn_x < 0.0 || self.spawn_x + self.actor_width > self.world_width {
            return Err(ConfigError::Invalid("spawn point lies outside the world"));
        }
        if self.gravity <= 0.0 {
            return Err(ConfigError::Invalid("gravity must pull downward"));
        }
        if self.jump_speed >= 0.0 {
            return Err(ConfigError::Invalid("jump speed must point upward"));
        }
        if self.move_speed <= 0.0 {
            return Err(ConfigError::Invalid("move speed must be positive"));
        }
        if self.timer_interval_ms == 0 || self.frame_interval_ms <= 0.0 {
            return Err(ConfigError::Invalid("intervals must be positive"));
        }
        if self.initial_lives == 0 || self.initial_time <= 0 {
            return Err(ConfigError::Invalid("lives and time must be positive"));
        }
        Ok(())
    }

    /// Top-left y of an actor standing on the floor
    pub fn spawn_y(&self) -> f32 {
        self.world_height - self.actor_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = WorldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn_y(), 570.0);
        assert_eq!(config.initial_lives, 3);
        assert_eq!(config.initial_time, 30);
        assert_eq!(config.pickup_time_bonus, 10);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = WorldConfig::from_json(r#"{ "initial_lives": 5, "gravity": 0.5 }"#).unwrap();
        assert_eq!(config.initial_lives, 5);
        assert_eq!(config.gravity, 0.5);
        assert_eq!(config.move_speed, MOVE_SPEED);
        assert_eq!(config.world_width, WORLD_WIDTH);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            WorldConfig::from_json(r#"{ "jump_speed": 5.0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            WorldConfig::from_json(r#"{ "initial_lives": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            WorldConfig::from_json(r#"{ "spawn_x": 790.0 }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(matches!(
            WorldConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
