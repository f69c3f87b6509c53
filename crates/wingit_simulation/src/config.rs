//! Tunable actor parameters (speeds, durations, ranges, damage, cooldown)
//!
//! Один `ActorConfig` на тип актора. Валидация строго при конструировании:
//! отрицательные длительности и т.п. — ошибка конфига, а не per-tick clamp.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration record consumed by locomotion, combat and health.
///
/// Field names serialize in camelCase (`walkSpeed`, `idleFidgetRange`, ...).
/// Missing fields fall back to [`ActorConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActorConfig {
    /// Base horizontal speed (m/s), also the base for dash speed
    pub walk_speed: f32,
    /// Horizontal speed while sprint is held (m/s)
    pub sprint_speed: f32,
    /// How fast `sprint_blend` travels between 0 and 1 (units/sec)
    pub sprint_blend_rate: f32,
    /// Maximum facing rotation (radians/sec)
    pub turn_rate: f32,
    /// Apex height of a jump (m)
    pub jump_height: f32,
    /// Gravity magnitude (m/s², positive)
    pub gravity: f32,
    /// Dash speed = multiplier × walk speed
    pub dash_speed_multiplier: f32,
    /// Dash length (seconds)
    pub dash_duration: f32,
    /// Idle fidget wait, sampled uniformly from `[min, max)` (seconds)
    pub idle_fidget_range: (f32, f32),
    /// Melee reach (m), attack only when strictly closer
    pub attack_range: f32,
    /// Minimum time between attacks (seconds)
    pub attack_cooldown: f32,
    pub attack_damage: f32,
    pub max_health: f32,
    /// Time a dead actor stays in the world before despawn (seconds)
    pub corpse_linger: f32,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            walk_speed: 4.0,
            sprint_speed: 7.0,
            sprint_blend_rate: 4.0,
            turn_rate: 10.0,
            jump_height: 2.0,
            gravity: 9.8,
            dash_speed_multiplier: 3.0,
            dash_duration: 0.25,
            idle_fidget_range: (30.0, 60.0),
            attack_range: 2.0,
            attack_cooldown: 1.5,
            attack_damage: 25.0,
            max_health: 100.0,
            corpse_linger: 0.0,
        }
    }
}

/// Rejected configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config field `{field}` must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("config field `{field}` must be > 0, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("config field `{field}` must be >= 0, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("config range `{field}` is invalid: min {min} > max {max}")]
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    #[error("failed to read actor config: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse actor config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ActorConfig {
    /// Parses a JSON config record and validates it.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: ActorConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("walkSpeed", self.walk_speed)?;
        non_negative("sprintSpeed", self.sprint_speed)?;
        positive("sprintBlendRate", self.sprint_blend_rate)?;
        positive("turnRate", self.turn_rate)?;
        non_negative("jumpHeight", self.jump_height)?;
        positive("gravity", self.gravity)?;
        positive("dashSpeedMultiplier", self.dash_speed_multiplier)?;
        positive("dashDuration", self.dash_duration)?;

        let (min, max) = self.idle_fidget_range;
        non_negative("idleFidgetRange", min)?;
        non_negative("idleFidgetRange", max)?;
        if min > max {
            return Err(ConfigError::InvalidRange {
                field: "idleFidgetRange",
                min,
                max,
            });
        }

        positive("attackRange", self.attack_range)?;
        non_negative("attackCooldown", self.attack_cooldown)?;
        non_negative("attackDamage", self.attack_damage)?;
        positive("maxHealth", self.max_health)?;
        non_negative("corpseLinger", self.corpse_linger)?;
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ActorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_negative_duration_rejected() {
        let config = ActorConfig {
            dash_duration: -0.5,
            ..Default::default()
        };

        match config.validate() {
            Err(ConfigError::NotPositive { field, .. }) => assert_eq!(field, "dashDuration"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_inverted_fidget_range_rejected() {
        let config = ActorConfig {
            idle_fidget_range: (60.0, 30.0),
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { field: "idleFidgetRange", .. })
        ));
    }

    #[test]
    fn test_nan_rejected() {
        let config = ActorConfig {
            gravity: f32::NAN,
            ..Default::default()
        };

        assert!(matches!(config.validate(), Err(ConfigError::NotFinite { .. })));
    }

    #[test]
    fn test_from_json_camel_case_with_defaults() {
        let config = ActorConfig::from_json(
            r#"{ "walkSpeed": 3.5, "idleFidgetRange": [10.0, 20.0], "attackCooldown": 1.5 }"#,
        )
        .expect("valid config");

        assert_eq!(config.walk_speed, 3.5);
        assert_eq!(config.idle_fidget_range, (10.0, 20.0));
        assert_eq!(config.attack_cooldown, 1.5);
        // Остальное — из Default
        assert_eq!(config.max_health, 100.0);
    }

    #[test]
    fn test_from_json_rejects_invalid_values() {
        let result = ActorConfig::from_json(r#"{ "maxHealth": 0.0 }"#);
        assert!(matches!(result, Err(ConfigError::NotPositive { field: "maxHealth", .. })));

        let result = ActorConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_file_missing_path_is_error() {
        let path = std::env::temp_dir().join("wingit_missing_dir/actor_config.json");

        let result = ActorConfig::from_file(&path);
        assert!(matches!(result, Err(ConfigError::Read(_))), "{:?}", result);
    }

    #[test]
    fn test_from_file_reads_config() {
        let path = std::env::temp_dir().join(format!("wingit_actor_config_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "attackDamage": 40.0 }"#).expect("write temp config");

        let result = ActorConfig::from_file(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(result.expect("valid config").attack_damage, 40.0);
    }
}
