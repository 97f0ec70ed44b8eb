//! Tuning configuration for the inventory, carry and locomotion systems
//!
//! Everything is loaded from one JSON file. Every field has a default
//! matching the values the game shipped with, so a partial file (or no
//! file at all) is valid.
//!
//! ```json
//! {
//!   "inventory": { "columns": 4, "capacity": 8 },
//!   "carry": { "spring": 150.0, "break_distance": 2.0 }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::carry::{CarryProfile, WeightClass};
use crate::inventory::StackOverflowPolicy;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub inventory: InventoryConfig,
    pub carry: CarryConfig,
    pub locomotion: LocomotionConfig,
}

/// Grid layout of the player inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Fixed column count
    pub columns: u32,
    /// Total cell capacity; rows = ceil(capacity / columns)
    pub capacity: u32,
    /// What happens when a new stack would exceed `max_stack_size`
    pub overflow_policy: StackOverflowPolicy,
    /// Number of weapon loadout slots
    pub loadout_slots: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        InventoryConfig {
            columns: 4,
            capacity: 8,
            overflow_policy: StackOverflowPolicy::Preserve,
            loadout_slots: 3,
        }
    }
}

/// Spring-damper and release tuning for the carry controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarryConfig {
    /// Force per meter of position error
    pub spring: f32,
    /// Force per m/s of velocity error between hand and body
    pub damper: f32,
    /// Linear and angular damping applied while held (drag-when-held bodies)
    pub hold_damping: f32,
    /// Impulse magnitude applied along the view direction on throw
    pub throw_impulse: f32,
    /// Separation beyond which the body is released automatically
    pub break_distance: f32,
    /// Maximum grab distance from the camera
    pub reach_distance: f32,
    /// Fixed physics step in seconds
    pub fixed_timestep: f32,
    pub light: CarryProfile,
    pub heavy: CarryProfile,
}

impl Default for CarryConfig {
    fn default() -> Self {
        CarryConfig {
            spring: 150.0,
            damper: 10.0,
            hold_damping: 10.0,
            throw_impulse: 15.0,
            break_distance: 2.0,
            reach_distance: 3.0,
            fixed_timestep: 0.02,
            light: CarryProfile::LIGHT,
            heavy: CarryProfile::HEAVY,
        }
    }
}

impl CarryConfig {
    /// The configured carry profile for a weight class
    pub fn profile_for(&self, weight: WeightClass) -> CarryProfile {
        match weight {
            WeightClass::Light => self.light,
            WeightClass::Heavy => self.heavy,
        }
    }
}

/// Player movement speeds and stamina
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub crouch_speed: f32,
    pub max_stamina: f32,
    /// Stamina lost per second of sprinting
    pub stamina_drain_rate: f32,
    /// Stamina regained per second once the regen delay has passed
    pub stamina_regen_rate: f32,
    /// Seconds after the last sprint before stamina regenerates
    pub stamina_regen_delay: f32,
    /// Fraction of max stamina needed to recover from exhaustion
    pub exhaustion_recovery: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        LocomotionConfig {
            walk_speed: 4.0,
            run_speed: 7.0,
            crouch_speed: 2.0,
            max_stamina: 100.0,
            stamina_drain_rate: 15.0,
            stamina_regen_rate: 10.0,
            stamina_regen_delay: 1.5,
            exhaustion_recovery: 0.2,
        }
    }
}

impl GameConfig {
    /// Loads and validates a config file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the config at `path`, falling back to defaults when the file does not exist
    ///
    /// Parse and validation errors are still reported; only a missing file
    /// is treated as "use defaults".
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(GameConfig::default());
        }
        Self::load_from_file(path)
    }

    /// Default location: `<user config dir>/holdfast/holdfast.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("holdfast").join("holdfast.json"))
            .unwrap_or_else(|| PathBuf::from("./holdfast.json"))
    }

    /// Rejects values the systems cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inventory.columns == 0 {
            return Err(invalid("inventory.columns", "must be at least 1"));
        }
        if self.inventory.capacity == 0 {
            return Err(invalid("inventory.capacity", "must be at least 1"));
        }
        if !(self.carry.fixed_timestep > 0.0) {
            return Err(invalid("carry.fixed_timestep", "must be positive"));
        }
        if !(self.carry.break_distance > 0.0) {
            return Err(invalid("carry.break_distance", "must be positive"));
        }
        for (field, profile) in [("carry.light", &self.carry.light), ("carry.heavy", &self.carry.heavy)] {
            if !(profile.speed_multiplier > 0.0 && profile.speed_multiplier <= 1.0) {
                return Err(invalid(field, "speed_multiplier must be in (0, 1]"));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "carry": { "break_distance": 4.0 } }"#).unwrap();

        assert_eq!(config.carry.break_distance, 4.0);
        assert_eq!(config.carry.spring, 150.0);
        assert_eq!(config.inventory.columns, 4);
        assert_eq!(config.inventory.capacity, 8);
        assert_eq!(config.locomotion.run_speed, 7.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overflow_policy_from_json() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "inventory": { "overflow_policy": "split" } }"#).unwrap();

        assert_eq!(config.inventory.overflow_policy, StackOverflowPolicy::Split);
    }

    #[test]
    fn test_validate_rejects_zero_columns() {
        let mut config = GameConfig::default();
        config.inventory.columns = 0;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "inventory.columns", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_timestep() {
        let mut config = GameConfig::default();
        config.carry.fixed_timestep = 0.0;
        assert!(config.validate().is_err());

        config.carry.fixed_timestep = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("holdfast-does-not-exist.json");
        let config = GameConfig::load_or_default(&path).unwrap();

        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_load_from_file_round_trip() {
        let path = std::env::temp_dir().join(format!("holdfast-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "inventory": { "columns": 6, "capacity": 24 } }"#).unwrap();

        let config = GameConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.inventory.columns, 6);
        assert_eq!(config.inventory.capacity, 24);
    }

    #[test]
    fn test_sample_config_loads() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/holdfast.json");
        let config = GameConfig::load_from_file(&path).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.inventory.columns, 4);
        assert_eq!(config.carry.reach_distance, 3.0);
        assert_eq!(config.carry.heavy.speed_multiplier, 0.5);
    }

    #[test]
    fn test_default_path_file_name() {
        assert!(GameConfig::default_path().ends_with("holdfast.json"));
    }

    #[test]
    fn test_profile_for_weight() {
        let mut carry = CarryConfig::default();
        carry.heavy.speed_multiplier = 0.4;

        assert_eq!(carry.profile_for(WeightClass::Light), CarryProfile::LIGHT);
        assert_eq!(carry.profile_for(WeightClass::Heavy).speed_multiplier, 0.4);
        assert!(!carry.profile_for(WeightClass::Heavy).allow_sprint);
    }
}
