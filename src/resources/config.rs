//! Arena configuration.
//!
//! Loaded once at startup from JSON. Lookup order:
//! 1. the path given with `--config`
//! 2. `<config dir>/astro_arena/arena.json`
//!    - Linux: ~/.config/astro_arena/
//!    - macOS: ~/Library/Application Support/astro_arena/
//!    - Windows: %APPDATA%/astro_arena/
//! 3. built-in defaults
//!
//! Missing fields fall back to their defaults. A file that cannot be read,
//! parsed or validated is logged and ignored.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default file name for arena configuration.
const CONFIG_FILE_NAME: &str = "arena.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse arena config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid arena config: {0}")]
    Invalid(String),
}

/// Ammunition and projectile settings shared by every ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Rounds per laser magazine.
    pub magazine_size: u32,
    /// Total laser rounds a ship starts with.
    pub laser_ammo: u32,
    /// Meteor shots a ship starts with.
    pub meteor_ammo: u32,
    /// Launch speed of every projectile (units/second).
    pub muzzle_speed: f32,
    /// Lasers that may be in flight at once.
    pub max_lasers: usize,
    /// Meteors that may be in flight at once.
    pub max_meteors: usize,
    /// Sprite scale of a meteor relative to a laser.
    pub meteor_scale: f32,
    pub laser_texture: String,
    pub meteor_texture: String,
    /// Prefix of the meteor ammo indicator textures (`ammo_0` .. `ammo_10`).
    pub meteor_indicator_prefix: String,
    /// Seconds before an unobstructed projectile is removed.
    pub projectile_lifetime: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            magazine_size: 12,
            laser_ammo: 60,
            meteor_ammo: 10,
            muzzle_speed: 600.0,
            max_lasers: 12,
            max_meteors: 10,
            meteor_scale: 3.0,
            laser_texture: "player_laser_shoot_1".to_string(),
            meteor_texture: "player_laser_shoot_1".to_string(),
            meteor_indicator_prefix: "ammo_".to_string(),
            projectile_lifetime: 3.0,
        }
    }
}

/// Ship body and handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub width: f32,
    pub height: f32,
    pub thrust: f32,
    /// Thrust multiplier while boosting.
    pub boost_multiplier: f32,
    /// Angular speed while a turn key is held (radians/second).
    pub turn_rate: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub max_speed: f32,
    /// Bounciness against arena walls; 1.0 keeps all speed.
    pub restitution: f32,
    /// Where the name label sits relative to the ship (x left, y below).
    pub name_offset: [f32; 2],
    pub name_font_size: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            width: 13.5,
            height: 10.0,
            thrust: 4000.0,
            boost_multiplier: 2.0,
            turn_rate: 4.0,
            linear_damping: 0.8,
            angular_damping: 2.0,
            max_speed: 500.0,
            restitution: 1.0,
            name_offset: [20.0, 45.0],
            name_font_size: 13.0,
        }
    }
}

/// Playable area, centred on the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaBounds {
    pub width: f32,
    pub height: f32,
    pub wall_thickness: f32,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self {
            width: 1600.0,
            height: 900.0,
            wall_thickness: 20.0,
        }
    }
}

impl ArenaBounds {
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width, self.height) / 2.0
    }
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub weapons: WeaponConfig,
    pub ship: ShipConfig,
    pub arena: ArenaBounds,
}

impl ArenaConfig {
    /// Loads the configuration, falling back to defaults on any failure.
    pub fn load(explicit_path: Option<&Path>) -> Self {
        let path = match explicit_path {
            Some(path) => path.to_path_buf(),
            None => {
                let Some(path) = Self::default_path() else {
                    warn!("Could not determine config directory, using default arena config");
                    return Self::default();
                };
                if !path.exists() {
                    info!("No arena config at {:?}, using defaults", path);
                    return Self::default();
                }
                path
            }
        };

        match Self::from_file(&path) {
            Ok(config) => {
                info!("Loaded arena config from {:?}", path);
                config
            }
            Err(e) => {
                error!("{}; using default arena config", e);
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the weapon and physics code assume never happen.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weapons = &self.weapons;
        if weapons.magazine_size == 0 {
            return Err(ConfigError::Invalid("magazine_size must be greater than 0".into()));
        }
        if !weapons.muzzle_speed.is_finite() || weapons.muzzle_speed <= 0.0 {
            return Err(ConfigError::Invalid("muzzle_speed must be a positive number".into()));
        }
        if weapons.max_lasers == 0 || weapons.max_meteors == 0 {
            return Err(ConfigError::Invalid("projectile capacities must be greater than 0".into()));
        }
        if weapons.projectile_lifetime <= 0.0 {
            return Err(ConfigError::Invalid("projectile_lifetime must be positive".into()));
        }
        if self.ship.width <= 0.0 || self.ship.height <= 0.0 {
            return Err(ConfigError::Invalid("ship size must be positive".into()));
        }
        if self.arena.width <= 0.0 || self.arena.height <= 0.0 {
            return Err(ConfigError::Invalid("arena size must be positive".into()));
        }
        Ok(())
    }

    /// Platform-specific location of the config file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("astro_arena");
            path.push(CONFIG_FILE_NAME);
            path
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_arena_constants() {
        let config = ArenaConfig::default();
        assert_eq!(config.weapons.magazine_size, 12);
        assert_eq!(config.weapons.laser_ammo, 60);
        assert_eq!(config.weapons.meteor_ammo, 10);
        assert_eq!(config.weapons.muzzle_speed, 600.0);
        assert_eq!(config.weapons.max_lasers, 12);
        assert_eq!(config.weapons.max_meteors, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ArenaConfig::from_json(r#"{ "weapons": { "laser_ammo": 24 } }"#).unwrap();
        assert_eq!(config.weapons.laser_ammo, 24);
        assert_eq!(config.weapons.magazine_size, 12);
        assert_eq!(config.ship, ShipConfig::default());
    }

    #[test]
    fn test_zero_magazine_is_rejected() {
        let result = ArenaConfig::from_json(r#"{ "weapons": { "magazine_size": 0 } }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_negative_ammo_fails_to_parse() {
        let result = ArenaConfig::from_json(r#"{ "weapons": { "laser_ammo": -5 } }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_explicit_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("astro_arena_missing_config.json");
        assert!(matches!(ArenaConfig::from_file(&path), Err(ConfigError::Io { .. })));
        assert_eq!(ArenaConfig::load(Some(&path)), ArenaConfig::default());
    }

    #[test]
    fn test_config_file_round_trip() {
        let path = std::env::temp_dir().join(format!("astro_arena_config_{}.json", std::process::id()));
        let mut config = ArenaConfig::default();
        config.weapons.meteor_ammo = 3;
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = ArenaConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }
}
