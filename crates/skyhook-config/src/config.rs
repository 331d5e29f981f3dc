//! Tuning for a skyhook run, persisted as RON next to the user's config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::control::ControlConfig;
use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Locomotion, rope, and timestep tuning.
    pub control: ControlConfig,
    /// Player capsule and rigid-body settings.
    pub player: PlayerBodyConfig,
    /// Chase camera rig settings.
    pub camera: CameraRigConfig,
    /// Procedural city settings.
    pub city: CityConfig,
    /// Logging overrides.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Window title prefix; telemetry is appended at runtime.
    pub title: String,
}

/// Player capsule body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerBodyConfig {
    /// Capsule radius (m).
    pub radius: f32,
    /// Half-height of the capsule's cylindrical segment (m).
    pub half_height: f32,
    /// Collider friction coefficient.
    pub friction: f32,
    /// Collider restitution.
    pub restitution: f32,
    /// Body mass (kg).
    pub mass: f32,
    /// Linear damping applied by the rigid-body world.
    pub linear_damping: f32,
    /// Angular damping applied by the rigid-body world.
    pub angular_damping: f32,
    /// Spawn position of the body center.
    pub spawn: [f32; 3],
}

/// Chase camera rig tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraRigConfig {
    /// Follow distance when stationary (m).
    pub near_distance: f32,
    /// Follow distance at or above `far_speed` (m).
    pub far_distance: f32,
    /// Speed at which the follow distance reaches `far_distance` (m/s).
    pub far_speed: f32,
    /// Height of the follow anchor above the body center (m).
    pub height_offset: f32,
    /// Extra lift added after trailing back along the travel direction (m).
    pub lift: f32,
    /// Height of the look-at point above the body center (m).
    pub look_height: f32,
    /// Exponential smoothing rate (1/s).
    pub smoothing_rate: f32,
    /// Squared horizontal speed below which the camera keeps its own heading.
    pub heading_threshold_sq: f32,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Near clip plane (m).
    pub near_clip: f32,
    /// Far clip plane (m). Also bounds grapple ray casts.
    pub far_clip: f32,
    /// Initial camera position.
    pub start_position: [f32; 3],
}

/// Procedural city layout and world settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CityConfig {
    /// Seed for the layout generator.
    pub seed: u64,
    /// Vertical gravity (m/s², negative = down).
    pub gravity: f32,
    /// Half-extent of the square ground slab (m).
    pub floor_half_extent: f32,
    /// Number of placement attempts.
    pub building_count: u32,
    /// Outer placement radius, added to `min_radius` (m).
    pub city_radius: f32,
    /// Inner placement radius (m).
    pub min_radius: f32,
    /// Buildings whose center falls inside this radius are skipped (m).
    pub clear_radius: f32,
    /// Footprint side length range `(min, max)` (m).
    pub footprint: (f32, f32),
    /// Building height range `(min, max)` (m).
    pub height: (f32, f32),
}

/// Developer knobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Filter directive for the log subscriber, such as `"debug"`.
    pub log_level: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Skyhook".to_string(),
        }
    }
}

impl Default for PlayerBodyConfig {
    fn default() -> Self {
        Self {
            radius: 0.5,
            half_height: 1.0,
            friction: 0.1,
            restitution: 0.0,
            mass: 1.0,
            linear_damping: 0.28,
            angular_damping: 1.6,
            spawn: [0.0, 5.0, 0.0],
        }
    }
}

impl Default for CameraRigConfig {
    fn default() -> Self {
        Self {
            near_distance: 7.5,
            far_distance: 12.0,
            far_speed: 30.0,
            height_offset: 3.2,
            lift: 1.6,
            look_height: 1.3,
            smoothing_rate: 6.0,
            heading_threshold_sq: 0.05,
            fov_y_degrees: 70.0,
            near_clip: 0.1,
            far_clip: 600.0,
            start_position: [0.0, 7.0, 14.0],
        }
    }
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            gravity: -24.0,
            floor_half_extent: 180.0,
            building_count: 120,
            city_radius: 140.0,
            min_radius: 8.0,
            clear_radius: 18.0,
            footprint: (4.0, 11.0),
            height: (10.0, 50.0),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Validation ---

impl Config {
    /// Checks control invariants and the ranges the world builder relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.control.validate()?;

        if !(self.player.radius > 0.0 && self.player.half_height > 0.0) {
            return Err(ConfigError::Invalid {
                field: "player.radius",
                reason: "capsule dimensions must be greater than zero",
            });
        }
        if !(self.player.mass > 0.0) {
            return Err(ConfigError::Invalid {
                field: "player.mass",
                reason: "must be greater than zero",
            });
        }
        if !(self.camera.near_distance <= self.camera.far_distance) {
            return Err(ConfigError::Invalid {
                field: "camera.near_distance",
                reason: "must not exceed far_distance",
            });
        }
        if !(self.camera.far_speed > 0.0) {
            return Err(ConfigError::Invalid {
                field: "camera.far_speed",
                reason: "must be greater than zero",
            });
        }
        if !(self.camera.near_clip > 0.0 && self.camera.near_clip < self.camera.far_clip) {
            return Err(ConfigError::Invalid {
                field: "camera.near_clip",
                reason: "must be positive and less than far_clip",
            });
        }
        if !(self.city.footprint.0 > 0.0
            && self.city.footprint.0 <= self.city.footprint.1
            && self.city.footprint.1.is_finite())
        {
            return Err(ConfigError::Invalid {
                field: "city.footprint",
                reason: "must be a finite positive (min, max) range",
            });
        }
        if !(self.city.height.0 > 0.0
            && self.city.height.0 <= self.city.height.1
            && self.city.height.1.is_finite())
        {
            return Err(ConfigError::Invalid {
                field: "city.height",
                reason: "must be a finite positive (min, max) range",
            });
        }

        let reach = self.player.half_height + self.player.radius;
        if self.control.ground_probe_distance <= reach {
            log::warn!(
                "ground probe {:.2}m does not reach past the capsule bottom at {:.2}m; \
                 the player will never be grounded",
                self.control.ground_probe_distance,
                reach
            );
        }
        Ok(())
    }
}

/// File name used inside the config directory.
pub const CONFIG_FILE: &str = "skyhook.ron";

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Config {
    /// Reads `skyhook.ron` from `config_dir`, writing the defaults there first
    /// when it does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        if !path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Wrote default tuning to {}", path.display());
            return Ok(config);
        }
        let config = read_config(&path)?;
        log::info!("Tuning loaded from {}", path.display());
        Ok(config)
    }

    /// Writes this config as pretty RON, creating `config_dir` if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        let write_err = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_err)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let text = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Encode)?;
        std::fs::write(&path, text).map_err(write_err)
    }
}
