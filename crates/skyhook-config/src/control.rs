//! Tuned control constants shared by the scheduler and the player controllers.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Locomotion, rope, and timestep tuning.
///
/// Built once at startup and handed to each controller by value; nothing
/// mutates it afterwards. Call [`validate`](Self::validate) before use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlConfig {
    /// Horizontal acceleration cap while grounded (m/s²).
    pub ground_accel: f32,
    /// Horizontal acceleration cap while airborne (m/s²).
    pub air_accel: f32,
    /// Target horizontal speed with full directional input (m/s).
    pub max_move_speed: f32,
    /// Vertical velocity set on a jump (m/s).
    pub jump_speed: f32,
    /// Length of the downward ground probe measured from the body center (m).
    pub ground_probe_distance: f32,
    /// Rope spring stiffness (N per meter of stretch).
    pub rope_spring: f32,
    /// Rope damping along the rope direction (N per m/s).
    pub rope_damper: f32,
    /// Shortest allowed rope length (m).
    pub rope_min: f32,
    /// Longest allowed rope length (m).
    pub rope_max: f32,
    /// Rope length change per wheel notch (m).
    pub reel_speed: f32,
    /// Fixed simulation timestep (s).
    pub fixed_dt: f32,
    /// Upper bound on simulation steps per rendered frame.
    pub max_sub_steps: u32,
    /// Largest render-frame delta folded into the accumulator (s).
    pub max_frame_dt: f32,
}

/// Capsule half-height + radius + clearance of the default player body.
const DEFAULT_GROUND_PROBE: f32 = 1.0 + 0.5 + 0.15;

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            ground_accel: 48.0,
            air_accel: 10.0,
            max_move_speed: 18.0,
            jump_speed: 11.0,
            ground_probe_distance: DEFAULT_GROUND_PROBE,
            rope_spring: 95.0,
            rope_damper: 14.0,
            rope_min: 3.0,
            rope_max: 90.0,
            reel_speed: 1.4,
            fixed_dt: 1.0 / 60.0,
            max_sub_steps: 4,
            max_frame_dt: 0.1,
        }
    }
}

impl ControlConfig {
    /// Checks the invariants the controllers rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_dt > 0.0) {
            return Err(invalid("control.fixed_dt", "must be greater than zero"));
        }
        if self.max_sub_steps < 1 {
            return Err(invalid("control.max_sub_steps", "must be at least 1"));
        }
        if !(self.max_frame_dt >= self.fixed_dt) {
            return Err(invalid("control.max_frame_dt", "must be at least fixed_dt"));
        }
        if !(self.rope_min >= 0.0) {
            return Err(invalid("control.rope_min", "must not be negative"));
        }
        if !(self.rope_min < self.rope_max) {
            return Err(invalid("control.rope_min", "must be less than rope_max"));
        }
        if !(self.ground_accel >= 0.0 && self.air_accel >= 0.0) {
            return Err(invalid("control.ground_accel", "accelerations must not be negative"));
        }
        if !(self.max_move_speed >= 0.0) {
            return Err(invalid("control.max_move_speed", "must not be negative"));
        }
        if !(self.ground_probe_distance > 0.0) {
            return Err(invalid("control.ground_probe_distance", "must be greater than zero"));
        }
        if !(self.rope_spring >= 0.0 && self.rope_damper >= 0.0) {
            return Err(invalid("control.rope_spring", "rope gains must not be negative"));
        }
        Ok(())
    }

    /// Rope length bounds as `(min, max)`.
    pub fn rope_bounds(&self) -> (f32, f32) {
        (self.rope_min, self.rope_max)
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
