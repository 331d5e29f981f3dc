//! Acceleration-limited walking and edge-triggered jumping for the player body.
//!
//! Each fixed step the controller probes for ground, steers horizontal
//! velocity toward the camera-relative target at a capped rate, and honours a
//! pending jump only while grounded. Vertical velocity is left to gravity
//! except on a jump, which overwrites it.

use glam::{Vec2, Vec3};
use skyhook_config::ControlConfig;
use skyhook_input::MoveCommand;
use skyhook_physics::{PhysicsWorld, PlayerBody};

/// What one locomotion step did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionReport {
    /// The ground probe hit something.
    pub grounded: bool,
    /// A jump was requested and honoured.
    pub jumped: bool,
    /// Horizontal velocity change applied this step.
    pub velocity_change: Vec3,
}

/// Drives the player body from movement commands.
#[derive(Debug, Clone)]
pub struct LocomotionController {
    config: ControlConfig,
}

impl LocomotionController {
    pub fn new(config: ControlConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    /// Casts straight down from the body centre; grounded when anything other
    /// than the player is within `ground_probe_distance`.
    pub fn is_grounded(&self, physics: &PhysicsWorld, body: &PlayerBody) -> bool {
        physics
            .cast_ray(
                body.position(physics),
                Vec3::NEG_Y,
                self.config.ground_probe_distance,
                body.ray_filter(),
            )
            .is_some()
    }

    /// Target horizontal velocity for camera-relative `axes` (x = right, y = forward).
    pub fn desired_velocity(&self, axes: Vec2, camera_forward: Vec3) -> Vec3 {
        let forward = Vec3::new(camera_forward.x, 0.0, camera_forward.z)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z);
        let right = forward.cross(Vec3::Y);
        (right * axes.x + forward * axes.y).normalize_or_zero() * self.config.max_move_speed
    }

    /// Runs one fixed step of locomotion.
    pub fn step(
        &self,
        physics: &mut PhysicsWorld,
        body: &PlayerBody,
        command: MoveCommand,
        camera_forward: Vec3,
        dt: f32,
    ) -> LocomotionReport {
        let grounded = self.is_grounded(physics, body);

        let desired = self.desired_velocity(command.axes, camera_forward);
        let velocity = body.velocity(physics);
        let horizontal = Vec3::new(velocity.x, 0.0, velocity.z);

        let accel = if grounded {
            self.config.ground_accel
        } else {
            self.config.air_accel
        };
        let velocity_change = (desired - horizontal).clamp_length_max(accel * dt.max(0.0));

        if velocity_change != Vec3::ZERO {
            body.apply_impulse(physics, velocity_change * body.mass(physics));
        }

        let jumped = command.jump && grounded;
        if jumped {
            let v = body.velocity(physics);
            body.set_velocity(physics, Vec3::new(v.x, self.config.jump_speed, v.z));
            tracing::debug!(speed = self.config.jump_speed, "Jump");
        } else if command.jump {
            tracing::trace!("Jump ignored while airborne");
        }

        LocomotionReport {
            grounded,
            jumped,
            velocity_change,
        }
    }
}
