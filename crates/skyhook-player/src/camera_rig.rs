//! Velocity-driven chase camera that trails the player each render frame.

use glam::Vec3;
use skyhook_config::CameraRigConfig;

use crate::camera::ChaseCamera;

/// Positions a [`ChaseCamera`] behind the player's direction of travel.
#[derive(Debug, Clone)]
pub struct CameraRig {
    config: CameraRigConfig,
}

impl CameraRig {
    pub fn new(config: CameraRigConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CameraRigConfig {
        &self.config
    }

    /// Fraction of the remaining gap closed in `dt` seconds.
    pub fn smoothing_factor(&self, dt: f32) -> f32 {
        1.0 - (-dt.max(0.0) * self.config.smoothing_rate).exp()
    }

    /// Camera distance behind the player; widens with speed.
    pub fn follow_distance(&self, speed: f32) -> f32 {
        let t = (speed / self.config.far_speed).clamp(0.0, 1.0);
        self.config.near_distance + (self.config.far_distance - self.config.near_distance) * t
    }

    /// Horizontal direction to trail along: travel direction when moving,
    /// otherwise the camera's current heading.
    pub fn trail_direction(&self, camera: &ChaseCamera, velocity: Vec3) -> Vec3 {
        let horizontal = Vec3::new(velocity.x, 0.0, velocity.z);
        if horizontal.length_squared() >= self.config.heading_threshold_sq {
            horizontal.normalize()
        } else {
            camera.horizontal_forward()
        }
    }

    /// Where the camera wants to be for a player at `position`.
    pub fn desired_position(&self, position: Vec3, trail: Vec3, follow_distance: f32) -> Vec3 {
        position + Vec3::Y * (self.config.height_offset + self.config.lift)
            - trail * follow_distance
    }

    /// Eases the camera toward its chase position and aims it just above the
    /// player. Returns the player's speed.
    pub fn update(&self, camera: &mut ChaseCamera, position: Vec3, velocity: Vec3, dt: f32) -> f32 {
        let speed = velocity.length();
        let trail = self.trail_direction(camera, velocity);
        let desired = self.desired_position(position, trail, self.follow_distance(speed));

        camera.position = camera.position.lerp(desired, self.smoothing_factor(dt));
        camera.look_at(position + Vec3::Y * self.config.look_height);
        speed
    }
}
