//! Player rigid body: a rotation-locked dynamic capsule.
//!
//! [`PlayerBody`] is a pair of handles into the [`PhysicsWorld`]; every
//! accessor takes the world explicitly so controllers can share the handle.

use rapier3d::prelude::*;
use skyhook_config::PlayerBodyConfig;

use crate::PhysicsWorld;

/// Handles to the player's dynamic body and its capsule collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerBody {
    /// Handle to the dynamic rigid body in the physics world.
    pub body_handle: RigidBodyHandle,
    /// Handle to the capsule collider attached to the body.
    pub collider_handle: ColliderHandle,
    half_height: f32,
    radius: f32,
}

/// Spawns the player: dynamic body with locked rotations and a capsule collider.
pub fn spawn_player_body(physics: &mut PhysicsWorld, config: &PlayerBodyConfig) -> PlayerBody {
    let [x, y, z] = config.spawn;
    let body = RigidBodyBuilder::dynamic()
        .translation(Vector::new(x, y, z))
        .linear_damping(config.linear_damping)
        .angular_damping(config.angular_damping)
        .lock_rotations()
        .build();
    let body_handle = physics.rigid_body_set.insert(body);

    let collider = ColliderBuilder::capsule_y(config.half_height, config.radius)
        .friction(config.friction)
        .restitution(config.restitution)
        .mass(config.mass)
        .build();
    let collider_handle =
        physics
            .collider_set
            .insert_with_parent(collider, body_handle, &mut physics.rigid_body_set);

    tracing::debug!(x, y, z, mass = config.mass, "Spawned player body");

    PlayerBody {
        body_handle,
        collider_handle,
        half_height: config.half_height,
        radius: config.radius,
    }
}

impl PlayerBody {
    /// Capsule half-height of the cylindrical segment.
    pub fn half_height(&self) -> f32 {
        self.half_height
    }

    /// Capsule radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Distance from the body centre to the bottom of the capsule.
    pub fn foot_offset(&self) -> f32 {
        self.half_height + self.radius
    }

    /// World-space centre of the body.
    pub fn position(&self, physics: &PhysicsWorld) -> glam::Vec3 {
        let t = physics.rigid_body_set[self.body_handle].translation();
        glam::Vec3::new(t.x, t.y, t.z)
    }

    /// Linear velocity.
    pub fn velocity(&self, physics: &PhysicsWorld) -> glam::Vec3 {
        let v = physics.rigid_body_set[self.body_handle].linvel();
        glam::Vec3::new(v.x, v.y, v.z)
    }

    /// Overwrites the linear velocity.
    pub fn set_velocity(&self, physics: &mut PhysicsWorld, velocity: glam::Vec3) {
        physics.rigid_body_set[self.body_handle]
            .set_linvel(Vector::new(velocity.x, velocity.y, velocity.z), true);
    }

    /// Applies an instantaneous impulse; the velocity changes immediately.
    pub fn apply_impulse(&self, physics: &mut PhysicsWorld, impulse: glam::Vec3) {
        physics.rigid_body_set[self.body_handle]
            .apply_impulse(Vector::new(impulse.x, impulse.y, impulse.z), true);
    }

    /// Adds a force to the body's accumulator. It persists until
    /// [`reset_forces`](Self::reset_forces).
    pub fn add_force(&self, physics: &mut PhysicsWorld, force: glam::Vec3) {
        physics.rigid_body_set[self.body_handle]
            .add_force(Vector::new(force.x, force.y, force.z), true);
    }

    /// Clears accumulated user forces.
    pub fn reset_forces(&self, physics: &mut PhysicsWorld) {
        physics.rigid_body_set[self.body_handle].reset_forces(true);
    }

    /// Body mass in kilograms.
    pub fn mass(&self, physics: &PhysicsWorld) -> f32 {
        physics.rigid_body_set[self.body_handle].mass()
    }

    /// Ray filter that ignores the player's own body.
    pub fn ray_filter(&self) -> QueryFilter<'static> {
        QueryFilter::new().exclude_rigid_body(self.body_handle)
    }
}
