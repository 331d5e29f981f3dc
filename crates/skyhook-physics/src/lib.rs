//! Rapier world for the city and the player capsule.
//!
//! Wraps the Rapier 3D physics engine behind a single [`PhysicsWorld`] that
//! owns all simulation state and exposes a minimal API: step, ray cast, and
//! the player body handle in [`player_body`].

pub mod city;
pub mod player_body;

pub use city::{BuildingBox, City, CityLayout, spawn_city};
pub use player_body::{PlayerBody, spawn_player_body};
pub use rapier3d::geometry::ColliderHandle;
pub use rapier3d::pipeline::QueryFilter;

use rapier3d::prelude::*;
use skyhook_config::{CityConfig, ControlConfig};

/// Default vertical gravity (m/s²).
pub const DEFAULT_GRAVITY: f32 = -24.0;

/// Nearest hit reported by [`PhysicsWorld::cast_ray`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space hit point.
    pub point: glam::Vec3,
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// Collider that was hit.
    pub collider: ColliderHandle,
}

/// The Rapier world the player swings through. Fields stay public so tests
/// and spawners can insert bodies directly.
pub struct PhysicsWorld {
    pub gravity: Vector,
    /// Carries the fixed `dt` every step advances by.
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    /// Doubles as the ray-cast acceleration structure; only refreshed by `step`.
    pub broad_phase: BroadPhaseBvh,
    pub narrow_phase: NarrowPhase,
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    // Joints are unused but the pipeline requires both sets.
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    /// Creates an empty world with gravity `(0, gravity_y, 0)` stepping by `dt` seconds.
    pub fn with_settings(gravity_y: f32, dt: f32) -> Self {
        let integration_parameters = IntegrationParameters {
            dt,
            ..Default::default()
        };

        Self {
            gravity: Vector::new(0.0, gravity_y, 0.0),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Creates an empty world using the configured gravity and fixed timestep.
    pub fn from_config(control: &ControlConfig, city: &CityConfig) -> Self {
        Self::with_settings(city.gravity, control.fixed_dt)
    }

    /// Advances the simulation by one fixed timestep.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    /// Fixed timestep in seconds.
    pub fn dt(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// Sets the world gravity vector.
    pub fn set_gravity(&mut self, x: f32, y: f32, z: f32) {
        self.gravity = Vector::new(x, y, z);
    }

    /// Returns the current gravity as `(x, y, z)`.
    pub fn gravity(&self) -> (f32, f32, f32) {
        (self.gravity.x, self.gravity.y, self.gravity.z)
    }

    /// Inserts a fixed cuboid centred at `center` and returns its collider.
    pub fn add_fixed_cuboid(
        &mut self,
        center: glam::Vec3,
        half_extents: glam::Vec3,
    ) -> ColliderHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(Vector::new(center.x, center.y, center.z))
            .build();
        let handle = self.rigid_body_set.insert(body);
        let collider =
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set)
    }

    /// Casts a ray against solid colliders and returns the nearest hit within
    /// `max_distance`.
    ///
    /// `dir` need not be normalized; a zero direction never hits. The broad
    /// phase only knows about colliders that existed at the last [`step`](Self::step).
    pub fn cast_ray(
        &self,
        origin: glam::Vec3,
        dir: glam::Vec3,
        max_distance: f32,
        filter: QueryFilter<'_>,
    ) -> Option<RayHit> {
        let dir = dir.try_normalize()?;
        let ray = Ray::new(
            Vector::new(origin.x, origin.y, origin.z),
            Vector::new(dir.x, dir.y, dir.z),
        );

        let query_pipeline = self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.rigid_body_set,
            &self.collider_set,
            filter,
        );

        let (collider, distance) = query_pipeline.cast_ray(&ray, max_distance, true)?;
        Some(RayHit {
            point: origin + dir * distance,
            distance,
            collider,
        })
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::with_settings(DEFAULT_GRAVITY, 1.0 / 60.0)
    }
}
