//! Procedural city: a ground slab plus randomly scattered static building boxes.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use rapier3d::prelude::{ColliderHandle, QueryFilter};
use skyhook_config::CityConfig;

use crate::PhysicsWorld;
use crate::player_body::PlayerBody;

/// Thickness of the ground slab; its top face sits at y = 0.
const GROUND_HALF_THICKNESS: f32 = 1.0;

/// An axis-aligned building resting on the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingBox {
    /// Centre of the box.
    pub center: glam::Vec3,
    /// Half extents along each axis.
    pub half_extents: glam::Vec3,
}

impl BuildingBox {
    /// Height of the roof above the ground.
    pub fn height(&self) -> f32 {
        self.center.y + self.half_extents.y
    }
}

/// Deterministic building placement for a seed.
#[derive(Debug, Clone, PartialEq)]
pub struct CityLayout {
    /// Half extent of the square ground slab.
    pub floor_half_extent: f32,
    /// Buildings that survived the spawn-clearance check.
    pub buildings: Vec<BuildingBox>,
}

impl CityLayout {
    /// Scatters up to `building_count` boxes on a disc around the origin.
    ///
    /// Each box gets a random footprint and height, a random angle, and a
    /// distance of `min_radius + u * city_radius`. Boxes whose centre lands
    /// inside `clear_radius` are skipped so the spawn area stays open.
    pub fn generate(config: &CityConfig) -> Self {
        let mut rng = Xoshiro256StarStar::seed_from_u64(config.seed);
        let (footprint_min, footprint_max) = config.footprint;
        let (height_min, height_max) = config.height;

        let mut buildings = Vec::with_capacity(config.building_count as usize);
        for _ in 0..config.building_count {
            let width: f32 = rng.gen_range(footprint_min..=footprint_max);
            let depth: f32 = rng.gen_range(footprint_min..=footprint_max);
            let height: f32 = rng.gen_range(height_min..=height_max);
            let angle: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
            let radius = config.min_radius + rng.gen_range(0.0..1.0_f32) * config.city_radius;

            let x = angle.cos() * radius;
            let z = angle.sin() * radius;
            if x.hypot(z) < config.clear_radius {
                continue;
            }

            buildings.push(BuildingBox {
                center: glam::Vec3::new(x, height * 0.5, z),
                half_extents: glam::Vec3::new(width * 0.5, height * 0.5, depth * 0.5),
            });
        }

        tracing::debug!(
            seed = config.seed,
            requested = config.building_count,
            placed = buildings.len(),
            "Generated city layout"
        );

        Self {
            floor_half_extent: config.floor_half_extent,
            buildings,
        }
    }
}

/// Colliders for a spawned city.
#[derive(Debug, Clone)]
pub struct City {
    /// The ground slab. Grapple casts never attach to it.
    pub ground_collider: ColliderHandle,
    /// One collider per building, parallel to `layout.buildings`.
    pub building_colliders: Vec<ColliderHandle>,
    /// The layout the colliders were built from.
    pub layout: CityLayout,
}

impl City {
    /// Ray filter for grapple casts: buildings only.
    pub fn grapple_filter(&self, player: &PlayerBody) -> QueryFilter<'static> {
        QueryFilter::new()
            .exclude_rigid_body(player.body_handle)
            .exclude_collider(self.ground_collider)
    }

    /// Whether `collider` belongs to a building.
    pub fn is_building(&self, collider: ColliderHandle) -> bool {
        self.building_colliders.contains(&collider)
    }
}

/// Inserts the ground slab and every building as fixed bodies.
pub fn spawn_city(physics: &mut PhysicsWorld, layout: CityLayout) -> City {
    let ground_collider = physics.add_fixed_cuboid(
        glam::Vec3::new(0.0, -GROUND_HALF_THICKNESS, 0.0),
        glam::Vec3::new(
            layout.floor_half_extent,
            GROUND_HALF_THICKNESS,
            layout.floor_half_extent,
        ),
    );

    let building_colliders = layout
        .buildings
        .iter()
        .map(|b| physics.add_fixed_cuboid(b.center, b.half_extents))
        .collect();

    tracing::info!(buildings = layout.buildings.len(), "City spawned");

    City {
        ground_collider,
        building_colliders,
        layout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawn_player_body;
    use skyhook_config::PlayerBodyConfig;

    #[test]
    fn test_same_seed_same_layout() {
        let config = CityConfig::default();
        assert_eq!(CityLayout::generate(&config), CityLayout::generate(&config));
    }

    #[test]
    fn test_different_seed_different_layout() {
        let a = CityLayout::generate(&CityConfig::default());
        let b = CityLayout::generate(&CityConfig {
            seed: CityConfig::default().seed + 1,
            ..Default::default()
        });
        assert_ne!(a, b);
    }

    #[test]
    fn test_spawn_area_stays_clear() {
        let config = CityConfig::default();
        let layout = CityLayout::generate(&config);
        assert!(!layout.buildings.is_empty());
        assert!(layout.buildings.len() <= config.building_count as usize);
        for b in &layout.buildings {
            let r = b.center.x.hypot(b.center.z);
            assert!(r >= config.clear_radius, "building at radius {r}");
            assert!(r <= config.min_radius + config.city_radius + 1e-3);
        }
    }

    #[test]
    fn test_buildings_rest_on_ground() {
        let config = CityConfig::default();
        for b in CityLayout::generate(&config).buildings {
            assert!((b.center.y - b.half_extents.y).abs() < 1e-4);
            assert!(b.height() >= config.height.0 - 1e-4);
            assert!(b.height() <= config.height.1 + 1e-4);
            assert!(b.half_extents.x * 2.0 >= config.footprint.0 - 1e-4);
            assert!(b.half_extents.z * 2.0 <= config.footprint.1 + 1e-4);
        }
    }

    #[test]
    fn test_zero_buildings() {
        let layout = CityLayout::generate(&CityConfig {
            building_count: 0,
            ..Default::default()
        });
        assert!(layout.buildings.is_empty());
    }

    #[test]
    fn test_grapple_filter_ignores_ground() {
        let mut physics = PhysicsWorld::default();
        let layout = CityLayout {
            floor_half_extent: 50.0,
            buildings: vec![BuildingBox {
                center: glam::Vec3::new(30.0, 10.0, 0.0),
                half_extents: glam::Vec3::new(5.0, 10.0, 5.0),
            }],
        };
        let city = spawn_city(&mut physics, layout);
        let player = spawn_player_body(&mut physics, &PlayerBodyConfig::default());
        physics.step();

        let origin = glam::Vec3::new(0.0, 5.0, 0.0);
        let filter = city.grapple_filter(&player);
        assert!(
            physics
                .cast_ray(origin, glam::Vec3::NEG_Y, 100.0, filter)
                .is_none(),
            "ground must not be grappleable"
        );

        let hit = physics
            .cast_ray(origin, glam::Vec3::X, 100.0, city.grapple_filter(&player))
            .expect("building ahead");
        assert!(city.is_building(hit.collider));
        assert!((hit.distance - 25.0).abs() < 1e-3);
    }
}
