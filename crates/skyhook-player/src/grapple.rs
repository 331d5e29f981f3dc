//! Grapple hook: attach to buildings, reel the rope, and pull with a
//! spring-damper that only acts while the rope is stretched.

use glam::Vec3;
use skyhook_config::ControlConfig;
use skyhook_physics::{PhysicsWorld, PlayerBody, QueryFilter};

/// Extra rope paid out on attach so the line starts slack.
pub const ATTACH_SLACK: f32 = 0.5;

/// Below this anchor distance no direction is defined and no force is applied.
const MIN_ROPE_DISTANCE: f32 = 1e-4;

/// Grapple state. The anchor and rope length only exist while attached.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum GrappleState {
    #[default]
    Idle,
    Attached {
        /// World-space hook point on a building.
        anchor: Vec3,
        /// Rest length of the rope; always within the configured bounds.
        rope_length: f32,
    },
}

impl GrappleState {
    pub fn is_attached(&self) -> bool {
        matches!(self, Self::Attached { .. })
    }

    pub fn anchor(&self) -> Option<Vec3> {
        match *self {
            Self::Attached { anchor, .. } => Some(anchor),
            Self::Idle => None,
        }
    }

    pub fn rope_length(&self) -> Option<f32> {
        match *self {
            Self::Attached { rope_length, .. } => Some(rope_length),
            Self::Idle => None,
        }
    }
}

/// Spring-damper pull from `position` toward `anchor`.
///
/// Zero when the rope is slack (`distance <= rope_length`) or the player sits
/// on the anchor. The damper adds pull while moving away along the rope and
/// the total magnitude is floored at zero, so the rope never pushes.
pub fn rope_force(
    anchor: Vec3,
    position: Vec3,
    velocity: Vec3,
    rope_length: f32,
    spring: f32,
    damper: f32,
) -> Vec3 {
    let offset = position - anchor;
    let distance = offset.length();
    if distance < MIN_ROPE_DISTANCE {
        return Vec3::ZERO;
    }
    let outward = offset / distance;

    let stretch = distance - rope_length;
    if stretch <= 0.0 {
        return Vec3::ZERO;
    }

    let along_rope = velocity.dot(outward);
    let magnitude = (spring * stretch + damper * along_rope).max(0.0);
    -outward * magnitude
}

/// Owns the grapple state machine.
#[derive(Debug, Clone)]
pub struct GrappleController {
    config: ControlConfig,
    state: GrappleState,
}

impl GrappleController {
    pub fn new(config: ControlConfig) -> Self {
        Self {
            config,
            state: GrappleState::Idle,
        }
    }

    pub fn state(&self) -> GrappleState {
        self.state
    }

    pub fn is_attached(&self) -> bool {
        self.state.is_attached()
    }

    /// Casts along `dir` from `origin` and hooks the first building hit.
    ///
    /// `filter` must exclude the player and the ground. A miss leaves the
    /// grapple idle. Returns whether the hook attached.
    pub fn attempt_attach(
        &mut self,
        physics: &PhysicsWorld,
        body: &PlayerBody,
        origin: Vec3,
        dir: Vec3,
        max_distance: f32,
        filter: QueryFilter<'_>,
    ) -> bool {
        match physics.cast_ray(origin, dir, max_distance, filter) {
            Some(hit) => {
                self.attach_at(hit.point, body.position(physics));
                true
            }
            None => {
                tracing::debug!("Grapple missed");
                self.state = GrappleState::Idle;
                false
            }
        }
    }

    /// Hooks `anchor` with the rope set to the current distance plus slack.
    pub fn attach_at(&mut self, anchor: Vec3, player_position: Vec3) {
        let (rope_min, rope_max) = self.config.rope_bounds();
        let slack_min = (rope_min + ATTACH_SLACK).min(rope_max);
        let rope_length = player_position.distance(anchor).clamp(slack_min, rope_max);
        self.state = GrappleState::Attached {
            anchor,
            rope_length,
        };
        tracing::info!(
            anchor_x = anchor.x,
            anchor_y = anchor.y,
            anchor_z = anchor.z,
            rope_length,
            "Grapple attached"
        );
    }

    /// Detaches. Safe to call in any state.
    pub fn release(&mut self) {
        if self.state.is_attached() {
            tracing::info!("Grapple released");
        }
        self.state = GrappleState::Idle;
    }

    /// One wheel notch: positive pays rope out, negative reels in.
    /// No effect while idle.
    pub fn reel(&mut self, sign: i32) {
        let (rope_min, rope_max) = self.config.rope_bounds();
        if let GrappleState::Attached { rope_length, .. } = &mut self.state {
            let delta = sign.signum() as f32 * self.config.reel_speed;
            *rope_length = (*rope_length + delta).clamp(rope_min, rope_max);
            tracing::trace!(rope_length = *rope_length, "Rope reeled");
        }
    }

    /// Adds this step's rope force to the body when attached and `held`.
    /// Returns the force applied.
    pub fn apply_force(&self, physics: &mut PhysicsWorld, body: &PlayerBody, held: bool) -> Vec3 {
        let GrappleState::Attached {
            anchor,
            rope_length,
        } = self.state
        else {
            return Vec3::ZERO;
        };
        if !held {
            return Vec3::ZERO;
        }

        let force = rope_force(
            anchor,
            body.position(physics),
            body.velocity(physics),
            rope_length,
            self.config.rope_spring,
            self.config.rope_damper,
        );
        if force != Vec3::ZERO {
            body.add_force(physics, force);
        }
        force
    }
}
