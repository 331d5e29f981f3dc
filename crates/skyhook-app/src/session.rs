//! One play session: the physics world, the city, the player, and the
//! controllers that drive them.
//!
//! Input handlers only record intent (and attach/release the grapple, which
//! needs the camera ray at click time). [`Session::step`] consumes intent at
//! the fixed rate; [`Session::present`] runs once per rendered frame.

use glam::{Mat4, Quat, Vec2, Vec3};
use skyhook_config::{Config, ConfigError, ControlConfig};
use skyhook_input::{InputIntent, PointerAction, RawKeyEvent};
use skyhook_physics::{City, CityLayout, PhysicsWorld, PlayerBody, spawn_city, spawn_player_body};
use skyhook_player::{
    CameraRig, ChaseCamera, GrappleController, GrappleState, LocomotionController,
    LocomotionReport,
};
use tracing::{debug, info};
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

use crate::hud::Telemetry;

/// The rope as a line from the anchor to the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RopeSegment {
    pub anchor: Vec3,
    pub player: Vec3,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderFrame {
    pub player_position: Vec3,
    /// Player orientation. Rotations are locked, so this stays upright.
    pub player_rotation: Quat,
    /// Present while the grapple is attached.
    pub rope: Option<RopeSegment>,
    pub camera_position: Vec3,
    pub camera_rotation: Quat,
    pub view_projection: Mat4,
    pub telemetry: Telemetry,
}

/// Owns all simulation state for one run.
pub struct Session {
    control: ControlConfig,
    physics: PhysicsWorld,
    city: City,
    player: PlayerBody,
    locomotion: LocomotionController,
    grapple: GrappleController,
    camera: ChaseCamera,
    rig: CameraRig,
    intent: InputIntent,
    viewport: Vec2,
    last_report: LocomotionReport,
    last_rope_force: Vec3,
    step_count: u64,
}

impl Session {
    /// Builds a session with a city generated from `config.city`.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        // Generation samples the configured ranges, so they must be valid first.
        config.validate()?;
        Self::with_layout(config, CityLayout::generate(&config.city))
    }

    /// Builds a session around an explicit city layout.
    pub fn with_layout(config: &Config, layout: CityLayout) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut physics = PhysicsWorld::from_config(&config.control, &config.city);
        let city = spawn_city(&mut physics, layout);
        let player = spawn_player_body(&mut physics, &config.player);
        // Prime the broad phase so the first ray casts see the city.
        physics.step();

        let viewport = Vec2::new(config.window.width as f32, config.window.height as f32);
        let camera = ChaseCamera::from_config(&config.camera, viewport.x / viewport.y.max(1.0));

        info!(
            buildings = city.layout.buildings.len(),
            fixed_dt = config.control.fixed_dt,
            max_sub_steps = config.control.max_sub_steps,
            "Session ready"
        );

        Ok(Self {
            control: config.control,
            physics,
            city,
            player,
            locomotion: LocomotionController::new(config.control),
            grapple: GrappleController::new(config.control),
            camera,
            rig: CameraRig::new(config.camera.clone()),
            intent: InputIntent::new(),
            viewport,
            last_report: LocomotionReport::default(),
            last_rope_force: Vec3::ZERO,
            step_count: 0,
        })
    }

    // ── Input ───────────────────────────────────────────────────────

    /// Key press or release from the window.
    pub fn key(&mut self, event: RawKeyEvent) {
        self.intent.on_key(event);
    }

    pub fn key_down(&mut self, code: KeyCode) {
        self.key(RawKeyEvent::pressed(code));
    }

    pub fn key_up(&mut self, code: KeyCode) {
        self.key(RawKeyEvent::released(code));
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.intent.on_pointer_moved(x, y);
    }

    /// Fire press attempts an attach at the cursor; fire release detaches.
    pub fn pointer_button(&mut self, button: MouseButton, state: ElementState) {
        match self.intent.on_pointer_button(button, state) {
            Some(PointerAction::Fire(pixel)) => {
                self.attempt_grapple(pixel);
            }
            Some(PointerAction::Release) => self.release_grapple(),
            None => {}
        }
    }

    /// Moves the cursor to `(x, y)` and presses the fire button.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.pointer_moved(x, y);
        self.pointer_button(MouseButton::Left, ElementState::Pressed);
    }

    pub fn pointer_up(&mut self) {
        self.pointer_button(MouseButton::Left, ElementState::Released);
    }

    /// Cursor left the window: the hold is lost and the grapple detaches.
    pub fn pointer_leave(&mut self) {
        self.intent.on_pointer_leave();
        self.release_grapple();
    }

    /// Wheel notch. Ignored unless the grapple is attached.
    pub fn wheel(&mut self, delta: MouseScrollDelta) {
        if self.grapple.is_attached() {
            self.intent.on_wheel(delta);
        }
    }

    /// Window lost focus: held keys are forgotten and the grapple detaches.
    pub fn focus_lost(&mut self) {
        self.intent.on_focus_lost();
        self.release_grapple();
    }

    /// Viewport resize. Only the camera projection changes.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = Vec2::new(width as f32, height as f32);
        self.camera.set_aspect_ratio(self.viewport.x, self.viewport.y);
        debug!(width, height, "Viewport resized");
    }

    /// Detaches and drops reel notches queued for the old rope.
    fn release_grapple(&mut self) {
        self.grapple.release();
        self.intent.take_reel();
    }

    /// Casts from the camera through `pixel` and hooks the first building.
    pub fn attempt_grapple(&mut self, pixel: Vec2) -> bool {
        let (origin, dir) = self.camera.screen_ray(pixel, self.viewport);
        self.grapple.attempt_attach(
            &self.physics,
            &self.player,
            origin,
            dir,
            self.camera.far,
            self.city.grapple_filter(&self.player),
        )
    }

    // ── Simulation ──────────────────────────────────────────────────

    /// One fixed simulation step.
    pub fn step(&mut self, dt: f32) {
        let reel = self.intent.take_reel();
        for _ in 0..reel.unsigned_abs() {
            self.grapple.reel(reel.signum());
        }

        self.player.reset_forces(&mut self.physics);

        let command = self.intent.take_move_command();
        self.last_report = self.locomotion.step(
            &mut self.physics,
            &self.player,
            command,
            self.camera.forward(),
            dt,
        );
        self.last_rope_force =
            self.grapple
                .apply_force(&mut self.physics, &self.player, self.intent.grapple_held());

        self.physics.step();
        self.step_count += 1;
    }

    /// Runs the camera rig for this render frame and snapshots the scene.
    pub fn present(&mut self, frame_dt: f32) -> RenderFrame {
        let position = self.player.position(&self.physics);
        let velocity = self.player.velocity(&self.physics);
        let speed = self.rig.update(&mut self.camera, position, velocity, frame_dt);

        let state = self.grapple.state();
        RenderFrame {
            player_position: position,
            player_rotation: Quat::IDENTITY,
            rope: state.anchor().map(|anchor| RopeSegment {
                anchor,
                player: position,
            }),
            camera_position: self.camera.position,
            camera_rotation: self.camera.rotation,
            view_projection: self.camera.view_projection_matrix(),
            telemetry: Telemetry {
                speed,
                rope_length: state.rope_length(),
            },
        }
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn telemetry(&self) -> Telemetry {
        let state = self.grapple.state();
        Telemetry {
            speed: self.player_velocity().length(),
            rope_length: state.rope_length(),
        }
    }

    pub fn control(&self) -> &ControlConfig {
        &self.control
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics
    }

    pub fn player(&self) -> &PlayerBody {
        &self.player
    }

    pub fn player_position(&self) -> Vec3 {
        self.player.position(&self.physics)
    }

    pub fn player_velocity(&self) -> Vec3 {
        self.player.velocity(&self.physics)
    }

    pub fn city(&self) -> &City {
        &self.city
    }

    pub fn camera(&self) -> &ChaseCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut ChaseCamera {
        &mut self.camera
    }

    pub fn grapple_state(&self) -> GrappleState {
        self.grapple.state()
    }

    pub fn grapple_held(&self) -> bool {
        self.intent.grapple_held()
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Locomotion result of the latest step.
    pub fn last_report(&self) -> LocomotionReport {
        self.last_report
    }

    /// Rope force applied in the latest step.
    pub fn last_rope_force(&self) -> Vec3 {
        self.last_rope_force
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }
}
