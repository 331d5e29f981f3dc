//! End-to-end session scenarios on a real physics world.

use glam::{Vec2, Vec3};
use skyhook_app::Session;
use skyhook_config::Config;
use skyhook_physics::{BuildingBox, CityLayout};
use skyhook_player::GrappleState;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

const DT: f32 = 1.0 / 60.0;

fn session_with(buildings: Vec<BuildingBox>) -> Session {
    let layout = CityLayout {
        floor_half_extent: 180.0,
        buildings,
    };
    Session::with_layout(&Config::default(), layout).expect("default config is valid")
}

fn run(session: &mut Session, steps: usize) {
    for _ in 0..steps {
        session.step(DT);
    }
}

/// Flat ground, player standing at the origin.
fn landed() -> Session {
    let mut session = session_with(Vec::new());
    run(&mut session, 120);
    session
}

/// A wall whose near face is the plane z = -35.
fn wall() -> BuildingBox {
    BuildingBox {
        center: Vec3::new(0.0, 10.0, -40.0),
        half_extents: Vec3::new(10.0, 10.0, 5.0),
    }
}

/// Player standing at the origin with the camera aimed at the wall.
fn facing_wall() -> Session {
    let mut session = session_with(vec![wall()]);
    run(&mut session, 120);
    let camera = session.camera_mut();
    camera.position = Vec3::new(0.0, 5.0, 5.0);
    camera.look_at(Vec3::new(0.0, 10.0, -35.0));
    session
}

fn screen_centre(session: &Session) -> Vec2 {
    session.viewport() * 0.5
}

#[test]
fn player_falls_and_lands_on_ground() {
    let session = landed();
    let p = session.player_position();
    assert!((p.y - 1.5).abs() < 0.1, "capsule should rest on y=0, centre y={}", p.y);
    assert!(session.last_report().grounded);
    assert!(session.player_velocity().length() < 0.1);
}

#[test]
fn walking_forward_follows_camera_and_respects_speed_cap() {
    let mut session = landed();
    session.key_down(KeyCode::KeyW);
    run(&mut session, 60);
    let p = session.player_position();
    let v = session.player_velocity();
    assert!(p.z < -5.0, "should walk toward -Z, z={}", p.z);
    assert!(p.x.abs() < 0.1);
    assert!(Vec3::new(v.x, 0.0, v.z).length() <= 18.0 + 1e-3);

    session.key_up(KeyCode::KeyW);
    run(&mut session, 60);
    let v = session.player_velocity();
    assert!(Vec3::new(v.x, 0.0, v.z).length() < 0.5, "should brake to a stop");
}

#[test]
fn first_step_gains_ground_accel_dt() {
    let mut session = landed();
    let before = session.player_velocity();
    session.key_down(KeyCode::KeyW);
    session.step(DT);
    let report = session.last_report();
    assert!(report.grounded);
    assert!((report.velocity_change.length() - 48.0 * DT).abs() < 1e-4);
    assert!(session.player_velocity().z < before.z);
}

#[test]
fn jump_is_consumed_once() {
    let mut session = landed();
    session.key_down(KeyCode::Space);
    session.step(DT);
    assert!(session.last_report().jumped);
    assert!(session.player_velocity().y > 9.0);

    // Still held, no auto-repeat.
    session.step(DT);
    assert!(!session.last_report().jumped);
}

#[test]
fn airborne_jump_is_ignored() {
    let mut session = session_with(Vec::new());
    session.key_down(KeyCode::Space);
    session.step(DT);
    assert!(!session.last_report().grounded);
    assert!(!session.last_report().jumped);
    session.key_up(KeyCode::Space);
    session.key_down(KeyCode::Space);
    session.step(DT);
    assert!(!session.last_report().jumped);
}

#[test]
fn grapple_attaches_to_building_and_pulls() {
    let mut session = facing_wall();
    let centre = screen_centre(&session);
    session.pointer_down(f64::from(centre.x), f64::from(centre.y));

    let GrappleState::Attached {
        anchor,
        rope_length,
    } = session.grapple_state()
    else {
        panic!("grapple should have attached to the wall");
    };
    assert!((anchor.z + 35.0).abs() < 1e-2, "anchor={anchor}");
    let distance = session.player_position().distance(anchor);
    assert!((rope_length - distance).abs() < 1e-3);

    for _ in 0..5 {
        session.wheel(MouseScrollDelta::LineDelta(0.0, 1.0));
    }
    session.step(DT);
    let reeled = session.grapple_state().rope_length().unwrap_or(0.0);
    assert!((reeled - (rope_length - 5.0 * 1.4)).abs() < 1e-3);

    let force = session.last_rope_force();
    assert!(force.y > 0.0 && force.z < 0.0, "pull toward anchor, force={force}");

    let telemetry = session.telemetry().to_string();
    assert!(telemetry.starts_with("Speed: "));
    assert!(telemetry.ends_with(" m"), "attached readout: {telemetry}");

    session.pointer_up();
    assert_eq!(session.grapple_state(), GrappleState::Idle);
    assert!(session.telemetry().to_string().ends_with("Rope: --"));
}

#[test]
fn ground_is_not_grappleable() {
    let mut session = landed();
    let camera = session.camera_mut();
    camera.position = Vec3::new(0.0, 10.0, 0.0);
    camera.look_at(Vec3::new(0.0, 0.0, -3.0));
    let centre = screen_centre(&session);
    session.pointer_down(f64::from(centre.x), f64::from(centre.y));
    assert_eq!(session.grapple_state(), GrappleState::Idle);
    assert!(session.grapple_held(), "the hold is tracked even on a miss");
    session.step(DT);
    assert_eq!(session.last_rope_force(), Vec3::ZERO);
}

#[test]
fn pointer_leave_releases_grapple() {
    let mut session = facing_wall();
    let centre = screen_centre(&session);
    session.pointer_down(f64::from(centre.x), f64::from(centre.y));
    assert!(session.grapple_state().is_attached());
    session.pointer_leave();
    assert_eq!(session.grapple_state(), GrappleState::Idle);
    assert!(!session.grapple_held());
}

#[test]
fn other_mouse_buttons_do_not_fire() {
    let mut session = facing_wall();
    let centre = screen_centre(&session);
    session.pointer_moved(f64::from(centre.x), f64::from(centre.y));
    session.pointer_button(MouseButton::Right, ElementState::Pressed);
    assert_eq!(session.grapple_state(), GrappleState::Idle);
}

#[test]
fn releasing_hold_stops_force() {
    let mut session = facing_wall();
    let centre = screen_centre(&session);
    session.pointer_down(f64::from(centre.x), f64::from(centre.y));
    session.pointer_up();
    session.step(DT);
    assert_eq!(session.last_rope_force(), Vec3::ZERO);
}

#[test]
fn focus_loss_drops_keys_and_grapple() {
    let mut session = facing_wall();
    let centre = screen_centre(&session);
    session.key_down(KeyCode::KeyW);
    session.pointer_down(f64::from(centre.x), f64::from(centre.y));
    session.focus_lost();
    assert_eq!(session.grapple_state(), GrappleState::Idle);
    session.step(DT);
    assert!(session.last_report().velocity_change.length() < 1e-3);
    assert_eq!(session.last_rope_force(), Vec3::ZERO);
}

#[test]
fn present_reports_rope_and_camera() {
    let mut session = facing_wall();
    let centre = screen_centre(&session);
    session.pointer_down(f64::from(centre.x), f64::from(centre.y));
    let frame = session.present(DT);
    let rope = frame.rope.expect("rope while attached");
    assert_eq!(rope.player, frame.player_position);
    assert_eq!(Some(rope.anchor), session.grapple_state().anchor());
    assert_eq!(frame.camera_position, session.camera().position);
    assert_eq!(frame.telemetry.rope_length, session.grapple_state().rope_length());
}

#[test]
fn camera_rig_trails_the_player() {
    let mut session = landed();
    session.key_down(KeyCode::KeyW);
    for _ in 0..180 {
        session.step(DT);
        session.present(DT);
    }
    let player = session.player_position();
    let camera = session.camera().position;
    assert!(camera.z > player.z, "camera stays behind a -Z runner");
    assert!(camera.y > player.y);
    let horizontal = Vec2::new(camera.x - player.x, camera.z - player.z).length();
    assert!(horizontal > 5.0, "trail distance {horizontal}");
}

#[test]
fn resize_only_changes_projection() {
    let mut session = landed();
    let before = session.player_position();
    session.resize(800, 800);
    assert_eq!(session.viewport(), Vec2::new(800.0, 800.0));
    assert!((session.camera().aspect_ratio - 1.0).abs() < 1e-6);
    assert_eq!(session.player_position(), before);
    session.resize(0, 600);
    assert_eq!(session.viewport(), Vec2::new(800.0, 800.0));
}

#[test]
fn invalid_control_config_is_rejected() {
    let mut config = Config::default();
    config.control.rope_min = 120.0;
    assert!(Session::new(&config).is_err());
}

#[test]
fn default_city_session_builds() {
    let session = Session::new(&Config::default()).expect("default config is valid");
    assert!(!session.city().layout.buildings.is_empty());
    assert_eq!(session.step_count(), 0);
}

#[test]
fn inverted_city_range_is_rejected_not_panicked() {
    let mut config = Config::default();
    config.city.footprint = (11.0, 4.0);
    assert!(matches!(
        Session::new(&config),
        Err(skyhook_config::ConfigError::Invalid { field: "city.footprint", .. })
    ));
}

#[test]
fn wheel_while_idle_does_not_shorten_next_rope() {
    let mut session = facing_wall();
    session.wheel(MouseScrollDelta::LineDelta(0.0, 1.0));
    let centre = screen_centre(&session);
    session.pointer_down(f64::from(centre.x), f64::from(centre.y));
    let attached = session.grapple_state().rope_length();
    assert!(attached.is_some());
    session.step(DT);
    assert_eq!(session.grapple_state().rope_length(), attached);
}

#[test]
fn notches_queued_before_release_do_not_carry_over() {
    let mut session = facing_wall();
    let centre = screen_centre(&session);
    session.pointer_down(f64::from(centre.x), f64::from(centre.y));
    session.wheel(MouseScrollDelta::LineDelta(0.0, 1.0));
    session.pointer_up();
    session.pointer_down(f64::from(centre.x), f64::from(centre.y));
    let attached = session.grapple_state().rope_length();
    session.step(DT);
    assert_eq!(session.grapple_state().rope_length(), attached);
}
