//! Windowless run with a scripted input sequence.
//!
//! Every synthetic frame lasts exactly one fixed step, so a run of N frames
//! simulates N steps.

use glam::Vec3;
use tracing::info;
use winit::keyboard::KeyCode;

use crate::game_loop::FixedStepScheduler;
use crate::hud::Telemetry;
use crate::session::Session;

/// Frame numbers at which scripted inputs fire.
const WALK_START: u32 = 0;
const JUMP_PRESS: u32 = 45;
const JUMP_RELEASE: u32 = 50;
const GRAPPLE_PRESS: u32 = 90;
const REEL_IN: u32 = 150;
const GRAPPLE_RELEASE: u32 = 300;

/// Outcome of a headless run.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSummary {
    pub frames: u32,
    pub steps: u64,
    pub start: Vec3,
    pub end: Vec3,
    /// Frames during which the grapple was attached.
    pub attached_frames: u32,
    pub telemetry: Telemetry,
}

impl HeadlessSummary {
    /// Straight-line distance between start and end positions.
    pub fn displacement(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Walks forward, jumps, fires the grapple slightly above screen centre,
/// reels in, then lets go.
pub fn run_headless(mut session: Session, frames: u32) -> HeadlessSummary {
    let mut scheduler = FixedStepScheduler::from_config(session.control());
    let frame_dt = scheduler.fixed_dt();
    let start = session.player_position();
    let viewport = session.viewport();
    let mut attached_frames = 0;
    let mut telemetry = session.telemetry();

    for frame in 0..frames {
        match frame {
            WALK_START => session.key_down(KeyCode::KeyW),
            JUMP_PRESS => session.key_down(KeyCode::Space),
            JUMP_RELEASE => session.key_up(KeyCode::Space),
            GRAPPLE_PRESS => {
                session.pointer_down(f64::from(viewport.x) * 0.5, f64::from(viewport.y) * 0.3)
            }
            REEL_IN => session.wheel(winit::event::MouseScrollDelta::LineDelta(0.0, 1.0)),
            GRAPPLE_RELEASE => session.pointer_up(),
            _ => {}
        }

        let timing = scheduler.advance(frame_dt, |dt| session.step(dt));
        let render = session.present(timing.frame_dt as f32);
        telemetry = render.telemetry;
        if render.rope.is_some() {
            attached_frames += 1;
        }

        if frame % 60 == 59 {
            let p = render.player_position;
            info!(
                frame = frame + 1,
                x = p.x,
                y = p.y,
                z = p.z,
                "{telemetry}"
            );
        }
    }

    HeadlessSummary {
        frames,
        steps: scheduler.update_count(),
        start,
        end: session.player_position(),
        attached_frames,
        telemetry,
    }
}
