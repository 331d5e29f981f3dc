//! Fixed-timestep scheduler implementing the "Fix Your Timestep" pattern.
//!
//! Decouples simulation (fixed rate) from rendering (variable rate) using an
//! accumulator. Two limits keep a slow frame from snowballing: the frame
//! delta is clamped before it is accumulated, and each frame runs at most
//! `max_sub_steps` simulation steps. Time beyond the step budget stays in
//! the accumulator for later frames.

use std::time::Instant;

use skyhook_config::ControlConfig;
use tracing::{debug, warn};

/// What one scheduling pass did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    /// Frame delta after clamping, in seconds. Also the camera rig's `dt`.
    pub frame_dt: f64,
    /// Simulation steps run this frame.
    pub steps: u32,
    /// The raw frame delta exceeded the clamp.
    pub clamped: bool,
}

/// Fixed-timestep scheduler state.
///
/// Call [`tick`](Self::tick) once per rendered frame, or
/// [`advance`](Self::advance) with an explicit delta.
#[derive(Debug, Clone)]
pub struct FixedStepScheduler {
    previous_time: Instant,
    fixed_dt: f64,
    max_sub_steps: u32,
    max_frame_dt: f64,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl FixedStepScheduler {
    /// Creates a scheduler starting from the current instant.
    pub fn new(fixed_dt: f32, max_sub_steps: u32, max_frame_dt: f32) -> Self {
        Self {
            previous_time: Instant::now(),
            fixed_dt: f64::from(fixed_dt),
            max_sub_steps,
            max_frame_dt: f64::from(max_frame_dt),
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    pub fn from_config(config: &ControlConfig) -> Self {
        Self::new(config.fixed_dt, config.max_sub_steps, config.max_frame_dt)
    }

    /// Measures wall-clock time since the previous tick and advances by it.
    pub fn tick(&mut self, step_fn: impl FnMut(f32)) -> FrameTiming {
        let current_time = Instant::now();
        let frame_dt = current_time
            .duration_since(self.previous_time)
            .as_secs_f64();
        self.previous_time = current_time;
        self.advance(frame_dt, step_fn)
    }

    /// Accumulates `frame_dt` (clamped) and calls `step_fn(fixed_dt)` zero or
    /// more times, never more than `max_sub_steps`.
    pub fn advance(&mut self, frame_dt: f64, mut step_fn: impl FnMut(f32)) -> FrameTiming {
        let frame_dt = frame_dt.max(0.0);
        let clamped = frame_dt > self.max_frame_dt;
        let frame_dt = if clamped {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_dt * 1000.0,
                self.max_frame_dt * 1000.0
            );
            self.max_frame_dt
        } else {
            frame_dt
        };

        self.accumulator += frame_dt;

        let step_dt = self.fixed_dt as f32;
        let mut steps = 0;
        while self.accumulator >= self.fixed_dt && steps < self.max_sub_steps {
            step_fn(step_dt);
            self.total_sim_time += self.fixed_dt;
            self.accumulator -= self.fixed_dt;
            self.update_count += 1;
            steps += 1;
        }

        if self.accumulator >= self.fixed_dt {
            debug!(
                steps,
                backlog_ms = self.accumulator * 1000.0,
                "Sub-step budget exhausted, simulation falling behind"
            );
        }

        self.frame_count += 1;
        FrameTiming {
            frame_dt,
            steps,
            clamped,
        }
    }

    /// Restarts wall-clock measurement from now, e.g. after the window was hidden.
    pub fn reset_clock(&mut self) {
        self.previous_time = Instant::now();
    }

    /// Leftover simulation time carried to the next frame.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Fraction of a step pending in the accumulator, for render interpolation.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / self.fixed_dt
        } else {
            0.0
        }
    }

    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    pub fn max_sub_steps(&self) -> u32 {
        self.max_sub_steps
    }

    /// Returns the total number of frames scheduled.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the total number of simulation steps executed.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Returns the total simulation time in seconds.
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

impl Default for FixedStepScheduler {
    fn default() -> Self {
        Self::from_config(&ControlConfig::default())
    }
}
