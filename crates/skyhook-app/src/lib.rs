//! Skyhook application: the play session, its fixed-step scheduler, and the
//! windowed and headless front ends.

pub mod game_loop;
pub mod headless;
pub mod hud;
pub mod session;
pub mod window;

pub use game_loop::{FixedStepScheduler, FrameTiming};
pub use headless::{HeadlessSummary, run_headless};
pub use hud::Telemetry;
pub use session::{RenderFrame, RopeSegment, Session};
