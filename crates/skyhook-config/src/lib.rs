//! Configuration for Skyhook.
//!
//! [`ControlConfig`] carries the tuned locomotion, rope, and timestep constants
//! every controller reads. The surrounding [`Config`] adds window, player body,
//! camera rig, and city settings, persists to disk as RON, and accepts CLI
//! overrides via clap.

mod cli;
mod config;
mod control;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE, CameraRigConfig, CityConfig, Config, DebugConfig, PlayerBodyConfig, WindowConfig};
pub use control::ControlConfig;
pub use error::ConfigError;
