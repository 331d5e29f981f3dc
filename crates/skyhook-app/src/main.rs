//! Skyhook entry point.
//!
//! Run with: `cargo run -p skyhook-app -- [--headless --frames 600]`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use skyhook_app::{Session, run_headless, window};
use skyhook_config::{CliArgs, Config};
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir: Option<PathBuf> = args
        .config
        .clone()
        .or_else(|| dirs::config_dir().map(|dir| dir.join("skyhook")));

    let (mut config, load_error) = match config_dir.as_deref() {
        Some(dir) => match Config::load_or_create(dir) {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        },
        None => (Config::default(), None),
    };
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    skyhook_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {e}");
    }
    info!(
        "Window: {}x{} | Seed: {}",
        config.window.width, config.window.height, config.city.seed
    );

    let session = match Session::new(&config) {
        Ok(session) => session,
        Err(e) => {
            error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.headless {
        let summary = run_headless(session, args.frames);
        info!(
            frames = summary.frames,
            steps = summary.steps,
            displacement = summary.displacement(),
            attached_frames = summary.attached_frames,
            "Headless run finished: {}",
            summary.telemetry
        );
        return ExitCode::SUCCESS;
    }

    match window::run(config, session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Event loop failed: {e}");
            ExitCode::FAILURE
        }
    }
}
