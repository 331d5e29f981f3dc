//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Skyhook command-line arguments.
///
/// CLI values override settings loaded from `skyhook.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "skyhook", about = "Grapple-swing locomotion sandbox")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// City layout seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log filter, such as `debug` or `skyhook_player=trace`.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory holding `skyhook.ron`. Defaults to the platform config dir.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run a scripted session without opening a window.
    #[arg(long)]
    pub headless: bool,

    /// Number of frames to simulate in headless mode.
    #[arg(long, default_value_t = 600)]
    pub frames: u32,
}

impl Config {
    /// Layers command-line values over a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(seed) = args.seed {
            self.city.seed = seed;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            seed: Some(99),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.city.seed, 99);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_headless_flags() {
        let args = CliArgs::parse_from(["skyhook", "--headless", "--frames", "120", "--seed", "3"]);
        assert!(args.headless);
        assert_eq!(args.frames, 120);
        assert_eq!(args.seed, Some(3));
    }

    #[test]
    fn test_frames_default() {
        let args = CliArgs::parse_from(["skyhook"]);
        assert!(!args.headless);
        assert_eq!(args.frames, 600);
    }
}
