//! Command-line argument parsing for the Fell Engine.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Fell Engine command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "fell", about = "Fell Engine sandbox")]
pub struct CliArgs {
    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory of PNG frames to feed the vision pipeline.
    #[arg(long)]
    pub frames: Option<PathBuf>,

    /// Frames the demo loop runs before shutting down (0 = run until
    /// the vision pipeline stops).
    #[arg(long)]
    pub frame_budget: Option<u64>,

    /// Seed shared by terrain generation and the particle RNG.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref frames) = args.frames {
            self.vision.frame_dir = Some(frames.clone());
        }
        if let Some(budget) = args.frame_budget {
            self.sim.frame_budget = budget;
        }
        if let Some(seed) = args.seed {
            self.sim.particle_seed = seed;
            // Terrain seeds are 32-bit; the low bits are enough to vary
            // the surface.
            self.terrain.seed = seed as u32;
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
            config: None,
            log_level: Some("debug".to_string()),
            frames: Some(PathBuf::from("captures")),
            frame_budget: None,
            seed: Some(7),
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.debug.log_level, "debug");
        assert_eq!(config.vision.frame_dir, Some(PathBuf::from("captures")));
        assert_eq!(config.sim.particle_seed, 7);
        assert_eq!(config.terrain.seed, 7);
        // Non-overridden fields retain defaults
        assert_eq!(config.sim.frame_budget, 600);
        assert!(config.debug.show_overlay);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        let args = CliArgs {
            config: None,
            log_level: None,
            frames: None,
            frame_budget: None,
            seed: None,
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config, original);
    }
}
