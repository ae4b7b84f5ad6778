//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Simulation loop settings.
    pub sim: SimConfig,
    /// Terrain generation settings.
    pub terrain: TerrainConfig,
    /// Player body and movement settings.
    pub player: PlayerConfig,
    /// Camera-vision pipeline settings.
    pub vision: VisionConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Simulation loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Longest frame time handed to the simulation, in seconds. Longer
    /// frames (debugger pauses, system stalls) are clamped to this.
    pub max_frame_time: f32,
    /// Seed for the particle RNG.
    pub particle_seed: u64,
    /// Frames the demo loop runs before shutting down (0 = run until
    /// the vision pipeline stops).
    pub frame_budget: u64,
}

/// Terrain generation configuration. Mirrors the sampler parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Seed for deterministic generation.
    pub seed: u32,
    /// Side length of the generation grid in world units.
    pub grid_size: f32,
    /// Peak height in world units.
    pub height_scale: f32,
    /// Spatial frequency of the broadest features.
    pub frequency: f64,
    /// Number of noise octaves to composite.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
}

/// Player body configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Body height in world units.
    pub height: f32,
    /// Radius of the body's collision sphere.
    pub radius: f32,
    /// Horizontal acceleration applied by movement input.
    pub movement_acceleration: f32,
    /// Vertical velocity set by a jump.
    pub jump_velocity: f32,
}

/// Camera-vision pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VisionConfig {
    /// Directory of PNG frames for the demo video source (None = use
    /// the built-in synthetic source).
    pub frame_dir: Option<PathBuf>,
    /// Capacity of each frame queue; producers block when full.
    pub queue_capacity: usize,
    /// Target hue band at the bottom of the hue circle, in degrees.
    pub hue_low_band: (f32, f32),
    /// Target hue band at the top of the hue circle, in degrees.
    pub hue_high_band: (f32, f32),
    /// Minimum saturation for a pixel to count as target-colored.
    pub min_saturation: f32,
    /// Minimum value (brightness) for a pixel to count.
    pub min_value: f32,
    /// Run the JPEG encode stage alongside detection.
    pub encode: bool,
    /// Encode byte budget as a fraction of the raw frame size.
    pub encode_budget_ratio: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log the per-second session snapshot (the headless stand-in for
    /// the info overlay).
    pub show_overlay: bool,
}

// --- Default implementations ---

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_frame_time: 0.25,
            particle_seed: 0,
            frame_budget: 600,
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            grid_size: 100.0,
            height_scale: 15.0,
            frequency: 0.01,
            octaves: 6,
            lacunarity: 2.0,
            persistence: 0.5,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            height: 2.0,
            radius: 0.3,
            movement_acceleration: 20.0,
            jump_velocity: 8.0,
        }
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            frame_dir: None,
            queue_capacity: 8,
            hue_low_band: (0.0, 20.0),
            hue_high_band: (340.0, 360.0),
            min_saturation: 0.4,
            min_value: 0.4,
            encode: false,
            encode_budget_ratio: 0.5,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_overlay: true,
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(|source| ConfigError::ReadError {
                    path: config_path.clone(),
                    source,
                })?;
            let config: Config =
                ron::from_str(&contents).map_err(|source| ConfigError::ParseError {
                    path: config_path.clone(),
                    source,
                })?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::WriteError {
            path: config_path,
            source,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(!ron_str.is_empty());
        assert!(ron_str.contains("height_scale: 15.0"));
        assert!(ron_str.contains("jump_velocity: 8.0"));
        assert!(ron_str.contains("queue_capacity: 8"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        // Config missing the `vision` section entirely
        let ron_str = "(sim: (), terrain: (), player: (), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.vision, VisionConfig::default());
    }

    #[test]
    fn test_partial_section_fills_remaining_fields() {
        let ron_str = "(player: (radius: 0.5))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.player.radius, 0.5);
        assert_eq!(config.player.height, 2.0);
        assert_eq!(config.player.jump_velocity, 8.0);
    }

    #[test]
    fn test_extra_field_ignored() {
        let ron_str = "(future_setting: true)";
        // RON with #[serde(default)] and deny_unknown_fields not set should accept this
        let result: Result<Config, _> = ron::from_str(ron_str);
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.terrain.seed = 99;
        config.sim.frame_budget = 1200;
        config.vision.frame_dir = Some(PathBuf::from("frames"));

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_error_names_offending_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "(sim: (max_frame_time:").unwrap();

        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(
            err.to_string().contains("config.ron"),
            "diagnostic should name the file: {err}"
        );
    }

    #[test]
    fn test_read_error_names_offending_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the read itself fail.
        std::fs::create_dir(dir.path().join("config.ron")).unwrap();

        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert!(
            err.to_string().contains("config.ron"),
            "diagnostic should name the file: {err}"
        );
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// This is a comment\n(\n  // Another comment\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }
}
