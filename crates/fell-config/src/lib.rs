//! Configuration system for the Fell Engine.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap and forward/backward compatible
//! serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, PlayerConfig, SimConfig, TerrainConfig, VisionConfig};
pub use error::ConfigError;
