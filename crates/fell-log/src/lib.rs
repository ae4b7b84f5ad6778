//! Structured logging and tracing for the Fell Engine.
//!
//! Provides structured, span-based, filterable logging via the `tracing`
//! ecosystem. Supports console output with timestamps and module paths,
//! plus JSON file logging in debug builds for post-mortem analysis.
//! Integrates with the configuration system for runtime log level control.

use fell_config::Config;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber for the Fell Engine.
///
/// Sets up structured logging with:
/// - Console output with timestamps, module paths, and severity levels
/// - JSON file logging in debug builds (optional)
/// - Environment-based filtering (respects RUST_LOG)
/// - Integration with the config system's log_level setting
///
/// # Arguments
///
/// * `log_dir` - Optional directory for JSON log files (debug builds only)
/// * `debug_build` - Whether this is a debug build (enables file logging)
/// * `config` - Optional configuration to use for log level override
///
/// # Examples
///
/// ```no_run
/// use fell_log::init_logging;
/// use fell_config::Config;
///
/// // Basic initialization
/// init_logging(None, false, None);
///
/// // With file logging in debug mode
/// let log_dir = std::path::Path::new("./logs");
/// init_logging(Some(log_dir), true, None);
///
/// // With config override
/// let config = Config::default();
/// init_logging(None, false, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    // Determine the filter string
    let filter_str = if let Some(config) = config {
        if !config.debug.log_level.is_empty() {
            config.debug.log_level.clone()
        } else {
            "info".to_string()
        }
    } else {
        "info".to_string()
    };

    // Base filter: info by default, overridable via RUST_LOG env var
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    // Console layer: human-readable format with timestamps. Thread names
    // matter here because the vision workers are named.
    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    // In debug builds, also log to a file for post-mortem analysis
    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join("fell.log"))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false) // No ANSI color codes in file output
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json(); // Structured JSON for machine parsing

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Create an `EnvFilter` with the default filter string.
///
/// Enables `info` for all targets. Useful for testing and for getting
/// consistent default behavior.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new("info")
}
