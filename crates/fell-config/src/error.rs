//! Errors raised while loading or persisting configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Failure modes of config persistence.
///
/// The read/write/parse variants carry the offending path so the fatal
/// diagnostic printed at startup names the exact file to inspect.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {path} is not valid RON: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("failed to serialize config to RON: {0}")]
    SerializeError(#[source] ron::Error),
}
