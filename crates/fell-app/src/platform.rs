//! OS directory resolution for the sandbox binary.
//!
//! Config and log files follow platform conventions (XDG on Linux, Known
//! Folders on Windows, Library on macOS), all under one application
//! directory.

use std::path::{Path, PathBuf};
use std::{fmt, io};

/// Errors from platform directory handling.
#[derive(Debug)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    NoConfigDir,
    /// Directory creation failed.
    Io(io::Error),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoConfigDir => write!(f, "could not determine OS configuration directory"),
            Self::Io(e) => write!(f, "platform I/O error: {e}"),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PlatformError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

const APP_NAME: &str = "fell-engine";

/// Where the application keeps its files.
pub struct PlatformDirs {
    /// `config.ron` lives here.
    pub config_dir: PathBuf,
    /// JSON log output lives here.
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve platform-specific directories without creating them.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NoConfigDir`] if the OS does not expose a
    /// configuration directory.
    pub fn resolve() -> Result<Self, PlatformError> {
        let config_base = dirs::config_dir().ok_or(PlatformError::NoConfigDir)?;
        let app_dir = config_base.join(APP_NAME);
        Ok(Self {
            config_dir: app_dir.join("config"),
            log_dir: app_dir.join("logs"),
        })
    }

    /// Root everything under a custom directory. Serves the `--config`
    /// override and tests that must not touch real OS directories.
    pub fn resolve_with_root(root: &Path) -> Self {
        Self {
            config_dir: root.to_path_buf(),
            log_dir: root.join("logs"),
        }
    }

    /// Create the resolved directories on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Io`] if any directory cannot be created.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_yields_absolute_paths() {
        let dirs = PlatformDirs::resolve().expect("PlatformDirs::resolve() failed");
        assert!(dirs.config_dir.is_absolute(), "config_dir is not absolute");
        assert!(dirs.log_dir.is_absolute(), "log_dir is not absolute");
    }

    #[test]
    fn test_custom_root_keeps_config_at_root() {
        let dirs = PlatformDirs::resolve_with_root(Path::new("/tmp/fell-root"));
        assert_eq!(dirs.config_dir, Path::new("/tmp/fell-root"));
        assert_eq!(dirs.log_dir, Path::new("/tmp/fell-root/logs"));
    }

    #[test]
    fn test_directory_creation() {
        let tmp = std::env::temp_dir().join("fell-test-platform-dirs");
        let _ = std::fs::remove_dir_all(&tmp);

        let dirs = PlatformDirs::resolve_with_root(&tmp);
        dirs.create_dirs().expect("create_dirs failed for temp root");
        assert!(dirs.config_dir.exists(), "config_dir was not created");
        assert!(dirs.log_dir.exists(), "log_dir was not created");

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
