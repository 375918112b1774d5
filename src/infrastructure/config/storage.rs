//! Locating, reading and seeding the configuration file.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::{info, warn};

use super::app_config::AppConfig;

const APP_NAME: &str = "artcache";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration storage errors.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("no config directory available for this platform")]
    NoConfigDir,
    #[error("config file io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not serialize default config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Resolves and loads `config.toml`.
#[derive(Debug, Clone)]
pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// Uses the platform config directory for `artcache`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if no home directory can be found.
    pub fn new() -> Result<Self, ConfigError> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| Self::with_dir(dirs.config_dir().to_path_buf()))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Uses `config_dir` instead of the platform directory.
    #[must_use]
    pub const fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// The file `load_config` reads: `path_override` if given, otherwise
    /// `config.toml` inside the config directory.
    #[must_use]
    pub fn config_path(&self, path_override: Option<&Path>) -> PathBuf {
        path_override.map_or_else(|| self.config_dir.join(CONFIG_FILE_NAME), Path::to_path_buf)
    }

    /// Loads configuration from [`Self::config_path`].
    ///
    /// A missing file is seeded with defaults. A malformed file is left
    /// untouched and defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or the defaults
    /// cannot be written.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let path = self.config_path(path_override);

        match fs::read_to_string(&path) {
            Ok(content) => Ok(toml::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Malformed config, using defaults");
                AppConfig::default()
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "Writing default config");
                let config = AppConfig::default();
                write_atomic(&path, &toml::to_string_pretty(&config)?)?;
                Ok(config)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<(), ConfigError> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(content.as_bytes())?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::ArtworkConfig;
    use tempfile::tempdir;

    #[test]
    fn test_config_path_prefers_override() {
        let manager = StorageManager::with_dir(PathBuf::from("/etc/artcache"));

        assert_eq!(
            manager.config_path(None),
            PathBuf::from("/etc/artcache/config.toml")
        );
        assert_eq!(
            manager.config_path(Some(Path::new("/tmp/other.toml"))),
            PathBuf::from("/tmp/other.toml")
        );
    }

    #[test]
    fn test_load_config_seeds_missing_directory() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().join("nested").join("artcache"));

        let config = manager.load_config(None).unwrap();
        assert_eq!(config.artwork, ArtworkConfig::default());

        let config_file = manager.config_path(None);
        assert!(config_file.exists());

        let reloaded = manager.load_config(None).unwrap();
        assert_eq!(reloaded.artwork, config.artwork);
    }

    #[test]
    fn test_load_config_handles_malformed_file() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        let config_file = manager.config_path(None);

        fs::write(&config_file, "invalid_toml = [").unwrap();

        let config = manager.load_config(None).unwrap();
        assert_eq!(config.artwork, ArtworkConfig::default());
        let content = fs::read_to_string(&config_file).unwrap();
        assert_eq!(content, "invalid_toml = [");
    }

    #[test]
    fn test_load_config_from_override_path() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().join("unused"));
        let custom = dir.path().join("custom.toml");

        fs::write(&custom, "[artwork]\nrewind_window_bytes = 2048\n").unwrap();

        let config = manager.load_config(Some(&custom)).unwrap();
        assert_eq!(config.artwork.rewind_window_bytes, 2048);
        assert!(!dir.path().join("unused").exists());
    }
}
