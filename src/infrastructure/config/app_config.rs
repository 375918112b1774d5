//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;
use super::artwork_config::ArtworkConfig;

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path. Logs go to stderr when unset.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Artwork cache settings.
    #[serde(default)]
    pub artwork: ArtworkConfig,
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(ceiling) = args.capacity_ceiling {
            self.artwork.capacity_ceiling_bytes = ceiling;
        }
        if let Some(hint) = args.memory_hint {
            self.artwork.host_memory_hint_bytes = Some(hint);
        }
        if let Some(timeout) = args.timeout {
            self.artwork.request_timeout_secs = timeout;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_config_with_artwork_section() {
        let toml_content = r#"
            log_level = "debug"

            [artwork]
            capacity_ceiling_bytes = 4194304
            full_max_width = 640
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.artwork.capacity_ceiling_bytes, 4 * 1024 * 1024);
        assert_eq!(config.artwork.full_max_width, 640);
        assert_eq!(config.artwork.full_max_height, 480);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.log_path.is_none());
        assert_eq!(config.artwork, ArtworkConfig::default());
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let mut config = AppConfig::default();
        let args = CliArgs::parse_from([
            "artcache",
            "--log-level",
            "trace",
            "--memory-hint",
            "1048576",
            "http://host/art.jpg",
        ]);

        config.merge_with_args(&args);

        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.artwork.host_memory_hint_bytes, Some(1024 * 1024));
        assert_eq!(config.artwork.capacity_bytes(), 256 * 1024);
    }
}
