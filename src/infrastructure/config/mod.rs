//! Application configuration.

pub mod app_config;
pub mod args;
pub mod artwork_config;
pub mod storage;

pub use app_config::{AppConfig, LogLevel};
pub use args::CliArgs;
pub use artwork_config::ArtworkConfig;
pub use storage::{ConfigError, StorageManager};
