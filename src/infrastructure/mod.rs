//! Infrastructure layer with external service adapters.

/// Artwork cache, transport, and codec adapters.
pub mod artwork;
/// Application configuration.
pub mod config;

pub use artwork::{ArtworkCache, CacheStats, HttpArtworkSource, ImageArtworkCodec, RewindableStream};
pub use config::{AppConfig, ArtworkConfig, CliArgs, LogLevel, StorageManager};
