use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "artcache",
    version,
    about = "Fetch remote artwork through a bounded in-memory cache",
    long_about = None
)]
pub struct CliArgs {
    /// Artwork URLs to fetch.
    #[arg(required = true, value_name = "URL")]
    pub urls: Vec<String>,

    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Upper bound on cache capacity in bytes.
    #[arg(long, value_name = "BYTES")]
    pub capacity_ceiling: Option<u64>,

    /// Host memory budget in bytes used to size the cache.
    #[arg(long, value_name = "BYTES", env = "ARTCACHE_MEMORY_HINT")]
    pub memory_hint: Option<u64>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}
