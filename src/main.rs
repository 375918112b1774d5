use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use artcache::application::{ArtworkFetcher, FetchSettings};
use artcache::domain::{Artwork, ArtworkKey};
use artcache::infrastructure::{
    AppConfig, ArtworkCache, CliArgs, HttpArtworkSource, ImageArtworkCodec, StorageManager,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<(AppConfig, Option<PathBuf>)> {
    let (mut config, path) = match StorageManager::new() {
        Ok(storage) => {
            let path = storage.config_path(args.config.as_deref());
            (storage.load_config(Some(&path))?, Some(path))
        }
        Err(_) => (AppConfig::default(), None),
    };
    config.merge_with_args(args);
    Ok((config, path))
}

fn print_pair(url: &str, full: &Artwork, icon: &Artwork) {
    println!(
        "{url}\n  full {} ({} bytes)\n  icon {} ({} bytes)",
        full.dimensions(),
        full.byte_size(),
        icon.dimensions(),
        icon.byte_size()
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let (config, config_path) = load_config(&args)?;

    init_logging(&config)?;

    info!(
        version = artcache::VERSION,
        config = ?config_path,
        capacity = config.artwork.capacity_bytes(),
        "Starting artcache"
    );

    let cache = Arc::new(ArtworkCache::from_config(&config.artwork));
    let fetcher = ArtworkFetcher::new(
        cache.clone(),
        Arc::new(HttpArtworkSource::from_config(&config.artwork)?),
        Arc::new(ImageArtworkCodec::new()),
        FetchSettings::from_config(&config.artwork)?,
        Handle::current(),
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    for url in &args.urls {
        fetcher.fetch(url, tx.clone());
    }
    drop(tx);

    let mut failures = 0usize;
    while let Some(event) = rx.recv().await {
        match event.result {
            Ok(pair) => {
                let (full, icon) = pair.into_parts();
                print_pair(&event.url, &full, &icon);
            }
            Err(e) => {
                eprintln!("{}: {e}", event.url);
                failures += 1;
            }
        }
    }

    for url in &args.urls {
        let state = if cache.contains(&ArtworkKey::new(url.as_str())) {
            "cached"
        } else {
            "not cached"
        };
        println!("{url}: {state}");
    }

    println!("{}", cache.stats());

    if failures > 0 {
        return Err(eyre!(
            "{failures} of {} artwork fetches failed",
            args.urls.len()
        ));
    }

    Ok(())
}
