//! Cache-first artwork fetch pipeline.
//!
//! A miss streams the payload, probes its bounds from the rewind window,
//! decodes at an integer downsample factor, derives the icon from the
//! decoded full image, stores the pair, and only then notifies.
//!
//! Fetches are not deduplicated. Two concurrent misses for the same URL
//! both download and decode, and the last store wins. Callers that need
//! single-flight semantics must layer it on top.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::entities::{Artwork, ArtworkKey, ArtworkPair, TargetSize};
use crate::domain::errors::ArtworkError;
use crate::domain::ports::{ArtworkCachePort, ArtworkCodecPort, ArtworkSourcePort};
use crate::domain::services::{downsample_factor, fit_within};
use crate::infrastructure::artwork::RewindableStream;
use crate::infrastructure::config::ArtworkConfig;
use crate::infrastructure::config::artwork_config::DEFAULT_REWIND_WINDOW;

/// Receives the outcome of one `fetch` call.
///
/// Exactly one method is called, exactly once.
pub trait FetchListener: Sized + Send + 'static {
    /// Called with both renditions once they are cached.
    fn on_fetched(self, url: &str, full: &Artwork, icon: &Artwork);

    /// Called when the payload could not be fetched or decoded.
    fn on_error(self, url: &str, error: &ArtworkError) {
        let _ = (url, error);
    }
}

fn ignore_error(_url: &str, _error: &ArtworkError) {}

/// Closure-backed listener. Build with [`listener`].
pub struct CallbackListener<F, E> {
    on_fetched: F,
    on_error: E,
}

/// Creates a listener from a success callback. Errors are ignored unless
/// [`CallbackListener::on_error`] is chained.
pub fn listener<F>(on_fetched: F) -> CallbackListener<F, fn(&str, &ArtworkError)>
where
    F: FnOnce(&str, &Artwork, &Artwork) + Send + 'static,
{
    CallbackListener {
        on_fetched,
        on_error: ignore_error,
    }
}

impl<F, E> CallbackListener<F, E> {
    /// Replaces the error callback.
    pub fn on_error<E2>(self, on_error: E2) -> CallbackListener<F, E2>
    where
        E2: FnOnce(&str, &ArtworkError) + Send + 'static,
    {
        CallbackListener {
            on_fetched: self.on_fetched,
            on_error,
        }
    }
}

impl<F, E> FetchListener for CallbackListener<F, E>
where
    F: FnOnce(&str, &Artwork, &Artwork) + Send + 'static,
    E: FnOnce(&str, &ArtworkError) + Send + 'static,
{
    fn on_fetched(self, url: &str, full: &Artwork, icon: &Artwork) {
        (self.on_fetched)(url, full, icon);
    }

    fn on_error(self, url: &str, error: &ArtworkError) {
        (self.on_error)(url, error);
    }
}

/// Message sent when a fetch completes.
#[derive(Debug, Clone)]
pub struct ArtworkFetchedEvent {
    /// The requested URL.
    pub url: String,
    /// The pair, or the reason it could not be produced.
    pub result: Result<ArtworkPair, ArtworkError>,
}

/// Delivers completions to whichever task owns the receiver.
impl FetchListener for mpsc::UnboundedSender<ArtworkFetchedEvent> {
    fn on_fetched(self, url: &str, full: &Artwork, icon: &Artwork) {
        let event = ArtworkFetchedEvent {
            url: url.to_string(),
            result: Ok(ArtworkPair::new(full.clone(), icon.clone())),
        };
        if self.send(event).is_err() {
            debug!(url, "Artwork event receiver dropped");
        }
    }

    fn on_error(self, url: &str, error: &ArtworkError) {
        let event = ArtworkFetchedEvent {
            url: url.to_string(),
            result: Err(error.clone()),
        };
        if self.send(event).is_err() {
            debug!(url, "Artwork event receiver dropped");
        }
    }
}

/// How a `fetch` call was resolved.
#[derive(Debug)]
pub enum FetchTicket {
    /// Served from cache; the listener already ran.
    Cached,
    /// A worker task was spawned; the listener runs when it finishes.
    Spawned(JoinHandle<()>),
}

impl FetchTicket {
    /// Returns true if the fetch was served from cache.
    #[must_use]
    pub const fn is_cached(&self) -> bool {
        matches!(self, Self::Cached)
    }

    /// Waits until the listener has been notified.
    ///
    /// # Errors
    /// Returns the join error if the worker task panicked.
    pub async fn wait(self) -> Result<(), tokio::task::JoinError> {
        match self {
            Self::Cached => Ok(()),
            Self::Spawned(handle) => handle.await,
        }
    }
}

/// Fixed sizing inputs of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSettings {
    /// Bounding box the full-size decode is aimed at.
    pub full_target: TargetSize,
    /// Bounding box for the icon.
    pub icon_target: TargetSize,
    /// Bytes available to the bounds probe.
    pub rewind_window: usize,
}

impl FetchSettings {
    /// Reads settings from configuration.
    ///
    /// # Errors
    /// Returns `ArtworkError::InvalidTarget` if a configured box has a zero side.
    pub fn from_config(config: &ArtworkConfig) -> Result<Self, ArtworkError> {
        Ok(Self {
            full_target: config.full_target()?,
            icon_target: config.icon_target()?,
            rewind_window: config.rewind_window_bytes,
        })
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            full_target: TargetSize::FULL,
            icon_target: TargetSize::ICON,
            rewind_window: DEFAULT_REWIND_WINDOW,
        }
    }
}

/// Shared state cloned into each worker task.
#[derive(Clone)]
struct Pipeline {
    cache: Arc<dyn ArtworkCachePort>,
    source: Arc<dyn ArtworkSourcePort>,
    codec: Arc<dyn ArtworkCodecPort>,
    settings: FetchSettings,
}

impl Pipeline {
    async fn fetch_and_store(&self, key: ArtworkKey) -> Result<ArtworkPair, ArtworkError> {
        let pair = self.fetch_pair(key.as_str()).await?;

        match self.cache.put(key.clone(), pair.clone()) {
            Ok(()) => debug!(url = %key, weight = pair.weight(), "Artwork cached"),
            Err(e) => warn!(url = %key, error = %e, "Artwork fetched but not cached"),
        }

        Ok(pair)
    }

    async fn fetch_pair(&self, url: &str) -> Result<ArtworkPair, ArtworkError> {
        let stream = self.source.open(url).await?;
        let mut stream = RewindableStream::new(stream, self.settings.rewind_window);

        if stream.mark().await?.is_empty() && stream.is_complete() {
            return Err(ArtworkError::fetch_io("stream closed before any data"));
        }
        let bounds = self.codec.probe_bounds(stream.mark().await?)?;
        let factor = downsample_factor(self.settings.full_target, bounds);
        debug!(url, %bounds, factor, "Probed artwork");

        let payload = stream.read_to_end().await?;

        let codec = self.codec.clone();
        let icon_target = self.settings.icon_target;
        tokio::task::spawn_blocking(move || -> Result<ArtworkPair, ArtworkError> {
            let full = codec.decode(&payload, factor)?;
            let icon = codec.rescale(&full, fit_within(full.dimensions(), icon_target));
            Ok(ArtworkPair::new(full, icon))
        })
        .await
        .map_err(|e| ArtworkError::decode(format!("Decode task panicked: {e}")))?
    }
}

/// Resolves artwork pairs from the cache or the network.
pub struct ArtworkFetcher {
    pipeline: Pipeline,
    runtime: Handle,
}

impl std::fmt::Debug for ArtworkFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtworkFetcher")
            .field("settings", &self.pipeline.settings)
            .finish_non_exhaustive()
    }
}

impl ArtworkFetcher {
    /// Creates a fetcher whose workers run on `runtime`.
    #[must_use]
    pub fn new(
        cache: Arc<dyn ArtworkCachePort>,
        source: Arc<dyn ArtworkSourcePort>,
        codec: Arc<dyn ArtworkCodecPort>,
        settings: FetchSettings,
        runtime: Handle,
    ) -> Self {
        Self {
            pipeline: Pipeline {
                cache,
                source,
                codec,
                settings,
            },
            runtime,
        }
    }

    /// The cache this fetcher reads and fills.
    #[must_use]
    pub fn cache(&self) -> &Arc<dyn ArtworkCachePort> {
        &self.pipeline.cache
    }

    /// Resolves `url` and reports to `listener`.
    ///
    /// On a hit the listener runs before this returns. On a miss the work
    /// is spawned and this returns at once; the listener then runs on the
    /// worker task, after the pair is stored.
    pub fn fetch<L: FetchListener>(&self, url: &str, listener: L) -> FetchTicket {
        let key = ArtworkKey::new(url);

        if let Some(pair) = self.pipeline.cache.get(&key) {
            debug!(url, "Artwork served from cache");
            listener.on_fetched(url, pair.full(), pair.icon());
            return FetchTicket::Cached;
        }

        let pipeline = self.pipeline.clone();
        FetchTicket::Spawned(self.runtime.spawn(async move {
            // A panicking port must still produce exactly one notification.
            let outcome = AssertUnwindSafe(pipeline.fetch_and_store(key.clone()))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| Err(ArtworkError::fetch_io("artwork fetch panicked")));
            match outcome {
                Ok(pair) => listener.on_fetched(key.as_str(), pair.full(), pair.icon()),
                Err(e) => {
                    warn!(url = %key, error = %e, "Artwork fetch failed");
                    listener.on_error(key.as_str(), &e);
                }
            }
        }))
    }

    /// Resolves `url` on the calling task.
    ///
    /// # Errors
    /// Returns `FetchIo` or `Decode` if the payload cannot be produced.
    pub async fn load(&self, url: &str) -> Result<ArtworkPair, ArtworkError> {
        let key = ArtworkKey::new(url);
        if let Some(pair) = self.pipeline.cache.get(&key) {
            return Ok(pair);
        }
        self.pipeline.fetch_and_store(key).await
    }
}
