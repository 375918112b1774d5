//! HTTP byte source for artwork.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use tracing::debug;

use crate::domain::errors::ArtworkError;
use crate::domain::ports::{ArtworkSourcePort, ByteStream};
use crate::infrastructure::config::ArtworkConfig;

/// Streams artwork payloads over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpArtworkSource {
    http_client: reqwest::Client,
}

impl HttpArtworkSource {
    /// Creates a source whose requests time out after `timeout`.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(timeout: Duration) -> Result<Self, ArtworkError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ArtworkError::fetch_io(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { http_client })
    }

    /// Creates a source from configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: &ArtworkConfig) -> Result<Self, ArtworkError> {
        Self::new(Duration::from_secs(config.request_timeout_secs))
    }
}

#[async_trait]
impl ArtworkSourcePort for HttpArtworkSource {
    async fn open(&self, url: &str) -> Result<ByteStream, ArtworkError> {
        debug!(url, "Opening artwork stream");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ArtworkError::fetch_io(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ArtworkError::fetch_io(format!(
                "HTTP {}: {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        Ok(response
            .bytes_stream()
            .map(|chunk| {
                chunk.map_err(|e| ArtworkError::fetch_io(format!("Failed to read body: {e}")))
            })
            .boxed())
    }
}
