//! Port definition for fetching artwork bytes.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;

use crate::domain::errors::ArtworkError;

/// Stream of payload chunks. Dropping it releases the underlying connection.
pub type ByteStream = BoxStream<'static, Result<Bytes, ArtworkError>>;

/// Port for opening a byte stream to a URL.
#[async_trait]
pub trait ArtworkSourcePort: Send + Sync {
    /// Opens a stream over the payload at `url`.
    async fn open(&self, url: &str) -> Result<ByteStream, ArtworkError>;
}
