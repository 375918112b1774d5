//! Artwork fetch and storage error types.

use thiserror::Error;

/// Artwork error variants.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum ArtworkError {
    #[error("failed to fetch artwork: {message}")]
    FetchIo { message: String },

    #[error("failed to decode artwork: {message}")]
    Decode { message: String },

    #[error("artwork weighs {weight} bytes, cache capacity is {capacity} bytes")]
    CapacityRejected { weight: usize, capacity: usize },

    #[error("invalid target size {width}x{height}")]
    InvalidTarget { width: u32, height: u32 },
}

impl ArtworkError {
    /// Creates transport error.
    #[must_use]
    pub fn fetch_io(message: impl Into<String>) -> Self {
        Self::FetchIo {
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Returns whether error came from the byte transport.
    #[must_use]
    pub const fn is_transport_error(&self) -> bool {
        matches!(self, Self::FetchIo { .. })
    }
}

// Codecs only ever read from memory, so I/O errors mean a truncated payload.
impl From<image::ImageError> for ArtworkError {
    fn from(err: image::ImageError) -> Self {
        Self::decode(err.to_string())
    }
}
