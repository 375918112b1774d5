//! Port definition for image decoding and resampling.

use crate::domain::entities::{Artwork, Dimensions};
use crate::domain::errors::ArtworkError;

/// Port for the raster codec.
///
/// All methods are CPU bound and are called from a blocking context.
#[cfg_attr(test, mockall::automock)]
pub trait ArtworkCodecPort: Send + Sync {
    /// Reads the image dimensions from the leading bytes of a payload
    /// without decoding pixel data.
    ///
    /// # Errors
    /// Returns `ArtworkError::Decode` if no header can be parsed.
    fn probe_bounds(&self, header: &[u8]) -> Result<Dimensions, ArtworkError>;

    /// Decodes a full payload, shrinking each side by `factor`.
    ///
    /// # Errors
    /// Returns `ArtworkError::Decode` if the payload is malformed or truncated.
    fn decode(&self, payload: &[u8], factor: u32) -> Result<Artwork, ArtworkError>;

    /// Resamples a decoded image to exactly `size`.
    fn rescale(&self, source: &Artwork, size: Dimensions) -> Artwork;
}
