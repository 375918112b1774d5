//! Raster codec backed by the `image` crate.

use std::io::Cursor;

use image::ImageReader;
use image::imageops::FilterType;
use tracing::trace;

use crate::domain::entities::{Artwork, Dimensions};
use crate::domain::errors::ArtworkError;
use crate::domain::ports::ArtworkCodecPort;

/// Codec for PNG, JPEG and WebP payloads.
///
/// The `image` crate has no sub-sampling decoder, so `decode` reads the
/// whole raster and then shrinks it by the factor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageArtworkCodec;

impl ImageArtworkCodec {
    /// Creates a codec.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ArtworkCodecPort for ImageArtworkCodec {
    fn probe_bounds(&self, header: &[u8]) -> Result<Dimensions, ArtworkError> {
        let (width, height) = ImageReader::new(Cursor::new(header))
            .with_guessed_format()
            .map_err(|e| ArtworkError::decode(format!("Failed to sniff format: {e}")))?
            .into_dimensions()?;
        trace!(width, height, "Probed artwork bounds");
        Ok(Dimensions::new(width, height))
    }

    fn decode(&self, payload: &[u8], factor: u32) -> Result<Artwork, ArtworkError> {
        let decoded = image::load_from_memory(payload)?;
        if factor <= 1 {
            return Ok(Artwork::new(decoded));
        }

        let width = (decoded.width() / factor).max(1);
        let height = (decoded.height() / factor).max(1);
        trace!(factor, width, height, "Downsampling decoded artwork");
        Ok(Artwork::new(decoded.thumbnail_exact(width, height)))
    }

    fn rescale(&self, source: &Artwork, size: Dimensions) -> Artwork {
        Artwork::new(
            source
                .image()
                .resize_exact(size.width, size.height, FilterType::Nearest),
        )
    }
}
