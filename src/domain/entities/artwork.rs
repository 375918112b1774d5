//! Domain types for cached artwork.

use std::num::NonZeroU32;
use std::sync::Arc;

use crate::domain::errors::ArtworkError;

/// Cache key for an artwork pair.
///
/// Wraps the source URL verbatim. No normalization is applied, so
/// `http://host/A.jpg` and `http://host/a.jpg` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtworkKey(String);

impl ArtworkKey {
    /// Creates a key from a URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Returns the URL this key was built from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArtworkKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A decoded raster image.
#[derive(Debug, Clone)]
pub struct Artwork {
    image: Arc<image::DynamicImage>,
}

impl Artwork {
    /// Wraps a decoded image.
    #[must_use]
    pub fn new(image: image::DynamicImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }

    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Width and height as a pair.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width(), self.height())
    }

    /// Size of the raw pixel buffer in bytes.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.image.as_bytes().len()
    }

    /// Borrows the underlying image.
    #[must_use]
    pub fn image(&self) -> &image::DynamicImage {
        &self.image
    }

    /// Returns true if both values share the same pixel buffer.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.image, &other.image)
    }
}

/// The full-size and icon renditions of one source image.
///
/// Both halves are always stored and returned together.
#[derive(Debug, Clone)]
pub struct ArtworkPair {
    full: Artwork,
    icon: Artwork,
}

impl ArtworkPair {
    /// Creates a pair.
    #[must_use]
    pub const fn new(full: Artwork, icon: Artwork) -> Self {
        Self { full, icon }
    }

    /// The full-size rendition.
    #[must_use]
    pub const fn full(&self) -> &Artwork {
        &self.full
    }

    /// The icon rendition.
    #[must_use]
    pub const fn icon(&self) -> &Artwork {
        &self.icon
    }

    /// Bytes charged against cache capacity.
    #[must_use]
    pub fn weight(&self) -> usize {
        self.full.byte_size().saturating_add(self.icon.byte_size())
    }

    /// Splits the pair into `(full, icon)`.
    #[must_use]
    pub fn into_parts(self) -> (Artwork, Artwork) {
        (self.full, self.icon)
    }
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Creates dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A bounding box that images are scaled toward. Both sides are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    width: NonZeroU32,
    height: NonZeroU32,
}

impl TargetSize {
    /// Bounding box for full-size artwork.
    pub const FULL: Self = Self::from_nonzero(
        NonZeroU32::new(800).unwrap(),
        NonZeroU32::new(480).unwrap(),
    );

    /// Bounding box for icon artwork.
    pub const ICON: Self = Self::from_nonzero(
        NonZeroU32::new(128).unwrap(),
        NonZeroU32::new(128).unwrap(),
    );

    /// Creates a target size.
    ///
    /// # Errors
    /// Returns `ArtworkError::InvalidTarget` if either side is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, ArtworkError> {
        match (NonZeroU32::new(width), NonZeroU32::new(height)) {
            (Some(width), Some(height)) => Ok(Self { width, height }),
            _ => Err(ArtworkError::InvalidTarget { width, height }),
        }
    }

    /// Creates a target size from non-zero sides.
    #[must_use]
    pub const fn from_nonzero(width: NonZeroU32, height: NonZeroU32) -> Self {
        Self { width, height }
    }

    /// Target width.
    #[must_use]
    pub const fn width(self) -> u32 {
        self.width.get()
    }

    /// Target height.
    #[must_use]
    pub const fn height(self) -> u32 {
        self.height.get()
    }
}

impl std::fmt::Display for TargetSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
