//! Domain layer with core entities, size arithmetic, and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Pure size computations.
pub mod services;

pub use entities::{Artwork, ArtworkKey, ArtworkPair, Dimensions, TargetSize};
pub use errors::ArtworkError;
pub use ports::{ArtworkCachePort, ArtworkCodecPort, ArtworkSourcePort, ByteStream};
