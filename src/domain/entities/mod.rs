//! Domain entity definitions.

mod artwork;

pub use artwork::{Artwork, ArtworkKey, ArtworkPair, Dimensions, TargetSize};
