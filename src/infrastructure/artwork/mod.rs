//! Artwork handling infrastructure.
//!
//! This module provides:
//! - Byte-weighted LRU memory cache
//! - HTTP byte source
//! - Bounded rewind buffer for bounds probing
//! - `image` crate codec

pub mod codec;
pub mod http_source;
pub mod memory_cache;
pub mod rewind;

pub use codec::ImageArtworkCodec;
pub use http_source::HttpArtworkSource;
pub use memory_cache::{ArtworkCache, CacheStats};
pub use rewind::RewindableStream;
