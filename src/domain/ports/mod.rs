mod artwork_cache_port;
mod artwork_codec_port;
mod artwork_source_port;

pub use artwork_cache_port::ArtworkCachePort;
pub use artwork_codec_port::ArtworkCodecPort;
pub use artwork_source_port::{ArtworkSourcePort, ByteStream};
