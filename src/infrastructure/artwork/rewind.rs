//! Bounded look-ahead over a byte stream.
//!
//! The pipeline reads a prefix for the bounds probe, then rewinds and
//! consumes the whole payload for decoding. Only the prefix is buffered
//! before the rewind point, so the window caps how far the probe may look.

use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;

use crate::domain::errors::ArtworkError;
use crate::domain::ports::ByteStream;

/// A byte stream with a bounded rewind window.
pub struct RewindableStream {
    inner: ByteStream,
    buffer: BytesMut,
    window: usize,
    finished: bool,
}

impl RewindableStream {
    /// Wraps `inner`, allowing up to `window` bytes to be read ahead.
    #[must_use]
    pub fn new(inner: ByteStream, window: usize) -> Self {
        Self {
            inner,
            buffer: BytesMut::new(),
            window: window.max(1),
            finished: false,
        }
    }

    /// Reads until the window is full or the stream ends, and returns
    /// the buffered prefix. Calling it again returns the same bytes.
    ///
    /// # Errors
    /// Propagates transport errors from the inner stream.
    pub async fn mark(&mut self) -> Result<&[u8], ArtworkError> {
        while !self.finished && self.buffer.len() < self.window {
            match self.inner.next().await {
                Some(chunk) => self.buffer.extend_from_slice(&chunk?),
                None => self.finished = true,
            }
        }
        let end = self.buffer.len().min(self.window);
        Ok(&self.buffer[..end])
    }

    /// Returns true if the whole payload fits inside the window.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.finished
    }

    /// Rewinds to the start and reads the full payload.
    ///
    /// # Errors
    /// Propagates transport errors from the inner stream. A stream that ends
    /// before yielding any byte is reported as a transport error.
    pub async fn read_to_end(mut self) -> Result<Bytes, ArtworkError> {
        while let Some(chunk) = self.inner.next().await {
            self.buffer.extend_from_slice(&chunk?);
        }
        if self.buffer.is_empty() {
            return Err(ArtworkError::fetch_io("stream closed before any data"));
        }
        Ok(self.buffer.freeze())
    }
}

impl std::fmt::Debug for RewindableStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewindableStream")
            .field("buffered", &self.buffer.len())
            .field("window", &self.window)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use tokio_test::block_on;

    fn chunked(parts: Vec<Result<&'static str, ArtworkError>>) -> ByteStream {
        stream::iter(
            parts
                .into_iter()
                .map(|p| p.map(|s| Bytes::from_static(s.as_bytes()))),
        )
        .boxed()
    }

    #[test]
    fn test_mark_stops_at_window() {
        block_on(async {
            let inner = chunked(vec![Ok("abcd"), Ok("efgh"), Ok("ijkl")]);
            let mut stream = RewindableStream::new(inner, 6);

            let prefix = stream.mark().await.unwrap().to_vec();
            assert_eq!(prefix, b"abcdef");
            assert!(!stream.is_complete());

            let again = stream.mark().await.unwrap().to_vec();
            assert_eq!(again, prefix);

            let body = stream.read_to_end().await.unwrap();
            assert_eq!(&body[..], b"abcdefghijkl");
        });
    }

    #[test]
    fn test_short_payload_completes_within_window() {
        block_on(async {
            let inner = chunked(vec![Ok("tiny")]);
            let mut stream = RewindableStream::new(inner, 1024);

            assert_eq!(stream.mark().await.unwrap(), b"tiny");
            assert!(stream.is_complete());
            assert_eq!(&stream.read_to_end().await.unwrap()[..], b"tiny");
        });
    }

    #[test]
    fn test_error_during_mark_propagates() {
        block_on(async {
            let inner = chunked(vec![Ok("ab"), Err(ArtworkError::fetch_io("reset"))]);
            let mut stream = RewindableStream::new(inner, 1024);

            let err = stream.mark().await.unwrap_err();
            assert!(err.is_transport_error());
        });
    }

    #[test]
    fn test_error_after_window_propagates_on_read() {
        block_on(async {
            let inner = chunked(vec![Ok("abcd"), Err(ArtworkError::fetch_io("reset"))]);
            let mut stream = RewindableStream::new(inner, 4);

            assert_eq!(stream.mark().await.unwrap(), b"abcd");
            assert!(stream.read_to_end().await.is_err());
        });
    }

    #[test]
    fn test_empty_stream_is_transport_error() {
        block_on(async {
            let stream = RewindableStream::new(chunked(vec![]), 16);
            let err = stream.read_to_end().await.unwrap_err();
            assert!(matches!(err, ArtworkError::FetchIo { .. }));
        });
    }
}
