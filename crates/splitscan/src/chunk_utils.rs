//! Helpers for feeding a payload to a scanner in pieces.

use alloc::vec::Vec;

use crate::source::{ByteSource, Filled};

/// Split `payload` into `parts` approximately equal-sized chunks.
///
/// Chunk boundaries ignore UTF-8: the scanner has to cope with code points
/// that straddle reads.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts).max(1);
    payload.chunks(chunk_size).collect()
}

/// A source that hands out at most `max_read` bytes per read.
///
/// Useful to drive the scanner through every buffering path with a small
/// input.
#[derive(Debug, Clone)]
pub struct Trickle<S> {
    inner: S,
    max_read: usize,
}

impl<S> Trickle<S> {
    /// Wraps `inner`, capping each read at `max_read` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `max_read` is zero.
    pub fn new(inner: S, max_read: usize) -> Self {
        assert!(max_read > 0);
        Self { inner, max_read }
    }
}

impl<S: ByteSource> ByteSource for Trickle<S> {
    type Error = S::Error;

    fn read(&mut self, dst: &mut [u8]) -> Result<Filled, Self::Error> {
        let n = dst.len().min(self.max_read);
        self.inner.read(&mut dst[..n])
    }
}

/// A source that replays a fixed list of chunks, one per read.
///
/// Chunks larger than the offered region are split across reads. The last
/// chunk is reported together with the end of input.
#[derive(Debug, Clone)]
pub struct Chunked<'a> {
    chunks: Vec<&'a [u8]>,
    next: usize,
}

impl<'a> Chunked<'a> {
    /// Replays `chunks` in order.
    pub fn new(chunks: Vec<&'a [u8]>) -> Self {
        Self { chunks, next: 0 }
    }

    /// Replays `payload` cut into `parts` chunks.
    pub fn split(payload: &'a [u8], parts: usize) -> Self {
        Self::new(produce_chunks(payload, parts))
    }
}

impl ByteSource for Chunked<'_> {
    type Error = core::convert::Infallible;

    fn read(&mut self, dst: &mut [u8]) -> Result<Filled, Self::Error> {
        let Some(chunk) = self.chunks.get_mut(self.next) else {
            return Ok(Filled::end(0));
        };
        let n = dst.len().min(chunk.len());
        dst[..n].copy_from_slice(&chunk[..n]);
        *chunk = &chunk[n..];
        if chunk.is_empty() {
            self.next += 1;
        }
        if self.next == self.chunks.len() {
            Ok(Filled::end(n))
        } else {
            Ok(Filled::bytes(n))
        }
    }
}
