//! Byte sources the scanner pulls from.
//!
//! A [`ByteSource`] fills a caller-provided region and reports how many bytes
//! it wrote and whether input has ended. The scanner validates every reply:
//! counts are `isize` so that a source wrapping a raw `read(2)`-style call
//! can report its `-1` verbatim and have it rejected as
//! [`ScanError::BadReadCount`](crate::ScanError::BadReadCount) instead of
//! being silently reinterpreted.

use core::convert::Infallible;

/// Outcome of a successful [`ByteSource::read`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filled {
    /// Number of bytes written to the front of the destination.
    pub count: isize,
    /// No bytes will follow the ones reported here.
    pub at_end: bool,
}

impl Filled {
    /// `count` bytes were written; more may follow.
    ///
    /// A `count` above `isize::MAX` is recorded as `isize::MAX`; it is rejected
    /// as a bad read count either way, but the reported count is clamped.
    #[must_use]
    pub fn bytes(count: usize) -> Self {
        Self {
            count: isize::try_from(count).unwrap_or(isize::MAX),
            at_end: false,
        }
    }

    /// `count` bytes were written and they are the last ones.
    ///
    /// A `count` above `isize::MAX` is recorded as `isize::MAX`; it is rejected
    /// as a bad read count either way, but the reported count is clamped.
    #[must_use]
    pub fn end(count: usize) -> Self {
        Self {
            count: isize::try_from(count).unwrap_or(isize::MAX),
            at_end: true,
        }
    }

    /// Returns the count if it fits in a region of `requested` bytes.
    pub(crate) fn checked_count(self, requested: usize) -> Option<usize> {
        usize::try_from(self.count)
            .ok()
            .filter(|&n| n <= requested)
    }
}

/// A producer of raw bytes.
///
/// Implementations copy at most `dst.len()` bytes into the front of `dst`.
/// Returning `Err` means nothing was written; the error is handed back to
/// the caller of the scanner once every complete token buffered before it
/// has been delivered.
///
/// Cancellation is expressed by the source itself: returning an error from
/// the next `read` stops the scan.
pub trait ByteSource {
    /// Error reported by a failed read.
    type Error;

    /// Transfers bytes into `dst`.
    fn read(&mut self, dst: &mut [u8]) -> Result<Filled, Self::Error>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    type Error = S::Error;

    fn read(&mut self, dst: &mut [u8]) -> Result<Filled, Self::Error> {
        (**self).read(dst)
    }
}

/// In-memory input. Each read copies as much as fits and shrinks the slice.
impl ByteSource for &[u8] {
    type Error = Infallible;

    fn read(&mut self, dst: &mut [u8]) -> Result<Filled, Self::Error> {
        let n = dst.len().min(self.len());
        let (head, tail) = self.split_at(n);
        dst[..n].copy_from_slice(head);
        *self = tail;
        if self.is_empty() {
            Ok(Filled::end(n))
        } else {
            Ok(Filled::bytes(n))
        }
    }
}

/// Adapts any [`std::io::Read`] into a [`ByteSource`].
///
/// A zero-byte read into a non-empty region is treated as end of input, as
/// `std::io::Read` specifies. Reads interrupted by a signal are reported as
/// empty reads so that the scanner retries them.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSource<R> {
    inner: R,
}

#[cfg(feature = "std")]
impl<R: std::io::Read> IoSource<R> {
    /// Wraps a reader.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Borrows the wrapped reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Mutably borrows the wrapped reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> ByteSource for IoSource<R> {
    type Error = std::io::Error;

    fn read(&mut self, dst: &mut [u8]) -> Result<Filled, Self::Error> {
        match self.inner.read(dst) {
            Ok(0) if !dst.is_empty() => Ok(Filled::end(0)),
            Ok(n) => Ok(Filled::bytes(n)),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => Ok(Filled::bytes(0)),
            Err(e) => Err(e),
        }
    }
}
