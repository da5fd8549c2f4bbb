//! Growable byte arena backing the scanner.
//!
//! Layout
//! ```text
//! [ retired ... | window ...... | spare ......... ]
//! 0             start           end              data.len()
//! ```
//! - `[0, start)` has been handed out as tokens and may be overwritten.
//! - `[start, end)` is the unconsumed window offered to the splitter.
//! - `[end, len)` is where the next read lands.
//!
//! `data.len()` is the capacity: the vector is always fully initialised so
//! that the spare region can be handed to a source as `&mut [u8]`.
//!
//! Invariant: `start <= end <= data.len() <= max`.

use alloc::vec::Vec;
use core::ops::Range;

#[derive(Debug)]
pub(crate) struct Buffer {
    data: Vec<u8>,
    start: usize,
    end: usize,
    initial: usize,
    max: usize,
}

/// The buffer is full and already at its ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AtCeiling;

impl Buffer {
    pub(crate) fn new(initial: usize, max: usize) -> Self {
        Self {
            data: Vec::new(),
            start: 0,
            end: 0,
            initial,
            max,
        }
    }

    /// Adopts caller-provided storage. Its whole capacity becomes usable.
    pub(crate) fn from_storage(mut storage: Vec<u8>, initial: usize, max: usize) -> Self {
        let cap = storage.capacity().min(max);
        storage.clear();
        storage.resize(cap, 0);
        Self {
            data: storage,
            start: 0,
            end: 0,
            initial,
            max,
        }
    }

    pub(crate) fn set_limits(&mut self, initial: usize, max: usize) {
        self.initial = initial;
        self.max = max;
        if self.data.len() > max {
            self.data.truncate(max);
            self.data.shrink_to(max);
        }
        self.clear();
    }

    #[inline]
    pub(crate) fn window(&self) -> &[u8] {
        &self.data[self.start..self.end]
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub(crate) fn start(&self) -> usize {
        self.start
    }

    pub(crate) fn capacity(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn max(&self) -> usize {
        self.max
    }

    /// Bytes in `range`, addressed from the front of the arena.
    #[inline]
    pub(crate) fn slice(&self, range: Range<usize>) -> &[u8] {
        &self.data[range]
    }

    /// Retires `n` bytes from the front of the window.
    #[inline]
    pub(crate) fn consume(&mut self, n: usize) {
        debug_assert!(n <= self.end - self.start, "consume past window");
        self.start += n;
    }

    /// Drops the window, keeping the allocation.
    pub(crate) fn clear(&mut self) {
        self.start = 0;
        self.end = 0;
    }

    /// Moves the window to offset zero.
    pub(crate) fn compact(&mut self) {
        if self.start == 0 {
            return;
        }
        self.data.copy_within(self.start..self.end, 0);
        self.end -= self.start;
        self.start = 0;
    }

    /// Guarantees a non-empty spare region, compacting first and growing
    /// only when compaction frees nothing.
    pub(crate) fn make_room(&mut self) -> Result<(), AtCeiling> {
        self.compact();
        if self.end < self.data.len() {
            return Ok(());
        }
        if self.data.len() >= self.max {
            return Err(AtCeiling);
        }
        let target = if self.data.is_empty() {
            self.initial
        } else {
            self.data.len().saturating_mul(2)
        };
        self.grow_to(target.clamp(1, self.max));
        Ok(())
    }

    fn grow_to(&mut self, n: usize) {
        debug_assert!(n > self.data.len() && n <= self.max);
        #[cfg(feature = "tracing")]
        tracing::debug!(from = self.data.len(), to = n, "growing scan buffer");
        self.data.resize(n, 0);
    }

    /// Region the next read may fill.
    #[inline]
    pub(crate) fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.data[self.end..]
    }

    /// Accepts `n` freshly read bytes at the end of the window.
    #[inline]
    pub(crate) fn commit(&mut self, n: usize) {
        debug_assert!(n <= self.data.len() - self.end, "commit past capacity");
        self.end += n;
    }
}
