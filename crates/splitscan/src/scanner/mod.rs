//! Scanner: pulls bytes from a source and carves tokens out of them.
//!
//! State machine
//! ```text
//! Idle ──advance──▶ Splitting ──token──▶ TokenReady ──advance──▶ Splitting
//!                    │    ▲
//!           need more│    │bytes
//!                    ▼    │
//!                   Reading ──end/error──▶ (one last split at EOF) ──▶ Exhausted
//!
//! any fatal condition ──▶ Failed
//! ```
//! `Exhausted` and `Failed` are terminal until [`Scanner::reset`].
//!
//! Token lifetime
//! - The current token borrows the scanner, so it cannot be held across the
//!   next [`Scanner::advance`], which may compact, grow or overwrite the
//!   buffer. Copy it out (`to_vec`) to keep it.
//!
//! Liveness
//! - Each call either retires input, reads new input, or fails. Zero-byte
//!   reads and zero-advance tokens are counted and turned into
//!   [`ScanError::NoProgress`] and [`BadSplit::EmptyTokenLoop`] after a small
//!   bound, so neither a stalled source nor a splitter stuck on empty tokens
//!   can spin forever.

use alloc::{borrow::Cow, boxed::Box, vec::Vec};
use core::{fmt, mem, ops::Range};

use bstr::ByteSlice;

use crate::{
    buffer::Buffer,
    error::{BadSplit, ConfigError, ScanError},
    options::ScanOptions,
    source::ByteSource,
    split::{self, Signal, SplitError, SplitFn, Step},
};

/// Consecutive zero-byte reads tolerated before giving up on a source.
pub const MAX_CONSECUTIVE_EMPTY_READS: usize = 100;

/// Consecutive zero-advance tokens tolerated before declaring the split
/// function broken.
pub const MAX_CONSECUTIVE_EMPTY_TOKENS: usize = 100;

/// Where the current token lives.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenSlot {
    None,
    /// Absolute range into the buffer arena.
    Window(Range<usize>),
    /// Copied into `scratch` because it did not point into the window.
    Scratch,
}

/// What the source has told us about the end of input.
#[derive(Debug)]
enum Input<E> {
    Open,
    Ended,
    /// The source failed; reported once buffered tokens are drained.
    Failed(E),
}

impl<E> Input<E> {
    fn is_closed(&self) -> bool {
        !matches!(self, Input::Open)
    }
}

enum Flow {
    Yield,
    Stop,
    Resplit,
    NeedMore,
}

/// A pull-based tokenizer over a [`ByteSource`].
///
/// ```rust
/// use splitscan::{Scanner, split};
///
/// let mut scanner = Scanner::new(&b"Now is the winter\nof our discontent"[..]);
/// scanner.set_split(split::words);
///
/// let mut words = 0;
/// while scanner.advance() {
///     words += 1;
/// }
/// assert!(scanner.error().is_none());
/// assert_eq!(words, 7);
/// ```
pub struct Scanner<S: ByteSource> {
    source: S,
    split: Box<SplitFn>,
    buf: Buffer,
    options: ScanOptions,
    token: TokenSlot,
    scratch: Vec<u8>,
    input: Input<S::Error>,
    error: Option<ScanError<S::Error>>,
    done: bool,
    started: bool,
    empty_tokens: usize,
}

impl<S: ByteSource> Scanner<S> {
    /// Creates a scanner that splits `source` into lines.
    pub fn new(source: S) -> Self {
        let options = ScanOptions::default();
        Self::build(source, options, Buffer::new(options.initial_capacity, options.max_token_size))
    }

    /// Creates a line scanner with explicit buffer sizing.
    pub fn with_options(source: S, options: ScanOptions) -> Result<Self, ConfigError> {
        let options = options.validate()?;
        Ok(Self::build(
            source,
            options,
            Buffer::new(options.initial_capacity, options.max_token_size),
        ))
    }

    fn build(source: S, options: ScanOptions, buf: Buffer) -> Self {
        Self {
            source,
            split: Box::new(split::lines),
            buf,
            options,
            token: TokenSlot::None,
            scratch: Vec::new(),
            input: Input::Open,
            error: None,
            done: false,
            started: false,
            empty_tokens: 0,
        }
    }

    /// Replaces the split function. Takes effect at the next advance.
    pub fn set_split<F>(&mut self, split: F)
    where
        F: for<'a> FnMut(&'a [u8], bool) -> Step<'a> + Send + 'static,
    {
        self.split = Box::new(split);
    }

    /// Builder form of [`Scanner::set_split`].
    #[must_use]
    pub fn with_split<F>(mut self, split: F) -> Self
    where
        F: for<'a> FnMut(&'a [u8], bool) -> Step<'a> + Send + 'static,
    {
        self.set_split(split);
        self
    }

    /// Sets the first allocation size and the buffer ceiling.
    ///
    /// Only allowed before the first advance (or right after a reset).
    pub fn set_limits(&mut self, initial: usize, max: usize) -> Result<(), ConfigError> {
        if self.started {
            return Err(ConfigError::AlreadyStarted);
        }
        let options = ScanOptions {
            initial_capacity: initial,
            max_token_size: max,
        }
        .validate()?;
        self.buf.set_limits(options.initial_capacity, options.max_token_size);
        self.options = options;
        Ok(())
    }

    /// Hands the scanner its backing storage and ceiling.
    ///
    /// The whole capacity of `storage` is used before the first growth, and
    /// its contents are ignored. Only allowed before the first advance.
    pub fn buffer(&mut self, storage: Vec<u8>, max: usize) -> Result<(), ConfigError> {
        if self.started {
            return Err(ConfigError::AlreadyStarted);
        }
        let options = ScanOptions {
            max_token_size: max,
            ..self.options
        }
        .validate()?;
        self.buf = Buffer::from_storage(storage, options.initial_capacity, options.max_token_size);
        self.options = options;
        Ok(())
    }

    /// The active sizing.
    pub fn options(&self) -> ScanOptions {
        self.options
    }

    /// Moves to the next token.
    ///
    /// Returns `false` once input is exhausted or the scan failed; tell the
    /// two apart with [`Scanner::error`]. Once `false`, it stays `false`.
    pub fn advance(&mut self) -> bool {
        self.token = TokenSlot::None;
        if self.done {
            return false;
        }
        self.started = true;

        loop {
            let at_eof = self.input.is_closed();
            if !self.buf.is_empty() || at_eof {
                match self.split_window(at_eof) {
                    Flow::Yield => return true,
                    Flow::Stop => return false,
                    Flow::Resplit => continue,
                    Flow::NeedMore => {}
                }
            }
            if at_eof {
                self.exhaust();
                return false;
            }
            if !self.fill() {
                return false;
            }
        }
    }

    /// Advances and returns the new token, or `None` when the scan is over.
    pub fn next_token(&mut self) -> Option<&[u8]> {
        if self.advance() {
            Some(self.token())
        } else {
            None
        }
    }

    /// The token produced by the last successful advance; empty otherwise.
    pub fn token(&self) -> &[u8] {
        match &self.token {
            TokenSlot::None => &[],
            TokenSlot::Window(range) => self.buf.slice(range.clone()),
            TokenSlot::Scratch => &self.scratch,
        }
    }

    /// The current token as text, with invalid UTF-8 replaced by U+FFFD.
    ///
    /// Borrows when the token is valid UTF-8, copies otherwise.
    pub fn text(&self) -> Cow<'_, str> {
        self.token().to_str_lossy()
    }

    /// The current token as text, if it is valid UTF-8.
    pub fn token_str(&self) -> Result<&str, bstr::Utf8Error> {
        self.token().to_str()
    }

    /// The failure that ended the scan, or `None` while healthy and after a
    /// clean end of input.
    pub fn error(&self) -> Option<&ScanError<S::Error>> {
        self.error.as_ref()
    }

    /// Whether the scan has ended, cleanly or not.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Consumes the scanner, returning the failure that ended it if any.
    pub fn into_result(self) -> Result<(), ScanError<S::Error>> {
        self.error.map_or(Ok(()), Err)
    }

    /// Iterates over the remaining tokens as owned vectors.
    pub fn tokens_owned(&mut self) -> OwnedTokens<'_, S> {
        OwnedTokens { scanner: self }
    }

    /// Borrows the source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the source, dropping all scan state.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Starts over on `source`, returning the previous one.
    ///
    /// The split function, sizing and allocated buffer are kept; buffered
    /// bytes, the current token and any recorded error are dropped.
    pub fn reset(&mut self, source: S) -> S {
        self.buf.clear();
        self.token = TokenSlot::None;
        self.input = Input::Open;
        self.error = None;
        self.done = false;
        self.started = false;
        self.empty_tokens = 0;
        mem::replace(&mut self.source, source)
    }

    fn split_window(&mut self, at_eof: bool) -> Flow {
        let base = self.buf.start();
        let window = self.buf.window();
        let len = window.len();
        let Step {
            advance,
            token,
            signal,
        } = (self.split)(window, at_eof);

        if advance > len {
            return self.stop(BadSplit::AdvanceOutOfRange { advance, len }.into());
        }
        let slot = token.map(|token| match locate(window, token) {
            Some(range) => TokenSlot::Window(base + range.start..base + range.end),
            None => {
                self.scratch.clear();
                self.scratch.extend_from_slice(token);
                TokenSlot::Scratch
            }
        });
        self.buf.consume(advance);
        if advance > 0 {
            self.empty_tokens = 0;
        }

        match signal {
            Signal::Fail(err) => {
                self.fail_split(err);
                Flow::Stop
            }
            Signal::FinalToken => {
                self.exhaust();
                match slot {
                    Some(slot) => {
                        self.token = slot;
                        Flow::Yield
                    }
                    None => Flow::Stop,
                }
            }
            Signal::Continue => match slot {
                Some(slot) => {
                    if advance == 0 {
                        self.empty_tokens += 1;
                        if self.empty_tokens > MAX_CONSECUTIVE_EMPTY_TOKENS {
                            return self.stop(BadSplit::EmptyTokenLoop(self.empty_tokens).into());
                        }
                    }
                    self.token = slot;
                    Flow::Yield
                }
                None if advance > 0 => Flow::Resplit,
                None => Flow::NeedMore,
            },
        }
    }

    /// Reads at least once into the spare region. Returns `false` if the scan
    /// failed.
    fn fill(&mut self) -> bool {
        if self.buf.make_room().is_err() {
            let max = self.buf.max();
            self.stop(ScanError::TokenTooLong { max });
            return false;
        }

        let mut empty_reads = 0;
        loop {
            let spare = self.buf.spare_mut();
            let requested = spare.len();
            match self.source.read(spare) {
                Ok(filled) => {
                    let Some(n) = filled.checked_count(requested) else {
                        self.stop(ScanError::BadReadCount {
                            count: filled.count,
                            requested,
                        });
                        return false;
                    };
                    self.buf.commit(n);
                    if n > 0 {
                        self.empty_tokens = 0;
                    }
                    if filled.at_end {
                        self.input = Input::Ended;
                        return true;
                    }
                    if n > 0 {
                        return true;
                    }
                    empty_reads += 1;
                    if empty_reads >= MAX_CONSECUTIVE_EMPTY_READS {
                        self.stop(ScanError::NoProgress(empty_reads));
                        return false;
                    }
                }
                Err(err) => {
                    self.input = Input::Failed(err);
                    return true;
                }
            }
        }
    }

    /// Ends the scan cleanly, surfacing a deferred source error if any.
    fn exhaust(&mut self) {
        self.done = true;
        self.buf.clear();
        if let Input::Failed(err) = mem::replace(&mut self.input, Input::Ended) {
            self.record(ScanError::Source(err));
        }
    }

    /// A split error loses to a source error seen earlier: the source failure
    /// is the root cause.
    fn fail_split(&mut self, err: SplitError) {
        let err = match mem::replace(&mut self.input, Input::Ended) {
            Input::Failed(source) => ScanError::Source(source),
            _ => ScanError::Split(err),
        };
        self.stop(err);
    }

    fn stop(&mut self, err: ScanError<S::Error>) -> Flow {
        self.token = TokenSlot::None;
        self.done = true;
        self.buf.clear();
        self.record(err);
        Flow::Stop
    }

    fn record(&mut self, err: ScanError<S::Error>) {
        #[cfg(feature = "tracing")]
        tracing::warn!(kind = err.kind(), "scan stopped");
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}

/// Position of `token` inside `window`, if it is a subslice of it.
fn locate(window: &[u8], token: &[u8]) -> Option<Range<usize>> {
    let outer = window.as_ptr_range();
    let inner = token.as_ptr_range();
    if inner.start < outer.start || inner.end > outer.end {
        return None;
    }
    let offset = inner.start.addr() - outer.start.addr();
    Some(offset..offset + token.len())
}

impl<S> fmt::Debug for Scanner<S>
where
    S: ByteSource + fmt::Debug,
    S::Error: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("source", &self.source)
            .field("buf", &self.buf)
            .field("options", &self.options)
            .field("token", &self.token)
            .field("input", &self.input)
            .field("error", &self.error)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

/// Iterator over owned copies of the remaining tokens.
///
/// Created by [`Scanner::tokens_owned`]. Ends when the scanner does; check
/// [`Scanner::error`] afterwards.
pub struct OwnedTokens<'s, S: ByteSource> {
    scanner: &'s mut Scanner<S>,
}

impl<S: ByteSource> Iterator for OwnedTokens<'_, S> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        self.scanner.next_token().map(<[u8]>::to_vec)
    }
}

impl<S: ByteSource> core::iter::FusedIterator for OwnedTokens<'_, S> {}
