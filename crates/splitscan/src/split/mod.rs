//! The split protocol and the built-in splitters.
//!
//! A split function looks at the unconsumed window of the scanner and
//! answers with a [`Step`]:
//!
//! | `advance` | `token`  | `signal`     | meaning                                   |
//! |-----------|----------|--------------|-------------------------------------------|
//! | `0`       | `None`   | `Continue`   | need more input (or, at EOF, finished)    |
//! | `n > 0`   | `None`   | `Continue`   | retire `n` bytes, look again              |
//! | `n`       | `Some`   | `Continue`   | retire `n` bytes, deliver the token       |
//! | `n`       | any      | `FinalToken` | retire `n`, deliver the token, stop       |
//! | `n`       | ignored  | `Fail(e)`    | retire `n`, stop with `e`                 |
//!
//! The token is usually a subslice of the window, which the scanner exposes
//! without copying. Any other slice (a constant, say) is copied into a
//! scratch buffer owned by the scanner.
//!
//! `at_eof` is `true` once the source can add no more bytes to the window.
//! A split function must not ask for more input when `at_eof` is set and
//! it still wants to deliver the remaining bytes.

mod builtin;
mod whitespace;

use alloc::{borrow::Cow, boxed::Box};
use core::fmt;

pub use builtin::{bytes, code_points, lines, words};
pub use whitespace::is_space;

/// Boxed split function as stored by the scanner.
pub type SplitFn = dyn for<'a> FnMut(&'a [u8], bool) -> Step<'a> + Send;

/// Reply of a split function.
#[derive(Debug)]
#[must_use]
pub struct Step<'a> {
    /// Bytes to retire from the front of the window. Must not exceed the
    /// window length.
    pub advance: usize,
    /// The token to deliver, if any. Empty tokens are valid tokens.
    pub token: Option<&'a [u8]>,
    /// How the scanner proceeds after this step.
    pub signal: Signal,
}

/// What the scanner does after applying a [`Step`].
#[derive(Debug, Default)]
pub enum Signal {
    /// Keep scanning.
    #[default]
    Continue,
    /// The token of this step is the last one. Not an error.
    FinalToken,
    /// Stop with this error.
    Fail(SplitError),
}

impl<'a> Step<'a> {
    /// Nothing to deliver yet. At EOF this ends the scan cleanly.
    pub fn need_more() -> Self {
        Self::skip(0)
    }

    /// Retire `advance` bytes without producing a token.
    pub fn skip(advance: usize) -> Self {
        Self {
            advance,
            token: None,
            signal: Signal::Continue,
        }
    }

    /// Retire `advance` bytes and deliver `token`.
    pub fn token(advance: usize, token: &'a [u8]) -> Self {
        Self {
            advance,
            token: Some(token),
            signal: Signal::Continue,
        }
    }

    /// Retire `advance` bytes, deliver `token` and stop scanning.
    pub fn final_token(advance: usize, token: &'a [u8]) -> Self {
        Self {
            advance,
            token: Some(token),
            signal: Signal::FinalToken,
        }
    }

    /// Stop scanning without delivering anything further.
    pub fn done() -> Self {
        Self {
            advance: 0,
            token: None,
            signal: Signal::FinalToken,
        }
    }

    /// Stop scanning with `error`.
    pub fn fail(error: impl Into<SplitError>) -> Self {
        Self {
            advance: 0,
            token: None,
            signal: Signal::Fail(error.into()),
        }
    }
}

/// An error raised by a split function.
///
/// Wraps any error type; use [`SplitError::downcast_ref`] to recover it.
pub struct SplitError(Box<dyn core::error::Error + Send + Sync + 'static>);

impl SplitError {
    /// Wraps an error value.
    pub fn new<E>(error: E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        Self(Box::new(error))
    }

    /// An error that carries only a message.
    pub fn msg(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Message(message.into()))
    }

    /// Returns the wrapped error if it is a `T`.
    pub fn downcast_ref<T: core::error::Error + 'static>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    /// Whether the wrapped error is a `T`.
    pub fn is<T: core::error::Error + 'static>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Unwraps the boxed error.
    pub fn into_inner(self) -> Box<dyn core::error::Error + Send + Sync + 'static> {
        self.0
    }
}

impl fmt::Debug for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl core::error::Error for SplitError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<&'static str> for SplitError {
    fn from(message: &'static str) -> Self {
        Self::msg(message)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Message(Cow<'static, str>);
