use thiserror::Error;

use crate::split::SplitError;

/// Terminal condition recorded by a [`Scanner`](crate::Scanner).
///
/// Clean exhaustion of the source is not an error: once
/// [`Scanner::advance`](crate::Scanner::advance) returns `false`,
/// [`Scanner::error`](crate::Scanner::error) is `None` in that case.
/// Every variant here is recorded once and makes all later advances return
/// `false`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScanError<E> {
    /// The byte source failed. Reported only after every token already
    /// buffered ahead of the failure has been delivered.
    #[error("source error: {0}")]
    Source(E),

    /// The source reported a negative count, or more bytes than it was
    /// offered room for.
    #[error("source returned invalid count {count} for a {requested}-byte read")]
    BadReadCount {
        /// Count as reported by the source.
        count: isize,
        /// Size of the region handed to the source.
        requested: usize,
    },

    /// The source kept returning zero bytes without reporting an error or the
    /// end of input.
    #[error("source made no progress after {0} consecutive empty reads")]
    NoProgress(usize),

    /// A single token did not fit into the buffer even at its maximum size.
    /// The bytes accumulated for it were discarded.
    #[error("token exceeds the maximum buffer size of {max} bytes")]
    TokenTooLong {
        /// The configured ceiling.
        max: usize,
    },

    /// The split function broke its contract. This is a defect in the
    /// splitter, not a condition of the input.
    #[error("split function contract violation: {0}")]
    BadSplit(#[from] BadSplit),

    /// The split function signalled a failure of its own.
    #[error("split error: {0}")]
    Split(SplitError),
}

impl<E> ScanError<E> {
    /// Whether this error reports a programming defect in a split function
    /// rather than a property of the input or the source.
    pub fn is_bug(&self) -> bool {
        matches!(self, ScanError::BadSplit(_))
    }

    /// Short, stable name of the variant, for logs and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            ScanError::Source(_) => "source",
            ScanError::BadReadCount { .. } => "bad_read_count",
            ScanError::NoProgress(_) => "no_progress",
            ScanError::TokenTooLong { .. } => "token_too_long",
            ScanError::BadSplit(_) => "bad_split",
            ScanError::Split(_) => "split",
        }
    }

    /// Returns the source error, if this is one.
    pub fn source_error(&self) -> Option<&E> {
        match self {
            ScanError::Source(e) => Some(e),
            _ => None,
        }
    }
}

/// Ways a split function can violate the split protocol.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum BadSplit {
    /// The requested advance is larger than the window it was given.
    #[error("advance {advance} exceeds window of {len} bytes")]
    AdvanceOutOfRange {
        /// Advance returned by the splitter.
        advance: usize,
        /// Length of the window the splitter saw.
        len: usize,
    },
    /// Too many consecutive tokens were produced without consuming input.
    #[error("{0} consecutive empty tokens without progressing")]
    EmptyTokenLoop(usize),
}

/// Rejected scanner configuration.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Buffer sizing can only change before the first advance.
    #[error("buffer limits cannot change after scanning has started")]
    AlreadyStarted,
    /// The maximum cannot hold a single encoded code point.
    #[error("maximum token size {max} is below the minimum of {min}")]
    MaxTooSmall {
        /// Requested maximum.
        max: usize,
        /// Smallest accepted maximum.
        min: usize,
    },
}
