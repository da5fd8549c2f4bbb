//! A pull-based tokenizer driven by pluggable split functions.
//!
//! A [`Scanner`] reads from a [`ByteSource`] into a buffer it owns and asks a
//! split function to cut the buffered, unconsumed bytes into tokens. Input
//! never has to be resident in full, the buffer is capped, and a misbehaving
//! source or split function ends the scan with an error instead of looping.
//!
//! ```rust
//! use splitscan::{Scanner, Step};
//!
//! // Comma separated values; the last field may be empty.
//! fn on_comma(data: &[u8], at_eof: bool) -> Step<'_> {
//!     if let Some(i) = data.iter().position(|&b| b == b',') {
//!         return Step::token(i + 1, &data[..i]);
//!     }
//!     if !at_eof {
//!         return Step::need_more();
//!     }
//!     Step::final_token(data.len(), data)
//! }
//!
//! let mut scanner = Scanner::new(&b"1,2,3,4,"[..]).with_split(on_comma);
//! let mut fields = Vec::new();
//! while let Some(field) = scanner.next_token() {
//!     fields.push(String::from_utf8_lossy(field).into_owned());
//! }
//! assert_eq!(fields, ["1", "2", "3", "4", ""]);
//! assert!(scanner.error().is_none());
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod buffer;
pub mod chunk_utils;
mod error;
mod options;
mod scanner;
pub mod source;
pub mod split;

#[cfg(test)]
mod tests;

pub use error::{BadSplit, ConfigError, ScanError};
pub use options::{DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_TOKEN_SIZE, MIN_MAX_TOKEN_SIZE, ScanOptions};
pub use scanner::{MAX_CONSECUTIVE_EMPTY_READS, MAX_CONSECUTIVE_EMPTY_TOKENS, OwnedTokens, Scanner};
#[cfg(feature = "std")]
pub use source::IoSource;
pub use source::{ByteSource, Filled};
pub use split::{Signal, SplitError, SplitFn, Step};
