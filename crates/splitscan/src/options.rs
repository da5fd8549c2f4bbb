use crate::error::ConfigError;

/// Size of the first buffer allocation when none is configured.
pub const DEFAULT_INITIAL_CAPACITY: usize = 4096;

/// Default ceiling on the buffer, and therefore on the largest token.
pub const DEFAULT_MAX_TOKEN_SIZE: usize = 64 * 1024 * 1024;

/// Smallest accepted ceiling: one encoded code point must always fit.
pub const MIN_MAX_TOKEN_SIZE: usize = 4;

/// Buffer sizing for a [`Scanner`](crate::Scanner).
///
/// The buffer starts at `initial_capacity` bytes on the first read and
/// doubles whenever a token does not fit, up to `max_token_size`. A token
/// (including whatever terminator the splitter needs to see) that cannot be
/// recognised within `max_token_size` bytes ends the scan with
/// [`ScanError::TokenTooLong`](crate::ScanError::TokenTooLong).
///
/// # Examples
///
/// ```rust
/// use splitscan::{ScanOptions, Scanner};
///
/// let options = ScanOptions {
///     max_token_size: 1024,
///     ..Default::default()
/// };
/// let mut scanner = Scanner::with_options(&b"one\ntwo\n"[..], options).unwrap();
/// assert!(scanner.advance());
/// assert_eq!(scanner.token(), b"one");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScanOptions {
    /// Size of the first allocation. Clamped to `max_token_size`.
    ///
    /// # Default
    ///
    /// `4096`
    pub initial_capacity: usize,

    /// Upper bound on the buffer size.
    ///
    /// Must be at least four bytes so that any UTF-8 code point fits.
    ///
    /// # Default
    ///
    /// 64 MiB
    pub max_token_size: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_token_size: DEFAULT_MAX_TOKEN_SIZE,
        }
    }
}

impl ScanOptions {
    /// Checks the options and returns them with `initial_capacity` clamped.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.max_token_size < MIN_MAX_TOKEN_SIZE {
            return Err(ConfigError::MaxTooSmall {
                max: self.max_token_size,
                min: MIN_MAX_TOKEN_SIZE,
            });
        }
        Ok(Self {
            initial_capacity: self.initial_capacity.clamp(1, self.max_token_size),
            ..self
        })
    }
}
