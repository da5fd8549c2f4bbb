use alloc::vec::Vec;

use crate::{ByteSource, Scanner, Step, split};

/// Test-case count for property tests.
pub(crate) fn quickcheck_tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if cfg!(feature = "test-fast") {
        100
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Cuts `payload` into non-empty chunks whose sizes are derived from
/// `splits`; whatever is left after `splits` runs out becomes the last chunk.
pub(crate) fn chunk_by<'a>(payload: &'a [u8], splits: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::new();
    let mut rest = payload;
    for s in splits {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(1 + s % rest.len());
        chunks.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}

/// One of the built-in splitters, picked by `which`.
pub(crate) fn splitter(which: u8) -> fn(&[u8], bool) -> Step<'_> {
    match which % 4 {
        0 => split::bytes,
        1 => split::code_points,
        2 => split::words,
        _ => split::lines,
    }
}

/// Every token of a scan, plus the kind of error that ended it.
pub(crate) fn scan<S: ByteSource>(
    source: S,
    split: fn(&[u8], bool) -> Step<'_>,
    initial: usize,
) -> (Vec<Vec<u8>>, Option<&'static str>) {
    let mut scanner = Scanner::new(source).with_split(split);
    if let Err(err) = scanner.set_limits(initial, crate::DEFAULT_MAX_TOKEN_SIZE) {
        panic!("bad limits: {err}");
    }
    let tokens = scanner.tokens_owned().collect();
    (tokens, scanner.error().map(crate::ScanError::kind))
}
