#![allow(missing_docs)]
#![allow(dead_code)]

use core::fmt::{Display, Write};

use splitscan::{ByteSource, Scanner};

pub const LOG: &[u8] = b"alpha beta\r\n\ngamma\tdelta  epsilon\nzeta";

/// One line per token (as lossy text, debug-quoted), then how the scan
/// ended.
pub fn render<S>(mut scanner: Scanner<S>) -> String
where
    S: ByteSource,
    S::Error: Display,
{
    let mut out = String::new();
    while scanner.advance() {
        writeln!(out, "{:?}", scanner.text()).unwrap();
    }
    match scanner.error() {
        Some(err) => writeln!(out, "error[{}]: {err}", err.kind()).unwrap(),
        None => writeln!(out, "end").unwrap(),
    }
    out
}
