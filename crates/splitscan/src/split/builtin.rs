use bstr::ByteSlice;

use super::{Step, is_space};

/// UTF-8 encoding of U+FFFD, delivered for every byte that does not start a
/// valid code point.
const REPLACEMENT: &[u8] = "\u{FFFD}".as_bytes();

/// Splits the input into single bytes.
pub fn bytes(data: &[u8], _at_eof: bool) -> Step<'_> {
    match data {
        [] => Step::need_more(),
        _ => Step::token(1, &data[..1]),
    }
}

/// Splits the input into UTF-8 encoded code points.
///
/// A byte that cannot start a valid encoding produces the encoding of
/// U+FFFD as its token and retires only that byte, so the sequence of tokens
/// matches decoding the input one error byte at a time.
pub fn code_points(data: &[u8], at_eof: bool) -> Step<'_> {
    let Some(&lead) = data.first() else {
        return Step::need_more();
    };
    if lead.is_ascii() {
        return Step::token(1, &data[..1]);
    }
    let (ch, width) = bstr::decode_utf8(data);
    if ch.is_some() {
        return Step::token(width, &data[..width]);
    }
    if !at_eof && is_incomplete(data) {
        return Step::need_more();
    }
    Step::token(1, REPLACEMENT)
}

/// Splits the input into runs of non-space code points, dropping the
/// spaces (as decided by [`is_space`]) between them. Never yields empty
/// tokens.
pub fn words(data: &[u8], at_eof: bool) -> Step<'_> {
    let mut start = 0;
    while start < data.len() {
        let (ch, width) = bstr::decode_utf8(&data[start..]);
        if !ch.is_some_and(is_space) {
            break;
        }
        start += width;
    }

    let mut i = start;
    while i < data.len() {
        let (ch, width) = bstr::decode_utf8(&data[i..]);
        if ch.is_some_and(is_space) {
            return Step::token(i + width, &data[start..i]);
        }
        i += width;
    }

    if at_eof && data.len() > start {
        return Step::token(data.len(), &data[start..]);
    }
    Step::skip(start)
}

/// Splits the input into lines.
///
/// The newline is never part of the token, nor is a single carriage return
/// right before it. A last line without a newline is still delivered (also
/// without a trailing carriage return); an input that ends in a newline
/// produces no extra empty token.
pub fn lines(data: &[u8], at_eof: bool) -> Step<'_> {
    if let Some(i) = data.find_byte(b'\n') {
        return Step::token(i + 1, drop_cr(&data[..i]));
    }
    if at_eof && !data.is_empty() {
        return Step::final_token(data.len(), drop_cr(data));
    }
    Step::need_more()
}

fn drop_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Whether `data` is a valid but truncated prefix of a multi-byte encoding.
fn is_incomplete(data: &[u8]) -> bool {
    let expected = match data[0] {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return false,
    };
    if data.len() >= expected {
        return false;
    }
    // The decoder reports the longest valid prefix; if that is all of `data`
    // the missing bytes may still arrive.
    let (_, valid) = bstr::decode_utf8(data);
    valid == data.len()
}
