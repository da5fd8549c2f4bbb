#![expect(missing_docs)]

mod common;

use std::io::{self, Cursor, Read};

use regex::bytes::Regex;
use splitscan::{IoSource, ScanError, Scanner, Step, chunk_utils::Trickle, split};

/// Interrupts the first read, then serves `data`, then fails.
struct Flaky {
    interrupted: bool,
    data: &'static [u8],
}

impl Read for Flaky {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.interrupted {
            self.interrupted = true;
            return Err(io::ErrorKind::Interrupted.into());
        }
        if self.data.is_empty() {
            return Err(io::Error::other("disk on fire"));
        }
        self.data.read(buf)
    }
}

#[test]
fn cursor_lines() {
    let source = IoSource::new(Cursor::new("first\nsecond\n"));
    let scanner = Scanner::new(source);
    insta::assert_snapshot!(common::render(scanner), @r#"
    "first"
    "second"
    end
    "#);
}

#[test]
fn interrupted_reads_are_retried_and_errors_deferred() {
    let source = IoSource::new(Flaky {
        interrupted: false,
        data: b"one two three",
    });
    let mut scanner = Scanner::new(source).with_split(split::words);
    let words: Vec<Vec<u8>> = scanner.tokens_owned().collect();
    assert_eq!(words, [&b"one"[..], &b"two"[..], &b"three"[..]]);

    let err = scanner.into_result().unwrap_err();
    assert_eq!(err.kind(), "source");
    assert_eq!(err.to_string(), "source error: disk on fire");
    assert!(matches!(err, ScanError::Source(ref e) if e.kind() == io::ErrorKind::Other));
}

#[test]
fn regex_splitter_over_reader() {
    let digits = Regex::new(r"[0-9]+").unwrap();
    let source = Trickle::new(IoSource::new(Cursor::new("id=17, size=2048; retries=3")), 2);
    let mut scanner = Scanner::new(source).with_split(move |data, at_eof| match digits.find(data) {
        Some(m) if m.end() < data.len() || at_eof => Step::token(m.end(), &data[m.range()]),
        Some(m) => Step::skip(m.start()),
        None => Step::skip(data.len()),
    });

    let mut numbers = Vec::new();
    while scanner.advance() {
        numbers.push(scanner.token_str().unwrap().parse::<u32>().unwrap());
    }
    assert_eq!(numbers, [17, 2048, 3]);
    assert!(scanner.error().is_none());
}

#[test]
fn reader_is_recoverable() {
    let mut scanner = Scanner::new(IoSource::new(Cursor::new(b"a\nb\n".to_vec())));
    assert_eq!(scanner.next_token(), Some(&b"a"[..]));
    let cursor = scanner.into_source().into_inner();
    assert_eq!(cursor.position(), 4);
}
