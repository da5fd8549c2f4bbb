#![expect(missing_docs)]

mod common;

use splitscan::{Scanner, Step, chunk_utils::Trickle, split};

use crate::common::{LOG, render};

#[test]
fn snapshot_lines() {
    insta::assert_snapshot!(render(Scanner::new(LOG)), @r#"
    "alpha beta"
    ""
    "gamma\tdelta  epsilon"
    "zeta"
    end
    "#);
}

#[test]
fn snapshot_words_trickled() {
    let scanner = Scanner::new(Trickle::new(LOG, 3)).with_split(split::words);
    insta::assert_snapshot!(render(scanner), @r#"
    "alpha"
    "beta"
    "gamma"
    "delta"
    "epsilon"
    "zeta"
    end
    "#);
}

#[test]
fn snapshot_code_points() {
    let scanner = Scanner::new("a¼☹".as_bytes()).with_split(split::code_points);
    insta::assert_snapshot!(render(scanner), @r#"
    "a"
    "¼"
    "☹"
    end
    "#);
}

#[test]
fn snapshot_line_too_long() {
    let mut scanner = Scanner::new(&b"ok\n0123456789abcdefghij\n"[..]);
    scanner.set_limits(4, 16).unwrap();
    insta::assert_snapshot!(render(scanner), @r#"
    "ok"
    error[token_too_long]: token exceeds the maximum buffer size of 16 bytes
    "#);
}

#[test]
fn snapshot_split_failure() {
    let scanner = Scanner::new(&b"a,b,,c"[..]).with_split(|data, at_eof| {
        let field = match data.iter().position(|&b| b == b',') {
            Some(i) => Step::token(i + 1, &data[..i]),
            None if at_eof => Step::final_token(data.len(), data),
            None => return Step::need_more(),
        };
        if field.token.is_some_and(<[u8]>::is_empty) {
            return Step::fail("empty field");
        }
        field
    });
    insta::assert_snapshot!(render(scanner), @r#"
    "a"
    "b"
    error[split]: split error: empty field
    "#);
}
