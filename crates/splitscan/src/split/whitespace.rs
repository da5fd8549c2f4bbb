/// Reports whether `ch` separates words: the Unicode `White_Space` property.
///
/// Latin-1 is decided by a match on the few separators it contains; above
/// that only a handful of blocks hold spaces at all.
#[inline]
#[must_use]
pub fn is_space(ch: char) -> bool {
    if ch <= '\u{00FF}' {
        return matches!(
            ch,
            ' ' | '\t' | '\n' | '\u{000B}' | '\u{000C}' | '\r' | '\u{0085}' | '\u{00A0}'
        );
    }
    if ('\u{2000}'..='\u{200A}').contains(&ch) {
        return true;
    }
    matches!(
        ch,
        '\u{1680}' | '\u{2028}' | '\u{2029}' | '\u{202F}' | '\u{205F}' | '\u{3000}'
    )
}

#[cfg(test)]
mod tests {
    use super::is_space;

    #[test]
    #[cfg_attr(miri, ignore)]
    fn agrees_with_unicode_white_space() {
        for ch in (0..=u32::from(char::MAX)).filter_map(char::from_u32) {
            assert_eq!(
                is_space(ch),
                ch.is_whitespace(),
                "white space property disagrees for {ch:?}"
            );
        }
    }

    #[test]
    fn ascii_separators() {
        for ch in [' ', '\t', '\n', '\r', '\u{000B}', '\u{000C}'] {
            assert!(is_space(ch), "{ch:?}");
        }
        for ch in ['a', '0', '_', '\0', '\u{001F}'] {
            assert!(!is_space(ch), "{ch:?}");
        }
    }
}
