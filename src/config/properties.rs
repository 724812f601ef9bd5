//! Parser for the `key=value` properties format used by the base
//! configuration source and override files.

use std::collections::HashMap;

use crate::error::{ConfigError, ConfigResult};

/// Parse a properties document into a key/value map.
///
/// Later duplicates replace earlier ones. Comments start with `#` or `!`.
/// Lines end at `\n`, `\r` or `\r\n`.
pub fn parse_properties(input: &str) -> ConfigResult<HashMap<String, String>> {
    let mut out = HashMap::new();
    let mut lines = physical_lines(input).enumerate();

    while let Some((idx, raw)) = lines.next() {
        let first = raw.trim_start_matches(is_blank);
        if first.is_empty() || first.starts_with('#') || first.starts_with('!') {
            continue;
        }

        let start_line = idx + 1;
        let mut logical = String::from(first);
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        let key = unescape(key).map_err(|message| ConfigError::Syntax {
            line: start_line,
            message,
        })?;
        let value = unescape(value).map_err(|message| ConfigError::Syntax {
            line: start_line,
            message,
        })?;
        out.insert(key, value);
    }

    Ok(out)
}

fn physical_lines(input: &str) -> impl Iterator<Item = &str> {
    let mut rest = input;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(['\n', '\r']) {
            Some(end) => {
                let line = &rest[..end];
                let skip = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + skip..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// An odd run of trailing backslashes means the line continues.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Split a logical line into raw (still escaped) key and value parts.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            key_end = i;
            break;
        }
    }

    let key = &line[..key_end];
    let rest = line[key_end..].trim_start_matches(is_blank);
    let rest = match rest.strip_prefix(['=', ':']) {
        Some(stripped) => stripped.trim_start_matches(is_blank),
        None => rest,
    };
    (key, rest)
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => out.push(decode_unicode_escape(&mut chars)?),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

/// Decode the digits after `\u`. A high surrogate must be followed by a
/// `\uXXXX` low surrogate; the pair becomes one char.
fn decode_unicode_escape(chars: &mut std::str::Chars<'_>) -> Result<char, String> {
    let high = read_code_unit(chars)?;
    if !(0xD800..=0xDBFF).contains(&high) {
        return char::from_u32(u32::from(high))
            .ok_or_else(|| format!("unpaired surrogate \\u{high:04X}"));
    }

    let mut ahead = chars.clone();
    if ahead.next() != Some('\\') || ahead.next() != Some('u') {
        return Err(format!("unpaired surrogate \\u{high:04X}"));
    }
    let low = read_code_unit(&mut ahead)?;
    let decoded = char::decode_utf16([high, low])
        .next()
        .and_then(Result::ok)
        .ok_or_else(|| format!("unpaired surrogate \\u{high:04X}\\u{low:04X}"))?;
    *chars = ahead;
    Ok(decoded)
}

fn read_code_unit(chars: &mut std::str::Chars<'_>) -> Result<u16, String> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.chars().count() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("malformed \\uxxxx encoding: \\u{hex}"));
    }
    u16::from_str_radix(&hex, 16).map_err(|err| format!("malformed \\uxxxx encoding: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_and_whitespace() {
        let props = parse_properties(
            "a=1\nb = 2\nc:3\nd 4\n  e\t=\t five words \nf\n",
        )
        .unwrap();
        assert_eq!(props["a"], "1");
        assert_eq!(props["b"], "2");
        assert_eq!(props["c"], "3");
        assert_eq!(props["d"], "4");
        assert_eq!(props["e"], "five words ");
        assert_eq!(props["f"], "");
    }

    #[test]
    fn comments_and_blank_lines_skipped() {
        let props = parse_properties("# comment\n! also\n\n   \nkey=value\n").unwrap();
        assert_eq!(props.len(), 1);
        assert_eq!(props["key"], "value");
    }

    #[test]
    fn line_continuation_drops_leading_whitespace() {
        let props = parse_properties("list=a,\\\n    b,\\\n    c\nnext=1\n").unwrap();
        assert_eq!(props["list"], "a,b,c");
        assert_eq!(props["next"], "1");
    }

    #[test]
    fn escaped_backslash_is_not_continuation() {
        let props = parse_properties("path=C:\\\\temp\\\\\nother=x\n").unwrap();
        assert_eq!(props["path"], "C:\\temp\\");
        assert_eq!(props["other"], "x");
    }

    #[test]
    fn escaped_separators_in_key() {
        let props = parse_properties("a\\=b\\:c\\ d=value\n").unwrap();
        assert_eq!(props["a=b:c d"], "value");
    }

    #[test]
    fn unicode_and_control_escapes() {
        let props = parse_properties("greet=caf\\u00e9\\tok\n").unwrap();
        assert_eq!(props["greet"], "café\tok");
    }

    #[test]
    fn malformed_unicode_escape_is_error() {
        let err = parse_properties("ok=1\nbad=\\u12zz\n").unwrap_err();
        match err {
            ConfigError::Syntax { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn surrogate_pair_escape_decodes_to_one_char() {
        let props = parse_properties("smile=\\uD83D\\uDE00!\n").unwrap();
        assert_eq!(props["smile"], "\u{1F600}!");
    }

    #[test]
    fn unpaired_surrogates_are_errors() {
        for doc in [
            "a=\\uD83D\n",
            "a=\\uD83Dx\n",
            "a=\\uD83D\\u0041\n",
            "a=\\uDE00\n",
        ] {
            assert!(parse_properties(doc).is_err(), "expected error for {doc:?}");
        }
    }

    #[test]
    fn malformed_hex_digits_are_errors() {
        for doc in ["a=\\u+041\n", "a=\\u-041\n", "a=\\u 041\n", "a=\\u04\n", "a=\\u\n"] {
            assert!(parse_properties(doc).is_err(), "expected error for {doc:?}");
        }
        assert_eq!(parse_properties("a=\\u0041\n").unwrap()["a"], "A");
    }

    #[test]
    fn carriage_returns_end_lines() {
        let props = parse_properties("a=1\rb=2\r\nc=3\nd=4").unwrap();
        assert_eq!(props.len(), 4);
        assert_eq!(props["a"], "1");
        assert_eq!(props["b"], "2");
        assert_eq!(props["c"], "3");
        assert_eq!(props["d"], "4");

        let props = parse_properties("list=a,\\\r  b\r\nnext=x\r").unwrap();
        assert_eq!(props["list"], "a,b");
        assert_eq!(props["next"], "x");
    }

    #[test]
    fn line_numbers_count_crlf_once() {
        match parse_properties("ok=1\r\nok2=2\r\nbad=\\uZZZZ\r\n").unwrap_err() {
            ConfigError::Syntax { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn duplicate_key_last_wins() {
        let props = parse_properties("k=first\nk=second\n").unwrap();
        assert_eq!(props["k"], "second");
    }

    #[test]
    fn value_may_contain_separators() {
        let props = parse_properties("url=http://localhost:8080/a=b\n").unwrap();
        assert_eq!(props["url"], "http://localhost:8080/a=b");
    }
}
