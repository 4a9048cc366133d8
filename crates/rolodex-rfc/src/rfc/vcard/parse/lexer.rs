//! vCard lexer for line unfolding and content line splitting.
//!
//! Works on bytes so that values in a legacy charset survive until the
//! decoder transcodes them.

use crate::rfc::vcard::core::normalize_type_param;

/// Normalizes line endings to LF and unfolds continuation lines.
///
/// CRLF and bare CR become LF. An LF followed by a space or tab is removed
/// together with that whitespace character, so a folded line joins without
/// a gap.
#[must_use]
pub fn unfold(input: &[u8]) -> Vec<u8> {
    let mut normalized = Vec::with_capacity(input.len());
    let mut bytes = input.iter().copied().peekable();

    while let Some(b) = bytes.next() {
        if b == b'\r' {
            if bytes.peek() == Some(&b'\n') {
                bytes.next();
            }
            normalized.push(b'\n');
        } else {
            normalized.push(b);
        }
    }

    let mut result = Vec::with_capacity(normalized.len());
    let mut bytes = normalized.into_iter().peekable();

    while let Some(b) = bytes.next() {
        if b == b'\n' && matches!(bytes.peek(), Some(b' ' | b'\t')) {
            bytes.next();
        } else {
            result.push(b);
        }
    }

    result
}

/// Splits unfolded input into non-empty physical lines with leading
/// whitespace removed. Trailing whitespace belongs to the value.
///
/// Yields `(line number, line)` pairs; line numbers are 1-based positions
/// in the unfolded input.
pub fn split_lines(unfolded: &[u8]) -> impl Iterator<Item = (usize, &[u8])> {
    unfolded
        .split(|&b| b == b'\n')
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_ascii_start()))
        .filter(|(_, line)| !line.is_empty())
}

/// A content line split into its parts, before value decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine<'a> {
    /// Property name, uppercased.
    pub name: String,
    /// Parameters in encounter order, `type=` prefixes removed.
    pub params: Vec<String>,
    /// Raw value bytes.
    pub value: &'a [u8],
}

impl ContentLine<'_> {
    /// Returns whether this is a `BEGIN:VCARD` line.
    #[must_use]
    pub fn is_begin(&self) -> bool {
        self.is_boundary("BEGIN")
    }

    /// Returns whether this is an `END:VCARD` line.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.is_boundary("END")
    }

    fn is_boundary(&self, name: &str) -> bool {
        self.name == name && self.value.trim_ascii().eq_ignore_ascii_case(b"VCARD")
    }
}

/// Splits a single line into name, parameters and value.
///
/// Format: `[group.]name[;param]*[:value]`. A missing colon yields an empty
/// value.
#[must_use]
pub fn parse_content_line(line: &[u8]) -> ContentLine<'_> {
    let line = strip_group(line);

    let (head, value) = match line.iter().position(|&b| b == b':') {
        Some(pos) => (&line[..pos], &line[pos + 1..]),
        None => (line, &line[line.len()..]),
    };

    let head = String::from_utf8_lossy(head);
    let mut parts = head.split(';');

    let name = parts.next().unwrap_or_default().trim().to_ascii_uppercase();
    let params = parts
        .map(normalize_type_param)
        .filter(|p| !p.is_empty())
        .map(ToString::to_string)
        .collect();

    ContentLine {
        name,
        params,
        value,
    }
}

/// Removes a leading `group.` label (ASCII letters, digits, underscore).
fn strip_group(line: &[u8]) -> &[u8] {
    let label_len = line
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();

    if label_len > 0 && line.get(label_len) == Some(&b'.') {
        &line[label_len + 1..]
    } else {
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn unfold_removes_continuation_whitespace() {
        let input = b"NOTE:Hello\r\n World\r\nFN:x\r\n";
        assert_eq!(unfold(input), b"NOTE:HelloWorld\nFN:x\n");
    }

    #[test_log::test]
    fn unfold_accepts_tab_and_bare_line_endings() {
        assert_eq!(unfold(b"A:1\n\t2\rB:3"), b"A:12\nB:3");
    }

    #[test_log::test]
    fn split_lines_trims_leading_whitespace_and_skips_blanks() {
        let lines: Vec<_> = split_lines(b"  BEGIN:VCARD\n \t\n\tFN:x\n").collect();
        assert_eq!(
            lines,
            vec![(1, &b"BEGIN:VCARD"[..]), (3, &b"FN:x"[..])]
        );
    }

    #[test_log::test]
    fn split_lines_keeps_trailing_whitespace() {
        let lines: Vec<_> = split_lines(b"NOTE:ends with space \nEND:VCARD \n").collect();
        assert_eq!(
            lines,
            vec![(1, &b"NOTE:ends with space "[..]), (2, &b"END:VCARD "[..])]
        );
        assert!(parse_content_line(lines[1].1).is_end());
    }

    #[test_log::test]
    fn empty_type_param_is_dropped() {
        let line = parse_content_line(b"TEL;TYPE=:555");
        assert_eq!(line.name, "TEL");
        assert!(line.params.is_empty());
        assert_eq!(line.value, b"555");
    }

    #[test_log::test]
    fn parse_simple_line() {
        let line = parse_content_line(b"FN:John Doe");
        assert_eq!(line.name, "FN");
        assert!(line.params.is_empty());
        assert_eq!(line.value, b"John Doe");
    }

    #[test_log::test]
    fn parse_splits_on_first_colon_only() {
        let line = parse_content_line(b"URL:http://example.com:8080/");
        assert_eq!(line.name, "URL");
        assert_eq!(line.value, b"http://example.com:8080/");
    }

    #[test_log::test]
    fn parse_strips_group_label() {
        let line = parse_content_line(b"item1.EMAIL;type=INTERNET:a@b.c");
        assert_eq!(line.name, "EMAIL");
        assert_eq!(line.params, vec!["INTERNET"]);
        assert_eq!(line.value, b"a@b.c");
    }

    #[test_log::test]
    fn parse_keeps_dot_after_colon() {
        let line = parse_content_line(b"URL:www.example.com");
        assert_eq!(line.name, "URL");
        assert_eq!(line.value, b"www.example.com");
    }

    #[test_log::test]
    fn parse_normalizes_type_params() {
        let line = parse_content_line(b"tel;TYPE=WORK;Type=voice;PREF:+1");
        assert_eq!(line.name, "TEL");
        assert_eq!(line.params, vec!["WORK", "voice", "PREF"]);
    }

    #[test_log::test]
    fn parse_missing_colon_yields_empty_value() {
        let line = parse_content_line(b"NOTE;CHARSET=utf-8");
        assert_eq!(line.name, "NOTE");
        assert_eq!(line.params, vec!["CHARSET=utf-8"]);
        assert!(line.value.is_empty());
    }

    #[test_log::test]
    fn boundaries_are_case_insensitive() {
        assert!(parse_content_line(b"begin:vcard").is_begin());
        assert!(parse_content_line(b"END:VCard").is_end());
        assert!(!parse_content_line(b"BEGIN:VCALENDAR").is_begin());
    }
}
