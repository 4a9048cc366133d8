//! vCard line folding (RFC 2425 §5.8.1).

/// Maximum number of characters kept on one physical line before folding.
pub const MAX_LINE_LENGTH: usize = 75;

/// Separator inserted between folded segments.
pub const FOLD_SEPARATOR: &str = "\r\n ";

/// Folds a logical line.
///
/// Lines of at most 75 octets are returned unchanged. Longer lines are cut
/// into 75-unit segments, each continuation prefixed with a single space
/// and joined by CRLF; no separator trails the last segment. Pure ASCII is
/// cut by byte, anything else by code point so that a multi-byte sequence
/// is never split.
#[must_use]
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_LENGTH {
        return line.to_string();
    }

    if line.is_ascii() {
        fold_ascii(line)
    } else {
        fold_code_points(line)
    }
}

/// Byte-chunked fast path for long ASCII payloads such as inline base64.
fn fold_ascii(line: &str) -> String {
    let segments = line.len().div_ceil(MAX_LINE_LENGTH);
    let mut result = String::with_capacity(line.len() + segments * FOLD_SEPARATOR.len());

    let mut rest = line;
    while rest.len() > MAX_LINE_LENGTH {
        // ASCII: every byte offset is a char boundary
        let (head, tail) = rest.split_at(MAX_LINE_LENGTH);
        result.push_str(head);
        result.push_str(FOLD_SEPARATOR);
        rest = tail;
    }
    result.push_str(rest);

    result
}

fn fold_code_points(line: &str) -> String {
    let mut result = String::with_capacity(line.len() + line.len() / MAX_LINE_LENGTH * 3);

    for (count, c) in line.chars().enumerate() {
        if count > 0 && count % MAX_LINE_LENGTH == 0 {
            result.push_str(FOLD_SEPARATOR);
        }
        result.push(c);
    }

    result
}
