//! vCard property value parsing.

use chrono::{NaiveDate, NaiveTime};

use crate::error::{VCardError, VCardResult};
use crate::rfc::vcard::core::{Address, StructuredName};

/// Unescapes text written by the builder: `\n` (or `\N`) becomes a line
/// break. Other backslashes are kept as written.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' && matches!(chars.peek(), Some('n' | 'N')) {
            chars.next();
            result.push('\n');
        } else {
            result.push(c);
        }
    }

    result
}

/// Parses an N value into its five positional components.
#[must_use]
pub fn parse_name(value: &str) -> StructuredName {
    StructuredName::from_components(value.split(';'))
}

/// Parses an ADR value into its seven positional components.
#[must_use]
pub fn parse_address(value: &str) -> Address {
    Address::from_components(value.split(';'))
}

/// Splits a CATEGORIES value on commas, trimming each entry.
#[must_use]
pub fn parse_categories(value: &str) -> Vec<String> {
    value.split(',').map(|c| c.trim().to_string()).collect()
}

/// Parses a BDAY value.
///
/// ## Summary
/// Accepts `YYYY-MM-DD` or `YYYYMMDD`, optionally followed by `T` and a
/// time (`HH:MM:SS` or `HHMMSS`, optional fraction, then `Z` or a numeric
/// offset). Only the date is kept.
///
/// ## Errors
/// Returns `MalformedDate` if either part does not parse.
pub fn parse_birthday(value: &str, line: usize) -> VCardResult<NaiveDate> {
    let s = value.trim();
    let malformed = || VCardError::MalformedDate {
        line,
        value: s.to_string(),
    };

    let (date, time) = match s.split_once(['T', 't']) {
        Some((date, time)) => (date, Some(time)),
        None => (s, None),
    };

    let date = parse_date(date).ok_or_else(malformed)?;

    if let Some(time) = time {
        parse_time(time).ok_or_else(malformed)?;
    }

    Ok(date)
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    ["%Y-%m-%d", "%Y%m%d"]
        .into_iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    let local = strip_utc_offset(s)?;

    ["%H:%M:%S%.f", "%H%M%S%.f"]
        .into_iter()
        .find_map(|fmt| NaiveTime::parse_from_str(local, fmt).ok())
}

/// Removes a trailing `Z` or `±HH[:]MM` designator.
fn strip_utc_offset(s: &str) -> Option<&str> {
    if let Some(local) = s.strip_suffix(['Z', 'z']) {
        return Some(local);
    }

    let Some(pos) = s.rfind(['+', '-']) else {
        return Some(s);
    };

    let offset = s[pos + 1..].replace(':', "");
    let valid = offset.len() == 4 && offset.bytes().all(|b| b.is_ascii_digit());

    valid.then_some(&s[..pos])
}
