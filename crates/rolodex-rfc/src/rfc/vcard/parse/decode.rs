//! Value transfer decoding: base64, quoted-printable and charset.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, general_purpose};

/// Base64 engine that accepts payloads with or without padding and with
/// non-zero bits after the last full byte.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    general_purpose::PAD
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// A transfer step requested by a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transfer<'a> {
    Base64,
    QuotedPrintable,
    Charset(&'a str),
}

impl<'a> Transfer<'a> {
    fn from_param(param: &'a str) -> Option<Self> {
        const CHARSET: &str = "charset=";

        let lower = param.to_ascii_lowercase();

        if lower.contains("base64") || lower == "encoding=b" {
            Some(Self::Base64)
        } else if lower.contains("quoted-printable") {
            Some(Self::QuotedPrintable)
        } else if lower.starts_with(CHARSET) {
            Some(Self::Charset(param[CHARSET.len()..].trim_matches('"')))
        } else {
            None
        }
    }
}

/// A value after transfer decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedValue {
    pub bytes: Vec<u8>,
    /// Set when a base64 or quoted-printable step succeeded.
    pub raw: bool,
    /// Parameters that did not request a transfer step.
    pub params: Vec<String>,
}

/// Applies every transfer parameter in encounter order, each step consuming
/// the previous step's output. Transfer parameters are removed from the
/// returned parameter list whether or not their step succeeded.
#[must_use]
pub fn decode_value(value: &[u8], params: &[String]) -> DecodedValue {
    let mut bytes = value.to_vec();
    let mut raw = false;
    let mut retained = Vec::with_capacity(params.len());

    for param in params {
        match Transfer::from_param(param) {
            Some(Transfer::Base64) => {
                if let Some(decoded) = decode_base64(&bytes) {
                    bytes = decoded;
                    raw = true;
                } else {
                    tracing::warn!(len = bytes.len(), "Leaving undecodable base64 value as is");
                }
            }
            Some(Transfer::QuotedPrintable) => {
                bytes = decode_quoted_printable(&bytes);
                raw = true;
            }
            Some(Transfer::Charset(label)) => {
                if let Some(transcoded) = transcode(&bytes, label) {
                    bytes = transcoded.into_bytes();
                }
            }
            None => retained.push(param.clone()),
        }
    }

    DecodedValue {
        bytes,
        raw,
        params: retained,
    }
}

/// Decodes base64, ignoring embedded ASCII whitespace and missing padding.
#[must_use]
pub fn decode_base64(input: &[u8]) -> Option<Vec<u8>> {
    let compact: Vec<u8> = input
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    LENIENT_BASE64.decode(compact).ok()
}

/// Decodes quoted-printable leniently.
///
/// `=XX` becomes a byte and `=` followed by a line break is removed. Any
/// other `=` is kept as written.
#[must_use]
pub fn decode_quoted_printable(input: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        let b = input[i];

        if b == b'=' {
            match (input.get(i + 1), input.get(i + 2)) {
                (Some(b'\n'), _) => {
                    i += 2;
                    continue;
                }
                (Some(b'\r'), Some(b'\n')) => {
                    i += 3;
                    continue;
                }
                (Some(&hi), Some(&lo)) => {
                    if let (Some(hi), Some(lo)) = (hex_value(hi), hex_value(lo)) {
                        result.push((hi << 4) | lo);
                        i += 3;
                        continue;
                    }
                }
                _ => {}
            }
        }

        result.push(b);
        i += 1;
    }

    result
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Transcodes `input` from the charset named by `label` to UTF-8.
///
/// Returns `None` for unknown labels or input that is malformed in that
/// charset.
#[must_use]
pub fn transcode(input: &[u8], label: &str) -> Option<String> {
    let Some(encoding) = encoding_rs::Encoding::for_label(label.trim().as_bytes()) else {
        tracing::warn!(label, "Unknown charset label");
        return None;
    };

    let decoded = encoding.decode_without_bom_handling_and_without_replacement(input);
    if decoded.is_none() {
        tracing::warn!(label, "Value is malformed in declared charset");
    }

    decoded.map(std::borrow::Cow::into_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test_log::test]
    fn base64_ignores_whitespace_and_padding() {
        assert_eq!(decode_base64(b"aGVs\r\n bG8=").unwrap(), b"hello");
        assert_eq!(decode_base64(b"aGVsbG8").unwrap(), b"hello");
        assert!(decode_base64(b"!!!").is_none());
    }

    #[test_log::test]
    fn base64_accepts_nonzero_trailing_bits() {
        assert_eq!(decode_base64(b"aGl").unwrap(), b"hi");

        let jpeg = decode_base64(b"/9j/4AAQSkZJRgABAQEAYABgAAD").unwrap();
        assert_eq!(jpeg[..4], [0xFF, 0xD8, 0xFF, 0xE0]);
    }

    #[test_log::test]
    fn quoted_printable_decodes_escapes() {
        assert_eq!(decode_quoted_printable(b"caf=C3=A9"), "café".as_bytes());
        assert_eq!(decode_quoted_printable(b"soft=\nbreak"), b"softbreak");
    }

    #[test_log::test]
    fn quoted_printable_keeps_invalid_sequences() {
        assert_eq!(decode_quoted_printable(b"a=ZZb"), b"a=ZZb");
        assert_eq!(decode_quoted_printable(b"end="), b"end=");
    }

    #[test_log::test]
    fn transcode_latin1() {
        assert_eq!(transcode(b"Caf\xe9", "ISO-8859-1").unwrap(), "Café");
        assert!(transcode(b"x", "no-such-charset").is_none());
    }

    #[test_log::test]
    fn transcode_rejects_malformed_utf8() {
        assert!(transcode(b"\xff\xfe", "utf-8").is_none());
    }

    #[test_log::test]
    fn decode_value_marks_base64_raw_and_drops_param() {
        let decoded = decode_value(b"aGk=", &params(&["ENCODING=b", "JPEG"]));
        assert_eq!(decoded.bytes, b"hi");
        assert!(decoded.raw);
        assert_eq!(decoded.params, vec!["JPEG"]);
    }

    #[test_log::test]
    fn decode_value_accepts_bare_base64_param() {
        let decoded = decode_value(b"aGk=", &params(&["BASE64"]));
        assert_eq!(decoded.bytes, b"hi");
        assert!(decoded.raw);
        assert!(decoded.params.is_empty());
    }

    #[test_log::test]
    fn decode_value_leaves_bad_base64_unmarked() {
        let decoded = decode_value(b"not base64!", &params(&["ENCODING=b"]));
        assert_eq!(decoded.bytes, b"not base64!");
        assert!(!decoded.raw);
        assert!(decoded.params.is_empty());
    }

    #[test_log::test]
    fn decode_value_chains_quoted_printable_then_charset() {
        let decoded = decode_value(
            b"Caf=E9",
            &params(&["ENCODING=QUOTED-PRINTABLE", "CHARSET=ISO-8859-1"]),
        );
        assert_eq!(String::from_utf8(decoded.bytes).unwrap(), "Café");
        assert!(decoded.raw);
        assert!(decoded.params.is_empty());
    }

    #[test_log::test]
    fn decode_value_swallows_unknown_charset() {
        let decoded = decode_value(b"plain", &params(&["CHARSET=bogus", "HOME"]));
        assert_eq!(decoded.bytes, b"plain");
        assert!(!decoded.raw);
        assert_eq!(decoded.params, vec!["HOME"]);
    }
}
