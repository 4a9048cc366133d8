//! vCard decoding (RFC 2425 / RFC 2426).
//!
//! ## Usage
//!
//! ```rust
//! use rolodex_rfc::rfc::vcard::parse::VCardParser;
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:3.0\r\n\
//! item1.TEL;TYPE=WORK;TYPE=VOICE:+1 555 0100\r\n\
//! END:VCARD\r\n";
//!
//! let parser = VCardParser::parse(input)?;
//! let card = &parser.cards()[0];
//! assert_eq!(card.phone.get("WORK;VOICE"), Some(&["+1 555 0100".to_string()][..]));
//! # Ok::<(), rolodex_rfc::VCardError>(())
//! ```
//!
//! ## Features
//!
//! - Unfolds continuation lines and strips group labels
//! - Decodes base64, quoted-printable and legacy charsets
//! - Groups TEL, EMAIL, URL and ADR values by their TYPE parameters

mod decode;
mod lexer;
mod parser;
mod values;

pub use decode::{DecodedValue, decode_base64, decode_quoted_printable, decode_value, transcode};
pub use lexer::{ContentLine, parse_content_line, split_lines, unfold};
pub use parser::{LineOutcome, VCardParser, apply_line};
pub use values::{parse_address, parse_birthday, parse_categories, parse_name, unescape_text};
