//! vCard building and serialization (RFC 2426).
//!
//! [`VCardBuilder`] accumulates properties and serializes them as a single
//! `VERSION:3.0` card with folded, CRLF-terminated lines.

mod builder;
mod clock;
mod escape;
mod fold;
mod serializer;

pub use builder::VCardBuilder;
pub use clock::{Clock, FixedClock, SystemClock, format_rev};
pub use escape::escape_text;
pub use fold::{FOLD_SEPARATOR, MAX_LINE_LENGTH, fold_line};
pub use serializer::serialize_vcard;
