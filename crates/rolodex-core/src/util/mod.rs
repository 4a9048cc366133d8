//! Utilities shared across crates.

pub mod transliterate;

pub use transliterate::{AsciiTransliterator, Transliterator, to_ascii_token};
