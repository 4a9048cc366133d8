//! Filename transliteration.
//!
//! ## Summary
//! Turns arbitrary Unicode text into an ASCII token suitable for a file name.
//! Accented letters lose their marks (via canonical decomposition), letters
//! without a decomposition get a fixed ASCII spelling, and everything else
//! collapses into the separator.

use icu::normalizer::DecomposingNormalizerBorrowed;

/// Converts free text into an ASCII filename token.
pub trait Transliterator {
    /// Returns `input` as lowercase ASCII, with runs of other characters
    /// replaced by `separator`.
    fn transliterate(&self, input: &str, separator: &str) -> String;
}

/// Default transliterator backed by NFD decomposition.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiTransliterator;

impl Transliterator for AsciiTransliterator {
    fn transliterate(&self, input: &str, separator: &str) -> String {
        to_ascii_token(input, separator)
    }
}

/// Letters that survive NFD as a single non-ASCII code point.
fn spell_out(c: char) -> Option<&'static str> {
    Some(match c {
        'ß' => "ss",
        'æ' | 'Æ' => "ae",
        'ø' | 'Ø' => "o",
        'œ' | 'Œ' => "oe",
        'ł' | 'Ł' => "l",
        'đ' | 'Đ' | 'ð' | 'Ð' => "d",
        'þ' | 'Þ' => "th",
        'ı' => "i",
        _ => return None,
    })
}

/// Generate an ASCII token from a name.
///
/// Examples:
/// - "Jeroen Desloovere" -> "jeroen_desloovere" (separator `_`)
/// - "Zoë Ångström" -> "zoe-angstrom" (separator `-`)
/// - "Straße & Co" -> "strasse-co" (separator `-`)
#[must_use]
pub fn to_ascii_token(input: &str, separator: &str) -> String {
    let decomposed = DecomposingNormalizerBorrowed::new_nfd().normalize(input);

    let mut spelled = String::with_capacity(decomposed.len());
    for c in decomposed.chars() {
        if c.is_ascii_alphanumeric() {
            spelled.push(c.to_ascii_lowercase());
        } else if let Some(ascii) = spell_out(c) {
            spelled.push_str(ascii);
        } else if c.is_ascii() || c.is_whitespace() {
            spelled.push(' ');
        }
        // Remaining non-ASCII code points are combining marks or scripts
        // without a Latin spelling; drop them.
    }

    spelled
        .split(' ')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
