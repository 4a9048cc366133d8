//! vCard text escaping.
//!
//! Only line breaks are escaped. Commas, semicolons and backslashes pass
//! through untouched, so a NOTE containing `;` or `,` is written as-is and
//! may be read back differently by strict consumers.

/// Escapes a value for output: CRLF, then any remaining LF, become `\n`.
#[must_use]
pub fn escape_text(s: &str) -> String {
    s.replace("\r\n", "\\n").replace('\n', "\\n")
}
