//! CLI command implementations. Output goes to the supplied writer so the
//! commands can be exercised without a terminal.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Context;
use rolodex_rfc::rfc::vcard::VCardParser;
use rolodex_rfc::rfc::vcard::build::fold_line;

/// Decodes the file at `path` and writes its records as pretty JSON.
///
/// ## Errors
/// Returns an error if the file cannot be read or decoded, or if writing
/// fails.
pub fn decode(path: &Path, out: &mut impl Write) -> anyhow::Result<usize> {
    let parser = VCardParser::from_path(path)
        .with_context(|| format!("failed to decode {}", path.display()))?;

    tracing::info!(count = parser.len(), path = %path.display(), "Decoded contacts");

    serde_json::to_writer_pretty(&mut *out, parser.cards())?;
    writeln!(out)?;

    Ok(parser.len())
}

/// Folds every input line and writes it followed by CRLF.
///
/// ## Errors
/// Returns an error if reading or writing fails.
pub fn fold(input: impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line?;
        write!(out, "{}\r\n", fold_line(&line))?;
    }

    Ok(())
}
