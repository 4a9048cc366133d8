//! vCard document decoder.

use std::io::Read;
use std::path::Path;

use super::decode::{DecodedValue, decode_value};
use super::lexer::{ContentLine, parse_content_line, split_lines, unfold};
use super::values::{parse_address, parse_birthday, parse_categories, parse_name, unescape_text};
use crate::error::{VCardError, VCardResult};
use crate::rfc::vcard::core::{
    ContactRecord, DEFAULT_ADDRESS_TYPES, DEFAULT_TYPE_KEY, names, type_key,
};

/// What applying one content line did to the open record.
#[derive(Debug)]
pub enum LineOutcome {
    /// A record field was set or appended to.
    Applied,
    /// The property is not one the decoder reads.
    Ignored,
    /// The line is fatal for the whole document.
    Error(VCardError),
}

/// Decoded contact records with a cursor.
///
/// ```rust
/// use rolodex_rfc::rfc::vcard::VCardParser;
///
/// let input = "BEGIN:VCARD\r\nVERSION:3.0\r\nN:Doe;John;;;\r\nEND:VCARD\r\n";
///
/// let parser = VCardParser::parse(input)?;
/// assert_eq!(parser.len(), 1);
/// assert_eq!(parser.current().and_then(|c| c.lastname()), Some("Doe"));
/// # Ok::<(), rolodex_rfc::VCardError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VCardParser {
    records: Vec<ContactRecord>,
    position: usize,
}

impl VCardParser {
    /// Decodes every `BEGIN:VCARD` / `END:VCARD` block in `input`.
    ///
    /// ## Summary
    /// Lines outside a block are skipped. A block without `END:VCARD` is
    /// discarded. Unknown properties are ignored.
    ///
    /// ## Errors
    /// Returns `MalformedDate` if a BDAY value cannot be parsed.
    #[tracing::instrument(skip(input), fields(input_len = input.as_ref().len()))]
    pub fn parse(input: impl AsRef<[u8]>) -> VCardResult<Self> {
        tracing::debug!("Decoding vCard document");

        let records = decode_records(input.as_ref())?;

        tracing::debug!(count = records.len(), "Decoded vCards");

        Ok(Self {
            records,
            position: 0,
        })
    }

    /// Reads `reader` to the end, then decodes it.
    ///
    /// ## Errors
    /// Returns `SourceUnreadable` if reading fails, or any error from
    /// [`Self::parse`].
    pub fn from_reader<R: Read>(mut reader: R) -> VCardResult<Self> {
        let mut input = Vec::new();
        reader.read_to_end(&mut input)?;
        Self::parse(input)
    }

    /// Reads the file at `path`, then decodes it.
    ///
    /// ## Errors
    /// Returns `SourceUnreadable` if the file cannot be read, or any error
    /// from [`Self::parse`].
    pub fn from_path(path: impl AsRef<Path>) -> VCardResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Reading vCard file");

        let input = std::fs::read(path)?;
        Self::parse(input)
    }

    /// All decoded records in document order.
    #[must_use]
    pub fn cards(&self) -> &[ContactRecord] {
        &self.records
    }

    /// Returns the record at `index`, if any.
    #[must_use]
    pub fn card_at(&self, index: usize) -> Option<&ContactRecord> {
        self.records.get(index)
    }

    /// Returns the record under the cursor, or `None` once the cursor has
    /// moved past the last record.
    #[must_use]
    pub fn current(&self) -> Option<&ContactRecord> {
        self.records.get(self.position)
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor to the next record.
    pub fn advance(&mut self) {
        if self.position < self.records.len() {
            self.position += 1;
        }
    }

    /// Returns whether the cursor points at a record.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.position < self.records.len()
    }

    /// Moves the cursor back to the first record.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContactRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<ContactRecord> {
        self.records
    }
}

impl IntoIterator for VCardParser {
    type Item = ContactRecord;
    type IntoIter = std::vec::IntoIter<ContactRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a VCardParser {
    type Item = &'a ContactRecord;
    type IntoIter = std::slice::Iter<'a, ContactRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn decode_records(input: &[u8]) -> VCardResult<Vec<ContactRecord>> {
    let unfolded = unfold(input);

    let mut records = Vec::new();
    let mut current: Option<ContactRecord> = None;

    for (line_num, line) in split_lines(&unfolded) {
        let content = parse_content_line(line);

        if content.is_begin() {
            if current.is_some() {
                tracing::warn!(line = line_num, "Discarding unclosed vCard");
            }
            current = Some(ContactRecord::default());
            continue;
        }

        if content.is_end() {
            match current.take() {
                Some(record) => records.push(record),
                None => tracing::debug!(line = line_num, "END:VCARD without BEGIN"),
            }
            continue;
        }

        let Some(record) = current.as_mut() else {
            tracing::trace!(line = line_num, "Skipping line outside vCard");
            continue;
        };

        match apply_line(record, &content, line_num) {
            LineOutcome::Applied => {}
            LineOutcome::Ignored => {
                tracing::trace!(line = line_num, name = %content.name, "Ignoring property");
            }
            LineOutcome::Error(err) => {
                tracing::warn!(line = line_num, error = %err, "Aborting vCard decode");
                return Err(err);
            }
        }
    }

    if current.is_some() {
        tracing::warn!("Discarding unclosed vCard at end of input");
    }

    Ok(records)
}

/// Decodes one property value and stores it on `record`.
#[must_use]
pub fn apply_line(record: &mut ContactRecord, content: &ContentLine<'_>, line: usize) -> LineOutcome {
    let DecodedValue { bytes, raw, params } = decode_value(content.value, &content.params);

    match content.name.as_str() {
        names::FN => record.fullname = Some(text(&bytes)),
        names::N => record.name = Some(parse_name(&text(&bytes))),
        names::BDAY => match parse_birthday(&text(&bytes), line) {
            Ok(date) => record.birthday = Some(date),
            Err(err) => return LineOutcome::Error(err),
        },
        names::ADR => record.address.push(
            type_key(&params, DEFAULT_ADDRESS_TYPES),
            parse_address(&text(&bytes)),
        ),
        names::TEL => record
            .phone
            .push(type_key(&params, DEFAULT_TYPE_KEY), text(&bytes)),
        names::EMAIL => record
            .email
            .push(type_key(&params, DEFAULT_TYPE_KEY), text(&bytes)),
        names::URL => record
            .url
            .push(type_key(&params, DEFAULT_TYPE_KEY), text(&bytes)),
        names::REV => record.revision = Some(text(&bytes)),
        names::VERSION => record.version = Some(text(&bytes)),
        names::ORG => record.organization = Some(text(&bytes)),
        names::TITLE => record.title = Some(text(&bytes)),
        names::PHOTO if raw => record.raw_photo = Some(bytes),
        names::PHOTO => record.photo = Some(text(&bytes)),
        names::LOGO if raw => record.raw_logo = Some(bytes),
        names::LOGO => record.logo = Some(text(&bytes)),
        names::NOTE => record.note = Some(unescape_text(&text(&bytes))),
        names::CATEGORIES => record.categories = Some(parse_categories(&text(&bytes))),
        names::LABEL => record.label = Some(text(&bytes)),
        _ => return LineOutcome::Ignored,
    }

    LineOutcome::Applied
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
