//! vCard builder.

use std::fmt;

use rolodex_core::config::EncoderConfig;
use rolodex_core::constants::{
    DEFAULT_CHARSET, DEFAULT_FILENAME, DEFAULT_FILENAME_SEPARATOR, VCARD_CONTENT_TYPE,
    VCARD_FILE_EXTENSION, VCARD_FILE_SUFFIX,
};
use rolodex_core::util::{AsciiTransliterator, Transliterator};

use super::clock::{Clock, SystemClock, format_rev};
use super::serializer::serialize_vcard;
use crate::error::VCardResult;
use crate::rfc::vcard::core::{
    Address, DEFAULT_ADDRESS_TYPES, Element, PropertyStore, PropertyValue, StructuredName,
    property_key, types,
};
use crate::rfc::vcard::media::{FileSystemFetcher, MediaFetcher, MediaResolver, MediaSource};

/// Accumulates properties for a single vCard.
///
/// Every `add_*` call validates before it mutates: a rejected call leaves
/// the builder exactly as it was. Single-valued elements may be added once;
/// email, address, phone number, URL and label may repeat.
///
/// ```rust
/// use rolodex_rfc::rfc::vcard::{StructuredName, VCardBuilder};
///
/// let mut builder = VCardBuilder::new();
/// builder
///     .add_name(&StructuredName::simple("Doe", "John"))?
///     .add_email("john@example.com", "")?;
///
/// let card = builder.build_vcard();
/// assert!(card.contains("FN;CHARSET=utf-8:John Doe\r\n"));
/// # Ok::<(), rolodex_rfc::VCardError>(())
/// ```
pub struct VCardBuilder {
    store: PropertyStore,
    charset: String,
    filename: Option<String>,
    filename_separator: String,
    clock: Box<dyn Clock>,
    transliterator: Box<dyn Transliterator>,
    fetcher: Box<dyn MediaFetcher>,
}

impl Default for VCardBuilder {
    fn default() -> Self {
        Self {
            store: PropertyStore::new(),
            charset: DEFAULT_CHARSET.to_string(),
            filename: None,
            filename_separator: DEFAULT_FILENAME_SEPARATOR.to_string(),
            clock: Box::new(SystemClock),
            transliterator: Box::new(AsciiTransliterator),
            fetcher: Box::new(FileSystemFetcher),
        }
    }
}

impl fmt::Debug for VCardBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VCardBuilder")
            .field("store", &self.store)
            .field("charset", &self.charset)
            .field("filename", &self.filename)
            .finish_non_exhaustive()
    }
}

impl VCardBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder using the configured charset and filename separator.
    #[must_use]
    pub fn from_settings(config: &EncoderConfig) -> Self {
        Self {
            charset: config.charset.clone(),
            filename_separator: config.filename_separator.clone(),
            ..Self::default()
        }
    }

    /// Replaces the REV time source.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replaces the filename transliterator.
    #[must_use]
    pub fn with_transliterator(mut self, transliterator: impl Transliterator + 'static) -> Self {
        self.transliterator = Box::new(transliterator);
        self
    }

    /// Replaces the attachment fetcher used by [`Self::add_photo`] and
    /// [`Self::add_logo`].
    #[must_use]
    pub fn with_fetcher(mut self, fetcher: impl MediaFetcher + 'static) -> Self {
        self.fetcher = Box::new(fetcher);
        self
    }

    // --- Charset ---

    #[must_use]
    pub fn charset(&self) -> &str {
        &self.charset
    }

    /// Sets the charset advertised on text properties added from now on.
    pub fn set_charset(&mut self, charset: impl Into<String>) {
        self.charset = charset.into();
    }

    // --- Properties ---

    /// Properties added so far, in output order.
    #[must_use]
    pub fn properties(&self) -> &PropertyStore {
        &self.store
    }

    /// Appends a raw property.
    ///
    /// ## Errors
    /// Returns `DuplicateElement` if `element` is single-valued and already set.
    pub fn set_property(
        &mut self,
        element: Element,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> VCardResult<&mut Self> {
        self.store.set_property(element, key, value)?;
        Ok(self)
    }

    /// Returns whether a property with exactly `key` and a non-empty value
    /// exists.
    #[must_use]
    pub fn has_property(&self, key: &str) -> bool {
        self.store.has_property(key)
    }

    fn text_key(&self, element: Element, types: &str) -> String {
        property_key(element.property_name(), types, Some(&self.charset))
    }

    fn plain_key(element: Element, types: &str) -> String {
        property_key(element.property_name(), types, None)
    }

    // --- Identification ---

    /// Adds N and, unless an FN is already present, an FN derived from the
    /// non-empty name parts. Also derives the filename from the name.
    ///
    /// ## Errors
    /// Returns `DuplicateElement` if a name was already added.
    pub fn add_name(&mut self, name: &StructuredName) -> VCardResult<&mut Self> {
        self.store.ensure_available(Element::Name)?;

        let fn_key = self.text_key(Element::Fullname, "");
        let derive_fullname =
            !self.store.has_property(&fn_key) && !self.store.is_defined(Element::Fullname);

        let n_key = self.text_key(Element::Name, "");
        self.store.set_property(Element::Name, n_key, name.to_value())?;

        let fullname = name.display_name();
        if derive_fullname && !fullname.is_empty() {
            self.store.set_property(Element::Fullname, fn_key, fullname)?;
        }

        self.set_filename(&name.display_parts(), true);

        Ok(self)
    }

    /// Adds BDAY. The value is written as given (e.g. `1985-04-12`).
    ///
    /// ## Errors
    /// Returns `DuplicateElement` if a birthday was already added.
    pub fn add_birthday(&mut self, date: &str) -> VCardResult<&mut Self> {
        let key = Self::plain_key(Element::Birthday, "");
        self.set_property(Element::Birthday, key, date)
    }

    /// Adds a photo from a URL or local path. When `inline` is set the
    /// payload is fetched and embedded as base64.
    ///
    /// ## Errors
    /// Returns `DuplicateElement`, `InvalidAttachment`,
    /// `EmptyAttachmentPayload` or `AttachmentFetch`.
    pub fn add_photo(&mut self, location: &str, inline: bool) -> VCardResult<&mut Self> {
        self.add_media(Element::Photo, MediaSource::location(location), inline)
    }

    /// Adds a photo from in-memory image bytes, always inlined.
    ///
    /// ## Errors
    /// Returns `DuplicateElement` or `InvalidAttachment`.
    pub fn add_photo_content(&mut self, bytes: &[u8]) -> VCardResult<&mut Self> {
        self.add_media(Element::Photo, MediaSource::Buffer(bytes), true)
    }

    // --- Delivery addressing ---

    /// Adds an ADR. `None` uses the default `WORK;POSTAL` type; an empty
    /// string writes no type.
    ///
    /// ## Errors
    /// Never fails in practice; addresses are multi-valued.
    pub fn add_address(&mut self, address: &Address, types: Option<&str>) -> VCardResult<&mut Self> {
        let key = self.text_key(Element::Address, types.unwrap_or(DEFAULT_ADDRESS_TYPES));
        self.set_property(Element::Address, key, address.to_value())
    }

    /// Adds a LABEL (formatted delivery address).
    ///
    /// ## Errors
    /// Never fails in practice; labels are multi-valued.
    pub fn add_label(&mut self, label: &str, types: &str) -> VCardResult<&mut Self> {
        let key = Self::plain_key(Element::Label, types);
        self.set_property(Element::Label, key, label)
    }

    // --- Communications ---

    /// Adds an `EMAIL;INTERNET[;types]`.
    ///
    /// ## Errors
    /// Never fails in practice; emails are multi-valued.
    pub fn add_email(&mut self, address: &str, types: &str) -> VCardResult<&mut Self> {
        let types = if types.is_empty() {
            types::INTERNET.to_string()
        } else {
            format!("{};{types}", types::INTERNET)
        };
        let key = Self::plain_key(Element::Email, &types);
        self.set_property(Element::Email, key, address)
    }

    /// Adds a TEL.
    ///
    /// ## Errors
    /// Never fails in practice; phone numbers are multi-valued.
    pub fn add_phone_number(&mut self, number: &str, types: &str) -> VCardResult<&mut Self> {
        let key = Self::plain_key(Element::PhoneNumber, types);
        self.set_property(Element::PhoneNumber, key, number)
    }

    // --- Organizational ---

    /// Adds ORG as `company[;department]`. Derives the filename from the
    /// company when none has been set yet.
    ///
    /// ## Errors
    /// Returns `DuplicateElement` if a company was already added.
    pub fn add_company(&mut self, company: &str, department: &str) -> VCardResult<&mut Self> {
        let value = if department.is_empty() {
            company.to_string()
        } else {
            format!("{company};{department}")
        };

        let key = self.text_key(Element::Company, "");
        self.store.set_property(Element::Company, key, value)?;

        if self.filename.is_none() {
            self.set_filename(&[company], true);
        }

        Ok(self)
    }

    /// Adds TITLE.
    ///
    /// ## Errors
    /// Returns `DuplicateElement` if a job title was already added.
    pub fn add_jobtitle(&mut self, jobtitle: &str) -> VCardResult<&mut Self> {
        let key = self.text_key(Element::Jobtitle, "");
        self.set_property(Element::Jobtitle, key, jobtitle)
    }

    /// Adds ROLE.
    ///
    /// ## Errors
    /// Returns `DuplicateElement` if a role was already added.
    pub fn add_role(&mut self, role: &str) -> VCardResult<&mut Self> {
        let key = self.text_key(Element::Role, "");
        self.set_property(Element::Role, key, role)
    }

    /// Adds a logo from a URL or local path. See [`Self::add_photo`].
    ///
    /// ## Errors
    /// Returns `DuplicateElement`, `InvalidAttachment`,
    /// `EmptyAttachmentPayload` or `AttachmentFetch`.
    pub fn add_logo(&mut self, location: &str, inline: bool) -> VCardResult<&mut Self> {
        self.add_media(Element::Logo, MediaSource::location(location), inline)
    }

    /// Adds a logo from in-memory image bytes, always inlined.
    ///
    /// ## Errors
    /// Returns `DuplicateElement` or `InvalidAttachment`.
    pub fn add_logo_content(&mut self, bytes: &[u8]) -> VCardResult<&mut Self> {
        self.add_media(Element::Logo, MediaSource::Buffer(bytes), true)
    }

    // --- Explanatory ---

    /// Adds NOTE. Line breaks are escaped on output; nothing else is.
    ///
    /// ## Errors
    /// Returns `DuplicateElement` if a note was already added.
    pub fn add_note(&mut self, note: &str) -> VCardResult<&mut Self> {
        let key = self.text_key(Element::Note, "");
        self.set_property(Element::Note, key, note)
    }

    /// Adds CATEGORIES as a comma-joined list.
    ///
    /// ## Errors
    /// Returns `DuplicateElement` if categories were already added.
    pub fn add_categories<S: AsRef<str>>(&mut self, categories: &[S]) -> VCardResult<&mut Self> {
        let value = categories
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",")
            .trim()
            .to_string();

        let key = self.text_key(Element::Categories, "");
        self.set_property(Element::Categories, key, value)
    }

    /// Adds a URL.
    ///
    /// ## Errors
    /// Never fails in practice; URLs are multi-valued.
    pub fn add_url(&mut self, url: &str, types: &str) -> VCardResult<&mut Self> {
        let key = Self::plain_key(Element::Url, types);
        self.set_property(Element::Url, key, url)
    }

    fn add_media(
        &mut self,
        element: Element,
        source: MediaSource<'_>,
        inline: bool,
    ) -> VCardResult<&mut Self> {
        self.store.ensure_available(element)?;

        let resolved = MediaResolver::new(self.fetcher.as_ref()).resolve(source, inline)?;
        let key = format!("{}{}", element.property_name(), resolved.suffix);

        self.set_property(element, key, resolved.value)
    }

    // --- File metadata ---

    /// Sets the filename from `parts`.
    ///
    /// Parts are joined with the separator, surrounding separators trimmed,
    /// whitespace runs replaced by the separator, and the result
    /// transliterated to ASCII. With `overwrite` unset, the new token is
    /// appended to an existing filename. Empty input leaves the filename
    /// unchanged.
    pub fn set_filename(&mut self, parts: &[&str], overwrite: bool) {
        let separator = self.filename_separator.as_str();

        let joined = parts.join(separator);
        let trimmed = joined.trim_matches(|c| separator.contains(c));
        let collapsed = trimmed.split_whitespace().collect::<Vec<_>>().join(separator);

        if collapsed.is_empty() {
            return;
        }

        let token = self.transliterator.transliterate(&collapsed, separator);
        if token.is_empty() {
            return;
        }

        self.filename = Some(match self.filename.take() {
            Some(existing) if !overwrite => format!("{existing}{separator}{token}"),
            _ => token,
        });
    }

    /// Filename without extension; `unknown` until one is derived or set.
    #[must_use]
    pub fn filename(&self) -> &str {
        self.filename.as_deref().unwrap_or(DEFAULT_FILENAME)
    }

    /// Filename with the `.vcf` extension.
    #[must_use]
    pub fn file_name_with_extension(&self) -> String {
        format!("{}{VCARD_FILE_SUFFIX}", self.filename())
    }

    #[must_use]
    pub fn content_type(&self) -> &'static str {
        VCARD_CONTENT_TYPE
    }

    #[must_use]
    pub fn file_extension(&self) -> &'static str {
        VCARD_FILE_EXTENSION
    }

    // --- Output ---

    /// Serializes the card, stamping REV from the builder's clock.
    #[must_use]
    pub fn build_vcard(&self) -> String {
        let revision = format_rev(self.clock.now());
        tracing::debug!(properties = self.store.len(), %revision, "Building vCard");
        serialize_vcard(&self.store, &revision)
    }
}

impl fmt::Display for VCardBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build_vcard())
    }
}
