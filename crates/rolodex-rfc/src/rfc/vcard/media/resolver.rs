//! Attachment resolution for PHOTO and LOGO.

use super::fetch::{FetchError, MediaFetcher};
use super::sniff::sniff_mime_type;
use super::source::{MediaLocation, MediaSource};
use crate::error::{VCardError, VCardResult};
use crate::rfc::vcard::core::{PropertyValue, inline_media_params, url_media_params};

/// A `type/subtype` media type with parameters dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    /// Main type, lowercased (e.g. "image").
    pub main_type: String,
    /// Subtype as given (e.g. "jpeg").
    pub sub_type: String,
}

impl MediaType {
    /// Parses `image/jpeg; charset=binary` style strings.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let essence = s.split(';').next().unwrap_or_default().trim();
        let (main_type, sub_type) = essence.split_once('/')?;

        if main_type.is_empty() || sub_type.is_empty() {
            return None;
        }

        Some(Self {
            main_type: main_type.to_ascii_lowercase(),
            sub_type: sub_type.to_string(),
        })
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.main_type == "image"
    }

    /// Value for the vCard `TYPE` parameter, e.g. `JPEG`.
    #[must_use]
    pub fn type_param(&self) -> String {
        self.sub_type.to_ascii_uppercase()
    }
}

/// Key suffix and value to store for an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMedia {
    /// Parameters appended to the property name, e.g. `;ENCODING=b;TYPE=PNG`.
    pub suffix: String,
    pub value: PropertyValue,
}

/// Validates attachments and decides how they are written.
pub struct MediaResolver<'f> {
    fetcher: &'f dyn MediaFetcher,
}

impl<'f> MediaResolver<'f> {
    #[must_use]
    pub fn new(fetcher: &'f dyn MediaFetcher) -> Self {
        Self { fetcher }
    }

    /// Resolves `source` into a property suffix and value.
    ///
    /// - Inline (and every buffer): bytes are stored for base64 output with
    ///   `;ENCODING=b;TYPE=<SUBTYPE>`.
    /// - URL, not inline: the URL is stored with `;VALUE=URL;TYPE=<SUBTYPE>`
    ///   and nothing is downloaded.
    /// - Path, not inline: the path is stored verbatim with no parameters.
    ///
    /// ## Errors
    /// - `InvalidAttachment` if the media type is not `image/*`.
    /// - `EmptyAttachmentPayload` if an inline fetch returns no bytes.
    /// - `AttachmentFetch` if the fetcher fails.
    #[tracing::instrument(skip(self, source), fields(source = %source.describe()))]
    pub fn resolve(&self, source: MediaSource<'_>, inline: bool) -> VCardResult<ResolvedMedia> {
        match source {
            MediaSource::Buffer(bytes) => {
                let media_type = image_type(sniff_mime_type(bytes), &source)?;
                Ok(inline_media(&media_type, bytes.to_vec()))
            }
            MediaSource::Location(location) => self.resolve_location(location, inline, &source),
        }
    }

    fn resolve_location(
        &self,
        location: MediaLocation<'_>,
        inline: bool,
        source: &MediaSource<'_>,
    ) -> VCardResult<ResolvedMedia> {
        let mime = self
            .fetcher
            .probe(&location)
            .map_err(|e| fetch_error(&location, &e))?
            .unwrap_or_default();
        let media_type = image_type(&mime, source)?;

        if inline {
            let bytes = self
                .fetcher
                .fetch(&location)
                .map_err(|e| fetch_error(&location, &e))?;

            if bytes.is_empty() {
                return Err(VCardError::EmptyAttachmentPayload(location.to_string()));
            }

            tracing::debug!(len = bytes.len(), "Inlining attachment");
            return Ok(inline_media(&media_type, bytes));
        }

        let suffix = if location.is_url() {
            url_media_params(&media_type.type_param())
        } else {
            String::new()
        };

        Ok(ResolvedMedia {
            suffix,
            value: PropertyValue::Text(location.as_str().to_string()),
        })
    }
}

fn inline_media(media_type: &MediaType, bytes: Vec<u8>) -> ResolvedMedia {
    ResolvedMedia {
        suffix: inline_media_params(&media_type.type_param()),
        value: PropertyValue::Binary(bytes),
    }
}

fn image_type(mime: &str, source: &MediaSource<'_>) -> VCardResult<MediaType> {
    match MediaType::parse(mime) {
        Some(media_type) if media_type.is_image() => Ok(media_type),
        _ => {
            tracing::debug!(mime, "Rejecting non-image attachment");
            Err(VCardError::InvalidAttachment {
                location: source.describe(),
                mime_type: mime.to_string(),
            })
        }
    }
}

fn fetch_error(location: &MediaLocation<'_>, err: &FetchError) -> VCardError {
    VCardError::AttachmentFetch {
        location: location.to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

    /// Serves canned responses and counts body fetches.
    struct StubFetcher {
        mime: Option<&'static str>,
        body: &'static [u8],
        fetches: Cell<usize>,
    }

    impl StubFetcher {
        fn new(mime: Option<&'static str>, body: &'static [u8]) -> Self {
            Self {
                mime,
                body,
                fetches: Cell::new(0),
            }
        }
    }

    impl MediaFetcher for StubFetcher {
        fn probe(&self, _location: &MediaLocation<'_>) -> Result<Option<String>, FetchError> {
            Ok(self.mime.map(str::to_string))
        }

        fn fetch(&self, _location: &MediaLocation<'_>) -> Result<Vec<u8>, FetchError> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(self.body.to_vec())
        }
    }

    struct FailingFetcher;

    impl MediaFetcher for FailingFetcher {
        fn probe(&self, _location: &MediaLocation<'_>) -> Result<Option<String>, FetchError> {
            Err(FetchError("connection refused".into()))
        }

        fn fetch(&self, _location: &MediaLocation<'_>) -> Result<Vec<u8>, FetchError> {
            Err(FetchError("connection refused".into()))
        }
    }

    #[test]
    fn media_type_parse() {
        let mt = MediaType::parse("image/jpeg; charset=binary").unwrap();
        assert!(mt.is_image());
        assert_eq!(mt.type_param(), "JPEG");

        assert!(!MediaType::parse("Text/Plain").unwrap().is_image());
        assert!(MediaType::parse("image").is_none());
        assert!(MediaType::parse("image/").is_none());
        assert!(MediaType::parse("").is_none());
    }

    #[test]
    fn inline_url_fetches_bytes() {
        let fetcher = StubFetcher::new(Some("image/jpeg"), JPEG);
        let resolved = MediaResolver::new(&fetcher)
            .resolve(MediaSource::location("https://example.com/me.jpg"), true)
            .unwrap();

        assert_eq!(resolved.suffix, ";ENCODING=b;TYPE=JPEG");
        assert_eq!(resolved.value, PropertyValue::Binary(JPEG.to_vec()));
        assert_eq!(fetcher.fetches.get(), 1);
    }

    #[test]
    fn url_reference_skips_fetch() {
        let fetcher = StubFetcher::new(Some("image/png;q=1"), b"");
        let resolved = MediaResolver::new(&fetcher)
            .resolve(MediaSource::location("https://example.com/me.png"), false)
            .unwrap();

        assert_eq!(resolved.suffix, ";VALUE=URL;TYPE=PNG");
        assert_eq!(
            resolved.value,
            PropertyValue::Text("https://example.com/me.png".into())
        );
        assert_eq!(fetcher.fetches.get(), 0);
    }

    #[test]
    fn path_reference_is_verbatim() {
        let fetcher = StubFetcher::new(Some("image/gif"), b"");
        let resolved = MediaResolver::new(&fetcher)
            .resolve(MediaSource::location("/srv/photos/me.gif"), false)
            .unwrap();

        assert_eq!(resolved.suffix, "");
        assert_eq!(resolved.value, PropertyValue::Text("/srv/photos/me.gif".into()));
    }

    #[test]
    fn non_image_is_rejected() {
        let fetcher = StubFetcher::new(Some("text/html"), b"<html>");
        let err = MediaResolver::new(&fetcher)
            .resolve(MediaSource::location("https://example.com/"), true)
            .unwrap_err();

        assert!(matches!(err, VCardError::InvalidAttachment { .. }));
        assert_eq!(fetcher.fetches.get(), 0);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let fetcher = StubFetcher::new(None, JPEG);
        let err = MediaResolver::new(&fetcher)
            .resolve(MediaSource::location("/tmp/me"), true)
            .unwrap_err();
        assert!(matches!(err, VCardError::InvalidAttachment { .. }));
    }

    #[test]
    fn empty_payload_is_rejected() {
        let fetcher = StubFetcher::new(Some("image/jpeg"), b"");
        let err = MediaResolver::new(&fetcher)
            .resolve(MediaSource::location("https://example.com/me.jpg"), true)
            .unwrap_err();
        assert!(matches!(err, VCardError::EmptyAttachmentPayload(_)));
    }

    #[test]
    fn fetcher_failure_is_reported() {
        let err = MediaResolver::new(&FailingFetcher)
            .resolve(MediaSource::location("https://example.com/me.jpg"), false)
            .unwrap_err();
        assert!(matches!(err, VCardError::AttachmentFetch { .. }));
    }

    #[test]
    fn buffer_is_sniffed_and_inlined() {
        let resolved = MediaResolver::new(&FailingFetcher)
            .resolve(MediaSource::Buffer(JPEG), false)
            .unwrap();
        assert_eq!(resolved.suffix, ";ENCODING=b;TYPE=JPEG");
    }

    #[test]
    fn non_image_buffer_is_rejected() {
        let err = MediaResolver::new(&FailingFetcher)
            .resolve(MediaSource::Buffer(b"just text"), true)
            .unwrap_err();
        assert!(matches!(
            err,
            VCardError::InvalidAttachment { ref mime_type, .. } if mime_type == "text/plain"
        ));
    }
}
