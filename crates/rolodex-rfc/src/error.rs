use thiserror::Error;

use crate::rfc::vcard::core::Element;

/// Errors raised while building or decoding vCards.
#[derive(Error, Debug)]
pub enum VCardError {
    /// A single-valued element was set twice on the same builder.
    #[error("Element already defined: {0}")]
    DuplicateElement(Element),

    /// The attachment does not resolve to an `image/*` media type.
    #[error("Attachment is not an image: {location} ({mime_type})")]
    InvalidAttachment { location: String, mime_type: String },

    /// Inline retrieval of an attachment returned no bytes.
    #[error("Attachment payload is empty: {0}")]
    EmptyAttachmentPayload(String),

    /// The injected fetcher failed to probe or retrieve an attachment.
    #[error("Attachment fetch failed for {location}: {message}")]
    AttachmentFetch { location: String, message: String },

    /// A BDAY value could not be read as a date.
    #[error("Malformed date on line {line}: {value:?}")]
    MalformedDate { line: usize, value: String },

    /// The decoder input could not be read.
    #[error("Source unreadable: {0}")]
    SourceUnreadable(#[from] std::io::Error),
}

pub type VCardResult<T> = std::result::Result<T, VCardError>;
