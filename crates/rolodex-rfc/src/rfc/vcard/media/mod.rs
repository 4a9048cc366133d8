//! PHOTO/LOGO attachment handling.
//!
//! Classifies a byte source, checks that it is an image, and decides whether
//! the payload is inlined as base64 or referenced by URL/path.

mod fetch;
mod resolver;
mod sniff;
mod source;

pub use fetch::{FetchError, FileSystemFetcher, MediaFetcher};
pub use resolver::{MediaResolver, MediaType, ResolvedMedia};
pub use sniff::sniff_mime_type;
pub use source::{MediaLocation, MediaSource};
