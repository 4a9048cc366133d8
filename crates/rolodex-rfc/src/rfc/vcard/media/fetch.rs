//! Attachment retrieval boundary.
//!
//! The encoder never performs I/O itself; it asks a [`MediaFetcher`] for the
//! media type and, when inlining, the bytes of an attachment. Retry and
//! timeout policy belong to the fetcher.

use thiserror::Error;

use super::sniff::sniff_mime_type;
use super::source::MediaLocation;

/// Failure reported by a fetcher.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct FetchError(pub String);

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        Self(err.to_string())
    }
}

/// Retrieves attachment metadata and payloads.
pub trait MediaFetcher {
    /// Returns the media type of `location` (e.g. from a `Content-Type`
    /// header or by inspecting a local file), or `None` if it is unknown.
    ///
    /// ## Errors
    /// Returns an error if the resource cannot be inspected.
    fn probe(&self, location: &MediaLocation<'_>) -> Result<Option<String>, FetchError>;

    /// Returns the full payload of `location`.
    ///
    /// ## Errors
    /// Returns an error if the resource cannot be read.
    fn fetch(&self, location: &MediaLocation<'_>) -> Result<Vec<u8>, FetchError>;
}

/// Reads local files and sniffs their type. Remote URLs are refused; inject
/// a network-capable fetcher to support them.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemFetcher;

impl FileSystemFetcher {
    fn local_path<'a>(location: &MediaLocation<'a>) -> Result<&'a str, FetchError> {
        match *location {
            MediaLocation::Path(path) => Ok(path),
            MediaLocation::Url(url) => Err(FetchError(format!(
                "remote retrieval is not configured: {url}"
            ))),
        }
    }
}

impl MediaFetcher for FileSystemFetcher {
    #[tracing::instrument(skip(self))]
    fn probe(&self, location: &MediaLocation<'_>) -> Result<Option<String>, FetchError> {
        let bytes = std::fs::read(Self::local_path(location)?)?;
        let mime = sniff_mime_type(&bytes);
        tracing::trace!(mime, "Sniffed local file");
        Ok(Some(mime.to_string()))
    }

    #[tracing::instrument(skip(self))]
    fn fetch(&self, location: &MediaLocation<'_>) -> Result<Vec<u8>, FetchError> {
        Ok(std::fs::read(Self::local_path(location)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn probes_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PNG_HEADER).unwrap();
        let path = file.path().to_str().unwrap();

        let mime = FileSystemFetcher.probe(&MediaLocation::Path(path)).unwrap();
        assert_eq!(mime.as_deref(), Some("image/png"));

        let bytes = FileSystemFetcher.fetch(&MediaLocation::Path(path)).unwrap();
        assert_eq!(bytes, PNG_HEADER);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = FileSystemFetcher.probe(&MediaLocation::Path("/nonexistent/rolodex.png"));
        assert!(result.is_err());
    }

    #[test]
    fn refuses_urls() {
        let err = FileSystemFetcher
            .fetch(&MediaLocation::Url("https://example.com/a.png"))
            .unwrap_err();
        assert!(err.to_string().contains("remote retrieval"));
    }
}
