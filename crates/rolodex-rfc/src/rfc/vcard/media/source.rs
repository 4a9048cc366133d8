//! Attachment source classification.

use std::fmt;

use url::Url;

/// Where an attachment lives when it is not already in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaLocation<'a> {
    /// Remote resource, e.g. `https://example.com/me.jpg`.
    Url(&'a str),
    /// Local file path.
    Path(&'a str),
}

impl<'a> MediaLocation<'a> {
    /// Classifies `location` as a URL (absolute, with a host) or, failing
    /// that, a local path.
    #[must_use]
    pub fn parse(location: &'a str) -> Self {
        if is_url(location) {
            Self::Url(location)
        } else {
            Self::Path(location)
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'a str {
        match *self {
            Self::Url(s) | Self::Path(s) => s,
        }
    }

    #[must_use]
    pub fn is_url(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

impl fmt::Display for MediaLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An attachment byte source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSource<'a> {
    Location(MediaLocation<'a>),
    /// Bytes already in memory; always inlined.
    Buffer(&'a [u8]),
}

impl<'a> MediaSource<'a> {
    /// Classifies a URL or path.
    #[must_use]
    pub fn location(location: &'a str) -> Self {
        Self::Location(MediaLocation::parse(location))
    }

    /// Short description for errors and logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Location(location) => location.to_string(),
            Self::Buffer(bytes) => format!("<buffer of {} bytes>", bytes.len()),
        }
    }
}

fn is_url(s: &str) -> bool {
    Url::parse(s).is_ok_and(|url| url.has_host())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_detected() {
        assert!(MediaLocation::parse("https://example.com/a.jpg").is_url());
        assert!(MediaLocation::parse("http://localhost:8080/a.png").is_url());
        assert!(MediaLocation::parse("ftp://files.example.com/a.gif").is_url());
    }

    #[test]
    fn paths_are_not_urls() {
        assert!(!MediaLocation::parse("/tmp/photo.jpg").is_url());
        assert!(!MediaLocation::parse("photo.jpg").is_url());
        assert!(!MediaLocation::parse("C:\\photos\\me.jpg").is_url());
        assert!(!MediaLocation::parse("file:///tmp/photo.jpg").is_url());
        assert!(!MediaLocation::parse("1http://example.com").is_url());
    }

    #[test_log::test]
    fn host_is_required() {
        assert!(MediaLocation::parse("https://user@[::1]:8443/a.jpg").is_url());
        assert!(!MediaLocation::parse("mailto:me@example.com").is_url());
        assert!(!MediaLocation::parse("C:/photos/me.jpg").is_url());
    }

    #[test]
    fn describe_buffer() {
        let source = MediaSource::Buffer(&[1, 2, 3]);
        assert_eq!(source.describe(), "<buffer of 3 bytes>");
        assert_eq!(
            MediaSource::location("/tmp/a.png").describe(),
            "/tmp/a.png"
        );
    }
}
