//! Magic-number detection for in-memory attachments.

/// Image signatures checked in order.
const IMAGE_SIGNATURES: &[(&[u8], &str)] = &[
    (&[0xFF, 0xD8, 0xFF], "image/jpeg"),
    (&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A], "image/png"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"II*\0", "image/tiff"),
    (b"MM\0*", "image/tiff"),
    (&[0x00, 0x00, 0x01, 0x00], "image/vnd.microsoft.icon"),
    (b"BM", "image/bmp"),
];

/// Guesses the media type of `bytes` from their leading signature.
///
/// Recognised images return their `image/*` type; a PDF header returns
/// `application/pdf`, other valid UTF-8 returns `text/plain`, and anything
/// else `application/octet-stream`.
#[must_use]
pub fn sniff_mime_type(bytes: &[u8]) -> &'static str {
    if let Some((_, mime)) = IMAGE_SIGNATURES
        .iter()
        .find(|(magic, _)| bytes.starts_with(magic))
    {
        return *mime;
    }

    if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        return "image/webp";
    }

    if bytes.starts_with(b"%PDF-") {
        "application/pdf"
    } else if !bytes.is_empty() && std::str::from_utf8(bytes).is_ok() {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}
