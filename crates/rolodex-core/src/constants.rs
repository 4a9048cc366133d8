/// vCard version emitted by the encoder.
pub const VCARD_VERSION: &str = "3.0";

/// Media type of a generated card.
pub const VCARD_CONTENT_TYPE: &str = "text/x-vcard";

pub const VCARD_FILE_EXTENSION: &str = "vcf";
pub const VCARD_FILE_SUFFIX: &str = const_str::concat!(".", VCARD_FILE_EXTENSION);

/// Charset appended to text properties unless configured otherwise.
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Filename used when nothing has been derived from the card contents.
pub const DEFAULT_FILENAME: &str = "unknown";
pub const DEFAULT_FILENAME_SEPARATOR: &str = "_";

pub const CONFIG_FILE_NAME: &str = "rolodex.toml";
pub const ENV_PREFIX: &str = "ROLODEX";
