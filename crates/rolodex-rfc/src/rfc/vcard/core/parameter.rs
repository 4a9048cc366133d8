//! vCard parameter helpers (RFC 2426 §3).
//!
//! Parameters travel as plain `;`-joined text both ways: the builder appends
//! them to a property key and the decoder groups values by whatever
//! parameters remain after decoding.

/// Parameter names as constants.
pub mod names {
    pub const CHARSET: &str = "CHARSET";
    pub const ENCODING: &str = "ENCODING";
    pub const TYPE: &str = "TYPE";
    pub const VALUE: &str = "VALUE";
}

/// TYPE values the builder emits.
pub mod types {
    pub const WORK: &str = "WORK";
    pub const POSTAL: &str = "POSTAL";
    pub const INTERNET: &str = "INTERNET";
}

/// Parameter values used on media properties.
pub mod values {
    /// `ENCODING` value for inline base64 content.
    pub const BASE64: &str = "b";
    /// `VALUE` value for a referenced resource.
    pub const URL: &str = "URL";
}

/// Type key used for ADR lines without parameters, and the builder's
/// default address type.
pub const DEFAULT_ADDRESS_TYPES: &str = const_str::concat!(types::WORK, ";", types::POSTAL);

/// Type key used for TEL, EMAIL and URL lines without parameters.
pub const DEFAULT_TYPE_KEY: &str = "default";

/// Parameters for a media property that references `type_param` by URL.
#[must_use]
pub fn url_media_params(type_param: &str) -> String {
    format!(
        ";{}={};{}={type_param}",
        names::VALUE,
        values::URL,
        names::TYPE
    )
}

/// Parameters for a media property carrying inline base64 content.
#[must_use]
pub fn inline_media_params(type_param: &str) -> String {
    format!(
        ";{}={};{}={type_param}",
        names::ENCODING,
        values::BASE64,
        names::TYPE
    )
}

/// Builds a property key: the name, then `;types` when non-empty, then the
/// charset parameter when given.
#[must_use]
pub fn property_key(name: &str, types: &str, charset: Option<&str>) -> String {
    let mut key = String::from(name);

    if !types.is_empty() {
        key.push(';');
        key.push_str(types);
    }

    if let Some(charset) = charset {
        key.push_str(&charset_param(charset));
    }

    key
}

/// Formats the `;CHARSET=<c>` suffix.
#[must_use]
pub fn charset_param(charset: &str) -> String {
    format!(";{}={charset}", names::CHARSET)
}

/// Strips a case-insensitive `type=` prefix, so `TYPE=WORK` and `WORK` are
/// treated alike.
#[must_use]
pub fn normalize_type_param(param: &str) -> &str {
    const PREFIX: &str = "type=";

    match param.get(..PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(PREFIX) => &param[PREFIX.len()..],
        _ => param,
    }
}

/// Joins retained parameters into a type key, falling back to `default`
/// when nothing remains.
#[must_use]
pub fn type_key(params: &[String], default: &str) -> String {
    if params.is_empty() {
        default.to_string()
    } else {
        params.join(";")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_with_types_and_charset() {
        assert_eq!(
            property_key("ADR", DEFAULT_ADDRESS_TYPES, Some("utf-8")),
            "ADR;WORK;POSTAL;CHARSET=utf-8"
        );
    }

    #[test_log::test]
    fn media_params_use_parameter_names() {
        assert_eq!(url_media_params("JPEG"), ";VALUE=URL;TYPE=JPEG");
        assert_eq!(inline_media_params("PNG"), ";ENCODING=b;TYPE=PNG");
    }

    #[test_log::test]
    fn default_address_types_join_work_and_postal() {
        assert_eq!(DEFAULT_ADDRESS_TYPES, "WORK;POSTAL");
    }

    #[test]
    fn key_without_types() {
        assert_eq!(property_key("TEL", "", None), "TEL");
        assert_eq!(property_key("NOTE", "", Some("utf-8")), "NOTE;CHARSET=utf-8");
    }

    #[test]
    fn normalize_strips_type_prefix() {
        assert_eq!(normalize_type_param("TYPE=WORK"), "WORK");
        assert_eq!(normalize_type_param("type=home"), "home");
        assert_eq!(normalize_type_param("Type=cell,voice"), "cell,voice");
    }

    #[test]
    fn normalize_keeps_other_params() {
        assert_eq!(normalize_type_param("WORK"), "WORK");
        assert_eq!(normalize_type_param("CHARSET=utf-8"), "CHARSET=utf-8");
        assert_eq!(normalize_type_param("typ"), "typ");
        assert_eq!(normalize_type_param("é"), "é");
    }

    #[test]
    fn type_key_defaults_when_empty() {
        assert_eq!(type_key(&[], DEFAULT_TYPE_KEY), "default");
        assert_eq!(
            type_key(&["WORK".into(), "VOICE".into()], DEFAULT_TYPE_KEY),
            "WORK;VOICE"
        );
    }
}
