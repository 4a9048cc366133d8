//! vCard serialization.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::escape::escape_text;
use super::fold::fold_line;
use crate::rfc::vcard::core::{Property, PropertyStore, PropertyValue, names};
use rolodex_core::constants::VCARD_VERSION;

const CRLF: &str = "\r\n";

/// Serializes a property store as one vCard 3.0 block.
///
/// ## Summary
/// Writes `BEGIN:VCARD`, `VERSION:3.0`, `REV:<revision>`, every stored
/// property in insertion order (escaped and folded), then `END:VCARD`.
/// Every physical line ends with CRLF.
#[must_use]
pub fn serialize_vcard(store: &PropertyStore, revision: &str) -> String {
    let mut output = String::new();

    push_line(&mut output, &format!("{}:{}", names::BEGIN, names::VCARD));
    push_line(&mut output, &format!("{}:{VCARD_VERSION}", names::VERSION));
    push_line(&mut output, &format!("{}:{revision}", names::REV));

    for prop in store {
        serialize_property(prop, &mut output);
    }

    push_line(&mut output, &format!("{}:{}", names::END, names::VCARD));

    output
}

fn serialize_property(prop: &Property, output: &mut String) {
    let value = match &prop.value {
        PropertyValue::Text(text) => escape_text(text),
        PropertyValue::Binary(bytes) => STANDARD.encode(bytes),
    };

    let line = format!("{}:{value}", prop.key);
    push_line(output, &fold_line(&line));
}

fn push_line(output: &mut String, line: &str) {
    output.push_str(line);
    output.push_str(CRLF);
}
