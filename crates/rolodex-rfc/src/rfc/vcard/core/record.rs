//! Decoded contact records.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDate;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::structured::{Address, StructuredName};

/// Values grouped by type key (e.g. `WORK;VOICE`).
///
/// Buckets keep first-encounter order, and values inside a bucket keep
/// encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedValues<T> {
    buckets: Vec<(String, Vec<T>)>,
}

impl<T> Default for TypedValues<T> {
    fn default() -> Self {
        Self {
            buckets: Vec::new(),
        }
    }
}

impl<T> TypedValues<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the bucket for `key`, creating it if needed.
    pub fn push(&mut self, key: impl Into<String>, value: T) {
        let key = key.into();
        if let Some((_, values)) = self.buckets.iter_mut().find(|(k, _)| *k == key) {
            values.push(value);
        } else {
            self.buckets.push((key, vec![value]));
        }
    }

    /// Returns the values stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[T]> {
        self.buckets
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    /// Type keys in first-encounter order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates `(type key, values)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.buckets.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Iterates every value regardless of type key.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.buckets.iter().flat_map(|(_, v)| v.iter())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of type keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }
}

impl<T: Serialize> Serialize for TypedValues<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (key, values) in &self.buckets {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

/// One contact decoded from a `BEGIN:VCARD` / `END:VCARD` block.
///
/// Every field is optional; a field is set only when its property was
/// present. Raw photo/logo fields hold bytes decoded from base64 or
/// quoted-printable; the plain variants hold the value as written
/// (typically a URI).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<StructuredName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_base64"
    )]
    pub raw_photo: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_base64"
    )]
    pub raw_logo: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "TypedValues::is_empty")]
    pub address: TypedValues<Address>,
    #[serde(skip_serializing_if = "TypedValues::is_empty")]
    pub phone: TypedValues<String>,
    #[serde(skip_serializing_if = "TypedValues::is_empty")]
    pub email: TypedValues<String>,
    #[serde(skip_serializing_if = "TypedValues::is_empty")]
    pub url: TypedValues<String>,
}

impl ContactRecord {
    #[must_use]
    pub fn lastname(&self) -> Option<&str> {
        self.name.as_ref().map(|n| n.lastname.as_str())
    }

    #[must_use]
    pub fn firstname(&self) -> Option<&str> {
        self.name.as_ref().map(|n| n.firstname.as_str())
    }
}

#[expect(
    clippy::ref_option,
    reason = "serde's serialize_with passes the field by reference"
)]
fn serialize_base64<S: Serializer>(
    bytes: &Option<Vec<u8>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match bytes {
        Some(b) => serializer.serialize_some(&STANDARD.encode(b)),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_values_group_by_key() {
        let mut phones = TypedValues::new();
        phones.push("WORK;VOICE", "1".to_string());
        phones.push("default", "2".to_string());
        phones.push("WORK;VOICE", "3".to_string());

        assert_eq!(phones.len(), 2);
        assert_eq!(phones.get("WORK;VOICE").unwrap(), ["1", "3"]);
        assert_eq!(
            phones.keys().collect::<Vec<_>>(),
            vec!["WORK;VOICE", "default"]
        );
        assert_eq!(phones.values().count(), 3);
        assert!(phones.get("HOME").is_none());
    }

    #[test]
    fn record_serializes_sparse_json() {
        let mut record = ContactRecord {
            fullname: Some("Jane Doe".into()),
            raw_photo: Some(b"hi".to_vec()),
            ..ContactRecord::default()
        };
        record.email.push("INTERNET", "jane@example.com".to_string());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["fullname"], "Jane Doe");
        assert_eq!(json["raw_photo"], "aGk=");
        assert_eq!(json["email"]["INTERNET"][0], "jane@example.com");
        assert!(json.get("note").is_none());
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn name_accessors() {
        let record = ContactRecord {
            name: Some(StructuredName::simple("Doe", "John")),
            ..ContactRecord::default()
        };
        assert_eq!(record.lastname(), Some("Doe"));
        assert_eq!(record.firstname(), Some("John"));
        assert_eq!(ContactRecord::default().lastname(), None);
    }
}
