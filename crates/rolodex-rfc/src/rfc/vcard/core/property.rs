//! Stored properties and the per-element uniqueness guard.

use std::collections::HashSet;

use super::element::Element;
use crate::error::{VCardError, VCardResult};

/// A property value as handed to the serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// Text, escaped on output.
    Text(String),
    /// Binary payload, base64-encoded on output.
    Binary(Vec<u8>),
}

impl PropertyValue {
    /// Returns whether the value carries no text or bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Binary(b) => b.is_empty(),
        }
    }

    /// Returns the value as text if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Binary(_) => None,
        }
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Vec<u8>> for PropertyValue {
    fn from(b: Vec<u8>) -> Self {
        Self::Binary(b)
    }
}

/// A property ready for output.
///
/// `key` is the property name followed by any `;`-joined parameters, e.g.
/// `TEL;WORK;VOICE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub key: String,
    pub value: PropertyValue,
}

/// Ordered property list guarded by element uniqueness.
///
/// Insertion order is serialization order. Properties are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyStore {
    properties: Vec<Property>,
    defined: HashSet<Element>,
}

impl PropertyStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a property for `element`.
    ///
    /// ## Errors
    /// Returns `DuplicateElement` if `element` is single-valued and has
    /// already been set. The store is left untouched in that case.
    pub fn set_property(
        &mut self,
        element: Element,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> VCardResult<()> {
        self.ensure_available(element)?;

        self.defined.insert(element);
        self.properties.push(Property {
            key: key.into(),
            value: value.into(),
        });

        Ok(())
    }

    /// Checks that `element` can still be set, without mutating the store.
    ///
    /// ## Errors
    /// Returns `DuplicateElement` if `element` is single-valued and already
    /// defined.
    pub fn ensure_available(&self, element: Element) -> VCardResult<()> {
        if !element.is_multi_valued() && self.defined.contains(&element) {
            tracing::debug!(%element, "Rejecting duplicate element");
            return Err(VCardError::DuplicateElement(element));
        }

        Ok(())
    }

    /// Returns whether a property with exactly this key and a non-empty
    /// value exists.
    #[must_use]
    pub fn has_property(&self, key: &str) -> bool {
        self.properties
            .iter()
            .any(|p| p.key == key && !p.value.is_empty())
    }

    /// Returns whether `element` has been set.
    #[must_use]
    pub fn is_defined(&self, element: Element) -> bool {
        self.defined.contains(&element)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterates properties in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.properties.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Property] {
        &self.properties
    }
}

impl<'a> IntoIterator for &'a PropertyStore {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
