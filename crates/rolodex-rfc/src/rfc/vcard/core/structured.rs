//! Structured vCard values (RFC 2426 §3.1.2, §3.2.1).
//!
//! N and ADR carry positional, `;`-separated components. The same types are
//! used as builder input and decoder output.

use serde::{Deserialize, Serialize};

/// Structured name (N property).
///
/// Components in wire order: family name, given name, additional names,
/// honorific prefixes, honorific suffixes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredName {
    pub lastname: String,
    pub firstname: String,
    pub additional: String,
    pub prefix: String,
    pub suffix: String,
}

impl StructuredName {
    /// Creates a structured name with family and given names.
    #[must_use]
    pub fn simple(lastname: impl Into<String>, firstname: impl Into<String>) -> Self {
        Self {
            lastname: lastname.into(),
            firstname: firstname.into(),
            ..Self::default()
        }
    }

    /// Builds a name from split components; missing trailing components
    /// stay empty and surplus ones are ignored.
    #[must_use]
    pub fn from_components<'a>(parts: impl IntoIterator<Item = &'a str>) -> Self {
        let mut parts = parts.into_iter().map(str::to_string);
        let mut next = || parts.next().unwrap_or_default();

        Self {
            lastname: next(),
            firstname: next(),
            additional: next(),
            prefix: next(),
            suffix: next(),
        }
    }

    /// Formats the N value: `last;first;additional;prefix;suffix`.
    #[must_use]
    pub fn to_value(&self) -> String {
        [
            self.lastname.as_str(),
            self.firstname.as_str(),
            self.additional.as_str(),
            self.prefix.as_str(),
            self.suffix.as_str(),
        ]
        .join(";")
    }

    /// Non-empty components in reading order (prefix, first, additional,
    /// last, suffix).
    #[must_use]
    pub fn display_parts(&self) -> Vec<&str> {
        [
            self.prefix.as_str(),
            self.firstname.as_str(),
            self.additional.as_str(),
            self.lastname.as_str(),
            self.suffix.as_str(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect()
    }

    /// Formats as a display name, as used for a derived FN.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.display_parts().join(" ").trim().to_string()
    }
}

/// Delivery address (ADR property).
///
/// Components in wire order: post office box (`name`), extended address,
/// street, locality, region, postal code, country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub name: String,
    pub extended: String,
    pub street: String,
    pub city: String,
    pub region: String,
    pub zip: String,
    pub country: String,
}

impl Address {
    /// Builds an address from split components; missing trailing components
    /// stay empty and surplus ones are ignored.
    #[must_use]
    pub fn from_components<'a>(parts: impl IntoIterator<Item = &'a str>) -> Self {
        let mut parts = parts.into_iter().map(str::to_string);
        let mut next = || parts.next().unwrap_or_default();

        Self {
            name: next(),
            extended: next(),
            street: next(),
            city: next(),
            region: next(),
            zip: next(),
            country: next(),
        }
    }

    /// Formats the ADR value: seven `;`-separated components.
    #[must_use]
    pub fn to_value(&self) -> String {
        [
            self.name.as_str(),
            self.extended.as_str(),
            self.street.as_str(),
            self.city.as_str(),
            self.region.as_str(),
            self.zip.as_str(),
            self.country.as_str(),
        ]
        .join(";")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_value_is_positional() {
        let name = StructuredName {
            lastname: "Public".into(),
            firstname: "John".into(),
            additional: "Quinlan".into(),
            prefix: "Mr.".into(),
            suffix: "Esq.".into(),
        };
        assert_eq!(name.to_value(), "Public;John;Quinlan;Mr.;Esq.");
        assert_eq!(name.display_name(), "Mr. John Quinlan Public Esq.");
    }

    #[test]
    fn name_from_short_components() {
        let name = StructuredName::from_components("Doe;John".split(';'));
        assert_eq!(name, StructuredName::simple("Doe", "John"));
    }

    #[test]
    fn display_name_skips_empty_parts() {
        let name = StructuredName::simple("Doe", "");
        assert_eq!(name.display_name(), "Doe");
    }

    #[test]
    fn address_round_trips_components() {
        let value = ";;12 Rue de Rivoli;Paris;;75001;France";
        let address = Address::from_components(value.split(';'));
        assert_eq!(address.street, "12 Rue de Rivoli");
        assert_eq!(address.city, "Paris");
        assert_eq!(address.zip, "75001");
        assert_eq!(address.country, "France");
        assert_eq!(address.to_value(), value);
    }

    #[test]
    fn address_ignores_surplus_components() {
        let address = Address::from_components("a;b;c;d;e;f;g;h".split(';'));
        assert_eq!(address.country, "g");
    }
}
