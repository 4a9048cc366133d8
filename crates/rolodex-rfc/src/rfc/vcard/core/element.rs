//! Builder elements and their uniqueness rules.

use std::fmt;

/// A logical field a builder can set.
///
/// Each element maps onto one vCard property name. Only the multi-valued
/// elements may be set more than once per card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Name,
    Fullname,
    Address,
    Birthday,
    Company,
    Email,
    Jobtitle,
    Role,
    Label,
    Note,
    Categories,
    PhoneNumber,
    Url,
    Photo,
    Logo,
}

impl Element {
    /// Elements exempt from the single-definition rule.
    pub const MULTI_VALUED: [Self; 5] = [
        Self::Email,
        Self::Address,
        Self::PhoneNumber,
        Self::Url,
        Self::Label,
    ];

    /// Returns whether the element may appear more than once.
    #[must_use]
    pub fn is_multi_valued(self) -> bool {
        Self::MULTI_VALUED.contains(&self)
    }

    /// Builder-facing element name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Fullname => "fullname",
            Self::Address => "address",
            Self::Birthday => "birthday",
            Self::Company => "company",
            Self::Email => "email",
            Self::Jobtitle => "jobtitle",
            Self::Role => "role",
            Self::Label => "label",
            Self::Note => "note",
            Self::Categories => "categories",
            Self::PhoneNumber => "phoneNumber",
            Self::Url => "url",
            Self::Photo => "photo",
            Self::Logo => "logo",
        }
    }

    /// vCard property name written for this element.
    #[must_use]
    pub const fn property_name(self) -> &'static str {
        match self {
            Self::Name => names::N,
            Self::Fullname => names::FN,
            Self::Address => names::ADR,
            Self::Birthday => names::BDAY,
            Self::Company => names::ORG,
            Self::Email => names::EMAIL,
            Self::Jobtitle => names::TITLE,
            Self::Role => names::ROLE,
            Self::Label => names::LABEL,
            Self::Note => names::NOTE,
            Self::Categories => names::CATEGORIES,
            Self::PhoneNumber => names::TEL,
            Self::Url => names::URL,
            Self::Photo => names::PHOTO,
            Self::Logo => names::LOGO,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Property names as constants.
pub mod names {
    // Identification
    pub const FN: &str = "FN";
    pub const N: &str = "N";
    pub const PHOTO: &str = "PHOTO";
    pub const BDAY: &str = "BDAY";

    // Delivery addressing
    pub const ADR: &str = "ADR";
    pub const LABEL: &str = "LABEL";

    // Communications
    pub const TEL: &str = "TEL";
    pub const EMAIL: &str = "EMAIL";

    // Organizational
    pub const TITLE: &str = "TITLE";
    pub const ROLE: &str = "ROLE";
    pub const LOGO: &str = "LOGO";
    pub const ORG: &str = "ORG";

    // Explanatory
    pub const CATEGORIES: &str = "CATEGORIES";
    pub const NOTE: &str = "NOTE";
    pub const REV: &str = "REV";
    pub const URL: &str = "URL";

    // Structural
    pub const BEGIN: &str = "BEGIN";
    pub const END: &str = "END";
    pub const VERSION: &str = "VERSION";
    pub const VCARD: &str = "VCARD";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_valued_allowlist() {
        assert!(Element::Email.is_multi_valued());
        assert!(Element::Address.is_multi_valued());
        assert!(Element::PhoneNumber.is_multi_valued());
        assert!(Element::Url.is_multi_valued());
        assert!(Element::Label.is_multi_valued());

        assert!(!Element::Name.is_multi_valued());
        assert!(!Element::Photo.is_multi_valued());
        assert!(!Element::Categories.is_multi_valued());
    }

    #[test]
    fn display_uses_builder_name() {
        assert_eq!(Element::PhoneNumber.to_string(), "phoneNumber");
        assert_eq!(Element::Jobtitle.property_name(), "TITLE");
    }
}
