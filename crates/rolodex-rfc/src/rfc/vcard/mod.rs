//! vCard 3.0 implementation (RFC 2425 / RFC 2426).
//!
//! ## Overview
//!
//! Contacts are built with [`VCardBuilder`] and written as a single
//! `VERSION:3.0` card. Documents holding any number of cards are read back
//! with [`VCardParser`] into [`ContactRecord`]s.
//!
//! ## Usage
//!
//! ### Building
//!
//! ```rust
//! use rolodex_rfc::rfc::vcard::{Address, StructuredName, VCardBuilder};
//!
//! let mut builder = VCardBuilder::new();
//! builder
//!     .add_name(&StructuredName::simple("Doe", "John"))?
//!     .add_phone_number("+1 555 0100", "WORK;VOICE")?
//!     .add_address(&Address { city: "Paris".into(), country: "France".into(), ..Address::default() }, None)?;
//!
//! let card = builder.build_vcard();
//! assert!(card.starts_with("BEGIN:VCARD\r\nVERSION:3.0\r\nREV:"));
//! assert_eq!(builder.file_name_with_extension(), "john_doe.vcf");
//! # Ok::<(), rolodex_rfc::VCardError>(())
//! ```
//!
//! ### Decoding
//!
//! ```rust
//! use rolodex_rfc::rfc::vcard::VCardParser;
//!
//! let parser = VCardParser::parse("BEGIN:VCARD\r\nFN:Jane Roe\r\nEND:VCARD\r\n")?;
//! assert_eq!(parser.cards()[0].fullname.as_deref(), Some("Jane Roe"));
//! # Ok::<(), rolodex_rfc::VCardError>(())
//! ```
//!
//! ## Submodules
//!
//! - [`core`] - Elements, the property store and decoded records
//! - [`build`] - Builder, folding and serialization
//! - [`media`] - Photo and logo attachment resolution
//! - [`parse`] - Unfolding, transfer decoding and the record cursor

pub mod build;
pub mod core;
pub mod media;
pub mod parse;


pub use build::{Clock, FixedClock, SystemClock, VCardBuilder};
pub use core::{Address, ContactRecord, Element, PropertyStore, PropertyValue, StructuredName};
pub use media::{FileSystemFetcher, MediaFetcher};
pub use parse::{LineOutcome, VCardParser};
