//! vCard core types.
//!
//! - [`Element`] - builder fields and their uniqueness rules
//! - [`PropertyStore`] - ordered properties with the element guard
//! - [`StructuredName`] / [`Address`] - positional N and ADR values
//! - [`ContactRecord`] - one decoded card

mod element;
mod parameter;
mod property;
mod record;
mod structured;

pub use element::{Element, names};
pub use parameter::{
    DEFAULT_ADDRESS_TYPES, DEFAULT_TYPE_KEY, charset_param, inline_media_params,
    names as param_names, normalize_type_param, property_key, type_key, types,
    url_media_params, values as param_values,
};
pub use property::{Property, PropertyStore, PropertyValue};
pub use record::{ContactRecord, TypedValues};
pub use structured::{Address, StructuredName};
