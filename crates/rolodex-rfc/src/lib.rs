//! vCard 3.0 (RFC 2425/2426) encoding and decoding.

pub mod error;
pub mod rfc;

pub use error::{VCardError, VCardResult};
