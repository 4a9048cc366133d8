//! Shared building blocks for the rolodex workspace.
//!
//! Holds configuration loading, the crate-independent error type, wire
//! constants and the filename transliteration collaborator.

pub mod config;
pub mod constants;
pub mod error;
pub mod util;
