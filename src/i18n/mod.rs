//! Localization
//!
//! Built-in language tables plus overrides merged from resource packs.

pub mod localization;

pub use localization::{locale_from_file_name, Localization, DEFAULT_LOCALE};
