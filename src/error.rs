//! Error types for pack loading
//!
//! Every failure here is recoverable: callers log it and keep whatever
//! assets were active before the attempted switch.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::render::SheetKind;

/// Errors raised while opening, reading or applying a resource pack
#[derive(Debug, Error)]
pub enum PackError {
    /// The pack file is missing, unreadable or not a zip container
    #[error("could not open resource pack {path:?}: {source}")]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// An entry could not be streamed out of an open archive
    #[error("could not read {entry} from {pack}: {source}")]
    ArchiveRead {
        pack: String,
        entry: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// A sheet entry was read but is not a decodable image
    #[error("could not decode sheet {sheet} from {pack}: {source}")]
    Decode {
        pack: String,
        sheet: &'static str,
        #[source]
        source: image::ImageError,
    },

    /// The pack supplies textures but not all four sheets
    #[error("resource pack {pack} is missing sheets: {}", format_missing(.missing))]
    IncompletePack {
        pack: String,
        missing: Vec<SheetKind>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Settings file could not be parsed or written
    #[error("settings error: {0}")]
    Settings(String),
}

fn format_missing(missing: &[SheetKind]) -> String {
    missing
        .iter()
        .map(|kind| kind.file_name())
        .collect::<Vec<_>>()
        .join(", ")
}
