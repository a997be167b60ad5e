//! Localization overrides from packs
//!
//! Packs never hand language data over directly. They contribute
//! identifiers of the form `<pack name>/localization/<file>.json`, and the
//! localization service resolves those back to archive contents itself.

use std::io::{Read, Seek};

use super::archive::PackArchive;

const LOCALIZATION_PREFIX: &str = "localization/";
const LOCALIZATION_SUFFIX: &str = ".json";

/// Localization capabilities needed when switching packs
pub trait LocalizationService {
    /// Drop every merged override and reload the built-in languages
    fn reset_to_builtins(&mut self);

    /// Merge the given pack files on top of the current tables
    fn load_overrides(&mut self, identifiers: &[String]);
}

/// Identifiers for every localization file in a pack.
///
/// Nested files under `localization/` are included as well.
pub fn override_identifiers<R: Read + Seek>(pack_name: &str, archive: &PackArchive<R>) -> Vec<String> {
    archive
        .entries()
        .filter(|e| e.path.starts_with(LOCALIZATION_PREFIX) && e.path.ends_with(LOCALIZATION_SUFFIX))
        .map(|e| format!("{}/{}", pack_name, e.path))
        .collect()
}

/// Split an identifier into pack name and archive path
pub fn split_identifier(identifier: &str) -> Option<(&str, &str)> {
    let (pack, path) = identifier.split_once('/')?;
    if pack.is_empty() || !path.starts_with(LOCALIZATION_PREFIX) {
        return None;
    }
    Some((pack, path))
}

/// Reset localization and merge the overrides of `archive`, if any.
///
/// Returns the number of override files handed to the service.
pub fn merge_localization<R, L>(
    service: &mut L,
    pack_name: &str,
    archive: Option<&PackArchive<R>>,
) -> usize
where
    R: Read + Seek,
    L: LocalizationService + ?Sized,
{
    // Also clears overrides from the previous pack
    service.reset_to_builtins();

    let Some(archive) = archive else {
        return 0;
    };

    let identifiers = override_identifiers(pack_name, archive);
    if !identifiers.is_empty() {
        log::info!("Loading {} localization overrides from {}", identifiers.len(), pack_name);
        service.load_overrides(&identifiers);
    }
    identifiers.len()
}
