//! Sprite sheet loading from packs
//!
//! A pack either replaces all four sheets or none of them: missing or
//! undecodable sheets abort the load before anything reaches the renderer.

use std::io::{Read, Seek};

use super::archive::PackArchive;
use super::classify::{Category, ResourceCatalog};
use crate::error::PackError;
use crate::render::{SheetKind, SheetSet, SpriteSheet};

/// Renderer-side capabilities the sheet loader needs
pub trait SheetRenderer {
    /// Replace all four active sheets at once
    fn apply_sheets(&mut self, sheets: SheetSet);

    /// Fresh copy of the built-in sheets
    fn load_default_sheets(&self) -> SheetSet;
}

/// Result of a successful sheet load
#[derive(Debug)]
pub enum SheetLoad {
    /// All four sheets decoded, ready to swap in
    Ready(SheetSet),
    /// Pack has no textures; keep the current sheets
    NoTextures,
}

/// What happened to the active sheets during a switch
#[derive(Debug)]
pub enum SheetOutcome {
    Applied,
    Unchanged,
    Failed(PackError),
}

impl SheetOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, SheetOutcome::Applied)
    }
}

/// Decode the sheets for a pack.
///
/// `None` means the built-in pack and always yields the renderer's defaults.
pub fn load_sheets<R, S>(
    source: Option<(&mut PackArchive<R>, &ResourceCatalog)>,
    renderer: &S,
) -> Result<SheetLoad, PackError>
where
    R: Read + Seek,
    S: SheetRenderer + ?Sized,
{
    let Some((archive, catalog)) = source else {
        return Ok(SheetLoad::Ready(renderer.load_default_sheets()));
    };

    // No need to continue if there aren't any sheets to load
    let textures = match catalog.bucket(Category::Textures) {
        Some(textures) if !textures.is_empty() => textures,
        _ => {
            log::debug!("Pack {} has no textures, keeping current sheets", archive.name());
            return Ok(SheetLoad::NoTextures);
        }
    };

    let mut slots: [Option<SpriteSheet>; 4] = Default::default();
    for (slot, kind) in slots.iter_mut().zip(SheetKind::ALL) {
        let Some(entry) = textures.get(kind.file_name()) else {
            log::debug!("Pack {} has no sheet {}", archive.name(), kind);
            continue;
        };

        let bytes = archive.read_bytes(entry)?;
        let sheet = SpriteSheet::from_bytes(&bytes).map_err(|source| PackError::Decode {
            pack: archive.name().to_string(),
            sheet: kind.file_name(),
            source,
        })?;
        *slot = Some(sheet);
    }

    SheetSet::from_slots(slots)
        .map(SheetLoad::Ready)
        .map_err(|missing| PackError::IncompletePack {
            pack: archive.name().to_string(),
            missing,
        })
}

/// Load the sheets for a pack and swap them in when complete
pub fn update_sheets<R, S>(
    source: Option<(&mut PackArchive<R>, &ResourceCatalog)>,
    renderer: &mut S,
) -> SheetOutcome
where
    R: Read + Seek,
    S: SheetRenderer + ?Sized,
{
    match load_sheets(source, &*renderer) {
        Ok(SheetLoad::Ready(sheets)) => {
            renderer.apply_sheets(sheets);
            log::info!("Changed resource pack sheets");
            SheetOutcome::Applied
        }
        Ok(SheetLoad::NoTextures) => SheetOutcome::Unchanged,
        Err(e) => {
            log::error!("Loading sheets failed, keeping current sheets: {}", e);
            SheetOutcome::Failed(e)
        }
    }
}
