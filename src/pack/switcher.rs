//! Pack switching
//!
//! Runs the whole pipeline for a selected pack: open, classify, swap the
//! sheets, then merge localization. Textures and localization are
//! independent, so a failed sheet load never blocks the localization step.

use std::fs::File;

use super::archive::PackArchive;
use super::catalog::{PackCatalog, PackHandle};
use super::classify::{classify, Category};
use super::localization::{merge_localization, LocalizationService};
use super::sheets::{update_sheets, SheetOutcome, SheetRenderer};
use crate::error::PackError;

/// Phase of a pack switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwitchState {
    #[default]
    Idle,
    PackSelected,
    SheetsApplying,
    LocalizationApplying,
}

/// Session state owned by the switcher
#[derive(Debug, Clone)]
pub struct PackSession {
    loaded: PackHandle,
}

impl PackSession {
    pub fn loaded(&self) -> &PackHandle {
        &self.loaded
    }
}

impl Default for PackSession {
    fn default() -> Self {
        Self {
            loaded: PackHandle::Default,
        }
    }
}

/// Result of a switch whose pack could be opened
#[derive(Debug)]
pub struct SwitchSummary {
    pub pack: PackHandle,
    pub sheets: SheetOutcome,
    /// Localization files handed to the localization service
    pub overrides: usize,
    /// Sound files present in the pack but not applied
    pub ignored_sounds: usize,
}

/// Applies resource packs to a renderer and localization service
pub struct PackSwitcher<S, L> {
    catalog: PackCatalog,
    renderer: S,
    localization: L,
    session: PackSession,
    state: SwitchState,
}

impl<S: SheetRenderer, L: LocalizationService> PackSwitcher<S, L> {
    pub fn new(catalog: PackCatalog, renderer: S, localization: L) -> Self {
        Self {
            catalog,
            renderer,
            localization,
            session: PackSession::default(),
            state: SwitchState::Idle,
        }
    }

    /// Pack whose assets are currently active
    pub fn loaded_pack(&self) -> &PackHandle {
        self.session.loaded()
    }

    pub fn session(&self) -> &PackSession {
        &self.session
    }

    pub fn state(&self) -> SwitchState {
        self.state
    }

    pub fn catalog(&self) -> &PackCatalog {
        &self.catalog
    }

    pub fn renderer(&self) -> &S {
        &self.renderer
    }

    pub fn localization(&self) -> &L {
        &self.localization
    }

    pub fn localization_mut(&mut self) -> &mut L {
        &mut self.localization
    }

    fn transition(&mut self, state: SwitchState) {
        log::trace!("Pack switch {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    /// Switch to `handle`.
    ///
    /// Fails only when a named pack cannot be opened; in that case nothing
    /// changes and the previous pack stays loaded. Every other problem is
    /// logged and reported in the summary.
    pub fn switch(&mut self, handle: PackHandle) -> Result<SwitchSummary, PackError> {
        self.transition(SwitchState::PackSelected);

        let mut archive: Option<PackArchive<File>> = match &handle {
            PackHandle::Default => None,
            PackHandle::Named(name) => match PackArchive::open(self.catalog.path_of(name)) {
                Ok(archive) => Some(archive),
                Err(e) => {
                    log::error!("Could not load resource pack {}: {}", name, e);
                    self.transition(SwitchState::Idle);
                    return Err(e);
                }
            },
        };
        self.session.loaded = handle.clone();

        let catalog = archive.as_ref().map(|a| classify(a));

        self.transition(SwitchState::SheetsApplying);
        let source = archive.as_mut().zip(catalog.as_ref());
        let sheets = update_sheets(source, &mut self.renderer);

        self.transition(SwitchState::LocalizationApplying);
        let overrides = merge_localization(&mut self.localization, handle.name(), archive.as_ref());

        let ignored_sounds = catalog.as_ref().map_or(0, |c| c.file_count(Category::Sound));
        if ignored_sounds > 0 {
            log::debug!(
                "Resource pack sounds are not supported yet, ignoring {} files in {}",
                ignored_sounds,
                handle
            );
        }

        if let Some(archive) = archive {
            archive.close();
        }
        self.transition(SwitchState::Idle);

        log::info!("Changed resource pack to {}", handle);
        Ok(SwitchSummary {
            pack: handle,
            sheets,
            overrides,
            ignored_sounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::test_support::{png_bytes, write_pack, Item};
    use crate::render::{SheetSet, SheetStore};
    use tempfile::TempDir;

    #[derive(Default)]
    struct FakeLocalization {
        overrides: Vec<String>,
        resets: usize,
    }

    impl LocalizationService for FakeLocalization {
        fn reset_to_builtins(&mut self) {
            self.resets += 1;
            self.overrides.clear();
        }

        fn load_overrides(&mut self, identifiers: &[String]) {
            self.overrides.extend_from_slice(identifiers);
        }
    }

    fn switcher(dir: &TempDir) -> PackSwitcher<SheetStore, FakeLocalization> {
        PackSwitcher::new(
            PackCatalog::new(dir.path()),
            SheetStore::with_defaults(SheetSet::placeholders()),
            FakeLocalization::default(),
        )
    }

    fn full_pack(dir: &TempDir, name: &str) {
        let png = png_bytes(16, 16);
        write_pack(
            dir.path(),
            name,
            &[
                Item::Dir("textures/"),
                Item::File("textures/items.png", &png),
                Item::File("textures/tiles.png", &png),
                Item::File("textures/entities.png", &png),
                Item::File("textures/gui.png", &png),
                Item::Dir("localization/"),
                Item::File("localization/english_en-us.json", b"{}"),
                Item::Dir("sound/"),
                Item::File("sound/bossdeath.wav", b"RIFF"),
            ],
        );
    }

    #[test]
    fn test_switch_to_full_pack() {
        let dir = TempDir::new().unwrap();
        full_pack(&dir, "cozy.zip");
        let mut switcher = switcher(&dir);

        let summary = switcher.switch(PackHandle::Named("cozy.zip".into())).unwrap();

        assert!(summary.sheets.is_applied());
        assert_eq!(summary.overrides, 1);
        assert_eq!(summary.ignored_sounds, 1);
        assert_eq!(switcher.loaded_pack().name(), "cozy.zip");
        assert_eq!(switcher.renderer().current().items.width, 16);
        assert_eq!(switcher.renderer().generation(), 1);
        assert_eq!(switcher.state(), SwitchState::Idle);
    }

    #[test]
    fn test_missing_pack_aborts_switch() {
        let dir = TempDir::new().unwrap();
        full_pack(&dir, "cozy.zip");
        let mut switcher = switcher(&dir);
        switcher.switch(PackHandle::Named("cozy.zip".into())).unwrap();

        let err = switcher.switch(PackHandle::Named("gone.zip".into())).unwrap_err();

        assert!(matches!(err, PackError::ArchiveOpen { .. }));
        assert_eq!(switcher.loaded_pack().name(), "cozy.zip");
        assert_eq!(switcher.renderer().generation(), 1);
        assert_eq!(switcher.localization().resets, 1);
        assert_eq!(switcher.state(), SwitchState::Idle);
    }

    #[test]
    fn test_localization_applies_when_sheets_fail() {
        let dir = TempDir::new().unwrap();
        write_pack(
            dir.path(),
            "half.zip",
            &[
                Item::Dir("textures/"),
                Item::File("textures/items.png", &png_bytes(8, 8)),
                Item::File("localization/english_en-us.json", b"{}"),
            ],
        );
        let mut switcher = switcher(&dir);

        let summary = switcher.switch(PackHandle::Named("half.zip".into())).unwrap();

        assert!(matches!(summary.sheets, SheetOutcome::Failed(PackError::IncompletePack { .. })));
        assert_eq!(switcher.renderer().generation(), 0);
        assert_eq!(
            switcher.localization().overrides,
            vec!["half.zip/localization/english_en-us.json".to_string()]
        );
    }

    #[test]
    fn test_default_resets_everything() {
        let dir = TempDir::new().unwrap();
        full_pack(&dir, "cozy.zip");
        let mut switcher = switcher(&dir);
        switcher.switch(PackHandle::Named("cozy.zip".into())).unwrap();

        let summary = switcher.switch(PackHandle::Default).unwrap();

        assert!(summary.sheets.is_applied());
        assert_eq!(summary.overrides, 0);
        assert!(switcher.loaded_pack().is_default());
        assert_eq!(switcher.renderer().current().items.width, 256);
        assert!(switcher.localization().overrides.is_empty());
    }
}
