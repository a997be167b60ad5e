//! Active sheet storage shared with the render loop
//!
//! The renderer grabs a snapshot per frame with [`SheetStore::current`];
//! a pack switch replaces the whole set under one write lock, so a frame
//! never mixes sheets from two packs.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use super::sprites::SheetSet;
use crate::pack::SheetRenderer;

#[derive(Debug)]
struct ActiveSheets {
    sheets: Arc<SheetSet>,
    /// Incremented on every applied swap
    generation: u64,
}

/// Cloneable handle to the active sheet set
#[derive(Debug, Clone)]
pub struct SheetStore {
    active: Arc<RwLock<ActiveSheets>>,
    defaults: Arc<SheetSet>,
}

impl SheetStore {
    /// Create a store whose built-in sheets come from `<assets_dir>/textures`
    pub fn from_assets(assets_dir: &Path) -> Self {
        Self::with_defaults(SheetSet::from_dir(&assets_dir.join("textures")))
    }

    /// Create a store that starts out showing `defaults`
    pub fn with_defaults(defaults: SheetSet) -> Self {
        let defaults = Arc::new(defaults);
        Self {
            active: Arc::new(RwLock::new(ActiveSheets {
                sheets: Arc::clone(&defaults),
                generation: 0,
            })),
            defaults,
        }
    }

    /// Snapshot of the sheets to draw this frame
    pub fn current(&self) -> Arc<SheetSet> {
        Arc::clone(&self.active.read().sheets)
    }

    /// Number of swaps applied since creation
    pub fn generation(&self) -> u64 {
        self.active.read().generation
    }
}

impl SheetRenderer for SheetStore {
    fn apply_sheets(&mut self, sheets: SheetSet) {
        let sheets = Arc::new(sheets);
        let mut active = self.active.write();
        active.sheets = sheets;
        active.generation += 1;
        log::debug!("Applied sheet set generation {}", active.generation);
    }

    fn load_default_sheets(&self) -> SheetSet {
        (*self.defaults).clone()
    }
}
