//! Resource classification
//!
//! Buckets archive entries into the known content categories. Packs follow
//! a two-level layout:
//!
//! ```text
//! textures/items.png
//! textures/tiles.png
//! textures/entities.png
//! textures/gui.png
//! localization/english_en-us.json
//! sound/bossdeath.wav
//! ```
//!
//! Anything deeper than two path segments, and any file sitting in the
//! archive root, is ignored.

use std::collections::HashMap;
use std::fmt;
use std::io::{Read, Seek};

use super::archive::{ArchiveEntry, PackArchive};

/// Suffixes accepted in any category
const VALID_SUFFIXES: [&str; 3] = [".json", ".wav", ".png"];

/// Top-level folders a pack may provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Textures,
    Localization,
    Sound,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Textures, Category::Localization, Category::Sound];

    /// Folder name inside the archive
    pub fn name(self) -> &'static str {
        match self {
            Category::Textures => "textures",
            Category::Localization => "localization",
            Category::Sound => "sound",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classified view of a pack: category -> leaf file name -> entry
#[derive(Debug, Default, Clone)]
pub struct ResourceCatalog {
    buckets: HashMap<Category, HashMap<String, ArchiveEntry>>,
}

impl ResourceCatalog {
    /// Entries of one category, if the pack declared that folder
    pub fn bucket(&self, category: Category) -> Option<&HashMap<String, ArchiveEntry>> {
        self.buckets.get(&category)
    }

    /// Look up a single file in a category
    pub fn get(&self, category: Category, leaf: &str) -> Option<&ArchiveEntry> {
        self.bucket(category).and_then(|bucket| bucket.get(leaf))
    }

    /// Categories present in this pack
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.buckets.keys().copied()
    }

    /// Number of files in a category (0 when the folder is absent)
    pub fn file_count(&self, category: Category) -> usize {
        self.bucket(category).map_or(0, HashMap::len)
    }

    fn add_entry(&mut self, entry: &ArchiveEntry) {
        let trimmed = entry.path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').collect();

        // Only allow two levels of folders
        if segments.len() > 2 {
            return;
        }

        if entry.is_dir {
            if let Some(category) = Category::from_name(segments[0]) {
                self.buckets.entry(category).or_default();
            }
            return;
        }

        // Root files carry no category
        let &[folder, leaf] = segments.as_slice() else {
            return;
        };

        let Some(bucket) = Category::from_name(folder).and_then(|c| self.buckets.get_mut(&c))
        else {
            return;
        };

        if VALID_SUFFIXES.iter().any(|suffix| leaf.ends_with(suffix)) {
            bucket.insert(leaf.to_string(), entry.clone());
        }
    }
}

/// Build the catalog for an open archive
pub fn classify<R: Read + Seek>(archive: &PackArchive<R>) -> ResourceCatalog {
    let mut catalog = ResourceCatalog::default();
    for entry in archive.entries() {
        catalog.add_entry(entry);
    }

    log::debug!(
        "Classified {}: {} textures, {} localization files, {} sounds",
        archive.name(),
        catalog.file_count(Category::Textures),
        catalog.file_count(Category::Localization),
        catalog.file_count(Category::Sound),
    );
    catalog
}
