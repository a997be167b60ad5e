//! Language tables with pack overrides
//!
//! Language files are flat JSON objects mapping keys to translated strings.
//! The locale comes from the file name: `english_en-us.json` -> `en-us`.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::pack::localization::split_identifier;
use crate::pack::{LocalizationService, PackArchive};

/// Locale used when nothing else is configured
pub const DEFAULT_LOCALE: &str = "en-us";

type Table = HashMap<String, String>;

/// Extract the locale from a language file name
pub fn locale_from_file_name(file_name: &str) -> String {
    let leaf = file_name.rsplit('/').next().unwrap_or(file_name);
    let stem = leaf.strip_suffix(".json").unwrap_or(leaf);
    let locale = stem.rsplit_once('_').map_or(stem, |(_, locale)| locale);
    locale.to_lowercase()
}

/// Built-in strings used when no language files ship with the game
fn fallback_tables() -> HashMap<String, Table> {
    let english: Table = [
        ("Resource Packs", "Resource Packs"),
        ("Default", "Default"),
        ("Loaded", "Loaded"),
        ("to move", "to move"),
        ("to select", "to select"),
        ("to quit", "to quit"),
        ("to rescan", "to rescan"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    HashMap::from([(DEFAULT_LOCALE.to_string(), english)])
}

/// Localization service backed by JSON tables
#[derive(Debug, Clone)]
pub struct Localization {
    packs_dir: PathBuf,
    locale: String,
    builtin: HashMap<String, Table>,
    tables: HashMap<String, Table>,
}

impl Localization {
    /// Load built-in languages from `<assets_dir>/localization`.
    ///
    /// Pack overrides are resolved against `packs_dir`.
    pub fn new(assets_dir: &Path, packs_dir: impl Into<PathBuf>) -> Self {
        let builtin = Self::load_builtin_dir(&assets_dir.join("localization"));
        Self::with_builtins(builtin, packs_dir)
    }

    /// Create from already loaded built-in tables
    pub fn with_builtins(builtin: HashMap<String, Table>, packs_dir: impl Into<PathBuf>) -> Self {
        let builtin = if builtin.is_empty() {
            fallback_tables()
        } else {
            builtin
        };

        Self {
            packs_dir: packs_dir.into(),
            locale: DEFAULT_LOCALE.to_string(),
            tables: builtin.clone(),
            builtin,
        }
    }

    fn load_builtin_dir(dir: &Path) -> HashMap<String, Table> {
        let mut tables: HashMap<String, Table> = HashMap::new();

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("No built-in languages at {:?} ({}), using fallback strings", dir, e);
                return tables;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !file_name.ends_with(".json") {
                continue;
            }

            match fs::read(&path) {
                Ok(bytes) => match serde_json::from_slice::<Table>(&bytes) {
                    Ok(table) => {
                        tables
                            .entry(locale_from_file_name(file_name))
                            .or_default()
                            .extend(table);
                    }
                    Err(e) => log::warn!("Failed to parse {:?}: {}", path, e),
                },
                Err(e) => log::warn!("Failed to read {:?}: {}", path, e),
            }
        }

        tables
    }

    /// Active locale
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: &str) {
        self.locale = locale.to_lowercase();
    }

    /// Locales with at least one table, sorted
    pub fn available_locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    /// Translate a key, falling back to English and then to the key itself
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        [self.locale.as_str(), DEFAULT_LOCALE]
            .iter()
            .filter_map(|locale| self.tables.get(*locale))
            .find_map(|table| table.get(key))
            .map_or(key, String::as_str)
    }

    /// Merge one JSON language file on top of the active tables
    fn merge_file(&mut self, path: &str, bytes: &[u8]) -> Result<usize, serde_json::Error> {
        let table: Table = serde_json::from_slice(bytes)?;
        let count = table.len();
        self.tables
            .entry(locale_from_file_name(path))
            .or_default()
            .extend(table);
        Ok(count)
    }
}

impl LocalizationService for Localization {
    fn reset_to_builtins(&mut self) {
        self.tables = self.builtin.clone();
    }

    fn load_overrides(&mut self, identifiers: &[String]) {
        // Open each pack once for all of its files
        let mut by_pack: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for identifier in identifiers {
            match split_identifier(identifier) {
                Some((pack, path)) => by_pack.entry(pack).or_default().push(path),
                None => log::warn!("Ignoring malformed localization identifier {}", identifier),
            }
        }

        for (pack, paths) in by_pack {
            let mut archive = match PackArchive::open(self.packs_dir.join(pack)) {
                Ok(archive) => archive,
                Err(e) => {
                    log::warn!("Could not reopen {} for localization: {}", pack, e);
                    continue;
                }
            };

            for path in paths {
                let merged = archive
                    .read_path(path)
                    .map_err(|e| e.to_string())
                    .and_then(|bytes| self.merge_file(path, &bytes).map_err(|e| e.to_string()));
                match merged {
                    Ok(count) => log::debug!("Merged {} strings from {}/{}", count, pack, path),
                    Err(e) => log::warn!("Skipping localization file {}/{}: {}", pack, path, e),
                }
            }
        }
    }
}
