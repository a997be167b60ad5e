//! Persistent settings
//!
//! Remembers the selected pack and where packs and built-in assets live.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PackError;
use crate::i18n::DEFAULT_LOCALE;
use crate::pack::{PackHandle, DEFAULT_PACK};

/// Settings stored between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackSettings {
    /// Override for the packs directory
    pub packs_dir: Option<PathBuf>,
    /// Directory holding built-in textures and language files
    pub assets_dir: PathBuf,
    /// Last successfully applied pack
    pub selected_pack: String,
    /// Active language
    pub locale: String,
}

impl Default for PackSettings {
    fn default() -> Self {
        Self {
            packs_dir: None,
            assets_dir: PathBuf::from("assets"),
            selected_pack: DEFAULT_PACK.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl PackSettings {
    /// Packs directory, honouring the override
    pub fn packs_dir(&self) -> PathBuf {
        self.packs_dir.clone().unwrap_or_else(default_packs_dir)
    }

    /// Pack to restore on startup
    pub fn selected_handle(&self) -> PackHandle {
        PackHandle::from_name(&self.selected_pack)
    }

    /// Load from a RON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No settings at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match ron::from_str(&content) {
                Ok(settings) => {
                    log::info!("Settings loaded from {:?}", path);
                    return settings;
                }
                Err(e) => log::warn!("Failed to parse settings: {}, using defaults", e),
            },
            Err(e) => log::warn!("Failed to read settings: {}, using defaults", e),
        }
        Self::default()
    }

    /// Write to a RON file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), PackError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| PackError::Settings(e.to_string()))?;
        fs::write(path, content)?;

        log::info!("Settings saved to {:?}", path);
        Ok(())
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "hollowdeep", "Hollowdeep")
}

/// `<data dir>/resourcepacks`
pub fn default_packs_dir() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.data_local_dir().join("resourcepacks"),
        None => PathBuf::from("./resourcepacks"),
    }
}

/// Location of the settings file
pub fn settings_path() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.config_dir().join("settings.ron"),
        None => PathBuf::from("./settings.ron"),
    }
}

/// Load settings from the standard location
pub fn load_settings() -> PackSettings {
    PackSettings::load_from(&settings_path())
}

/// Save settings to the standard location
pub fn save_settings(settings: &PackSettings) -> Result<(), PackError> {
    settings.save_to(&settings_path())
}
