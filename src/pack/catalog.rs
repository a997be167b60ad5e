//! Installed pack discovery

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Display name of the built-in pack
pub const DEFAULT_PACK: &str = "Default";

/// A selectable resource pack
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PackHandle {
    /// Built-in assets, no archive
    Default,
    /// A `.zip` file name inside the packs directory
    Named(String),
}

impl PackHandle {
    /// Parse a stored pack name, treating `"Default"` as the built-in pack
    pub fn from_name(name: &str) -> Self {
        if name == DEFAULT_PACK {
            PackHandle::Default
        } else {
            PackHandle::Named(name.to_string())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PackHandle::Default => DEFAULT_PACK,
            PackHandle::Named(name) => name,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, PackHandle::Default)
    }
}

impl fmt::Display for PackHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The packs directory and the packs found in it
#[derive(Debug, Clone)]
pub struct PackCatalog {
    dir: PathBuf,
}

impl PackCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory scanned for packs
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of a named pack file
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Make sure the packs directory exists
    pub fn ensure_dir(&self) -> io::Result<()> {
        if !self.dir.is_dir() {
            fs::create_dir_all(&self.dir)?;
            log::info!("Created resource packs folder at {:?}", self.dir);
        }
        Ok(())
    }

    /// All selectable packs: `Default` first, then every `.zip` in
    /// directory-listing order
    pub fn list(&self) -> io::Result<Vec<PackHandle>> {
        self.ensure_dir()?;

        let mut packs = vec![PackHandle::Default];
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            // Non UTF-8 names cannot be addressed by localization identifiers
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if name.ends_with(".zip") {
                packs.push(PackHandle::Named(name.to_string()));
            }
        }

        log::debug!("Found {} resource packs in {:?}", packs.len() - 1, self.dir);
        Ok(packs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_creates_directory() {
        let root = TempDir::new().unwrap();
        let catalog = PackCatalog::new(root.path().join("data").join("resourcepacks"));

        let packs = catalog.list().unwrap();

        assert_eq!(packs, vec![PackHandle::Default]);
        assert!(catalog.dir().is_dir());
    }

    #[test]
    fn test_list_only_zip_files() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("faithful.zip"), b"").unwrap();
        fs::write(root.path().join("notes.txt"), b"").unwrap();
        fs::write(root.path().join("cozy.zip"), b"").unwrap();
        fs::create_dir(root.path().join("unpacked")).unwrap();

        let packs = PackCatalog::new(root.path()).list().unwrap();

        assert_eq!(packs[0], PackHandle::Default);
        let mut named: Vec<&str> = packs[1..].iter().map(PackHandle::name).collect();
        named.sort();
        assert_eq!(named, vec!["cozy.zip", "faithful.zip"]);
    }

    #[test]
    fn test_handle_names() {
        assert_eq!(PackHandle::from_name("Default"), PackHandle::Default);
        assert_eq!(
            PackHandle::from_name("cozy.zip"),
            PackHandle::Named("cozy.zip".to_string())
        );
        assert_eq!(PackHandle::Default.to_string(), "Default");
        assert!(!PackHandle::Named("x.zip".into()).is_default());
    }
}
