//! Zip archive access for resource packs
//!
//! The entry list is read from the central directory once at open time;
//! entry bytes are streamed on demand. Dropping the archive closes the file.

use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::Path;

use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::PackError;

/// Largest entry a pack may contain, decompressed
pub const MAX_ENTRY_BYTES: u64 = 64 * 1024 * 1024;

fn too_large(size: u64) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("entry of {} bytes exceeds the {} byte limit", size, MAX_ENTRY_BYTES),
    )
}

/// One entry of an open archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Slash-delimited path inside the archive
    pub path: String,
    /// Whether this is a directory marker
    pub is_dir: bool,
    /// Position in the central directory
    index: usize,
}

/// An open resource pack archive
pub struct PackArchive<R = File> {
    name: String,
    zip: ZipArchive<R>,
    entries: Vec<ArchiveEntry>,
}

impl PackArchive<File> {
    /// Open a pack file from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PackError> {
        let path = path.as_ref();
        let open_error = |source| PackError::ArchiveOpen {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(|e| open_error(ZipError::Io(e)))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self::from_reader(name, file).map_err(|e| match e {
            PackError::ArchiveOpen { source, .. } => open_error(source),
            other => other,
        })
    }
}

impl<R: Read + Seek> PackArchive<R> {
    /// Open a pack from any seekable reader
    pub fn from_reader(name: impl Into<String>, reader: R) -> Result<Self, PackError> {
        let name = name.into();
        let mut zip = ZipArchive::new(reader).map_err(|source| PackError::ArchiveOpen {
            path: name.clone().into(),
            source,
        })?;

        let mut entries = Vec::with_capacity(zip.len());
        for index in 0..zip.len() {
            let raw = zip.by_index_raw(index).map_err(|source| PackError::ArchiveOpen {
                path: name.clone().into(),
                source,
            })?;
            entries.push(ArchiveEntry {
                path: raw.name().to_string(),
                is_dir: raw.is_dir(),
                index,
            });
        }

        log::debug!("Opened pack {} with {} entries", name, entries.len());
        Ok(Self { name, zip, entries })
    }

    /// File name of the pack, e.g. `faithful.zip`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Iterate all entries in central directory order
    pub fn entries(&self) -> impl Iterator<Item = &ArchiveEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read the full contents of an entry
    pub fn read_bytes(&mut self, entry: &ArchiveEntry) -> Result<Vec<u8>, PackError> {
        let read_error = |source| PackError::ArchiveRead {
            pack: self.name.clone(),
            entry: entry.path.clone(),
            source,
        };

        let mut file = self.zip.by_index(entry.index).map_err(read_error)?;
        if file.name() != entry.path {
            return Err(read_error(ZipError::FileNotFound));
        }

        // Declared sizes come from the pack and cannot be trusted
        let declared = file.size();
        if declared > MAX_ENTRY_BYTES {
            return Err(read_error(ZipError::Io(too_large(declared))));
        }

        let mut bytes = Vec::with_capacity(declared as usize);
        file.by_ref()
            .take(MAX_ENTRY_BYTES + 1)
            .read_to_end(&mut bytes)
            .map_err(|e| read_error(ZipError::Io(e)))?;
        if bytes.len() as u64 > MAX_ENTRY_BYTES {
            return Err(read_error(ZipError::Io(too_large(bytes.len() as u64))));
        }
        Ok(bytes)
    }

    /// Read an entry by its archive path
    pub fn read_path(&mut self, path: &str) -> Result<Vec<u8>, PackError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.path == path)
            .cloned()
            .ok_or_else(|| PackError::ArchiveRead {
                pack: self.name.clone(),
                entry: path.to_string(),
                source: ZipError::FileNotFound,
            })?;
        self.read_bytes(&entry)
    }

    /// Release the underlying reader
    pub fn close(self) {
        log::debug!("Closed pack {}", self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::test_support::{write_pack, zip_bytes, Item};
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    /// Offset of the first central directory header
    fn central_header(bytes: &[u8]) -> usize {
        bytes
            .windows(4)
            .position(|w| w == b"PK\x01\x02".as_slice())
            .unwrap()
    }

    /// Zip64 entry whose central directory claims `declared` uncompressed bytes
    fn zip64_with_declared_size(declared: u64) -> Vec<u8> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .large_file(true);
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("textures/items.png", options).unwrap();
        writer.write_all(b"\x89PNG").unwrap();
        let mut bytes = writer.finish().unwrap().into_inner();

        let central = central_header(&bytes);
        // 0xFFFFFFFF defers the size to the zip64 extra field
        bytes[central + 24..central + 28].copy_from_slice(&u32::MAX.to_le_bytes());
        let name_len = u16::from_le_bytes([bytes[central + 28], bytes[central + 29]]) as usize;
        let extra = central + 46 + name_len;
        assert_eq!(&bytes[extra..extra + 2], [0x01u8, 0x00].as_slice());
        bytes[extra + 4..extra + 12].copy_from_slice(&declared.to_le_bytes());
        bytes
    }

    #[test]
    fn test_open_lists_entries_in_order() {
        let bytes = zip_bytes(&[
            Item::Dir("textures/"),
            Item::File("textures/items.png", b"png"),
            Item::File("readme.txt", b"hello"),
        ]);
        let archive = PackArchive::from_reader("test.zip", Cursor::new(bytes)).unwrap();

        let entries: Vec<_> = archive.entries().map(|e| (e.path.as_str(), e.is_dir)).collect();
        assert_eq!(
            entries,
            vec![
                ("textures/", true),
                ("textures/items.png", false),
                ("readme.txt", false),
            ]
        );
        // Restartable
        assert_eq!(archive.entries().count(), 3);
    }

    #[test]
    fn test_read_bytes() {
        let bytes = zip_bytes(&[Item::File("localization/english_en-us.json", b"{\"a\":\"b\"}")]);
        let mut archive = PackArchive::from_reader("test.zip", Cursor::new(bytes)).unwrap();

        let entry = archive.entries().next().cloned().unwrap();
        assert_eq!(archive.read_bytes(&entry).unwrap(), b"{\"a\":\"b\"}");
        assert_eq!(
            archive.read_path("localization/english_en-us.json").unwrap(),
            b"{\"a\":\"b\"}"
        );
    }

    #[test]
    fn test_read_missing_path() {
        let bytes = zip_bytes(&[Item::File("a.json", b"{}")]);
        let mut archive = PackArchive::from_reader("test.zip", Cursor::new(bytes)).unwrap();

        let err = archive.read_path("b.json").unwrap_err();
        assert!(matches!(err, PackError::ArchiveRead { .. }));
    }

    #[test]
    fn test_huge_zip64_size_is_rejected() {
        let bytes = zip64_with_declared_size(u64::MAX >> 2);
        let mut archive = PackArchive::from_reader("bomb.zip", Cursor::new(bytes)).unwrap();

        let err = archive.read_path("textures/items.png").unwrap_err();
        match err {
            PackError::ArchiveRead { entry, source: ZipError::Io(e), .. } => {
                assert_eq!(entry, "textures/items.png");
                assert_eq!(e.kind(), io::ErrorKind::InvalidData);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_oversized_declared_size_is_rejected() {
        let mut bytes = zip_bytes(&[Item::File("localization/english_en-us.json", b"{}")]);
        let central = central_header(&bytes);
        bytes[central + 24..central + 28].copy_from_slice(&0xFFFF_FFF0u32.to_le_bytes());
        let mut archive = PackArchive::from_reader("bomb.zip", Cursor::new(bytes)).unwrap();

        let err = archive.read_path("localization/english_en-us.json").unwrap_err();
        assert!(matches!(err, PackError::ArchiveRead { .. }));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = PackArchive::open(dir.path().join("nope.zip")).err().unwrap();
        assert!(matches!(err, PackError::ArchiveOpen { .. }));
    }

    #[test]
    fn test_open_not_a_zip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fake.zip");
        std::fs::write(&path, b"this is not a zip file").unwrap();

        let err = PackArchive::open(&path).err().unwrap();
        match err {
            PackError::ArchiveOpen { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_open_from_disk_uses_file_name() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_pack(dir.path(), "cozy.zip", &[Item::Dir("sound/")]);

        let archive = PackArchive::open(&path).unwrap();
        assert_eq!(archive.name(), "cozy.zip");
        assert_eq!(archive.len(), 1);
        archive.close();
    }
}
