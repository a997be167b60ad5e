//! Helpers for building pack archives in tests

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbaImage};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// One entry to write into a test archive
pub enum Item<'a> {
    Dir(&'a str),
    File(&'a str, &'a [u8]),
}

/// Build a zip archive in memory
pub fn zip_bytes(items: &[Item]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    for item in items {
        match item {
            Item::Dir(name) => writer.add_directory(*name, options).unwrap(),
            Item::File(name, content) => {
                writer.start_file(*name, options).unwrap();
                writer.write_all(content).unwrap();
            }
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Write a zip archive named `name` into `dir`
pub fn write_pack(dir: &Path, name: &str, items: &[Item]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, zip_bytes(items)).unwrap();
    path
}

/// Encode a blank PNG of the given size
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = DynamicImage::ImageRgba8(RgbaImage::new(width, height));
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}
