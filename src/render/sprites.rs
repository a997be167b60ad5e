//! Sprite sheets and the four-sheet set the renderer draws from
//!
//! A sheet is one decoded image holding a fixed grid of 8x8 sprites.

use std::fmt;
use std::path::Path;

use image::{DynamicImage, GenericImageView, RgbaImage};

/// Edge length of a single sprite in pixels
pub const SPRITE_SIZE: u32 = 8;

/// Dimensions of a generated placeholder sheet (32x32 sprites)
const PLACEHOLDER_SIZE: u32 = 256;

/// The four sheets every pack must provide, in swap order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetKind {
    Items,
    Tiles,
    Entities,
    Gui,
}

impl SheetKind {
    /// All sheet kinds in the order they are loaded and applied
    pub const ALL: [SheetKind; 4] = [
        SheetKind::Items,
        SheetKind::Tiles,
        SheetKind::Entities,
        SheetKind::Gui,
    ];

    /// Leaf file name inside a pack's `textures/` folder
    pub fn file_name(self) -> &'static str {
        match self {
            SheetKind::Items => "items.png",
            SheetKind::Tiles => "tiles.png",
            SheetKind::Entities => "entities.png",
            SheetKind::Gui => "gui.png",
        }
    }

    fn index(self) -> usize {
        match self {
            SheetKind::Items => 0,
            SheetKind::Tiles => 1,
            SheetKind::Entities => 2,
            SheetKind::Gui => 3,
        }
    }

    /// Placeholder tint so missing built-ins are easy to spot in game
    fn placeholder_color(self) -> [u8; 3] {
        match self {
            SheetKind::Items => [180, 180, 200],
            SheetKind::Tiles => [80, 70, 60],
            SheetKind::Entities => [200, 50, 50],
            SheetKind::Gui => [255, 215, 0],
        }
    }
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// A decoded sprite sheet
#[derive(Clone)]
pub struct SpriteSheet {
    image: RgbaImage,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl SpriteSheet {
    /// Wrap an already decoded image
    pub fn new(image: DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            image: image.to_rgba8(),
            width,
            height,
        }
    }

    /// Decode a sheet from encoded image bytes (PNG in practice)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self::new(image))
    }

    /// Load a sheet from an image file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let image = image::open(path)?;
        Ok(Self::new(image))
    }

    /// Checkerboard sheet used when a built-in sheet cannot be loaded
    pub fn placeholder(kind: SheetKind) -> Self {
        let [r, g, b] = kind.placeholder_color();
        let mut img = RgbaImage::new(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let dark = ((x / SPRITE_SIZE) + (y / SPRITE_SIZE)) % 2 == 0;
            *pixel = if dark {
                image::Rgba([r / 2, g / 2, b / 2, 255])
            } else {
                image::Rgba([r, g, b, 255])
            };
        }
        Self::new(DynamicImage::ImageRgba8(img))
    }

    /// Number of sprite columns
    pub fn columns(&self) -> u32 {
        self.width / SPRITE_SIZE
    }

    /// Number of sprite rows
    pub fn rows(&self) -> u32 {
        self.height / SPRITE_SIZE
    }

    pub fn sprite_count(&self) -> u32 {
        self.columns() * self.rows()
    }

    /// Extract one sprite. Sprites are numbered left-to-right, top-to-bottom.
    pub fn sprite(&self, index: u32) -> Option<RgbaImage> {
        if index >= self.sprite_count() {
            return None;
        }
        let x = (index % self.columns()) * SPRITE_SIZE;
        let y = (index / self.columns()) * SPRITE_SIZE;
        Some(self.image.view(x, y, SPRITE_SIZE, SPRITE_SIZE).to_image())
    }

    /// Raw pixels of the whole sheet
    pub fn pixels(&self) -> &RgbaImage {
        &self.image
    }
}

impl fmt::Debug for SpriteSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpriteSheet")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// The four sheets handed to the renderer in a single swap
#[derive(Debug, Clone)]
pub struct SheetSet {
    pub items: SpriteSheet,
    pub tiles: SpriteSheet,
    pub entities: SpriteSheet,
    pub gui: SpriteSheet,
}

impl SheetSet {
    /// Build a set from loaded slots, reporting every slot left empty.
    ///
    /// Slots are indexed in [`SheetKind::ALL`] order.
    pub fn from_slots(slots: [Option<SpriteSheet>; 4]) -> Result<Self, Vec<SheetKind>> {
        let missing: Vec<SheetKind> = SheetKind::ALL
            .iter()
            .copied()
            .filter(|kind| slots[kind.index()].is_none())
            .collect();

        match slots {
            [Some(items), Some(tiles), Some(entities), Some(gui)] => Ok(Self {
                items,
                tiles,
                entities,
                gui,
            }),
            _ => Err(missing),
        }
    }

    /// Placeholder set, never fails
    pub fn placeholders() -> Self {
        Self {
            items: SpriteSheet::placeholder(SheetKind::Items),
            tiles: SpriteSheet::placeholder(SheetKind::Tiles),
            entities: SpriteSheet::placeholder(SheetKind::Entities),
            gui: SpriteSheet::placeholder(SheetKind::Gui),
        }
    }

    /// Load built-in sheets from `<dir>/<kind>.png`, substituting a
    /// placeholder for each file that is missing or broken
    pub fn from_dir(dir: &Path) -> Self {
        let load = |kind: SheetKind| {
            let path = dir.join(kind.file_name());
            match SpriteSheet::from_file(&path) {
                Ok(sheet) => sheet,
                Err(e) => {
                    log::warn!("Built-in sheet {:?} unavailable ({}), using placeholder", path, e);
                    SpriteSheet::placeholder(kind)
                }
            }
        };

        Self {
            items: load(SheetKind::Items),
            tiles: load(SheetKind::Tiles),
            entities: load(SheetKind::Entities),
            gui: load(SheetKind::Gui),
        }
    }

    pub fn get(&self, kind: SheetKind) -> &SpriteSheet {
        match kind {
            SheetKind::Items => &self.items,
            SheetKind::Tiles => &self.tiles,
            SheetKind::Entities => &self.entities,
            SheetKind::Gui => &self.gui,
        }
    }
}
