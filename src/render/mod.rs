//! Rendering assets
//!
//! Sprite sheets decoded from packs and the store the render loop reads.

pub mod sprites;
pub mod store;

pub use sprites::{SheetKind, SheetSet, SpriteSheet, SPRITE_SIZE};
pub use store::SheetStore;
