//! Resource packs - runtime asset pack loading
//!
//! Opens pack archives, classifies their contents, decodes the four sprite
//! sheets, swaps them into the renderer in one step and merges pack
//! localization on top of the built-in languages.

pub mod config;
pub mod error;
pub mod i18n;
pub mod pack;
pub mod render;
pub mod ui;

// Re-export commonly used types
pub use error::PackError;
pub use pack::{PackCatalog, PackHandle, PackSwitcher, SwitchSummary};
pub use render::{SheetSet, SheetStore, SpriteSheet};
