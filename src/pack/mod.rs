//! Resource pack pipeline
//!
//! archive -> classification -> sheet decode -> atomic swap -> localization merge

pub mod archive;
pub mod catalog;
pub mod classify;
pub mod localization;
pub mod sheets;
pub mod switcher;

#[cfg(test)]
pub(crate) mod test_support;

pub use archive::{ArchiveEntry, PackArchive};
pub use catalog::{PackCatalog, PackHandle, DEFAULT_PACK};
pub use classify::{classify, Category, ResourceCatalog};
pub use localization::{merge_localization, override_identifiers, LocalizationService};
pub use sheets::{load_sheets, update_sheets, SheetLoad, SheetOutcome, SheetRenderer};
pub use switcher::{PackSession, PackSwitcher, SwitchState, SwitchSummary};
