//! Terminal UI for choosing a resource pack

pub mod menu;

pub use menu::{MenuAction, MenuView, PackMenu};
