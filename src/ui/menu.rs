//! Resource pack selection menu

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::i18n::Localization;
use crate::pack::PackHandle;
use crate::render::{SheetKind, SheetSet};

/// What the caller should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    None,
    /// Apply the highlighted pack
    Select(PackHandle),
    /// Re-read the packs directory
    Rescan,
    Quit,
}

/// Everything the menu shows besides its own list
pub struct MenuView<'a> {
    pub loaded: &'a PackHandle,
    pub localization: &'a Localization,
    pub sheets: &'a SheetSet,
}

/// Cursor-driven list of installed packs
pub struct PackMenu {
    entries: Vec<PackHandle>,
    cursor: usize,
    status: Option<String>,
}

impl PackMenu {
    pub fn new(entries: Vec<PackHandle>) -> Self {
        Self {
            entries,
            cursor: 0,
            status: None,
        }
    }

    pub fn entries(&self) -> &[PackHandle] {
        &self.entries
    }

    /// Replace the list, keeping the cursor on the same pack when possible
    pub fn set_entries(&mut self, entries: Vec<PackHandle>) {
        let current = self.selected().cloned();
        self.entries = entries;
        self.cursor = current
            .and_then(|pack| self.entries.iter().position(|p| *p == pack))
            .unwrap_or(0);
    }

    /// Move the cursor onto `pack` if it is listed
    pub fn focus(&mut self, pack: &PackHandle) {
        if let Some(index) = self.entries.iter().position(|p| p == pack) {
            self.cursor = index;
        }
    }

    pub fn selected(&self) -> Option<&PackHandle> {
        self.entries.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn move_up(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.cursor = self.cursor.checked_sub(1).unwrap_or(self.entries.len() - 1);
    }

    fn move_down(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.entries.len();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> MenuAction {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return MenuAction::Quit;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_up();
                MenuAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_down();
                MenuAction::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.selected() {
                Some(pack) => MenuAction::Select(pack.clone()),
                None => MenuAction::None,
            },
            KeyCode::Char('r') => MenuAction::Rescan,
            KeyCode::Esc | KeyCode::Char('q') => MenuAction::Quit,
            _ => MenuAction::None,
        }
    }

    pub fn render(&self, frame: &mut Frame, view: &MenuView) {
        let loc = view.localization;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(2),
            ])
            .split(frame.area());

        // Title
        let title = Paragraph::new(Line::from(Span::styled(
            loc.get("Resource Packs"),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(title, chunks[0]);

        // Pack list
        let lines: Vec<Line> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, pack)| {
                let label = if pack.is_default() {
                    loc.get("Default").to_string()
                } else {
                    pack.name().to_string()
                };
                let marker = if pack == view.loaded {
                    format!("  ({})", loc.get("Loaded"))
                } else {
                    String::new()
                };

                if i == self.cursor {
                    Line::from(Span::styled(
                        format!("> {}{} <", label, marker),
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(
                        format!("{}{}", label, marker),
                        Style::default().fg(Color::Gray),
                    ))
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[1]);

        // Status and active sheets
        let sheet_info = SheetKind::ALL
            .iter()
            .map(|kind| {
                let sheet = view.sheets.get(*kind);
                format!("{} {}x{}", kind, sheet.width, sheet.height)
            })
            .collect::<Vec<_>>()
            .join("  ");
        let mut status = vec![Line::from(Span::styled(
            sheet_info,
            Style::default().fg(Color::DarkGray),
        ))];
        if let Some(message) = &self.status {
            status.insert(0, Line::from(Span::styled(message.as_str(), Style::default().fg(Color::Cyan))));
        }
        frame.render_widget(Paragraph::new(status).alignment(Alignment::Center), chunks[2]);

        // Key hints
        let hints = vec![
            Line::from(Span::styled(
                format!("Up/Down {}, Enter {}", loc.get("to move"), loc.get("to select")),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                format!("R {}, Esc {}", loc.get("to rescan"), loc.get("to quit")),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(hints).alignment(Alignment::Center), chunks[3]);
    }
}
