//! Resource pack selector - Entry Point
//!
//! Lists installed packs, applies the chosen one and remembers it for the
//! next start.

use std::fs::OpenOptions;
use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use resourcepacks::config::{self, PackSettings};
use resourcepacks::i18n::Localization;
use resourcepacks::pack::{PackCatalog, PackHandle, PackSwitcher, SheetOutcome, SwitchSummary};
use resourcepacks::render::SheetStore;
use resourcepacks::ui::{MenuAction, MenuView, PackMenu};

type Switcher = PackSwitcher<SheetStore, Localization>;

/// How long to wait for input before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    // Log to a file so output does not tear the TUI
    let log_target: Box<dyn io::Write + Send> = match OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("resourcepacks.log")
    {
        Ok(file) => Box::new(file),
        Err(_) => Box::new(io::sink()),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(log_target))
        .init();

    log::info!("Starting resource pack selector v{}", env!("CARGO_PKG_VERSION"));

    let mut settings = config::load_settings();
    let mut switcher = build_switcher(&settings);
    restore_pack(&mut switcher, &settings);

    let mut menu = PackMenu::new(list_packs(&switcher));
    menu.focus(switcher.loaded_pack());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_menu_loop(&mut terminal, &mut menu, &mut switcher, &mut settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Selector exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("Resource pack selector shut down cleanly");
    result
}

fn build_switcher(settings: &PackSettings) -> Switcher {
    let packs_dir = settings.packs_dir();
    let renderer = SheetStore::from_assets(&settings.assets_dir);
    let mut localization = Localization::new(&settings.assets_dir, packs_dir.clone());
    localization.set_locale(&settings.locale);

    PackSwitcher::new(PackCatalog::new(packs_dir), renderer, localization)
}

/// Re-apply the pack from the last session, falling back to the built-in one
fn restore_pack(switcher: &mut Switcher, settings: &PackSettings) {
    let handle = settings.selected_handle();
    if switcher.switch(handle).is_err() {
        log::warn!("Stored pack {} unavailable, using {}", settings.selected_pack, PackHandle::Default);
        if let Err(e) = switcher.switch(PackHandle::Default) {
            log::error!("Could not apply built-in pack: {}", e);
        }
    }
}

fn list_packs(switcher: &Switcher) -> Vec<PackHandle> {
    switcher.catalog().list().unwrap_or_else(|e| {
        log::error!("Could not list resource packs in {:?}: {}", switcher.catalog().dir(), e);
        vec![PackHandle::Default]
    })
}

fn describe(summary: &SwitchSummary) -> String {
    let sheets = match &summary.sheets {
        SheetOutcome::Applied => "sheets applied".to_string(),
        SheetOutcome::Unchanged => "no textures, sheets kept".to_string(),
        SheetOutcome::Failed(e) => format!("sheets kept ({})", e),
    };
    format!(
        "Changed resource pack to {}: {}, {} localization files",
        summary.pack, sheets, summary.overrides
    )
}

fn run_menu_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    menu: &mut PackMenu,
    switcher: &mut Switcher,
    settings: &mut PackSettings,
) -> Result<()> {
    loop {
        let sheets = switcher.renderer().current();
        terminal.draw(|frame| {
            menu.render(
                frame,
                &MenuView {
                    loaded: switcher.loaded_pack(),
                    localization: switcher.localization(),
                    sheets: &sheets,
                },
            );
        })?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Only handle key press events, not releases
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match menu.handle_key(key) {
            MenuAction::None => {}
            MenuAction::Quit => break,
            MenuAction::Rescan => {
                menu.set_entries(list_packs(switcher));
                menu.set_status(format!("Found {} packs", menu.entries().len().saturating_sub(1)));
            }
            MenuAction::Select(pack) => match switcher.switch(pack) {
                Ok(summary) => {
                    menu.set_status(describe(&summary));
                    settings.selected_pack = summary.pack.name().to_string();
                    if let Err(e) = config::save_settings(settings) {
                        log::warn!("Could not save settings: {}", e);
                    }
                }
                Err(e) => menu.set_status(format!("Could not load pack: {}", e)),
            },
        }
    }

    Ok(())
}
