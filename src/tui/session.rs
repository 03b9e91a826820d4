use std::io;

use anyhow::Context;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use mandarina::{
    app::{AppState, Mode},
    input::{insert_mode, normal_mode},
    storage::{Config, ConfiguredIdentity, IdentityProvider, SqliteTaskStore, TaskStore},
    ui::{theme::Theme, weekday_labels::resolve_locale},
    view_model::CalendarViewModel,
};

use crate::tui::{
    presentation::ui,
    sample_tasks::{sample_store, SAMPLE_OWNER},
};

/// Opens the configured database, or a seeded in-memory one in sample mode.
pub fn open_store(config: &Config, sample: bool) -> anyhow::Result<(SqliteTaskStore, ConfiguredIdentity)> {
    if sample {
        let store = sample_store().context("Failed to seed sample tasks")?;
        return Ok((store, ConfiguredIdentity::new(Some(SAMPLE_OWNER))));
    }

    let path = &config.storage.database;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let store = SqliteTaskStore::open(path)
        .with_context(|| format!("Failed to open task database {}", path.display()))?;
    tracing::info!("Opened task database {}", path.display());

    Ok((store, ConfiguredIdentity::from_config(&config.user)))
}

pub async fn run_tui(sample: bool) -> anyhow::Result<()> {
    let config = Config::load_or_create()?;
    let (store, identity) = open_store(&config, sample)?;

    let calendar = CalendarViewModel::new()
        .with_view_mode(config.calendar.default_view)
        .with_locale(resolve_locale(&config.calendar.locale));
    let theme = Theme::get_by_name(&config.ui.theme);
    let mut app = AppState::new(calendar).with_theme(theme);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let ticket = app.activate();
    terminal.draw(|f| ui(f, &app)).ok();
    let load = mandarina::app::load_tasks(&store, &identity).await;
    app.apply_fetch(ticket, load);

    let res = run_app(&mut terminal, &mut app, &store, &identity).await;

    app.deactivate();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("TUI exited with error: {}", err);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    store: &dyn TaskStore,
    identity: &dyn IdentityProvider,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match app.mode {
                Mode::Normal => {
                    if app.show_help {
                        handle_help_keys(key.code, app);
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char('r') => {
                            app.notice = None;
                            terminal.draw(|f| ui(f, app))?;
                            app.refresh(store, identity).await;
                        }
                        _ => normal_mode::handle_key(key.code, app),
                    }
                }
                Mode::Insert => handle_insert_mode(key.code, app, terminal, store, identity).await?,
            }
        }
    }
}

fn handle_help_keys(code: KeyCode, app: &mut AppState) {
    match code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll = app.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll = app.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Esc => {
            app.show_help = false;
            app.help_scroll = 0;
        }
        _ => {}
    }
}

async fn handle_insert_mode<B: ratatui::backend::Backend>(
    code: KeyCode,
    app: &mut AppState,
    terminal: &mut Terminal<B>,
    store: &dyn TaskStore,
    identity: &dyn IdentityProvider,
) -> io::Result<()> {
    match code {
        KeyCode::Esc => {
            app.discard_task_form();
            app.notice = None;
        }
        KeyCode::Enter => {
            terminal.draw(|f| ui(f, app))?;
            // Failures are already surfaced as a notice and the form stays open.
            if let Ok(id) = app.submit_task_form(store, identity).await {
                tracing::info!("Task {} saved from form", id);
            }
        }
        _ => insert_mode::handle_key(code, app),
    }
    Ok(())
}
