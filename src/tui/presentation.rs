use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use mandarina::{
    app::{AppState, LoadStatus, Mode, Notice},
    view_model::CalendarGrid,
};

use crate::tui::{calendar_views, dialogs};

pub fn ui(f: &mut Frame, app: &AppState) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(65),
            Constraint::Percentage(35),
        ])
        .split(main_chunks[1]);

    let title_text = format!(
        "mandarina - {} - {} View",
        app.calendar.period_title(),
        app.calendar.view_mode().label()
    );

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(app.theme.primary).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)));
    f.render_widget(title, main_chunks[0]);

    match app.grid() {
        CalendarGrid::Month(grid) => calendar_views::month::render(f, app, &grid, content_chunks[0]),
        CalendarGrid::Week(grid) => calendar_views::week::render(f, app, &grid, content_chunks[0]),
        CalendarGrid::Day(agenda) => calendar_views::day::render(f, app, &agenda, content_chunks[0]),
    }

    calendar_views::task_list::render(f, app, content_chunks[1]);

    let (status_text, status_color) = status_line(app);
    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)));
    f.render_widget(status, main_chunks[2]);

    if app.show_help {
        dialogs::help::render(f, app);
    }

    if app.mode == Mode::Insert && app.task_form.is_some() {
        dialogs::task_form::render(f, app);
    }
}

fn status_line(app: &AppState) -> (String, ratatui::style::Color) {
    match &app.notice {
        Some(Notice::Info(message)) => (message.clone(), app.theme.success),
        Some(Notice::Error(message)) => (message.clone(), app.theme.error),
        None => {
            let load = match &app.load_status {
                LoadStatus::Idle => "Idle".to_string(),
                LoadStatus::Loading => "Loading...".to_string(),
                LoadStatus::Loaded(count) => format!("Tasks: {}", count),
                LoadStatus::SignedOut => "Signed out".to_string(),
                LoadStatus::Error(e) => format!("Load failed: {}", e),
            };
            let color = match app.load_status {
                LoadStatus::Error(_) => app.theme.error,
                _ => app.theme.foreground,
            };
            (format!("{} | Press 'q' to quit, '?' for help", load), color)
        }
    }
}
