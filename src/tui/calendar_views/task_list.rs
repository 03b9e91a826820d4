use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use mandarina::{app::AppState, calendar::TaskStatus};

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let theme = &app.theme;
    let anchor = app.calendar.anchor();
    let tasks = app.tasks_on(anchor);

    let mut lines = vec![
        Line::from(vec![Span::styled(
            format!("Tasks on {}", anchor.format("%B %d, %Y")),
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
    ];

    if tasks.is_empty() {
        lines.push(Line::from(vec![Span::styled("No tasks", Style::default().fg(theme.inactive_day))]));
    }

    for task in tasks {
        let title_style = if task.status == TaskStatus::Completed {
            Style::default().fg(theme.inactive_day).add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(theme.foreground)
        };

        lines.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(theme.priority_color(task.priority))),
            Span::styled(task.due.format("%H:%M").to_string(), Style::default().fg(theme.secondary)),
            Span::raw(" "),
            Span::styled(&task.title, title_style),
        ]));

        if let Some(description) = &task.description {
            lines.push(Line::from(vec![
                Span::raw("        "),
                Span::styled(description, Style::default().fg(theme.inactive_day)),
            ]));
        }
    }

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme.border)));
    f.render_widget(content, area);
}
