use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use mandarina::{app::AppState, ui::day_view::DayAgenda};

pub fn render(f: &mut Frame, app: &AppState, agenda: &DayAgenda, area: ratatui::layout::Rect) {
    let theme = &app.theme;
    let mut lines = Vec::new();

    for slot in agenda.busy_slots() {
        lines.push(Line::from(vec![Span::styled(
            format!("{:02}:00", slot.hour),
            Style::default().fg(theme.secondary).add_modifier(Modifier::BOLD),
        )]));

        for task in &slot.tasks {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}", task.due.format("%H:%M")), Style::default().fg(theme.inactive_day)),
                Span::raw(" "),
                Span::styled(&task.title, Style::default().fg(theme.foreground)),
                Span::styled(
                    format!(" ({})", task.priority.as_str().to_lowercase()),
                    Style::default().fg(theme.priority_color(task.priority)),
                ),
            ]));

            if let Some(description) = &task.description {
                lines.push(Line::from(vec![
                    Span::raw("        "),
                    Span::styled(description, Style::default().fg(theme.inactive_day)),
                ]));
            }
        }

        lines.push(Line::from(""));
    }

    if lines.is_empty() {
        lines.push(Line::from(vec![Span::styled(
            "No tasks scheduled",
            Style::default().fg(theme.inactive_day),
        )]));
    }

    let title_style = if agenda.is_today {
        Style::default().fg(theme.success).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.primary)
    };

    let content = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled(format!(" {} ", app.calendar.period_title()), title_style)),
    );
    f.render_widget(content, area);
}
