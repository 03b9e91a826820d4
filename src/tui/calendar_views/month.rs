use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use chrono::Datelike;
use mandarina::{app::AppState, ui::month_view::MonthGrid};

pub fn render(f: &mut Frame, app: &AppState, grid: &MonthGrid, area: ratatui::layout::Rect) {
    let theme = &app.theme;
    let anchor = app.calendar.anchor();

    let header_spans: Vec<Span> = grid
        .weekday_labels
        .iter()
        .map(|label| {
            let short: String = label.chars().take(3).collect();
            Span::styled(format!(" {:>3} ", short), Style::default().fg(theme.secondary))
        })
        .collect();

    let mut lines = vec![Line::from(header_spans), Line::from("")];

    for row in &grid.rows {
        let mut day_spans = Vec::new();

        for cell in row {
            let marker = if cell.tasks.is_empty() { ' ' } else { '•' };
            let day_text = format!(" {:>2}{}  ", cell.date.day(), marker);

            let mut style = Style::default().fg(theme.foreground);

            if cell.is_padding {
                style = style.fg(theme.inactive_day);
            } else if cell.date == anchor {
                style = style.bg(theme.primary).fg(theme.background).add_modifier(Modifier::BOLD);
            } else if cell.is_today {
                style = style.fg(theme.success).add_modifier(Modifier::BOLD);
            }

            if !cell.tasks.is_empty() {
                style = style.add_modifier(Modifier::UNDERLINED);
            }

            day_spans.push(Span::styled(day_text, style));
        }

        lines.push(Line::from(day_spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("h/l", Style::default().fg(theme.secondary)),
        Span::raw(" = Prev/next month | "),
        Span::styled("a", Style::default().fg(theme.success)),
        Span::raw(" = Add task | "),
        Span::styled("Enter", Style::default().fg(theme.success)),
        Span::raw(" = Day view | "),
        Span::styled("m/w/d", Style::default().fg(theme.secondary)),
        Span::raw(" = Views"),
    ]));

    let content = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(format!(" {} ", app.calendar.period_title())),
    );
    f.render_widget(content, area);
}
