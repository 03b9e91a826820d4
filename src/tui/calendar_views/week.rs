use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use chrono::Datelike;
use mandarina::{app::AppState, ui::week_view::WeekGrid};

const WORKDAY_HOURS: std::ops::Range<u32> = 6..22;
const CELL_WIDTH: usize = 9;

pub fn render(f: &mut Frame, app: &AppState, grid: &WeekGrid, area: ratatui::layout::Rect) {
    let theme = &app.theme;
    let anchor = app.calendar.anchor();

    let mut header_spans = vec![Span::raw("      ")];

    for day in &grid.days {
        let short: String = day.label.chars().take(3).collect();
        let day_str = format!(" {:>3} {:<2}  ", short, day.date.day());

        let style = if day.date == anchor {
            Style::default().bg(theme.primary).fg(theme.background).add_modifier(Modifier::BOLD)
        } else if day.is_today {
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.secondary)
        };

        header_spans.push(Span::styled(day_str, style));
    }

    let mut lines = vec![Line::from(header_spans), Line::from("")];

    let visible_rows = grid
        .hours
        .iter()
        .filter(|row| WORKDAY_HOURS.contains(&row.hour) || row.slots.iter().any(|slot| !slot.is_empty()));

    for row in visible_rows {
        let mut line_spans = vec![Span::styled(
            format!("{:02}:00 ", row.hour),
            Style::default().fg(theme.inactive_day),
        )];

        for slot in &row.slots {
            let span = match slot.tasks.first() {
                None => Span::raw(" ".repeat(CELL_WIDTH)),
                Some(first) => {
                    let text = if slot.tasks.len() > 1 {
                        format!("+{}", slot.tasks.len())
                    } else {
                        first.title.chars().take(CELL_WIDTH - 1).collect()
                    };
                    Span::styled(
                        format!(" {:<width$}", text, width = CELL_WIDTH - 1),
                        Style::default().fg(theme.priority_color(first.priority)),
                    )
                }
            };
            line_spans.push(span);
        }

        lines.push(Line::from(line_spans));
    }

    let content = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(format!(" {} ", app.calendar.period_title())),
    );
    f.render_widget(content, area);
}
