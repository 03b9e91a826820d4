use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use mandarina::app::AppState;

pub fn render(f: &mut Frame, app: &AppState) {
    let theme = &app.theme;
    let area = f.size();
    let help_width = 56.min(area.width);
    let help_height = 20.min(area.height);
    let x = (area.width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = ratatui::layout::Rect {
        x,
        y,
        width: help_width,
        height: help_height,
    };

    f.render_widget(Clear, help_area);

    let section = Style::default().fg(theme.secondary);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "mandarina Help",
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![Span::styled("Navigation:", section)]),
        Line::from("  h/l, ←/→  - Previous/next month, week or day"),
        Line::from("  t         - Jump to today"),
        Line::from(""),
        Line::from(vec![Span::styled("Views:", section)]),
        Line::from("  m/w/d     - Month/Week/Day view"),
        Line::from("  Enter     - Open day view"),
        Line::from(""),
        Line::from(vec![Span::styled("Tasks:", section)]),
        Line::from("  a         - Add task on the selected day"),
        Line::from("  r         - Reload tasks"),
        Line::from(""),
        Line::from(vec![Span::styled("Task form:", section)]),
        Line::from("  Tab/S-Tab - Next/previous field"),
        Line::from("  Space     - Cycle priority"),
        Line::from("  Enter     - Save task"),
        Line::from("  Esc       - Discard task"),
        Line::from(""),
        Line::from("  q         - Quit"),
    ];

    let visible_lines = help_height.saturating_sub(2) as usize;
    let total_lines = help_text.len();
    let max_scroll = total_lines.saturating_sub(visible_lines);
    let scroll = app.help_scroll.min(max_scroll);

    let scrolled_text: Vec<Line> = help_text.into_iter().skip(scroll).take(visible_lines).collect();

    let help_paragraph = Paragraph::new(scrolled_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Help (j/k to scroll, q to close) [{}/{}] ", scroll + 1, total_lines))
                .style(Style::default().bg(theme.background).fg(theme.foreground)),
        )
        .alignment(Alignment::Left);

    f.render_widget(help_paragraph, help_area);
}
