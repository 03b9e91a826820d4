use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use mandarina::app::{AppState, FormField, TaskForm};

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(form) = &app.task_form else {
        return;
    };

    let theme = &app.theme;
    let area = f.size();
    let form_width = 64.min(area.width);
    let form_height = 16.min(area.height);
    let x = (area.width.saturating_sub(form_width)) / 2;
    let y = (area.height.saturating_sub(form_height)) / 2;

    let form_area = ratatui::layout::Rect {
        x,
        y,
        width: form_width,
        height: form_height,
    };

    f.render_widget(Clear, form_area);

    let label_style = |field: FormField| {
        if form.active_field == field {
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.inactive_day)
        }
    };

    let form_text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Title: ", label_style(FormField::Title)),
            Span::raw(&form.draft.title),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Description: ", label_style(FormField::Description)),
            Span::raw(&form.draft.description),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Priority: ", label_style(FormField::Priority)),
            Span::styled(
                form.draft.priority.as_str().to_lowercase(),
                Style::default().fg(theme.priority_color(form.draft.priority)),
            ),
            Span::styled(hint(form, FormField::Priority), Style::default().fg(theme.inactive_day)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Date: ", label_style(FormField::Date)),
            Span::raw(&form.date_input_buffer),
            Span::styled(hint(form, FormField::Date), Style::default().fg(theme.inactive_day)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Time: ", label_style(FormField::Time)),
            Span::raw(&form.time_input_buffer),
            Span::styled(hint(form, FormField::Time), Style::default().fg(theme.inactive_day)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Tab", Style::default().fg(theme.secondary)),
            Span::raw(" = Next field | "),
            Span::styled("Enter", Style::default().fg(theme.success)),
            Span::raw(" = Save | "),
            Span::styled("Esc", Style::default().fg(theme.error)),
            Span::raw(" = Cancel"),
        ]),
    ];

    let form_paragraph = Paragraph::new(form_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary))
                .title(" New Task ")
                .style(Style::default().bg(theme.background).fg(theme.foreground)),
        )
        .alignment(Alignment::Left);

    f.render_widget(form_paragraph, form_area);
}

fn hint(form: &TaskForm, field: FormField) -> &'static str {
    if form.active_field != field {
        return "";
    }

    match field {
        FormField::Priority => " [space to change]",
        FormField::Date if form.date_buffer_touched => " (YYYY-MM-DD)",
        FormField::Time if form.time_buffer_touched => " (HH:MM or HHMM)",
        FormField::Date | FormField::Time => " [type to replace]",
        _ => "",
    }
}
