use crossterm::event::KeyCode;

use crate::app::{AppState, FormField, Notice};

/// Edits the open task form. Enter and Esc are left to the session loop,
/// which owns the store.
pub fn handle_key(key: KeyCode, state: &mut AppState) {
    let Some(form) = state.task_form.as_mut() else {
        return;
    };

    let moved = match key {
        KeyCode::Tab => Some(form.next_field()),
        KeyCode::BackTab => Some(form.prev_field()),
        KeyCode::Backspace => {
            match form.active_field {
                FormField::Title => {
                    form.draft.title.pop();
                }
                FormField::Description => {
                    form.draft.description.pop();
                }
                FormField::Priority => {}
                FormField::Date => {
                    form.date_input_buffer.pop();
                    form.date_buffer_touched = true;
                }
                FormField::Time => {
                    form.time_input_buffer.pop();
                    form.time_buffer_touched = true;
                }
            }
            None
        }
        KeyCode::Char(c) => {
            match form.active_field {
                FormField::Title => form.draft.title.push(c),
                FormField::Description => form.draft.description.push(c),
                FormField::Priority => {
                    if c == ' ' {
                        form.draft.priority = form.draft.priority.next();
                    }
                }
                FormField::Date => {
                    if c.is_ascii_digit() || c == '-' {
                        if !form.date_buffer_touched {
                            form.date_input_buffer.clear();
                            form.date_buffer_touched = true;
                        }
                        if form.date_input_buffer.len() < 10 {
                            form.date_input_buffer.push(c);
                        }
                    }
                }
                FormField::Time => {
                    if c.is_ascii_digit() || c == ':' {
                        if !form.time_buffer_touched {
                            form.time_input_buffer.clear();
                            form.time_buffer_touched = true;
                        }
                        if form.time_input_buffer.len() < 5 {
                            form.time_input_buffer.push(c);
                        }
                    }
                }
            }
            None
        }
        _ => None,
    };

    if let Some(Err(e)) = moved {
        state.notice = Some(Notice::Error(e.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Priority;
    use crate::view_model::CalendarViewModel;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn state_with_form() -> AppState {
        let mut state = AppState::new(CalendarViewModel::starting_at(date(2024, 3, 10)));
        state.open_task_form_at(date(2024, 3, 10).and_hms_opt(14, 30, 0).unwrap());
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(KeyCode::Char(c), state);
        }
    }

    fn tab_to(state: &mut AppState, field: FormField) {
        while state.task_form.as_ref().unwrap().active_field != field {
            handle_key(KeyCode::Tab, state);
        }
    }

    #[test]
    fn typing_fills_title() {
        let mut state = state_with_form();

        type_text(&mut state, "Buy milk");
        handle_key(KeyCode::Backspace, &mut state);

        assert_eq!(state.task_form.as_ref().unwrap().draft.title, "Buy mil");
    }

    #[test]
    fn space_cycles_priority() {
        let mut state = state_with_form();
        tab_to(&mut state, FormField::Priority);

        handle_key(KeyCode::Char(' '), &mut state);

        assert_eq!(state.task_form.as_ref().unwrap().draft.priority, Priority::Medium);
    }

    #[test]
    fn editing_date_then_time_composes_both() {
        let mut state = state_with_form();

        tab_to(&mut state, FormField::Date);
        type_text(&mut state, "2024-03-12");
        handle_key(KeyCode::Tab, &mut state);
        type_text(&mut state, "0915");
        handle_key(KeyCode::Tab, &mut state);

        let due = state.task_form.as_ref().unwrap().draft.compose_due();
        assert_eq!(due, date(2024, 3, 12).and_hms_opt(9, 15, 0).unwrap());
    }

    #[test]
    fn editing_only_the_date_keeps_picked_time() {
        let mut state = state_with_form();

        tab_to(&mut state, FormField::Date);
        type_text(&mut state, "2024-03-12");
        handle_key(KeyCode::Tab, &mut state);
        handle_key(KeyCode::Tab, &mut state);

        let due = state.task_form.as_ref().unwrap().draft.compose_due();
        assert_eq!(due, date(2024, 3, 12).and_hms_opt(14, 0, 0).unwrap());
    }

    #[test]
    fn bad_date_is_reported_and_reverted() {
        let mut state = state_with_form();

        tab_to(&mut state, FormField::Date);
        type_text(&mut state, "2024-13-01");
        handle_key(KeyCode::Tab, &mut state);

        let form = state.task_form.as_ref().unwrap();
        assert_eq!(form.date_input_buffer, "2024-03-10");
        assert!(matches!(state.notice, Some(Notice::Error(_))));
    }

    #[test]
    fn non_digits_are_ignored_in_time_field() {
        let mut state = state_with_form();

        tab_to(&mut state, FormField::Time);
        type_text(&mut state, "ab1x2");

        assert_eq!(state.task_form.as_ref().unwrap().time_input_buffer, "12");
    }

    #[test]
    fn keys_without_form_are_ignored() {
        let mut state = AppState::new(CalendarViewModel::starting_at(date(2024, 3, 10)));

        handle_key(KeyCode::Char('x'), &mut state);

        assert!(state.task_form.is_none());
    }
}
