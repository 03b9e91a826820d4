use crossterm::event::KeyCode;

use crate::app::AppState;
use crate::view_model::{Direction, ViewMode};

/// Keys that only touch local state. Quit and refresh need the store and
/// are handled by the session loop.
pub fn handle_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Char('h') | KeyCode::Left => navigate(state, Direction::Previous),
        KeyCode::Char('l') | KeyCode::Right => navigate(state, Direction::Next),
        KeyCode::Char('t') => jump_to_today(state),
        KeyCode::Char('m') => switch_view(state, ViewMode::Month),
        KeyCode::Char('w') => switch_view(state, ViewMode::Week),
        KeyCode::Char('d') => switch_view(state, ViewMode::Day),
        KeyCode::Char('a') => state.open_task_form(),
        KeyCode::Enter => open_day(state),
        KeyCode::Char('?') => state.show_help = true,
        _ => {}
    }
}

fn navigate(state: &mut AppState, direction: Direction) {
    state.calendar.navigate(direction);
    state.notice = None;
}

fn jump_to_today(state: &mut AppState) {
    state.calendar.reset_to_today();
    state.notice = None;
}

fn switch_view(state: &mut AppState, mode: ViewMode) {
    state.calendar.set_view_mode(mode);
}

fn open_day(state: &mut AppState) {
    if state.calendar.view_mode() != ViewMode::Day {
        state.calendar.set_view_mode(ViewMode::Day);
    }
}
