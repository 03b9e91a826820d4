use chrono::{Local, Locale, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::dates::{add_days, add_months_clamped, week_start};
use crate::calendar::Task;
use crate::ui::day_view::{self, DayAgenda};
use crate::ui::month_view::{self, MonthGrid};
use crate::ui::week_view::{self, WeekGrid};
use crate::ui::weekday_labels::WeekdayLabels;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    Month,
    Week,
    Day,
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Month => "Month",
            ViewMode::Week => "Week",
            ViewMode::Day => "Day",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn sign(&self) -> i32 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum CalendarGrid {
    Month(MonthGrid),
    Week(WeekGrid),
    Day(DayAgenda),
}

impl CalendarGrid {
    pub fn task_count(&self) -> usize {
        match self {
            CalendarGrid::Month(grid) => grid.task_count(),
            CalendarGrid::Week(grid) => grid.task_count(),
            CalendarGrid::Day(agenda) => agenda.task_count(),
        }
    }

    pub fn shows_today(&self) -> bool {
        match self {
            CalendarGrid::Month(grid) => grid.cells().any(|cell| cell.is_today),
            CalendarGrid::Week(grid) => grid.days.iter().any(|day| day.is_today),
            CalendarGrid::Day(agenda) => agenda.is_today,
        }
    }
}

/// What period the calendar shows and how it is laid out.
///
/// Grids are rebuilt from scratch on every call to [`build_grid`]; nothing
/// is cached between renders except the weekday labels of the locale.
///
/// [`build_grid`]: CalendarViewModel::build_grid
#[derive(Debug, Clone)]
pub struct CalendarViewModel {
    anchor: NaiveDate,
    view_mode: ViewMode,
    labels: WeekdayLabels,
}

impl CalendarViewModel {
    pub fn new() -> Self {
        Self::starting_at(Local::now().date_naive())
    }

    pub fn starting_at(anchor: NaiveDate) -> Self {
        Self {
            anchor,
            view_mode: ViewMode::Month,
            labels: WeekdayLabels::default(),
        }
    }

    pub fn with_view_mode(mut self, mode: ViewMode) -> Self {
        self.view_mode = mode;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.labels = WeekdayLabels::new(locale);
        self
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn weekday_labels(&self) -> &[String] {
        self.labels.labels()
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Moves the anchor one period of the current view.
    pub fn navigate(&mut self, direction: Direction) {
        let step = direction.sign();
        self.anchor = match self.view_mode {
            ViewMode::Month => add_months_clamped(self.anchor, step),
            ViewMode::Week => add_days(self.anchor, 7 * step as i64),
            ViewMode::Day => add_days(self.anchor, step as i64),
        };
        tracing::debug!("Navigated {:?} in {} view to {}", direction, self.view_mode.label(), self.anchor);
    }

    pub fn reset_to_today(&mut self) {
        self.reset_to(Local::now().date_naive());
    }

    pub fn reset_to(&mut self, today: NaiveDate) {
        self.anchor = today;
    }

    pub fn build_grid(&self, tasks: &[Task]) -> CalendarGrid {
        self.build_grid_on(tasks, Local::now().date_naive())
    }

    pub fn build_grid_on(&self, tasks: &[Task], today: NaiveDate) -> CalendarGrid {
        match self.view_mode {
            ViewMode::Month => {
                CalendarGrid::Month(month_view::build(self.anchor, tasks, today, self.labels.labels()))
            }
            ViewMode::Week => {
                CalendarGrid::Week(week_view::build(self.anchor, tasks, today, self.labels.labels()))
            }
            ViewMode::Day => CalendarGrid::Day(day_view::build(self.anchor, tasks, today)),
        }
    }

    /// Heading for the displayed period.
    pub fn period_title(&self) -> String {
        match self.view_mode {
            ViewMode::Month => self.anchor.format("%B %Y").to_string(),
            ViewMode::Week => {
                let start = week_start(self.anchor);
                let end = add_days(start, 6);
                format!("{} - {}", start.format("%b %d"), end.format("%b %d, %Y"))
            }
            ViewMode::Day => self.anchor.format("%A, %B %d, %Y").to_string(),
        }
    }
}

impl Default for CalendarViewModel {
    fn default() -> Self {
        Self::new()
    }
}
